//! Static reply texts (Telegram HTML).

use results_core::{Action, Button, Keyboard};

pub const WELCOME: &str = "🎓 <b>Welcome to Grade 12 Results Checker!</b>

I can help you check your Ethiopian Grade 12 examination results quickly and easily.

📋 <b>What I need from you:</b>
1️⃣ Your admission number
2️⃣ Your first name

🔍 <b>How to use:</b>
• Send /check to start checking your results
• Send /help if you need assistance
• Send /cancel anytime to stop

Let's get started! Send /check to begin. 🚀";

pub const ASK_ADMISSION: &str = "📝 <b>Step 1 of 2: Admission Number</b>

Please send me your <b>admission number</b>.

💡 <i>Tip:</i> This is the number you received when you registered for the exam.

Example: 1234567890";

pub const INVALID_ADMISSION: &str = "❌ Please enter a valid admission number.\n\nTry again:";

pub const INVALID_NAME: &str = "❌ Please enter a valid first name.\n\nTry again:";

pub const HELP: &str = "❓ <b>How to Use Grade 12 Results Checker</b>

🔍 <b>To check your results:</b>
1. Send /check or tap \"Check Results\"
2. Enter your admission number
3. Enter your first name
4. Wait for your results!

📋 <b>Commands:</b>
• /start - Welcome message
• /check - Start checking results
• /help - Show this help message
• /cancel - Cancel current operation

💡 <b>Tips:</b>
• Make sure your admission number and name are correct
• Use the same spelling as in your official documents
• If results aren't found, double-check your information

🆘 <b>Need more help?</b>
Contact the bot administrator for assistance.";

pub const CANCELLED: &str = "❌ <b>Operation cancelled.</b>\n\nSend /check to start checking results again.";

pub const IDLE_HINT: &str = "👋 Send /check to look up your results, or /help for instructions.";

pub const CHECKING: &str = "🔍 <b>Checking your results...</b>

⏳ Please wait while I fetch your information from the server.

This may take a few moments...";

pub const NOT_FOUND: &str = "❌ <b>Sorry, I couldn't find your results.</b>

This could be because:
• The admission number or name is incorrect
• Your results are not yet available

💡 <b>Try again:</b> Send /check to start over";

pub const SERVER_BUSY: &str = "❌ <b>The results server is not responding right now.</b>

It might be experiencing high traffic. Please try again later.

💡 <b>Try again:</b> Send /check to start over";

pub const NO_SUBJECTS: &str = "📊 <b>No subject results found.</b>";

pub const RETRIEVED: &str = "✅ <b>Results retrieved successfully!</b>

Need to check another result? Use the button below:";

pub const PASSED_CAPTION: &str = "🎉 <b>Congratulations! You passed!</b> 🎉\n\nYour hard work paid off!";

pub const NOT_PASSED_CAPTION: &str = "😔 <b>You didn't pass this time</b>

Don't give up! You can try again next time. Keep studying and you'll succeed! 💪";

/// Step-2 prompt, echoing the (escaped) admission number.
pub fn ask_name(admission_no: &str) -> String {
    format!(
        "✅ <b>Admission Number Received: {}</b>

📝 <b>Step 2 of 2: First Name</b>

Now please send me your <b>first name</b> exactly as it appears on your exam registration.

💡 <i>Tip:</i> Use the same spelling as in your official documents.",
        teloxide::utils::html::escape(admission_no)
    )
}

/// [Check Results] [Help]
pub fn start_keyboard() -> Keyboard {
    Keyboard::column(vec![
        Button::new("🔍 Check Results", Action::StartCheck),
        Button::new("❓ Help", Action::Help),
    ])
}

/// [Check Results]
pub fn help_keyboard() -> Keyboard {
    Keyboard::column(vec![Button::new("🔍 Check Results", Action::StartCheck)])
}

/// [Check Another Result] [Help]
pub fn after_result_keyboard() -> Keyboard {
    Keyboard::column(vec![
        Button::new("🔍 Check Another Result", Action::StartCheck),
        Button::new("❓ Help", Action::Help),
    ])
}
