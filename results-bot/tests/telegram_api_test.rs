//! Reply delivery against a mock Telegram Bot API (mockito).
//!
//! Teloxide request path format is `/bot<token>/<Method>`, with the method name in PascalCase.

use std::path::PathBuf;

use mockito::Matcher;
use results_bot::config::{BotConfig, ClientConfig};
use results_bot::messages;
use results_bot::runner::build_teloxide_bot;
use results_client::DEFAULT_ENDPOINT;
use results_core::{Bot, Chat, Reply, TelegramBot};

const TEST_BOT_TOKEN: &str = "test_bot_token_12345";
const CHAT_ID: i64 = 123;

const SENT_MESSAGE: &str = r#"{
    "ok": true,
    "result": {
        "message_id": 1,
        "date": 1706529600,
        "chat": {"id": 123, "type": "private"},
        "from": {"id": 123456789, "is_bot": true, "first_name": "ResultsBot", "username": "resultsbot"},
        "text": "ok"
    }
}"#;

fn config_for(server: &mockito::ServerGuard) -> BotConfig {
    BotConfig {
        telegram_api_url: Some(server.url()),
        ..config_for_offline()
    }
}

fn send_message_path() -> String {
    format!("/bot{}/SendMessage", TEST_BOT_TOKEN)
}

#[tokio::test]
async fn test_send_text_uses_html_and_inline_keyboard() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", send_message_path().as_str())
        .match_body(Matcher::PartialJson(serde_json::json!({
            "chat_id": CHAT_ID,
            "text": messages::WELCOME,
            "parse_mode": "HTML",
            "reply_markup": {
                "inline_keyboard": [
                    [{"text": "🔍 Check Results", "callback_data": "start_check"}],
                    [{"text": "❓ Help", "callback_data": "help"}]
                ]
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SENT_MESSAGE)
        .create_async()
        .await;

    let bot = TelegramBot::from_bot(build_teloxide_bot(&config_for(&server)).unwrap());
    let reply = Reply::with_keyboard(messages::WELCOME, messages::start_keyboard());

    bot.send_reply(&Chat::new(CHAT_ID), &reply).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_animation_falls_back_to_caption() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", send_message_path().as_str())
        .match_body(Matcher::PartialJson(serde_json::json!({
            "chat_id": CHAT_ID,
            "text": messages::NOT_PASSED_CAPTION,
            "parse_mode": "HTML"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(SENT_MESSAGE)
        .expect(1)
        .create_async()
        .await;

    let bot = TelegramBot::from_bot(build_teloxide_bot(&config_for(&server)).unwrap());
    let reply = Reply::Animation {
        path: PathBuf::from("/nonexistent/assets/sushichaeng-tom-and-jerry.gif"),
        caption: messages::NOT_PASSED_CAPTION.to_string(),
    };

    bot.send_reply(&Chat::new(CHAT_ID), &reply).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_api_error_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", send_message_path().as_str())
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#)
        .create_async()
        .await;

    let bot = TelegramBot::from_bot(build_teloxide_bot(&config_for(&server)).unwrap());

    let err = bot
        .send_text(&Chat::new(CHAT_ID), "hello", None)
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert!(
        err.to_string().contains("chat not found"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_invalid_api_url_is_rejected() {
    let mut config = BotConfig {
        telegram_api_url: Some("not a url".to_string()),
        ..config_for_offline()
    };
    assert!(build_teloxide_bot(&config).is_err());
    config.telegram_api_url = None;
    assert!(build_teloxide_bot(&config).is_ok());
}

fn config_for_offline() -> BotConfig {
    BotConfig {
        bot_token: TEST_BOT_TOKEN.to_string(),
        telegram_api_url: None,
        log_file: "logs/test.log".to_string(),
        assets_dir: PathBuf::from("assets"),
        health_port: 8080,
        client: ClientConfig {
            results_api_url: DEFAULT_ENDPOINT.to_string(),
            max_attempts: None,
            timeout_secs: None,
        },
    }
}
