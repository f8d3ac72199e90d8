//! Rendering of lookup outcomes: Telegram HTML replies and a plain-text report for the CLI.

use std::fmt::Write as _;

use results_client::{FetchOutcome, ResultPayload, StudentInfo, SubjectResult, UNAVAILABLE};
use results_core::Reply;
use teloxide::utils::html::escape;

use crate::media::MediaSelector;
use crate::messages;

/// Replies for a resolved outcome (see [`FetchOutcome::resolve_empty`]).
pub fn render_outcome(outcome: &FetchOutcome, media: &MediaSelector) -> Vec<Reply> {
    match outcome {
        FetchOutcome::Success(payload) => render_success(payload, media),
        FetchOutcome::NotFound => vec![Reply::text(messages::NOT_FOUND)],
        FetchOutcome::TransientFailure(_) | FetchOutcome::Exhausted { .. } => {
            vec![Reply::text(messages::SERVER_BUSY)]
        }
    }
}

fn render_success(payload: &ResultPayload, media: &MediaSelector) -> Vec<Reply> {
    let mut replies = vec![Reply::text(student_block(&payload.student))];
    replies.push(Reply::text(subjects_block(payload)));
    let aggregate = payload.aggregate_score().unwrap_or(0.0);
    replies.push(media.select(aggregate).into_reply());
    replies.push(Reply::with_keyboard(
        messages::RETRIEVED,
        messages::after_result_keyboard(),
    ));
    replies
}

pub fn student_block(student: &StudentInfo) -> String {
    format!(
        "👨‍🎓 <b>STUDENT INFORMATION</b>\n\n\
         📝 <b>Name:</b> {}\n\
         🎓 <b>Admission No:</b> {}\n\
         👤 <b>Gender:</b> {}\n\
         🏫 <b>School:</b> {}\n\
         📚 <b>Stream:</b> {}",
        escape(&student.full_name),
        escape(&student.admission_no),
        escape(&student.sex),
        escape(&student.school),
        escape(&student.stream),
    )
}

pub fn subjects_block(payload: &ResultPayload) -> String {
    if payload.is_empty() {
        return messages::NO_SUBJECTS.to_string();
    }
    let mut text = String::from("📊 <b>SUBJECT RESULTS</b>\n\n");
    for SubjectResult { subject, score } in &payload.subjects {
        let _ = writeln!(
            text,
            "📖 <b>{}:</b> {}",
            escape(subject),
            escape(&score.to_string())
        );
    }
    if let Some(total) = payload.total() {
        let _ = write!(
            text,
            "\n🎯 <b>Total Result:</b> {}",
            escape(&total.score.to_string())
        );
    }
    text
}

/// Plain-text report for terminal output.
pub fn plain_report(outcome: &FetchOutcome) -> String {
    let rule = "=".repeat(50);
    match outcome {
        FetchOutcome::Success(payload) => {
            let s = &payload.student;
            let mut out = String::new();
            let _ = writeln!(out, "{rule}\nSTUDENT INFORMATION\n{rule}");
            for (label, value) in [
                ("Full Name", &s.full_name),
                ("Admission No.", &s.admission_no),
                ("Sex", &s.sex),
                ("School", &s.school),
                ("Stream", &s.stream),
                ("Photo URL", &s.photo_url),
                ("Print URL", &s.print_url),
            ] {
                let _ = writeln!(out, "{label:<13}: {value}");
            }
            let _ = writeln!(out, "\n{rule}\nRESULTS\n{rule}");
            if payload.is_empty() {
                let _ = writeln!(out, "No results found.");
            }
            for r in &payload.subjects {
                let _ = writeln!(out, "{:<30}: {}", r.subject, r.score);
            }
            if let Some(aggregate) = payload.aggregate_score() {
                let total = payload
                    .total()
                    .map(|t| t.score.to_string())
                    .unwrap_or_else(|| UNAVAILABLE.to_string());
                let _ = writeln!(out, "\nTotal: {total} (aggregate {aggregate})");
            }
            out
        }
        FetchOutcome::NotFound => {
            "No results found. Check the admission number and first name.\n".to_string()
        }
        FetchOutcome::TransientFailure(reason) => {
            format!("Failed to retrieve results: {reason}\n")
        }
        FetchOutcome::Exhausted {
            attempts,
            last_failure,
        } => match last_failure {
            Some(reason) => {
                format!("Failed to retrieve results after {attempts} attempts (last error: {reason})\n")
            }
            None => format!("Failed to retrieve results after {attempts} attempts\n"),
        },
    }
}
