//! Scripted chat replies for the exam help channel. Keyword match only.

pub const HELP_REPLY: &str =
    "A proctor has been notified. Please stay on the exam page while we look into it.";
pub const TIME_REPLY: &str = "Your remaining time is shown in the timer at the top of the exam.";
pub const DEFAULT_REPLY: &str = "Thanks, your message has been received. Please continue with your exam.";

pub fn scripted_reply(message: &str) -> &'static str {
    let lower = message.to_lowercase();
    if lower.contains("help") {
        HELP_REPLY
    } else if lower.contains("time") {
        TIME_REPLY
    } else {
        DEFAULT_REPLY
    }
}
