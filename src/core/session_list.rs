//! Sidebar summary of the active day's session.

use crate::core::conversation::{Message, Sender};
use crate::core::locale::Locale;

/// Titles longer than this many characters are cut and suffixed with `...`.
pub const MAX_TITLE_CHARS: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub title: String,
    pub date: String,
}

/// Summarize a conversation for the sidebar.
///
/// Returns `None` until the conversation holds at least one user message
/// and one bot message.
pub fn summarize(messages: &[Message], date_part: &str, locale: Locale) -> Option<SessionSummary> {
    let has_user = messages.iter().any(|m| m.sender == Sender::User);
    let first_bot = messages.iter().find(|m| m.sender == Sender::Bot)?;
    if !has_user {
        return None;
    }

    Some(SessionSummary {
        title: derive_title(&first_bot.text, locale),
        date: locale.format_date(date_part),
    })
}

/// First line of the reply, without the diagnosis prefix, truncated.
pub fn derive_title(reply: &str, locale: Locale) -> String {
    let first_line = reply.split('\n').next().unwrap_or("");
    let title = first_line.replacen(locale.title_prefix(), "", 1);
    let title = title.trim();

    if title.is_empty() {
        return locale.default_title().to_string();
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        let cut: String = title.chars().take(MAX_TITLE_CHARS).collect();
        return format!("{cut}...");
    }
    title.to_string()
}
