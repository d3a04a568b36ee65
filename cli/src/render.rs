//! Plain-text rendering of transcript, history, and content.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use session::{HistoryEntry, HistoryView, Message, Role};

const CONTENT_RULE: &str = "----------------------------------------";

/// One transcript line, prefixed by speaker.
#[must_use]
pub fn message_line(message: &Message) -> String {
    match message.role {
        Role::User => format!("You: {}", message.text),
        Role::Bot => format!("Chatbot: {}", message.text),
        Role::Error => format!("Chatbot (error): {}", message.text),
    }
}

/// Numbered history listing; numbers are what `/open` accepts.
#[must_use]
pub fn history_lines(view: &HistoryView) -> Vec<String> {
    match view {
        HistoryView::Idle => Vec::new(),
        HistoryView::Loading => vec!["Loading...".to_owned()],
        HistoryView::Notice(text) => vec![text.clone()],
        HistoryView::Entries(entries) => entries
            .iter()
            .enumerate()
            .map(|(i, entry)| history_line(i + 1, entry))
            .collect(),
    }
}

fn history_line(number: usize, entry: &HistoryEntry) -> String {
    match entry.preview() {
        Some(preview) => format!("[{number}] {} ({preview})", entry.url),
        None => format!("[{number}] {}", entry.url),
    }
}

/// Extracted content framed by rules.
#[must_use]
pub fn content_block(content: &str) -> String {
    format!("{CONTENT_RULE}\n{}\n{CONTENT_RULE}", content.trim_end())
}
