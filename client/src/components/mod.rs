//! UI components for the chat page.

pub mod chat_panel;
pub mod content_viewer;
pub mod history_sidebar;
pub mod toolbar;
