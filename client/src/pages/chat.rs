//! Chat page, the only routed page.

use leptos::prelude::*;

use crate::components::chat_panel::ChatPanel;
use crate::components::content_viewer::ContentViewer;
use crate::components::history_sidebar::HistorySidebar;
use crate::components::toolbar::Toolbar;

/// Composes the toolbar, history sidebar, transcript, and content overlay.
#[component]
pub fn ChatPage() -> impl IntoView {
    view! {
        <div class="chat-page">
            <Toolbar/>
            <div class="chat-page__body">
                <HistorySidebar/>
                <ChatPanel/>
            </div>
            <ContentViewer/>
        </div>
    }
}
