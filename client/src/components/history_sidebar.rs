//! Collapsible sidebar listing previously processed websites.

use leptos::prelude::*;
use session::{Event, HistoryEntry, HistoryView};

use crate::state::chat::SessionHandle;

/// History sidebar. Opening it (from the toolbar) refetches `/history`;
/// clicking an entry resumes that conversation and closes the sidebar.
#[component]
pub fn HistorySidebar() -> impl IntoView {
    let session = expect_context::<SessionHandle>();

    let open = move || session.history().open;

    view! {
        <div class="sidebar" id="sidebar" class:hidden=move || !open()>
            <div class="sidebar__header">
                <span class="sidebar__title">"History"</span>
                <button
                    class="sidebar__close"
                    id="closeSidebarBtn"
                    on:click=move |_| session.dispatch(Event::CloseHistory)
                >
                    "✕"
                </button>
            </div>

            <button
                class="btn btn--primary sidebar__new-chat"
                id="newChatBtn"
                on:click=move |_| session.dispatch(Event::NewChat)
            >
                "New Chat"
            </button>

            <div class="history-list" id="historyList">
                {move || match session.history().view {
                    HistoryView::Idle => ().into_any(),
                    HistoryView::Loading => {
                        view! { <div class="history-empty">"Loading..."</div> }.into_any()
                    }
                    HistoryView::Notice(text) => {
                        view! { <div class="history-empty">{text}</div> }.into_any()
                    }
                    HistoryView::Entries(entries) => {
                        entries
                            .into_iter()
                            .map(|entry| history_item(session, entry))
                            .collect::<Vec<_>>()
                            .into_any()
                    }
                }}
            </div>
        </div>
    }
}

fn history_item(session: SessionHandle, entry: HistoryEntry) -> impl IntoView {
    let preview = entry.preview();
    let title = entry.url.clone();
    let HistoryEntry { url, conversation } = entry;

    let on_click = move |_| {
        session.dispatch(Event::SelectHistoryEntry {
            url: url.clone(),
            conversation: conversation.clone(),
        });
    };

    view! {
        <div class="history-item" on:click=on_click>
            <h3>{title}</h3>
            {preview.map(|text| view! { <p class="history-preview">{text}</p> })}
        </div>
    }
}
