//! Top bar with new chat, history, content, and theme controls.

use leptos::prelude::*;
use session::Event;

use crate::state::chat::SessionHandle;

/// Top toolbar for the chat page.
///
/// The theme button is labelled with the theme it switches to.
#[component]
pub fn Toolbar() -> impl IntoView {
    let session = expect_context::<SessionHandle>();

    view! {
        <div class="toolbar">
            <button
                class="toolbar__icon"
                id="newChatIconBtn"
                title="New chat"
                on:click=move |_| session.dispatch(Event::NewChat)
            >
                "+"
            </button>
            <span class="toolbar__title">"Website Chat"</span>
            <span class="toolbar__spacer"></span>
            <button class="btn" id="historyBtn" on:click=move |_| session.dispatch(Event::ToggleHistory)>
                "History"
            </button>
            <button class="btn" id="contentBtn" on:click=move |_| session.dispatch(Event::ShowContent)>
                "View Content"
            </button>
            <button class="btn" id="themeToggleBtn" on:click=move |_| session.dispatch(Event::ToggleTheme)>
                {move || session.theme().toggle_label()}
            </button>
        </div>
    }
}
