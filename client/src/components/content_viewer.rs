//! Overlay showing the raw text extracted from the current website.

use leptos::prelude::*;
use session::Event;

use crate::state::chat::SessionHandle;

/// Content viewer with download and close controls.
#[component]
pub fn ContentViewer() -> impl IntoView {
    let session = expect_context::<SessionHandle>();

    view! {
        <div class="content-viewer" id="contentViewer" class:hidden=move || !session.content().open>
            <div class="content-viewer__header">
                <span class="content-viewer__title">"Website Content"</span>
                <span class="content-viewer__spacer"></span>
                <button
                    class="btn"
                    id="downloadContentBtn"
                    on:click=move |_| session.dispatch(Event::DownloadContent)
                >
                    "Download"
                </button>
                <button
                    class="content-viewer__close"
                    id="closeContentBtn"
                    on:click=move |_| session.dispatch(Event::CloseContent)
                >
                    "✕"
                </button>
            </div>
            <pre class="content-viewer__body" id="contentDisplay">
                {move || session.content().content}
            </pre>
        </div>
    }
}
