//! Conversation transcript and message input.

use leptos::prelude::*;

use crate::state::chat::{SessionHandle, input_placeholder};

/// Chat panel showing the transcript and an input for URLs and questions.
#[component]
pub fn ChatPanel() -> impl IntoView {
    let session = expect_context::<SessionHandle>();

    let on_click = move |_| session.submit_input();

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            session.submit_input();
        }
    };

    let can_send = move || !session.input.get().trim().is_empty();

    view! {
        <div class="chat-panel">
            <div class="chat-panel__messages" id="chatMessages" node_ref=session.messages_ref>
                {move || {
                    session
                        .messages()
                        .into_iter()
                        .map(|msg| {
                            let class = format!("message {}", msg.role.as_str());
                            view! {
                                <div class=class>
                                    <p>{msg.text}</p>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                }}
            </div>

            <div class="chat-panel__input-row">
                <input
                    class="chat-panel__input"
                    id="userInput"
                    type="text"
                    node_ref=session.input_ref
                    placeholder=move || input_placeholder(session.phase())
                    prop:value=move || session.input.get()
                    on:input=move |ev| session.input.set(event_target_value(&ev))
                    on:keydown=on_keydown
                />
                <button
                    class="btn btn--primary chat-panel__send"
                    id="sendBtn"
                    on:click=on_click
                    disabled=move || !can_send()
                >
                    "Send"
                </button>
            </div>
        </div>
    }
}
