//! Reactive wrapper around the conversation controller.
//!
//! DESIGN
//! ======
//! [`SessionHandle`] is `Copy` and provided via context. `dispatch` feeds an
//! event to the controller inside a signal update, then runs the returned
//! effects: network effects spawn a local task whose completion dispatches
//! the matching `*Finished` event, UI effects touch the DOM directly.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use leptos::prelude::*;
use session::{ContentViewer, Controller, Effect, Event, HistoryPanel, Message, Phase, Theme};

use crate::net::api;
use crate::util::dark_mode;
use crate::util::storage::BrowserStore;

/// Placeholder for the chat input, by phase.
#[must_use]
pub fn input_placeholder(phase: Phase) -> &'static str {
    match phase {
        Phase::AwaitingUrl => "Enter a website URL...",
        Phase::AwaitingQuestion => "Ask a question about this website...",
    }
}

/// Handle to the live session, shared by every component on the page.
#[derive(Clone, Copy)]
pub struct SessionHandle {
    controller: RwSignal<Controller<BrowserStore>>,
    /// Current text of the chat input.
    pub input: RwSignal<String>,
    pub input_ref: NodeRef<leptos::html::Input>,
    pub messages_ref: NodeRef<leptos::html::Div>,
}

impl SessionHandle {
    #[must_use]
    pub fn new() -> Self {
        Self {
            controller: RwSignal::new(Controller::with_default_theme(BrowserStore)),
            input: RwSignal::new(String::new()),
            input_ref: NodeRef::new(),
            messages_ref: NodeRef::new(),
        }
    }

    /// Load the stored theme once mounted.
    ///
    /// The first render always uses the default theme so hydration matches the
    /// server markup; the signal update then relabels the toggle.
    pub fn start(self) {
        self.dispatch(Event::LoadTheme);
    }

    /// Feed one event to the controller and execute the resulting effects.
    pub fn dispatch(self, event: Event) {
        let effects = self
            .controller
            .try_update(|c| c.handle(event))
            .unwrap_or_default();
        self.run_all(effects);
    }

    /// Submit whatever is currently in the input box.
    pub fn submit_input(self) {
        let text = self.input.get_untracked();
        self.dispatch(Event::Submit(text));
    }

    pub fn messages(self) -> Vec<Message> {
        self.controller.with(|c| c.transcript().messages().to_vec())
    }

    pub fn phase(self) -> Phase {
        self.controller.with(|c| c.session().phase)
    }

    pub fn theme(self) -> Theme {
        self.controller.with(|c| c.session().theme)
    }

    pub fn history(self) -> HistoryPanel {
        self.controller.with(|c| c.history().clone())
    }

    pub fn content(self) -> ContentViewer {
        self.controller.with(|c| c.content().clone())
    }

    fn run_all(self, effects: Vec<Effect>) {
        for effect in effects {
            self.run(effect);
        }
    }

    fn run(self, effect: Effect) {
        match effect {
            Effect::Extract { request, body } => spawn(async move {
                let result = api::extract(&body).await;
                report("extract", result.as_ref().err());
                self.dispatch(Event::ExtractFinished { request, result });
            }),
            Effect::Ask { request, body } => spawn(async move {
                let result = api::ask(&body).await;
                report("ask", result.as_ref().err());
                self.dispatch(Event::AnswerFinished { request, result });
            }),
            Effect::FetchHistory { request } => spawn(async move {
                let result = api::fetch_history().await;
                report("history", result.as_ref().err());
                self.dispatch(Event::HistoryFinished { request, result });
            }),
            Effect::FetchContent { request } => spawn(async move {
                let result = api::fetch_content().await;
                report("content", result.as_ref().err());
                self.dispatch(Event::ContentFinished { request, result });
            }),
            Effect::Download => api::start_download(),
            Effect::ClearInput => self.input.set(String::new()),
            Effect::FocusInput => self.focus_input(),
            Effect::ScrollToBottom => self.scroll_to_bottom(),
            Effect::ApplyTheme(theme) => dark_mode::apply(theme),
        }
    }

    fn focus_input(self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = self.input_ref.get_untracked() {
                let _ = el.focus();
            }
        }
    }

    fn scroll_to_bottom(self) {
        #[cfg(feature = "hydrate")]
        {
            // after the pending render
            let messages_ref = self.messages_ref;
            request_animation_frame(move || {
                if let Some(el) = messages_ref.get_untracked() {
                    el.set_scroll_top(el.scroll_height());
                }
            });
        }
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn(task: impl Future<Output = ()> + 'static) {
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(task);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        drop(task);
    }
}

fn report(operation: &str, err: Option<&session::ApiError>) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(err) = err {
            log::error!("{operation} failed: {err}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (operation, err);
    }
}
