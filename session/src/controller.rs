//! Conversation session controller.
//!
//! DESIGN
//! ======
//! The controller owns the [`Session`], the [`Transcript`], and the two side
//! panels. Every UI action and every network completion enters through
//! [`Controller::handle`] as an [`Event`]; the return value lists the
//! [`Effect`]s the shell must run. Shells never mutate controller state
//! directly.
//!
//! REQUEST TRACKING
//! ================
//! Each outgoing call gets a fresh [`RequestId`]. Completions are matched
//! against the pending table:
//! - an extract success removes the placeholder created by that same request;
//! - extract/ask completions are dropped once the conversation they belong
//!   to was replaced (new chat, history entry selected);
//! - only the most recent history or content fetch is applied.
//!
//! Overlapping submissions are still allowed and render in completion order.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::collections::BTreeMap;

use crate::model::{
    EXTRACTED_TEXT, HistoryEntry, MessageId, PROCESSING_TEXT, QaPair, Role, Transcript,
    WELCOME_TEXT,
};
use crate::theme::{KvStore, Theme};
use crate::wire::{ApiError, AskRequest, ExtractRequest};

pub const HISTORY_EMPTY_TEXT: &str = "No history yet";
pub const HISTORY_UNAVAILABLE_TEXT: &str = "No history available";
pub const CONTENT_FALLBACK_REASON: &str = "Could not retrieve content";
pub const UNKNOWN_ERROR_REASON: &str = "Unknown error";

// =============================================================================
// STATE
// =============================================================================

/// What the next submission is interpreted as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    AwaitingUrl,
    AwaitingQuestion,
}

/// Client-side session state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub phase: Phase,
    /// Website the questions are asked against; empty while awaiting a URL.
    pub current_url: String,
    pub theme: Theme,
}

impl Session {
    #[must_use]
    pub fn waiting_for_url(&self) -> bool {
        self.phase == Phase::AwaitingUrl
    }

    #[must_use]
    pub fn is_dark_mode(&self) -> bool {
        self.theme.is_dark()
    }
}

/// Contents of the history sidebar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HistoryView {
    #[default]
    Idle,
    Loading,
    Entries(Vec<HistoryEntry>),
    /// Informational line shown instead of entries.
    Notice(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryPanel {
    pub open: bool,
    pub view: HistoryView,
}

impl HistoryPanel {
    /// Look up a loaded entry by url.
    #[must_use]
    pub fn entry(&self, url: &str) -> Option<&HistoryEntry> {
        match &self.view {
            HistoryView::Entries(entries) => entries.iter().find(|e| e.url == url),
            _ => None,
        }
    }
}

/// Raw extracted content viewer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentViewer {
    pub open: bool,
    pub content: String,
}

/// Identifier of one outgoing remote call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

#[derive(Clone, Debug, PartialEq, Eq)]
enum Pending {
    Extract { url: String, placeholder: MessageId },
    Ask,
    History,
    Content,
}

impl Pending {
    fn is_conversation(&self) -> bool {
        matches!(self, Self::Extract { .. } | Self::Ask)
    }
}

// =============================================================================
// EVENTS / EFFECTS
// =============================================================================

/// Input to the controller: user actions and network completions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Submit(String),
    ExtractFinished { request: RequestId, result: Result<(), ApiError> },
    AnswerFinished { request: RequestId, result: Result<String, ApiError> },
    OpenHistory,
    CloseHistory,
    ToggleHistory,
    HistoryFinished { request: RequestId, result: Result<Vec<HistoryEntry>, ApiError> },
    SelectHistoryEntry { url: String, conversation: Vec<QaPair> },
    NewChat,
    ShowContent,
    CloseContent,
    ContentFinished { request: RequestId, result: Result<String, ApiError> },
    DownloadContent,
    ToggleTheme,
    /// Re-read the stored theme preference (after mount, for server-rendered UIs).
    LoadTheme,
}

/// Side effect requested from the shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// `POST /extract`, answer with [`Event::ExtractFinished`].
    Extract { request: RequestId, body: ExtractRequest },
    /// `POST /ask`, answer with [`Event::AnswerFinished`].
    Ask { request: RequestId, body: AskRequest },
    /// `GET /history`, answer with [`Event::HistoryFinished`].
    FetchHistory { request: RequestId },
    /// `GET /content`, answer with [`Event::ContentFinished`].
    FetchContent { request: RequestId },
    /// Hand `/download` to the platform (navigation or file save).
    Download,
    ClearInput,
    FocusInput,
    ScrollToBottom,
    ApplyTheme(Theme),
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// One conversation session, generic over the preference store.
#[derive(Clone, Debug)]
pub struct Controller<S> {
    session: Session,
    transcript: Transcript,
    history: HistoryPanel,
    content: ContentViewer,
    pending: BTreeMap<RequestId, Pending>,
    next_request: u64,
    store: S,
}

impl<S: KvStore> Controller<S> {
    /// Start a session: theme from `store`, transcript holding the welcome.
    pub fn new(store: S) -> Self {
        let mut controller = Self::with_default_theme(store);
        controller.session.theme = Theme::load(&controller.store);
        controller
    }

    /// Start a session on the default theme without reading `store`.
    ///
    /// Server and browser render the same first frame; the stored preference
    /// is applied afterwards through [`Event::LoadTheme`].
    pub fn with_default_theme(store: S) -> Self {
        let session = Session::default();
        let mut transcript = Transcript::new();
        transcript.push(Role::Bot, WELCOME_TEXT);
        Self {
            session,
            transcript,
            history: HistoryPanel::default(),
            content: ContentViewer::default(),
            pending: BTreeMap::new(),
            next_request: 0,
            store,
        }
    }

    /// Effects to run once when the UI first mounts.
    #[must_use]
    pub fn startup_effects(&self) -> Vec<Effect> {
        vec![Effect::ApplyTheme(self.session.theme)]
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    #[must_use]
    pub fn history(&self) -> &HistoryPanel {
        &self.history
    }

    #[must_use]
    pub fn content(&self) -> &ContentViewer {
        &self.content
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of calls still awaiting completion.
    #[must_use]
    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    /// Apply one event and return the effects it produced.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Submit(text) => self.submit(&text),
            Event::ExtractFinished { request, result } => self.finish_extract(request, result),
            Event::AnswerFinished { request, result } => self.finish_answer(request, result),
            Event::OpenHistory => self.open_history(),
            Event::CloseHistory => self.close_history(),
            Event::ToggleHistory => self.toggle_history(),
            Event::HistoryFinished { request, result } => self.finish_history(request, result),
            Event::SelectHistoryEntry { url, conversation } => {
                self.select_history_entry(url, conversation)
            }
            Event::NewChat => self.start_new_chat(),
            Event::ShowContent => self.show_content(),
            Event::CloseContent => self.close_content(),
            Event::ContentFinished { request, result } => self.finish_content(request, result),
            Event::DownloadContent => self.download_content(),
            Event::ToggleTheme => self.toggle_theme(),
            Event::LoadTheme => self.load_theme(),
        }
    }

    // -------------------------------------------------------------------------
    // conversation
    // -------------------------------------------------------------------------

    /// Record the user's text and route it by phase. Blank input is ignored.
    pub fn submit(&mut self, text: &str) -> Vec<Effect> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        self.transcript.push(Role::User, text);

        let mut effects = vec![Effect::ClearInput];
        effects.extend(match self.session.phase {
            Phase::AwaitingUrl => self.request_extract(text),
            Phase::AwaitingQuestion => self.request_answer(text),
        });
        effects
    }

    /// Show the processing placeholder and send `url` for extraction.
    pub fn request_extract(&mut self, url: &str) -> Vec<Effect> {
        let placeholder = self.transcript.push(Role::Bot, PROCESSING_TEXT);
        let request = self.track(Pending::Extract { url: url.to_owned(), placeholder });
        vec![
            Effect::Extract { request, body: ExtractRequest { url: url.to_owned() } },
            Effect::ScrollToBottom,
        ]
    }

    /// Ask `question` against the current website.
    pub fn request_answer(&mut self, question: &str) -> Vec<Effect> {
        let request = self.track(Pending::Ask);
        vec![
            Effect::Ask {
                request,
                body: AskRequest {
                    question: question.to_owned(),
                    url: self.session.current_url.clone(),
                },
            },
            Effect::ScrollToBottom,
        ]
    }

    fn finish_extract(&mut self, request: RequestId, result: Result<(), ApiError>) -> Vec<Effect> {
        let Some(Pending::Extract { url, placeholder }) = self.pending.remove(&request) else {
            return Vec::new();
        };
        match result {
            Ok(()) => {
                self.transcript.remove(placeholder);
                self.session.phase = Phase::AwaitingQuestion;
                self.session.current_url = url;
                self.transcript.push(Role::Bot, EXTRACTED_TEXT);
            }
            Err(err) => {
                self.push_error(format!("Error: {}", err.reason_or(UNKNOWN_ERROR_REASON)));
            }
        }
        vec![Effect::ScrollToBottom]
    }

    fn finish_answer(&mut self, request: RequestId, result: Result<String, ApiError>) -> Vec<Effect> {
        if self.pending.remove(&request) != Some(Pending::Ask) {
            return Vec::new();
        }
        match result {
            Ok(answer) => {
                self.transcript.push(Role::Bot, answer);
            }
            Err(err) => {
                self.push_error(format!("Error: {}", err.reason_or(UNKNOWN_ERROR_REASON)));
            }
        }
        vec![Effect::ScrollToBottom]
    }

    /// Reset to a fresh conversation awaiting a URL.
    pub fn start_new_chat(&mut self) -> Vec<Effect> {
        self.reset_conversation();
        self.session.phase = Phase::AwaitingUrl;
        self.session.current_url.clear();
        self.history.open = false;
        vec![Effect::FocusInput]
    }

    // -------------------------------------------------------------------------
    // history
    // -------------------------------------------------------------------------

    pub fn open_history(&mut self) -> Vec<Effect> {
        self.history.open = true;
        self.history.view = HistoryView::Loading;
        self.pending.retain(|_, p| *p != Pending::History);
        let request = self.track(Pending::History);
        vec![Effect::FetchHistory { request }]
    }

    pub fn close_history(&mut self) -> Vec<Effect> {
        self.history.open = false;
        Vec::new()
    }

    pub fn toggle_history(&mut self) -> Vec<Effect> {
        if self.history.open { self.close_history() } else { self.open_history() }
    }

    fn finish_history(
        &mut self,
        request: RequestId,
        result: Result<Vec<HistoryEntry>, ApiError>,
    ) -> Vec<Effect> {
        if self.pending.remove(&request) != Some(Pending::History) {
            return Vec::new();
        }
        self.history.view = match result {
            Ok(entries) if entries.is_empty() => HistoryView::Notice(HISTORY_EMPTY_TEXT.to_owned()),
            Ok(entries) => HistoryView::Entries(entries),
            Err(err) if err.is_transport() => {
                HistoryView::Notice(format!("Error loading history: {err}"))
            }
            Err(_) => HistoryView::Notice(HISTORY_UNAVAILABLE_TEXT.to_owned()),
        };
        Vec::new()
    }

    /// Rebuild the transcript from a stored conversation and resume it.
    pub fn select_history_entry(&mut self, url: String, conversation: Vec<QaPair>) -> Vec<Effect> {
        self.reset_conversation();
        self.transcript.push(Role::User, url.as_str());
        self.transcript.push(Role::Bot, EXTRACTED_TEXT);
        for pair in conversation {
            self.transcript.push(Role::User, pair.question);
            self.transcript.push(Role::Bot, pair.answer);
        }
        self.session.phase = Phase::AwaitingQuestion;
        self.session.current_url = url;
        self.history.open = false;
        vec![Effect::ScrollToBottom]
    }

    // -------------------------------------------------------------------------
    // content
    // -------------------------------------------------------------------------

    pub fn show_content(&mut self) -> Vec<Effect> {
        self.pending.retain(|_, p| *p != Pending::Content);
        let request = self.track(Pending::Content);
        vec![Effect::FetchContent { request }]
    }

    pub fn close_content(&mut self) -> Vec<Effect> {
        self.content.open = false;
        Vec::new()
    }

    fn finish_content(&mut self, request: RequestId, result: Result<String, ApiError>) -> Vec<Effect> {
        if self.pending.remove(&request) != Some(Pending::Content) {
            return Vec::new();
        }
        match result {
            Ok(content) => {
                self.content.content = content;
                self.content.open = true;
                Vec::new()
            }
            Err(err) => {
                let text = if err.is_transport() {
                    format!("Error retrieving content: {err}")
                } else {
                    format!("Error: {}", err.reason_or(CONTENT_FALLBACK_REASON))
                };
                self.push_error(text);
                vec![Effect::ScrollToBottom]
            }
        }
    }

    #[must_use]
    pub fn download_content(&self) -> Vec<Effect> {
        vec![Effect::Download]
    }

    // -------------------------------------------------------------------------
    // theme
    // -------------------------------------------------------------------------

    /// Flip dark mode and persist the new value.
    pub fn toggle_theme(&mut self) -> Vec<Effect> {
        let next = self.session.theme.toggled();
        self.session.theme = next;
        next.persist(&mut self.store);
        vec![Effect::ApplyTheme(next)]
    }

    /// Adopt the stored preference and apply it.
    pub fn load_theme(&mut self) -> Vec<Effect> {
        let theme = Theme::load(&self.store);
        self.session.theme = theme;
        vec![Effect::ApplyTheme(theme)]
    }

    // -------------------------------------------------------------------------
    // helpers
    // -------------------------------------------------------------------------

    fn track(&mut self, pending: Pending) -> RequestId {
        let request = RequestId(self.next_request);
        self.next_request += 1;
        self.pending.insert(request, pending);
        request
    }

    fn push_error(&mut self, text: String) {
        self.transcript.push(Role::Error, text);
    }

    /// Clear the transcript back to the welcome line and forget in-flight
    /// extract/ask calls belonging to the old conversation.
    fn reset_conversation(&mut self) {
        self.pending.retain(|_, p| !p.is_conversation());
        self.transcript.clear();
        self.transcript.push(Role::Bot, WELCOME_TEXT);
    }
}
