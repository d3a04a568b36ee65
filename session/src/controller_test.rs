use super::*;
use crate::model::Message;
use crate::theme::{DARK_MODE_KEY, MemoryStore};

fn controller() -> Controller<MemoryStore> {
    Controller::new(MemoryStore::new())
}

fn texts(c: &Controller<MemoryStore>) -> Vec<(Role, String)> {
    c.transcript()
        .messages()
        .iter()
        .map(|Message { role, text, .. }| (*role, text.clone()))
        .collect()
}

fn extract_request(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::Extract { request, .. } => Some(*request),
            _ => None,
        })
        .expect("extract effect")
}

fn ask_request(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::Ask { request, .. } => Some(*request),
            _ => None,
        })
        .expect("ask effect")
}

/// Controller that already extracted `url`.
fn ready(url: &str) -> Controller<MemoryStore> {
    let mut c = controller();
    let effects = c.handle(Event::Submit(url.to_owned()));
    let request = extract_request(&effects);
    c.handle(Event::ExtractFinished { request, result: Ok(()) });
    c
}

// =============================================================
// startup
// =============================================================

#[test]
fn new_session_awaits_url_with_welcome() {
    let c = controller();
    assert_eq!(c.session().phase, Phase::AwaitingUrl);
    assert!(c.session().waiting_for_url());
    assert!(c.session().current_url.is_empty());
    assert_eq!(texts(&c), vec![(Role::Bot, WELCOME_TEXT.to_owned())]);
}

#[test]
fn startup_applies_stored_theme() {
    let c = Controller::new(MemoryStore::with(DARK_MODE_KEY, "false"));
    assert!(!c.session().is_dark_mode());
    assert_eq!(c.startup_effects(), vec![Effect::ApplyTheme(Theme::Light)]);
}

#[test]
fn deferred_theme_load_relabels_toggle() {
    let mut c = Controller::with_default_theme(MemoryStore::with(DARK_MODE_KEY, "false"));
    assert_eq!(c.session().theme, Theme::Dark);
    assert_eq!(c.session().theme.toggle_label(), "Light Mode");

    assert_eq!(c.handle(Event::LoadTheme), vec![Effect::ApplyTheme(Theme::Light)]);
    assert_eq!(c.session().theme, Theme::Light);
    assert_eq!(c.session().theme.toggle_label(), "Dark Mode");
    assert_eq!(texts(&c), vec![(Role::Bot, WELCOME_TEXT.to_owned())]);
}

#[test]
fn deferred_theme_load_without_preference_stays_dark() {
    let mut c = Controller::with_default_theme(MemoryStore::new());
    assert_eq!(c.handle(Event::LoadTheme), vec![Effect::ApplyTheme(Theme::Dark)]);
    assert!(c.session().is_dark_mode());
    assert_eq!(c.store().get(DARK_MODE_KEY), None);
}

// =============================================================
// submit
// =============================================================

#[test]
fn blank_submission_is_a_noop() {
    let mut c = controller();
    assert!(c.handle(Event::Submit("   \t\n".to_owned())).is_empty());
    assert!(c.handle(Event::Submit(String::new())).is_empty());
    assert_eq!(c.transcript().len(), 1);
    assert_eq!(c.pending_requests(), 0);
}

#[test]
fn url_submission_sends_exactly_one_extract() {
    let mut c = controller();
    let effects = c.handle(Event::Submit("  example.com  ".to_owned()));

    let extracts: Vec<_> = effects
        .iter()
        .filter_map(|e| match e {
            Effect::Extract { body, .. } => Some(body.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(extracts, vec![ExtractRequest { url: "example.com".to_owned() }]);
    assert!(effects.contains(&Effect::ClearInput));
    assert!(!effects.iter().any(|e| matches!(e, Effect::Ask { .. })));

    assert_eq!(
        texts(&c)[1..],
        [
            (Role::User, "example.com".to_owned()),
            (Role::Bot, PROCESSING_TEXT.to_owned()),
        ]
    );
}

#[test]
fn extract_success_moves_to_questions() {
    let mut c = controller();
    let request = extract_request(&c.handle(Event::Submit("example.com".to_owned())));
    let effects = c.handle(Event::ExtractFinished { request, result: Ok(()) });

    assert_eq!(effects, vec![Effect::ScrollToBottom]);
    assert_eq!(c.session().phase, Phase::AwaitingQuestion);
    assert_eq!(c.session().current_url, "example.com");
    assert_eq!(
        texts(&c),
        vec![
            (Role::Bot, WELCOME_TEXT.to_owned()),
            (Role::User, "example.com".to_owned()),
            (Role::Bot, EXTRACTED_TEXT.to_owned()),
        ]
    );
}

#[test]
fn extract_failure_keeps_placeholder_and_phase() {
    let mut c = controller();
    let request = extract_request(&c.handle(Event::Submit("bad".to_owned())));
    c.handle(Event::ExtractFinished {
        request,
        result: Err(ApiError::Rejected(Some("could not fetch".to_owned()))),
    });

    assert_eq!(c.session().phase, Phase::AwaitingUrl);
    assert!(c.session().current_url.is_empty());
    let t = texts(&c);
    assert_eq!(t[2], (Role::Bot, PROCESSING_TEXT.to_owned()));
    assert_eq!(t[3], (Role::Error, "Error: could not fetch".to_owned()));
}

#[test]
fn extract_failure_without_reason_uses_unknown_error() {
    let mut c = controller();
    let request = extract_request(&c.handle(Event::Submit("bad".to_owned())));
    c.handle(Event::ExtractFinished { request, result: Err(ApiError::Rejected(None)) });
    assert_eq!(c.transcript().last().unwrap().text, "Error: Unknown error");
}

#[test]
fn extract_http_error_is_reported() {
    let mut c = controller();
    let request = extract_request(&c.handle(Event::Submit("x.com".to_owned())));
    c.handle(Event::ExtractFinished { request, result: Err(ApiError::Status(502)) });
    assert_eq!(c.transcript().last().unwrap().text, "Error: HTTP error! status: 502");
    assert_eq!(c.transcript().last().unwrap().role, Role::Error);
}

#[test]
fn extract_success_removes_its_own_placeholder() {
    let mut c = controller();
    let first = extract_request(&c.handle(Event::Submit("one.com".to_owned())));
    let second = extract_request(&c.handle(Event::Submit("two.com".to_owned())));

    c.handle(Event::ExtractFinished { request: first, result: Ok(()) });

    // The placeholder for two.com is still there; one.com's is gone.
    let t = texts(&c);
    let placeholders = t.iter().filter(|(_, s)| s == PROCESSING_TEXT).count();
    assert_eq!(placeholders, 1);
    assert_eq!(t[t.len() - 2], (Role::Bot, PROCESSING_TEXT.to_owned()));
    assert_eq!(c.session().current_url, "one.com");

    c.handle(Event::ExtractFinished { request: second, result: Ok(()) });
    assert!(!texts(&c).iter().any(|(_, s)| s == PROCESSING_TEXT));
    assert_eq!(c.session().current_url, "two.com");
}

#[test]
fn question_submission_asks_against_current_url() {
    let mut c = ready("example.com");
    let effects = c.handle(Event::Submit("What is this?".to_owned()));

    let asks: Vec<_> = effects
        .iter()
        .filter_map(|e| match e {
            Effect::Ask { body, .. } => Some(body.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        asks,
        vec![AskRequest { question: "What is this?".to_owned(), url: "example.com".to_owned() }]
    );
    assert!(!effects.iter().any(|e| matches!(e, Effect::Extract { .. })));
}

#[test]
fn answer_appends_bot_message_without_state_change() {
    let mut c = ready("example.com");
    let request = ask_request(&c.handle(Event::Submit("q".to_owned())));
    c.handle(Event::AnswerFinished { request, result: Ok("the answer".to_owned()) });

    assert_eq!(c.transcript().last().unwrap().text, "the answer");
    assert_eq!(c.transcript().last().unwrap().role, Role::Bot);
    assert_eq!(c.session().phase, Phase::AwaitingQuestion);
    assert_eq!(c.pending_requests(), 0);
}

#[test]
fn answer_failure_appends_error() {
    let mut c = ready("example.com");
    let request = ask_request(&c.handle(Event::Submit("q".to_owned())));
    c.handle(Event::AnswerFinished {
        request,
        result: Err(ApiError::Network("Failed to fetch".to_owned())),
    });
    let last = c.transcript().last().unwrap();
    assert_eq!(last.role, Role::Error);
    assert_eq!(last.text, "Error: Failed to fetch");
    assert_eq!(c.session().phase, Phase::AwaitingQuestion);
}

#[test]
fn answers_render_in_completion_order() {
    let mut c = ready("example.com");
    let first = ask_request(&c.handle(Event::Submit("q1".to_owned())));
    let second = ask_request(&c.handle(Event::Submit("q2".to_owned())));

    c.handle(Event::AnswerFinished { request: second, result: Ok("a2".to_owned()) });
    c.handle(Event::AnswerFinished { request: first, result: Ok("a1".to_owned()) });

    let t = texts(&c);
    assert_eq!(t[t.len() - 2].1, "a2");
    assert_eq!(t[t.len() - 1].1, "a1");
}

#[test]
fn unknown_completion_is_ignored() {
    let mut c = controller();
    let before = c.transcript().clone();
    let effects = c.handle(Event::AnswerFinished { request: RequestId(99), result: Ok("x".to_owned()) });
    assert!(effects.is_empty());
    assert_eq!(c.transcript(), &before);
}

// =============================================================
// new chat
// =============================================================

#[test]
fn new_chat_resets_from_any_state() {
    let mut c = ready("example.com");
    c.handle(Event::Submit("q".to_owned()));
    c.handle(Event::OpenHistory);

    let effects = c.handle(Event::NewChat);

    assert_eq!(effects, vec![Effect::FocusInput]);
    assert_eq!(c.session().phase, Phase::AwaitingUrl);
    assert!(c.session().current_url.is_empty());
    assert!(!c.history().open);
    assert_eq!(texts(&c), vec![(Role::Bot, WELCOME_TEXT.to_owned())]);
}

#[test]
fn new_chat_on_fresh_session_still_has_one_welcome() {
    let mut c = controller();
    c.handle(Event::NewChat);
    c.handle(Event::NewChat);
    assert_eq!(c.transcript().len(), 1);
}

#[test]
fn completions_from_replaced_conversation_are_dropped() {
    let mut c = controller();
    let request = extract_request(&c.handle(Event::Submit("old.com".to_owned())));
    c.handle(Event::NewChat);

    let effects = c.handle(Event::ExtractFinished { request, result: Ok(()) });

    assert!(effects.is_empty());
    assert_eq!(c.session().phase, Phase::AwaitingUrl);
    assert_eq!(c.transcript().len(), 1);
}

// =============================================================
// history
// =============================================================

#[test]
fn opening_history_fetches_and_shows_loading() {
    let mut c = controller();
    let effects = c.handle(Event::ToggleHistory);
    assert!(matches!(effects.as_slice(), [Effect::FetchHistory { .. }]));
    assert!(c.history().open);
    assert_eq!(c.history().view, HistoryView::Loading);

    assert!(c.handle(Event::ToggleHistory).is_empty());
    assert!(!c.history().open);
}

fn history_request(effects: &[Effect]) -> RequestId {
    match effects {
        [Effect::FetchHistory { request }] => *request,
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn history_entries_are_listed() {
    let mut c = controller();
    let request = history_request(&c.handle(Event::OpenHistory));
    let entries = vec![HistoryEntry {
        url: "a.com".to_owned(),
        conversation: vec![QaPair { question: "q1".to_owned(), answer: "a1".to_owned() }],
    }];
    c.handle(Event::HistoryFinished { request, result: Ok(entries.clone()) });
    assert_eq!(c.history().view, HistoryView::Entries(entries));
    assert!(c.history().entry("a.com").is_some());
    assert!(c.history().entry("b.com").is_none());
}

#[test]
fn history_notices() {
    let mut c = controller();

    let request = history_request(&c.handle(Event::OpenHistory));
    c.handle(Event::HistoryFinished { request, result: Ok(Vec::new()) });
    assert_eq!(c.history().view, HistoryView::Notice(HISTORY_EMPTY_TEXT.to_owned()));

    let request = history_request(&c.handle(Event::OpenHistory));
    c.handle(Event::HistoryFinished { request, result: Err(ApiError::Rejected(None)) });
    assert_eq!(c.history().view, HistoryView::Notice(HISTORY_UNAVAILABLE_TEXT.to_owned()));

    let request = history_request(&c.handle(Event::OpenHistory));
    c.handle(Event::HistoryFinished { request, result: Err(ApiError::Status(500)) });
    assert_eq!(
        c.history().view,
        HistoryView::Notice("Error loading history: HTTP error! status: 500".to_owned())
    );
}

#[test]
fn only_latest_history_fetch_applies() {
    let mut c = controller();
    let stale = history_request(&c.handle(Event::OpenHistory));
    c.handle(Event::CloseHistory);
    let fresh = history_request(&c.handle(Event::OpenHistory));

    c.handle(Event::HistoryFinished { request: stale, result: Ok(Vec::new()) });
    assert_eq!(c.history().view, HistoryView::Loading);

    c.handle(Event::HistoryFinished { request: fresh, result: Err(ApiError::Rejected(None)) });
    assert_eq!(c.history().view, HistoryView::Notice(HISTORY_UNAVAILABLE_TEXT.to_owned()));
}

#[test]
fn selecting_history_entry_rebuilds_transcript() {
    let mut c = controller();
    c.handle(Event::OpenHistory);
    c.handle(Event::SelectHistoryEntry {
        url: "a.com".to_owned(),
        conversation: vec![QaPair { question: "q1".to_owned(), answer: "a1".to_owned() }],
    });

    assert_eq!(
        texts(&c),
        vec![
            (Role::Bot, WELCOME_TEXT.to_owned()),
            (Role::User, "a.com".to_owned()),
            (Role::Bot, EXTRACTED_TEXT.to_owned()),
            (Role::User, "q1".to_owned()),
            (Role::Bot, "a1".to_owned()),
        ]
    );
    assert_eq!(c.session().phase, Phase::AwaitingQuestion);
    assert_eq!(c.session().current_url, "a.com");
    assert!(!c.history().open);
}

#[test]
fn selecting_history_entry_then_asking_uses_its_url() {
    let mut c = ready("example.com");
    c.handle(Event::SelectHistoryEntry { url: "a.com".to_owned(), conversation: Vec::new() });
    assert_eq!(c.transcript().len(), 3);

    let effects = c.handle(Event::Submit("more?".to_owned()));
    assert!(effects.iter().any(|e| matches!(
        e,
        Effect::Ask { body, .. } if body.url == "a.com"
    )));
}

// =============================================================
// content
// =============================================================

fn content_request(effects: &[Effect]) -> RequestId {
    match effects {
        [Effect::FetchContent { request }] => *request,
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn content_success_opens_viewer() {
    let mut c = controller();
    let request = content_request(&c.handle(Event::ShowContent));
    c.handle(Event::ContentFinished { request, result: Ok("page text".to_owned()) });
    assert!(c.content().open);
    assert_eq!(c.content().content, "page text");

    c.handle(Event::CloseContent);
    assert!(!c.content().open);
}

#[test]
fn content_failures_use_distinct_wording() {
    let mut c = controller();

    let request = content_request(&c.handle(Event::ShowContent));
    c.handle(Event::ContentFinished { request, result: Err(ApiError::Rejected(None)) });
    assert_eq!(c.transcript().last().unwrap().text, "Error: Could not retrieve content");

    let request = content_request(&c.handle(Event::ShowContent));
    c.handle(Event::ContentFinished {
        request,
        result: Err(ApiError::Rejected(Some("No content extracted yet".to_owned()))),
    });
    assert_eq!(c.transcript().last().unwrap().text, "Error: No content extracted yet");

    let request = content_request(&c.handle(Event::ShowContent));
    c.handle(Event::ContentFinished { request, result: Err(ApiError::Network("offline".to_owned())) });
    assert_eq!(c.transcript().last().unwrap().text, "Error retrieving content: offline");
    assert_eq!(c.transcript().last().unwrap().role, Role::Error);
    assert!(!c.content().open);
}

#[test]
fn relay_failure_reason_reaches_transcript() {
    let mut c = ready("example.com");
    let body = r#"{"success":false,"error":"Backend unavailable: connection refused"}"#;

    let request = content_request(&c.handle(Event::ShowContent));
    let result = crate::wire::decode::<crate::wire::ContentResponse>(502, body);
    c.handle(Event::ContentFinished { request, result });
    assert_eq!(
        c.transcript().last().unwrap().text,
        "Error: Backend unavailable: connection refused"
    );

    let request = ask_request(&c.handle(Event::Submit("Why?".to_owned())));
    let result = crate::wire::decode::<crate::wire::AskResponse>(502, body);
    c.handle(Event::AnswerFinished { request, result });
    let last = c.transcript().last().unwrap();
    assert_eq!(last.role, Role::Error);
    assert_eq!(last.text, "Error: Backend unavailable: connection refused");
}

#[test]
fn download_is_delegated() {
    let mut c = controller();
    assert_eq!(c.handle(Event::DownloadContent), vec![Effect::Download]);
    assert_eq!(c.transcript().len(), 1);
}

// =============================================================
// theme
// =============================================================

#[test]
fn toggle_theme_persists_and_applies() {
    let mut c = controller();
    let effects = c.handle(Event::ToggleTheme);
    assert_eq!(effects, vec![Effect::ApplyTheme(Theme::Light)]);
    assert_eq!(c.store().get(DARK_MODE_KEY).as_deref(), Some("false"));
    assert!(!c.session().is_dark_mode());
}

#[test]
fn toggle_theme_twice_round_trips() {
    let mut c = Controller::new(MemoryStore::with(DARK_MODE_KEY, "true"));
    let original = c.session().theme;

    c.handle(Event::ToggleTheme);
    let effects = c.handle(Event::ToggleTheme);

    assert_eq!(c.session().theme, original);
    assert_eq!(effects, vec![Effect::ApplyTheme(original)]);
    assert_eq!(original.attribute(), Some("dark"));
    assert_eq!(c.store().get(DARK_MODE_KEY).as_deref(), Some("true"));
}
