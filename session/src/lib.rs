//! Conversation session model and controller for the website chat assistant.
//!
//! This crate is UI-framework agnostic so the browser client and the terminal
//! client drive the exact same state machine. It performs no I/O: the
//! [`Controller`] consumes [`Event`]s and returns [`Effect`]s that the shell
//! executes (HTTP calls, focus changes, theme application).

pub mod controller;
pub mod model;
pub mod theme;
pub mod wire;

pub use controller::{
    ContentViewer, Controller, Effect, Event, HistoryPanel, HistoryView, Phase, RequestId,
    Session,
};
pub use model::{HistoryEntry, Message, MessageId, QaPair, Role, Transcript};
pub use theme::{KvStore, MemoryStore, Theme};
pub use wire::{ApiError, AskRequest, Envelope, ExtractRequest};
