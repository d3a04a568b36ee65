//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! All conversation state lives in one `session::Controller` held in a
//! Leptos signal. [`chat::SessionHandle`] is the only writer; components read
//! through it and send it events.

pub mod chat;
