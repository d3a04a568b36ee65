//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles the REST calls to the QA backend. Wire types live in the
//! shared `session` crate.

pub mod api;
