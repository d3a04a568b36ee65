//! Browser helpers: `localStorage` access and the document theme attribute.
//!
//! Both compile to no-ops without the `hydrate` feature.

pub mod dark_mode;
pub mod storage;
