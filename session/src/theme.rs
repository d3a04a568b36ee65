//! Dark/light theme preference and the key-value store it persists to.
//!
//! The preference is stored as the string `"true"` or `"false"` under
//! [`DARK_MODE_KEY`]. Anything other than `"false"` (including no value)
//! means dark mode.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::collections::HashMap;

/// Storage key holding the dark mode flag.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Attribute set on the document root while dark mode is active.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Minimal string key-value capability (browser `localStorage`, tests).
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory [`KvStore`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one key.
    #[must_use]
    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.set(key, value);
        store
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }
}

/// Active color theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Read the persisted preference.
    #[must_use]
    pub fn load(store: &impl KvStore) -> Self {
        match store.get(DARK_MODE_KEY).as_deref() {
            Some("false") => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Write the preference back as `"true"`/`"false"`.
    pub fn persist(self, store: &mut impl KvStore) {
        store.set(DARK_MODE_KEY, if self.is_dark() { "true" } else { "false" });
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Value of [`THEME_ATTRIBUTE`]; `None` means the attribute is removed.
    #[must_use]
    pub fn attribute(self) -> Option<&'static str> {
        match self {
            Self::Dark => Some("dark"),
            Self::Light => None,
        }
    }

    /// Label for the toggle button, naming the theme it switches to.
    #[must_use]
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Dark => "Light Mode",
            Self::Light => "Dark Mode",
        }
    }
}
