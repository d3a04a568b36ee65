//! Document theme application.
//!
//! Sets `data-theme="dark"` on the `<html>` element while dark mode is on and
//! removes the attribute otherwise. The preference itself is read and written
//! by the session controller through [`super::storage::BrowserStore`].
//!
//! TRADE-OFFS
//! ==========
//! SSR paths no-op so server rendering stays deterministic; the stored
//! preference is applied once the page hydrates.

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

use session::Theme;
#[cfg(feature = "hydrate")]
use session::theme::THEME_ATTRIBUTE;

/// Apply `theme` to the `<html>` element.
pub fn apply(theme: Theme) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            match theme.attribute() {
                Some(value) => {
                    let _ = el.set_attribute(THEME_ATTRIBUTE, value);
                }
                None => {
                    let _ = el.remove_attribute(THEME_ATTRIBUTE);
                }
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = theme;
    }
}
