//! I-Pro Solutions site behavior
//!
//! Section navigation, the mobile menu, the contact form hand-off to
//! WhatsApp, and the page's decorative effects, compiled to WebAssembly.
//! `core` is target-independent and tested natively; `app` and `ui` bind
//! it to the browser behind the `csr` feature.

pub mod core;

#[cfg(feature = "csr")]
pub mod app;
#[cfg(feature = "csr")]
pub mod ui;

#[cfg(feature = "csr")]
mod exports {
    use wasm_bindgen::JsError;
    use wasm_bindgen::prelude::*;

    use crate::core::navigation::NavigationOutcome;

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();

        if let Err(err) = crate::app::boot() {
            tracing::error!("site boot failed: {err}");
        }
    }

    /// Navigate to a section. Resolves to `true` when a transition started.
    #[wasm_bindgen(js_name = showSection)]
    pub fn show_section(id: &str) -> Result<bool, JsError> {
        let outcome = crate::app::show_section(id)?;
        Ok(outcome == NavigationOutcome::Started)
    }

    /// Open the messaging link for `text`, optionally to a specific recipient.
    #[wasm_bindgen(js_name = openExternalMessage)]
    pub fn open_external_message(text: &str, recipient: Option<String>) -> Result<(), JsError> {
        let Some(site) = crate::app::site() else {
            return Err(JsError::new("site is not booted"));
        };
        crate::ui::messaging::open_external_message(&site.messaging, text, recipient.as_deref())?;
        Ok(())
    }
}
