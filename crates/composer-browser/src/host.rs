//! Browser implementations of the rich-text host and notifier.

use composer_core::{Notice, NoticeLevel, Notifier, PlatformError, RichTextHost};
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, HtmlElement};

use crate::js_error;

/// Rich-text host backed by `document.execCommand` on the description's
/// contenteditable element.
#[derive(Clone, Debug)]
pub struct DocumentRichText {
    description: HtmlElement,
}

impl DocumentRichText {
    pub fn new(description: HtmlElement) -> Self {
        Self { description }
    }
}

impl RichTextHost for DocumentRichText {
    fn exec_command(&self, command: &str) -> Result<(), PlatformError> {
        let document: HtmlDocument = gloo_utils::document()
            .dyn_into()
            .map_err(|_| PlatformError::from("document is not an HTML document"))?;
        let applied = document.exec_command(command).map_err(js_error)?;
        if !applied {
            tracing::debug!(command, "execCommand reported no change");
        }
        Ok(())
    }

    fn focus_description(&self) {
        // Focus handlers re-enter the composer, which is still borrowed by the
        // toolbar handler at this point. Focus once that handler has returned.
        let description = self.description.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = description.focus() {
                tracing::debug!("could not focus description: {:?}", e);
            }
        });
    }
}

/// Notifier using the blocking `window.alert`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Info => tracing::info!(message = %notice.message, "notice"),
            NoticeLevel::Warning => tracing::warn!(message = %notice.message, "notice"),
            NoticeLevel::Error => tracing::error!(message = %notice.message, "notice"),
        }
        if let Err(e) = gloo_utils::window().alert_with_message(&notice.message) {
            tracing::warn!("alert failed: {:?}", e);
        }
    }
}
