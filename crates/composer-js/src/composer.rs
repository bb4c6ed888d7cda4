//! JsComposer - the mounted composer handle for JavaScript.

use wasm_bindgen::prelude::*;

use composer_browser::{ComposerConfig, MountedComposer};

/// A composer bound to the current page.
///
/// Event listeners stay attached while this handle is alive; call `free()`
/// to detach them.
#[wasm_bindgen]
pub struct JsComposer {
    inner: MountedComposer,
}

/// Bind the composer to the page's elements.
#[wasm_bindgen]
pub fn mount(
    config: JsValue,
    on_submit: Option<js_sys::Function>,
) -> Result<JsComposer, JsError> {
    let config = parse_config(config)?;
    let inner =
        MountedComposer::mount(config, on_submit).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(JsComposer { inner })
}

fn parse_config(value: JsValue) -> Result<ComposerConfig, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(ComposerConfig::default());
    }
    let config: ComposerConfig = serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsError::new(&format!("invalid composer config: {}", e)))?;
    config
        .validate()
        .map_err(|e| JsError::new(&e.to_string()))?;
    Ok(config)
}

#[wasm_bindgen]
impl JsComposer {
    /// Number of attached media files.
    #[wasm_bindgen(js_name = attachmentCount)]
    pub fn attachment_count(&self) -> usize {
        self.inner.attachment_count()
    }

    /// Attachment ids in list order.
    #[wasm_bindgen(js_name = attachmentIds)]
    pub fn attachment_ids(&self) -> Vec<String> {
        self.inner
            .attachment_ids()
            .into_iter()
            .map(|id| id.to_string())
            .collect()
    }

    /// Remove an attachment by id. Unknown ids are ignored.
    pub fn remove(&self, id: &str) -> bool {
        self.inner.remove(id)
    }

    /// The effective configuration, with the placeholder resolved from the
    /// page when it wasn't configured.
    pub fn config(&self) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.inner.config())
            .map_err(|e| JsError::new(&e.to_string()))
    }
}
