//! Video duration probe.

use composer_core::{DurationProbe, PlatformError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlVideoElement;

use crate::js_error;

/// Loads decoded video into a detached `<video>` element and reads its
/// duration once metadata is available.
///
/// The element is never attached to the document. It is released when the
/// probe finishes or when the caller drops the future on timeout.
#[derive(Clone, Copy, Debug, Default)]
pub struct VideoProbe;

impl DurationProbe for VideoProbe {
    async fn probe_duration(&self, preview: &str) -> Result<f64, PlatformError> {
        probe(preview).await.map_err(js_error)
    }
}

/// Detaches the probe element's handlers and stops loading on drop.
struct ProbeElement(HtmlVideoElement);

impl Drop for ProbeElement {
    fn drop(&mut self) {
        let video = &self.0;
        video.set_onloadedmetadata(None);
        video.set_onerror(None);
        let _ = video.remove_attribute("src");
        video.load();
    }
}

async fn probe(src: &str) -> Result<f64, JsValue> {
    let video: HtmlVideoElement = gloo_utils::document()
        .create_element("video")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("created element is not a video"))?;
    video.set_preload("metadata");
    video.set_muted(true);
    let element = ProbeElement(video);

    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        element.0.set_onloadedmetadata(Some(&resolve));
        element.0.set_onerror(Some(&reject));
    });
    element.0.set_src(src);
    JsFuture::from(loaded).await?;

    let duration = element.0.duration();
    tracing::debug!(duration, "video metadata loaded");
    Ok(duration)
}
