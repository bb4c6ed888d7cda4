//! File decoding via `FileReader`.

use composer_core::{MediaDecoder, PlatformError};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FileReader};

use crate::file::BrowserFile;
use crate::js_error;

/// Decodes browser files into base64 data URIs.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileReaderDecoder;

impl MediaDecoder<BrowserFile> for FileReaderDecoder {
    async fn decode(&self, file: &BrowserFile) -> Result<String, PlatformError> {
        read_data_url(file.as_file()).await.map_err(js_error)
    }
}

/// Read the whole file as a data URI.
///
/// The reader's `load` and `error` events settle a promise directly, so no
/// Rust closure has to outlive this call.
pub async fn read_data_url(file: &File) -> Result<String, JsValue> {
    let reader = FileReader::new()?;
    let done = js_sys::Promise::new(&mut |resolve, reject| {
        reader.set_onload(Some(&resolve));
        reader.set_onerror(Some(&reject));
    });
    reader.read_as_data_url(file)?;
    JsFuture::from(done).await?;

    reader
        .result()?
        .as_string()
        .ok_or_else(|| JsValue::from_str("FileReader result is not a string"))
}
