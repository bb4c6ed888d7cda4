//! Payload to multipart `FormData`.

use composer_core::{MediaFile, Payload, PayloadValue};
use wasm_bindgen::JsValue;
use web_sys::FormData;

use crate::file::BrowserFile;

/// Build a `FormData` with the payload's fields in order.
pub fn to_form_data(payload: &Payload<BrowserFile>) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    for field in payload.fields() {
        match field.value {
            PayloadValue::Text(text) => form.append_with_str(&field.name, text)?,
            PayloadValue::File(file) => {
                form.append_with_blob_and_filename(&field.name, file.as_file(), file.name())?
            }
        }
    }
    Ok(form)
}
