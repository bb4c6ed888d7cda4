//! Browser DOM layer for the post composer.
//!
//! This crate provides the browser implementations of the `composer-core`
//! platform traits and wires the composer into an existing page. It assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `file`: `web_sys::File` wrapper implementing `MediaFile`
//! - `decode`: `FileReader`-based data URI decoding
//! - `probe`: off-DOM `<video>` duration probe
//! - `host`: `execCommand` rich-text host and `alert` notifier
//! - `elements`: lookup of the composer's page elements
//! - `render`: drawing a `PreviewProjection` into the page
//! - `events`: click target classification for tile controls
//! - `form_data`: payload to `FormData`
//! - `mount`: event wiring and the live composer handle
//!
//! # Re-exports
//!
//! This crate re-exports `composer-core` for convenience, so consumers
//! only need to depend on `composer-browser`.

// Re-export core crate
pub use composer_core;
pub use composer_core::*;

pub mod decode;
pub mod elements;
pub mod events;
pub mod file;
pub mod form_data;
pub mod host;
pub mod mount;
pub mod probe;
pub mod render;

pub use decode::{FileReaderDecoder, read_data_url};
pub use elements::ComposerElements;
pub use events::{TileAction, tile_action};
pub use file::{BrowserFile, files_from_list};
pub use form_data::to_form_data;
pub use host::{AlertNotifier, DocumentRichText};
pub use mount::MountedComposer;
pub use probe::VideoProbe;

use wasm_bindgen::JsValue;

/// Convert a JS exception into a platform error.
pub(crate) fn js_error(value: JsValue) -> PlatformError {
    match value.as_string() {
        Some(message) => PlatformError(message),
        None => PlatformError(format!("{:?}", value)),
    }
}
