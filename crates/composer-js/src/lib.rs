//! WASM bindings for the post composer.
//!
//! Call `mount(config, onSubmit)` once the page's composer markup is in the
//! document. `config` is a plain object (`probeTimeoutMs`, `order`, `locale`,
//! `placeholder`, all optional); `onSubmit(formData, summary)` receives every
//! valid submission.

mod composer;

pub use composer::*;

use wasm_bindgen::prelude::*;

/// Install the panic hook and the console tracing subscriber.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt;

    let (console_level, directives) = if cfg!(debug_assertions) {
        (Level::DEBUG, "debug")
    } else {
        (Level::INFO, "info")
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );
    let filter = EnvFilter::new(directives);

    let reg = Registry::default().with(filter).with(wasm_layer);

    // A host page may already have installed a subscriber.
    let _ = set_global_default(reg);
}
