//! Composer configuration.
//!
//! Deserialized from a plain object handed over by the embedding page. Every
//! field has a default so an empty object is a valid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::messages::{Locale, Messages};

/// Default bound on video duration resolution.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 10_000;

/// Order in which a batch of loaded files enters the attachment list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentOrder {
    /// Wait for the whole batch, then append in selection order.
    #[default]
    Selection,
    /// Append each file as soon as it has loaded. Videos wait on duration
    /// resolution, so they can land after images selected later.
    Completion,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComposerConfig {
    /// Upper bound on waiting for video metadata, in milliseconds.
    pub probe_timeout_ms: u64,
    pub order: AttachmentOrder,
    pub locale: Locale,
    /// Description placeholder text. When unset the browser layer falls back
    /// to the element's `data-placeholder` attribute.
    pub placeholder: Option<String>,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            order: AttachmentOrder::default(),
            locale: Locale::default(),
            placeholder: None,
        }
    }
}

/// Errors in a composer configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("probe timeout must be greater than zero")]
    ZeroProbeTimeout,
}

impl ComposerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe_timeout_ms == 0 {
            return Err(ConfigError::ZeroProbeTimeout);
        }
        Ok(())
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn messages(&self) -> Messages {
        Messages::new(self.locale)
    }
}
