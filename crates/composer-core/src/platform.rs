//! Platform abstraction traits for composer operations.
//!
//! These traits define the interface between the composer logic and the host
//! environment: reading file content, probing video metadata, executing
//! rich-text commands and showing notifications. The browser implementations
//! live in `composer-browser`.

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::types::{InMemoryFile, MediaFile};

/// Error type for platform operations.
#[derive(Debug, Clone)]
pub struct PlatformError(pub String);

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PlatformError {}

impl From<&str> for PlatformError {
    fn from(s: &str) -> Self {
        PlatformError(s.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(s: String) -> Self {
        PlatformError(s)
    }
}

/// Decodes file content into a displayable preview (a data URI).
///
/// Decoding is the one place ingestion yields to the event loop.
#[allow(async_fn_in_trait)]
pub trait MediaDecoder<F: MediaFile> {
    async fn decode(&self, file: &F) -> Result<String, PlatformError>;
}

/// Resolves the play length of decoded video data.
///
/// Implementations load the preview into an off-screen player and report the
/// duration once metadata is available. Callers bound the wait with a timeout.
#[allow(async_fn_in_trait)]
pub trait DurationProbe {
    async fn probe_duration(&self, preview: &str) -> Result<f64, PlatformError>;
}

/// Host rich-text editing primitives.
///
/// The composer never formats text itself; toolbar commands are forwarded
/// to whatever editing surface hosts the description.
pub trait RichTextHost {
    /// Execute a named formatting command (`bold`, `italic`, ...).
    fn exec_command(&self, command: &str) -> Result<(), PlatformError>;

    /// Move keyboard focus back to the description field.
    fn focus_description(&self);
}

/// Unit type implementation - commands are accepted and ignored.
impl RichTextHost for () {
    fn exec_command(&self, _command: &str) -> Result<(), PlatformError> {
        Ok(())
    }

    fn focus_description(&self) {}
}

/// Severity of a user-facing notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message to surface to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Surfaces notices to the user.
pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

/// Unit type implementation - notices are dropped.
impl Notifier for () {
    fn notify(&self, _notice: &Notice) {}
}

impl<T: Notifier> Notifier for &T {
    fn notify(&self, notice: &Notice) {
        (*self).notify(notice)
    }
}

/// Decoder for in-memory files: base64 data URI of the full content.
#[derive(Clone, Copy, Debug, Default)]
pub struct DataUrlDecoder;

impl MediaDecoder<InMemoryFile> for DataUrlDecoder {
    async fn decode(&self, file: &InMemoryFile) -> Result<String, PlatformError> {
        Ok(format!(
            "data:{};base64,{}",
            file.content_type,
            STANDARD.encode(&file.data)
        ))
    }
}
