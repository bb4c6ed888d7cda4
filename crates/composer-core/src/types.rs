//! Core attachment types: media kind, identity, source files and the accepted
//! attachment record.
//!
//! These types are framework-agnostic. The browser layer wraps `web_sys::File`
//! in its own `MediaFile` implementation; tests and native callers use
//! [`InMemoryFile`].

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;
use web_time::{SystemTime, UNIX_EPOCH};

/// Kind of media held by an attachment, derived from the content type prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a declared content type.
    ///
    /// Returns `None` for anything that isn't `image/*` or `video/*`; those
    /// files are rejected at ingestion.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        if content_type.starts_with("image/") {
            Some(Self::Image)
        } else if content_type.starts_with("video/") {
            Some(Self::Video)
        } else {
            None
        }
    }

    /// Name used in the `mediaTypes[i]` payload field.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Short label shown on the preview tile.
    pub fn badge(&self) -> &'static str {
        match self {
            MediaKind::Image => "IMG",
            MediaKind::Video => "VIDEO",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identity of an attachment.
///
/// A millisecond timestamp alone collides when several files are accepted in
/// the same instant, so every id also carries a sequence number that is
/// monotonic per [`IdGenerator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttachmentId {
    millis: u64,
    seq: u64,
}

impl AttachmentId {
    pub fn new(millis: u64, seq: u64) -> Self {
        Self { millis, seq }
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.millis, self.seq)
    }
}

/// Error parsing an attachment id back from its `data-id` form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid attachment id: {0:?}")]
pub struct ParseAttachmentIdError(pub String);

impl FromStr for AttachmentId {
    type Err = ParseAttachmentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseAttachmentIdError(s.to_string());
        let (millis, seq) = s.split_once('-').ok_or_else(err)?;
        Ok(Self {
            millis: millis.parse().map_err(|_| err())?,
            seq: seq.parse().map_err(|_| err())?,
        })
    }
}

/// Hands out unique attachment ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next_seq: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id stamped with the current wall clock time.
    pub fn next_id(&mut self) -> AttachmentId {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        self.next_at(millis)
    }

    /// Next id stamped with an explicit timestamp.
    pub fn next_at(&mut self, millis: u64) -> AttachmentId {
        let seq = self.next_seq;
        self.next_seq += 1;
        AttachmentId { millis, seq }
    }
}

/// Handle to a user-selected file.
///
/// The composer only ever holds the handle; byte content stays with whoever
/// owns the file (the browser runtime, or a `Bytes` buffer in tests).
pub trait MediaFile: Clone {
    /// File name as reported by the picker or drop event.
    fn name(&self) -> &str;

    /// Declared content type (e.g. `image/png`).
    fn content_type(&self) -> &str;

    /// Size in bytes.
    fn byte_size(&self) -> u64;
}

/// A file whose content is held in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InMemoryFile {
    pub name: SmolStr,
    pub content_type: SmolStr,
    pub data: Bytes,
}

impl InMemoryFile {
    pub fn new(
        name: impl Into<SmolStr>,
        content_type: impl Into<SmolStr>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }
}

impl MediaFile for InMemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn byte_size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// One accepted media file plus its derived metadata.
#[derive(Clone, Debug)]
pub struct Attachment<F> {
    pub id: AttachmentId,
    pub source: F,
    /// Decoded representation (data URI) ready for display.
    pub preview: SmolStr,
    pub kind: MediaKind,
    pub byte_size: u64,
    /// Play length in seconds. Only ever set for videos, and left unset when
    /// the duration could not be resolved.
    pub duration_seconds: Option<f64>,
}

impl<F: MediaFile> Attachment<F> {
    pub fn name(&self) -> &str {
        self.source.name()
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}
