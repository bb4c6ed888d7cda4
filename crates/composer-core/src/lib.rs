//! composer-core: Pure Rust post composer logic without DOM dependencies.
//!
//! This crate provides:
//! - `Attachment` / `AttachmentList` - the ordered set of accepted media
//! - Ingestion: type screening, decoding, bounded video duration resolution
//! - `PreviewProjection` - full-rebuild view model of the attachment list
//! - Per-tile playback state machines, toolbar and placeholder state
//! - Submission validation and ordered multipart payload assembly
//!
//! Browser specifics (file reading, video probing, DOM updates) live behind the
//! traits in [`platform`] and are implemented by `composer-browser`.

pub mod attachments;
pub mod composer;
pub mod config;
pub mod format;
pub mod ingest;
pub mod messages;
pub mod platform;
pub mod playback;
pub mod projection;
pub mod submit;
pub mod toolbar;
pub mod types;

pub use attachments::AttachmentList;
pub use composer::{Accepted, Composer, IngestReport};
pub use config::{AttachmentOrder, ComposerConfig, ConfigError};
pub use format::{format_duration, format_file_size};
pub use ingest::{
    DecodeError, IngestError, PendingMedia, load_batch, load_media, resolve_duration, screen_files,
};
pub use messages::{Locale, Messages};
pub use platform::{
    DataUrlDecoder, DurationProbe, MediaDecoder, Notice, NoticeLevel, Notifier, PlatformError,
    RichTextHost,
};
pub use playback::{PlaybackBook, PlaybackEvent, TilePlayback};
pub use projection::{PreviewProjection, PreviewTile, project, selection_summary};
pub use smol_str::SmolStr;
pub use submit::{
    FormField, MediaSummary, Payload, PayloadField, PayloadMedia, PayloadValue, SubmissionSummary,
    SubmitError, Submission,
};
pub use toolbar::{DescriptionField, ToolbarState};
pub use types::{
    Attachment, AttachmentId, IdGenerator, InMemoryFile, MediaFile, MediaKind,
    ParseAttachmentIdError,
};
