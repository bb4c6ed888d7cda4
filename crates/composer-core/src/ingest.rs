//! Ingestion: type screening, decoding and video duration resolution.
//!
//! Ingestion runs in two halves so callers that share the composer across
//! event handlers never hold it across a suspension point:
//!
//! 1. [`screen_files`] is synchronous. It rejects unsupported content types
//!    and assigns ids to everything else.
//! 2. [`load_media`] is asynchronous and touches no composer state. It decodes
//!    the preview and, for videos, resolves the duration under a timeout.
//!
//! [`load_batch`] drives the second half for a whole batch and hands the
//! resulting [`Attachment`]s back in the order they join the list.

use std::time::Duration;

use n0_future::{FuturesUnordered, StreamExt};
use smol_str::SmolStr;
use thiserror::Error;

use crate::config::AttachmentOrder;
use crate::platform::{DurationProbe, MediaDecoder, PlatformError};
use crate::types::{Attachment, AttachmentId, IdGenerator, MediaFile, MediaKind};

/// File content could not be decoded into a preview. The file is skipped.
#[derive(Error, Debug, Clone)]
#[error("failed to decode {name}: {source}")]
pub struct DecodeError {
    pub name: SmolStr,
    #[source]
    pub source: PlatformError,
}

/// Why a video's duration could not be resolved.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum IngestError {
    /// The duration probe reported an error.
    #[error("duration probe failed: {0}")]
    Probe(#[from] PlatformError),

    /// Metadata never arrived within the configured bound.
    #[error("duration probe timed out after {0:?}")]
    ProbeTimeout(Duration),
}

/// An accepted file waiting to be decoded.
#[derive(Clone, Debug)]
pub struct PendingMedia<F> {
    pub id: AttachmentId,
    pub file: F,
    pub kind: MediaKind,
}

/// Outcome of screening a batch.
#[derive(Clone, Debug)]
pub struct Screened<F> {
    pub accepted: Vec<PendingMedia<F>>,
    /// Names of rejected files, in selection order.
    pub rejected: Vec<SmolStr>,
}

/// Split a batch into accepted media and rejected file names.
///
/// A rejected file never stops the rest of the batch.
pub fn screen_files<F: MediaFile>(
    files: impl IntoIterator<Item = F>,
    ids: &mut IdGenerator,
) -> Screened<F> {
    let mut accepted = Vec::new();
    let mut rejected = Vec::new();

    for file in files {
        match MediaKind::from_content_type(file.content_type()) {
            Some(kind) => {
                let id = ids.next_id();
                tracing::debug!(%id, name = file.name(), %kind, "accepted file");
                accepted.push(PendingMedia { id, file, kind });
            }
            None => {
                tracing::warn!(
                    name = file.name(),
                    content_type = file.content_type(),
                    "rejected unsupported file"
                );
                rejected.push(SmolStr::new(file.name()));
            }
        }
    }

    Screened { accepted, rejected }
}

/// Decode a pending file and, for videos, resolve its duration.
///
/// Duration failures are not fatal: the video is returned with no duration.
/// Only a decode failure keeps the file out of the list.
pub async fn load_media<F, D, P>(
    pending: PendingMedia<F>,
    decoder: &D,
    probe: &P,
    probe_timeout: Duration,
) -> Result<Attachment<F>, DecodeError>
where
    F: MediaFile,
    D: MediaDecoder<F>,
    P: DurationProbe,
{
    let PendingMedia { id, file, kind } = pending;

    let preview = decoder
        .decode(&file)
        .await
        .map_err(|source| DecodeError {
            name: SmolStr::new(file.name()),
            source,
        })?;

    let duration_seconds = match kind {
        MediaKind::Image => None,
        MediaKind::Video => match resolve_duration(probe, &preview, probe_timeout).await {
            Ok(seconds) if seconds.is_finite() && seconds >= 0.0 => Some(seconds),
            Ok(seconds) => {
                tracing::debug!(%id, seconds, "video reported no finite duration");
                None
            }
            Err(e) => {
                tracing::warn!(
                    %id,
                    name = file.name(),
                    error = %e,
                    "inserting video without duration"
                );
                None
            }
        },
    };

    Ok(Attachment {
        id,
        byte_size: file.byte_size(),
        source: file,
        preview: SmolStr::from(preview),
        kind,
        duration_seconds,
    })
}

/// Load a screened batch and hand the results over in list order.
///
/// `land` receives each group of results that joins the list together: the
/// whole batch in selection order once every file has loaded, or one file at
/// a time as each finishes. It is called between polls, never while a load is
/// running, so it may borrow whatever owns the list.
pub async fn load_batch<F, D, P, L>(
    pending: Vec<PendingMedia<F>>,
    decoder: &D,
    probe: &P,
    probe_timeout: Duration,
    order: AttachmentOrder,
    mut land: L,
) where
    F: MediaFile,
    D: MediaDecoder<F>,
    P: DurationProbe,
    L: FnMut(Vec<Result<Attachment<F>, DecodeError>>),
{
    let loads = pending
        .into_iter()
        .map(|p| load_media(p, decoder, probe, probe_timeout));

    match order {
        AttachmentOrder::Selection => land(n0_future::join_all(loads).await),
        AttachmentOrder::Completion => {
            let mut loads: FuturesUnordered<_> = loads.collect();
            while let Some(loaded) = loads.next().await {
                land(vec![loaded]);
            }
        }
    }
}

/// Probe a decoded video for its duration, giving up after `limit`.
pub async fn resolve_duration<P: DurationProbe>(
    probe: &P,
    preview: &str,
    limit: Duration,
) -> Result<f64, IngestError> {
    match n0_future::time::timeout(limit, probe.probe_duration(preview)).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(IngestError::ProbeTimeout(limit)),
    }
}
