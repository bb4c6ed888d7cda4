//! The composer: owned state for one post being written.
//!
//! `Composer` ties the attachment list, id generation, playback tiles,
//! toolbar and description state together. It owns no DOM handles; callers
//! feed it files and events, and read back a [`PreviewProjection`] to draw.

use crate::attachments::AttachmentList;
use crate::config::{ComposerConfig, ConfigError};
use crate::ingest::{DecodeError, PendingMedia, load_batch, screen_files};
use crate::messages::Messages;
use crate::platform::{DurationProbe, MediaDecoder, Notice, Notifier, PlatformError, RichTextHost};
use crate::playback::{PlaybackBook, PlaybackEvent, TilePlayback};
use crate::projection::{PreviewProjection, project};
use crate::submit::{Payload, SubmissionSummary, Submission, SubmitError, validate};
use crate::toolbar::{DescriptionField, ToolbarState};
use crate::types::{Attachment, AttachmentId, IdGenerator, MediaFile};

/// Files accepted from a batch, plus warnings for the ones that weren't.
#[derive(Clone, Debug)]
pub struct Accepted<F> {
    pub pending: Vec<PendingMedia<F>>,
    pub notices: Vec<Notice>,
}

/// Outcome of ingesting a batch.
#[derive(Clone, Debug, Default)]
pub struct IngestReport {
    /// Ids appended to the list, in the order they were appended.
    pub added: Vec<AttachmentId>,
    pub notices: Vec<Notice>,
}

impl IngestReport {
    pub fn notify_all<N: Notifier>(&self, notifier: &N) {
        for notice in &self.notices {
            notifier.notify(notice);
        }
    }
}

pub struct Composer<F> {
    config: ComposerConfig,
    messages: Messages,
    ids: IdGenerator,
    attachments: AttachmentList<F>,
    playback: PlaybackBook,
    toolbar: ToolbarState,
    description: DescriptionField,
    revision: u64,
}

impl<F: MediaFile> Composer<F> {
    pub fn new(config: ComposerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            messages: config.messages(),
            description: DescriptionField::new(config.placeholder.clone()),
            config,
            ids: IdGenerator::new(),
            attachments: AttachmentList::new(),
            playback: PlaybackBook::new(),
            toolbar: ToolbarState::new(),
            revision: 0,
        })
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn attachments(&self) -> &AttachmentList<F> {
        &self.attachments
    }

    /// Bumped on every list mutation; a changed revision means re-render.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // === Ingestion ===

    /// Screen a batch, assigning ids to accepted files.
    pub fn accept(&mut self, files: impl IntoIterator<Item = F>) -> Accepted<F> {
        let screened = screen_files(files, &mut self.ids);
        let notices = screened
            .rejected
            .iter()
            .map(|name| Notice::warning(self.messages.unsupported_file(name)))
            .collect();
        Accepted {
            pending: screened.accepted,
            notices,
        }
    }

    /// Take one loaded file into the list.
    ///
    /// Returns the appended id, or a notice when the file could not be used.
    pub fn settle(
        &mut self,
        loaded: Result<Attachment<F>, DecodeError>,
    ) -> Result<AttachmentId, Notice> {
        match loaded {
            Ok(attachment) => {
                let id = attachment.id;
                if self.append(attachment) {
                    Ok(id)
                } else {
                    Err(Notice::error(format!("duplicate attachment {}", id)))
                }
            }
            Err(DecodeError { name, source }) => {
                tracing::warn!(%name, error = %source, "could not decode file");
                Err(Notice::warning(self.messages.decode_failed(&name)))
            }
        }
    }

    /// Ingest a batch end to end.
    ///
    /// Holds `&mut self` across the decode and probe awaits. Callers that
    /// share the composer between event handlers should use [`Self::accept`],
    /// [`load_batch`] and [`Self::settle`] directly.
    pub async fn ingest<D, P>(&mut self, files: Vec<F>, decoder: &D, probe: &P) -> IngestReport
    where
        D: MediaDecoder<F>,
        P: DurationProbe,
    {
        let Accepted { pending, notices } = self.accept(files);
        let mut report = IngestReport {
            added: Vec::new(),
            notices,
        };
        let limit = self.config.probe_timeout();
        let order = self.config.order;

        load_batch(pending, decoder, probe, limit, order, |landed| {
            for loaded in landed {
                match self.settle(loaded) {
                    Ok(id) => report.added.push(id),
                    Err(notice) => report.notices.push(notice),
                }
            }
        })
        .await;

        report
    }

    // === List mutation ===

    pub fn append(&mut self, attachment: Attachment<F>) -> bool {
        let id = attachment.id;
        let appended = self.attachments.append(attachment);
        if appended {
            self.revision += 1;
            tracing::debug!(%id, count = self.attachments.len(), "attachment appended");
        }
        appended
    }

    /// Remove an attachment. Unknown ids are ignored.
    pub fn remove(&mut self, id: AttachmentId) -> bool {
        match self.attachments.remove(id) {
            Some(_) => {
                self.playback.forget(id);
                self.revision += 1;
                tracing::debug!(%id, count = self.attachments.len(), "attachment removed");
                true
            }
            None => false,
        }
    }

    // === Rendering ===

    /// Build the preview projection. Tiles are drawn fresh, so every video
    /// tile's playback state starts over.
    pub fn render(&mut self) -> PreviewProjection {
        self.playback.reset(
            self.attachments
                .iter()
                .filter(|a| a.is_video())
                .map(|a| a.id),
        );
        project(&self.attachments, &self.messages)
    }

    pub fn playback(&mut self, id: AttachmentId, event: PlaybackEvent) -> Option<TilePlayback> {
        self.playback.apply(id, event)
    }

    pub fn playback_state(&self, id: AttachmentId) -> Option<TilePlayback> {
        self.playback.get(id)
    }

    // === Toolbar and description ===

    pub fn format<H: RichTextHost + ?Sized>(
        &mut self,
        command: &str,
        host: &H,
    ) -> Result<bool, PlatformError> {
        self.toolbar.apply(command, host)
    }

    pub fn toolbar(&self) -> &ToolbarState {
        &self.toolbar
    }

    pub fn description(&self) -> &DescriptionField {
        &self.description
    }

    // === Submission ===

    /// Validate the form and assemble the payload.
    ///
    /// Never touches the attachment list.
    pub fn submit(
        &self,
        title: &str,
        description_html: &str,
    ) -> Result<Submission<F>, SubmitError> {
        let (title, description) = validate(title, description_html, &self.description)?;

        let summary = SubmissionSummary::from_list(&title, &description, &self.attachments);
        match serde_json::to_string(&summary) {
            Ok(json) => tracing::info!(summary = %json, "post submitted"),
            Err(e) => tracing::warn!(error = %e, "could not serialize submission summary"),
        }

        Ok(Submission {
            payload: Payload::assemble(title, description, &self.attachments),
            summary,
        })
    }
}

#[cfg(test)]
mod tests;
