use std::cell::RefCell;
use std::time::Duration;

use super::*;
use crate::config::AttachmentOrder;
use crate::ingest::load_media;
use crate::platform::{DataUrlDecoder, NoticeLevel};
use crate::projection::PreviewTile;
use crate::submit::{FormField, PayloadValue};
use crate::types::{InMemoryFile, MediaKind};

/// Probe that takes a while and then reports a fixed duration.
struct SlowProbe {
    delay: Duration,
    seconds: f64,
}

impl DurationProbe for SlowProbe {
    async fn probe_duration(&self, _preview: &str) -> Result<f64, PlatformError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.seconds)
    }
}

/// Probe whose metadata never arrives.
struct StalledProbe;

impl DurationProbe for StalledProbe {
    async fn probe_duration(&self, _preview: &str) -> Result<f64, PlatformError> {
        std::future::pending().await
    }
}

/// Decoder that fails for one named file.
struct PickyDecoder(&'static str);

impl MediaDecoder<InMemoryFile> for PickyDecoder {
    async fn decode(&self, file: &InMemoryFile) -> Result<String, PlatformError> {
        if file.name == self.0 {
            Err("unreadable".into())
        } else {
            DataUrlDecoder.decode(file).await
        }
    }
}

#[derive(Default)]
struct RecordingNotifier {
    seen: RefCell<Vec<Notice>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.seen.borrow_mut().push(notice.clone());
    }
}

fn image(name: &str, size: usize) -> InMemoryFile {
    InMemoryFile::new(name, "image/jpeg", vec![0u8; size])
}

fn video(name: &str, size: usize) -> InMemoryFile {
    InMemoryFile::new(name, "video/mp4", vec![0u8; size])
}

fn composer(order: AttachmentOrder) -> Composer<InMemoryFile> {
    Composer::new(ComposerConfig {
        probe_timeout_ms: 50,
        order,
        placeholder: Some("Say something".into()),
        ..Default::default()
    })
    .unwrap()
}

fn names(composer: &Composer<InMemoryFile>) -> Vec<String> {
    composer
        .attachments()
        .iter()
        .map(|a| a.name().to_string())
        .collect()
}

const QUICK: SlowProbe = SlowProbe {
    delay: Duration::from_millis(1),
    seconds: 12.0,
};

#[test]
fn test_invalid_config_rejected() {
    let result = Composer::<InMemoryFile>::new(ComposerConfig {
        probe_timeout_ms: 0,
        ..Default::default()
    });
    assert!(matches!(result, Err(ConfigError::ZeroProbeTimeout)));
}

#[tokio::test]
async fn test_unsupported_file_never_changes_list() {
    let mut composer = composer(AttachmentOrder::Selection);
    let report = composer
        .ingest(
            vec![InMemoryFile::new("doc.pdf", "application/pdf", vec![1, 2])],
            &DataUrlDecoder,
            &QUICK,
        )
        .await;

    assert!(composer.attachments().is_empty());
    assert!(report.added.is_empty());
    assert_eq!(
        report.notices,
        vec![Notice::warning("Unsupported file type: doc.pdf")]
    );
    assert_eq!(composer.revision(), 0);
}

#[tokio::test]
async fn test_mixed_batch_keeps_going_past_rejections() {
    let mut composer = composer(AttachmentOrder::Selection);
    let report = composer
        .ingest(
            vec![
                image("a.jpg", 10),
                InMemoryFile::new("notes.txt", "text/plain", vec![1]),
                video("b.mp4", 20),
            ],
            &DataUrlDecoder,
            &QUICK,
        )
        .await;

    assert_eq!(report.added.len(), 2);
    assert_eq!(report.notices.len(), 1);
    assert_eq!(names(&composer), vec!["a.jpg", "b.mp4"]);
    let video = composer.attachments().get(report.added[1]).unwrap();
    assert_eq!(video.duration_seconds, Some(12.0));
}

#[tokio::test]
async fn test_selection_order_waits_for_slow_video() {
    let mut composer = composer(AttachmentOrder::Selection);
    let probe = SlowProbe {
        delay: Duration::from_millis(30),
        seconds: 3.0,
    };
    composer
        .ingest(
            vec![video("slow.mp4", 1), image("fast.jpg", 1)],
            &DataUrlDecoder,
            &probe,
        )
        .await;

    assert_eq!(names(&composer), vec!["slow.mp4", "fast.jpg"]);
}

#[tokio::test]
async fn test_completion_order_lands_image_first() {
    let mut composer = composer(AttachmentOrder::Completion);
    let probe = SlowProbe {
        delay: Duration::from_millis(30),
        seconds: 3.0,
    };
    let report = composer
        .ingest(
            vec![video("slow.mp4", 1), image("fast.jpg", 1)],
            &DataUrlDecoder,
            &probe,
        )
        .await;

    assert_eq!(names(&composer), vec!["fast.jpg", "slow.mp4"]);
    assert_eq!(report.added, composer.attachments().ids().collect::<Vec<_>>());
}

#[tokio::test]
async fn test_stalled_video_inserted_after_timeout() {
    let mut composer = composer(AttachmentOrder::Selection);
    let report = composer
        .ingest(vec![video("corrupt.mp4", 5)], &DataUrlDecoder, &StalledProbe)
        .await;

    assert_eq!(report.added.len(), 1);
    let attachment = composer.attachments().get(report.added[0]).unwrap();
    assert_eq!(attachment.kind, MediaKind::Video);
    assert_eq!(attachment.duration_seconds, None);

    let view = composer.render();
    assert!(matches!(
        &view.tiles[0],
        PreviewTile::Video {
            duration_label: None,
            ..
        }
    ));
}

#[tokio::test]
async fn test_decode_failure_is_reported_and_skipped() {
    let mut composer = composer(AttachmentOrder::Selection);
    let notifier = RecordingNotifier::default();
    let report = composer
        .ingest(
            vec![image("ok.jpg", 1), image("bad.jpg", 1)],
            &PickyDecoder("bad.jpg"),
            &QUICK,
        )
        .await;
    report.notify_all(&notifier);

    assert_eq!(names(&composer), vec!["ok.jpg"]);
    let seen = notifier.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].level, NoticeLevel::Warning);
    assert_eq!(seen[0].message, "Could not read file: bad.jpg");
}

#[tokio::test]
async fn test_split_ingestion_matches_ingest() {
    let mut composer = composer(AttachmentOrder::Completion);
    let accepted = composer.accept(vec![image("a.jpg", 3), video("b.mp4", 4)]);
    assert!(accepted.notices.is_empty());
    assert!(composer.attachments().is_empty());

    let limit = composer.config().probe_timeout();
    for pending in accepted.pending {
        let loaded = load_media(pending, &DataUrlDecoder, &QUICK, limit).await;
        assert!(composer.settle(loaded).is_ok());
    }
    assert_eq!(names(&composer), vec!["a.jpg", "b.mp4"]);
    assert_eq!(composer.revision(), 2);
}

#[tokio::test]
async fn test_remove_missing_id_is_noop() {
    let mut composer = composer(AttachmentOrder::Selection);
    composer
        .ingest(vec![image("a.jpg", 1)], &DataUrlDecoder, &QUICK)
        .await;
    let before = composer.render();
    let revision = composer.revision();

    assert!(!composer.remove(AttachmentId::new(0, 999)));
    assert_eq!(composer.revision(), revision);
    assert_eq!(composer.render(), before);
}

#[tokio::test]
async fn test_remove_last_attachment_restores_upload_target() {
    let mut composer = composer(AttachmentOrder::Selection);
    let report = composer
        .ingest(vec![image("a.jpg", 1)], &DataUrlDecoder, &QUICK)
        .await;
    assert!(composer.render().grid_visible);

    assert!(composer.remove(report.added[0]));
    let view = composer.render();
    assert!(view.upload_target_visible);
    assert!(!view.grid_visible);
    assert_eq!(view.summary, None);
}

#[tokio::test]
async fn test_render_resets_video_playback() {
    let mut composer = composer(AttachmentOrder::Selection);
    let report = composer
        .ingest(
            vec![video("a.mp4", 1), video("b.mp4", 1), image("c.jpg", 1)],
            &DataUrlDecoder,
            &QUICK,
        )
        .await;
    let (a, b, c) = (report.added[0], report.added[1], report.added[2]);
    composer.render();

    let state = composer.playback(a, PlaybackEvent::TogglePlay).unwrap();
    assert!(state.playing);
    assert_eq!(composer.playback_state(b), Some(TilePlayback::default()));
    // Image tiles have no player.
    assert_eq!(composer.playback(c, PlaybackEvent::TogglePlay), None);

    composer.remove(b);
    assert_eq!(composer.playback_state(b), None);
    composer.render();
    assert_eq!(composer.playback_state(a), Some(TilePlayback::default()));
}

#[tokio::test]
async fn test_submit_rejects_empty_title_without_touching_list() {
    let mut composer = composer(AttachmentOrder::Selection);
    composer
        .ingest(vec![image("a.jpg", 1)], &DataUrlDecoder, &QUICK)
        .await;
    let revision = composer.revision();

    let err = composer.submit("   ", "<p>body</p>").unwrap_err();
    assert_eq!(err, SubmitError::MissingTitle);
    assert_eq!(err.field(), FormField::Title);
    assert_eq!(composer.attachments().len(), 1);
    assert_eq!(composer.revision(), revision);
}

#[test]
fn test_submit_rejects_placeholder_description() {
    let composer = composer(AttachmentOrder::Selection);
    let err = composer.submit("Title", "Say something").unwrap_err();
    assert_eq!(err.field(), FormField::Description);
}

#[tokio::test]
async fn test_submit_payload_layout() {
    let mut composer = composer(AttachmentOrder::Selection);
    composer
        .ingest(
            vec![image("a.jpg", 1536), video("b.mp4", 2048), image("c.png", 1)],
            &DataUrlDecoder,
            &QUICK,
        )
        .await;

    let submission = composer.submit(" My post ", " <b>hello</b> ").unwrap();
    let payload = &submission.payload;
    assert_eq!(payload.title, "My post");
    assert_eq!(payload.description, "<b>hello</b>");
    assert_eq!(payload.media.len(), 3);
    for (expected, media) in payload.media.iter().enumerate() {
        assert_eq!(media.index, expected);
    }
    assert_eq!(
        payload.media.iter().map(|m| m.kind).collect::<Vec<_>>(),
        vec![MediaKind::Image, MediaKind::Video, MediaKind::Image]
    );

    let layout: Vec<String> = payload
        .fields()
        .iter()
        .map(|field| match field.value {
            PayloadValue::Text(text) => format!("{}={}", field.name, text),
            PayloadValue::File(file) => format!("{}=<{}>", field.name, file.name),
        })
        .collect();
    insta::assert_snapshot!(
        layout.join(" "),
        @"title=My post description=<b>hello</b> media[0]=<a.jpg> mediaTypes[0]=image media[1]=<b.mp4> mediaTypes[1]=video media[2]=<c.png> mediaTypes[2]=image"
    );

    let summary = &submission.summary;
    assert_eq!(summary.media[0].size, "1.5 KB");
    assert_eq!(summary.media[1].duration.as_deref(), Some("0:12"));
    assert_eq!(summary.media[0].duration, None);
}

#[test]
fn test_submit_without_media() {
    let composer = composer(AttachmentOrder::Selection);
    let submission = composer.submit("Title", "Body").unwrap();
    assert!(submission.payload.media.is_empty());
    assert_eq!(submission.payload.fields().len(), 2);
}

#[test]
fn test_format_through_composer() {
    let mut composer = composer(AttachmentOrder::Selection);
    assert!(composer.format("underline", &()).unwrap());
    assert!(composer.toolbar().is_active("underline"));
    assert_eq!(composer.description().on_focus(""), Some(false));
    assert_eq!(composer.description().on_focus("draft"), None);
}
