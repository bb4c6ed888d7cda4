//! Preview projection: the attachment list as render instructions.
//!
//! The projection is rebuilt in full on every mutation. There is no diffing;
//! a post holds a handful of attachments at most.

use smol_str::SmolStr;

use crate::attachments::AttachmentList;
use crate::format::{format_duration, format_file_size};
use crate::messages::Messages;
use crate::types::{AttachmentId, MediaFile, MediaKind};

/// One cell of the preview grid.
#[derive(Clone, Debug, PartialEq)]
pub enum PreviewTile {
    Image {
        id: AttachmentId,
        src: SmolStr,
        alt: SmolStr,
    },
    /// Muted, paused video with its own playback controls.
    Video {
        id: AttachmentId,
        src: SmolStr,
        /// `m:ss`, present only when a positive duration is known.
        duration_label: Option<String>,
    },
    /// Trailing tile that opens the file picker.
    AddMore { label: &'static str },
}

impl PreviewTile {
    pub fn id(&self) -> Option<AttachmentId> {
        match self {
            PreviewTile::Image { id, .. } | PreviewTile::Video { id, .. } => Some(*id),
            PreviewTile::AddMore { .. } => None,
        }
    }

    pub fn badge(&self) -> Option<&'static str> {
        match self {
            PreviewTile::Image { .. } => Some(MediaKind::Image.badge()),
            PreviewTile::Video { .. } => Some(MediaKind::Video.badge()),
            PreviewTile::AddMore { .. } => None,
        }
    }
}

/// Everything needed to draw the attachment area.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewProjection {
    pub upload_target_visible: bool,
    pub grid_visible: bool,
    /// Selection summary; `None` hides the count element.
    pub summary: Option<String>,
    pub tiles: Vec<PreviewTile>,
}

impl PreviewProjection {
    /// Number of attachment tiles, not counting the add-more tile.
    pub fn attachment_tiles(&self) -> usize {
        self.tiles.iter().filter(|t| t.id().is_some()).count()
    }
}

/// Project the attachment list into render instructions.
pub fn project<F: MediaFile>(list: &AttachmentList<F>, messages: &Messages) -> PreviewProjection {
    if list.is_empty() {
        return PreviewProjection {
            upload_target_visible: true,
            grid_visible: false,
            summary: None,
            tiles: Vec::new(),
        };
    }

    let mut tiles: Vec<PreviewTile> = list
        .iter()
        .map(|attachment| match attachment.kind {
            MediaKind::Image => PreviewTile::Image {
                id: attachment.id,
                src: attachment.preview.clone(),
                alt: SmolStr::new(attachment.name()),
            },
            MediaKind::Video => PreviewTile::Video {
                id: attachment.id,
                src: attachment.preview.clone(),
                duration_label: attachment
                    .duration_seconds
                    .filter(|s| *s > 0.0)
                    .map(format_duration),
            },
        })
        .collect();
    tiles.push(PreviewTile::AddMore {
        label: messages.add_more(),
    });

    PreviewProjection {
        upload_target_visible: false,
        grid_visible: true,
        summary: Some(selection_summary(list, messages)),
        tiles,
    }
}

/// Count phrase plus total size, e.g. `2 images and 1 video selected (1.5 MB)`.
pub fn selection_summary<F>(list: &AttachmentList<F>, messages: &Messages) -> String {
    let phrase = messages.selection_phrase(
        list.count_of(MediaKind::Image),
        list.count_of(MediaKind::Video),
    );
    format!("{} ({})", phrase, format_file_size(list.total_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Locale;
    use crate::types::{Attachment, IdGenerator, InMemoryFile};

    fn push(
        list: &mut AttachmentList<InMemoryFile>,
        ids: &mut IdGenerator,
        name: &str,
        kind: MediaKind,
        size: usize,
        duration_seconds: Option<f64>,
    ) -> AttachmentId {
        let id = ids.next_at(7);
        list.append(Attachment {
            id,
            source: InMemoryFile::new(name, "x/y", vec![0u8; size]),
            preview: SmolStr::new(format!("data:{name}")),
            kind,
            byte_size: size as u64,
            duration_seconds,
        });
        id
    }

    #[test]
    fn test_empty_list_shows_upload_target() {
        let list: AttachmentList<InMemoryFile> = AttachmentList::new();
        let view = project(&list, &Messages::default());
        assert!(view.upload_target_visible);
        assert!(!view.grid_visible);
        assert_eq!(view.summary, None);
        assert!(view.tiles.is_empty());
    }

    #[test]
    fn test_non_empty_list_has_one_add_more_tile() {
        let mut ids = IdGenerator::new();
        let mut list = AttachmentList::new();
        let img = push(&mut list, &mut ids, "a.png", MediaKind::Image, 1024, None);
        let vid = push(&mut list, &mut ids, "b.mp4", MediaKind::Video, 512, Some(65.0));

        let view = project(&list, &Messages::default());
        assert!(!view.upload_target_visible);
        assert!(view.grid_visible);
        assert_eq!(view.tiles.len(), 3);
        assert_eq!(view.attachment_tiles(), 2);
        assert_eq!(view.tiles[0].id(), Some(img));
        assert_eq!(view.tiles[1].id(), Some(vid));
        assert_eq!(
            view.tiles
                .iter()
                .filter(|t| matches!(t, PreviewTile::AddMore { .. }))
                .count(),
            1
        );
        assert!(matches!(view.tiles[2], PreviewTile::AddMore { label: "Add more" }));
        insta::assert_snapshot!(view.summary.unwrap(), @"1 image and 1 video selected (1.5 KB)");
    }

    #[test]
    fn test_video_duration_label() {
        let mut ids = IdGenerator::new();
        let mut list = AttachmentList::new();
        push(&mut list, &mut ids, "a.mp4", MediaKind::Video, 1, Some(65.0));
        push(&mut list, &mut ids, "b.mp4", MediaKind::Video, 1, None);
        push(&mut list, &mut ids, "c.mp4", MediaKind::Video, 1, Some(0.0));

        let view = project(&list, &Messages::default());
        let labels: Vec<_> = view
            .tiles
            .iter()
            .filter_map(|t| match t {
                PreviewTile::Video { duration_label, .. } => Some(duration_label.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec![Some("1:05".to_string()), None, None]);
    }

    #[test]
    fn test_image_tile_alt_is_file_name() {
        let mut ids = IdGenerator::new();
        let mut list = AttachmentList::new();
        push(&mut list, &mut ids, "cat.jpg", MediaKind::Image, 1, None);
        let view = project(&list, &Messages::default());
        match &view.tiles[0] {
            PreviewTile::Image { alt, src, .. } => {
                assert_eq!(alt, "cat.jpg");
                assert_eq!(src, "data:cat.jpg");
            }
            other => panic!("expected image tile, got {other:?}"),
        }
        assert_eq!(view.tiles[0].badge(), Some("IMG"));
    }

    #[test]
    fn test_persian_summary() {
        let mut ids = IdGenerator::new();
        let mut list = AttachmentList::new();
        push(&mut list, &mut ids, "a.png", MediaKind::Image, 1048576, None);
        let summary = selection_summary(&list, &Messages::new(Locale::Persian));
        assert_eq!(summary, "1 عکس انتخاب شده است (1 MB)");
    }
}
