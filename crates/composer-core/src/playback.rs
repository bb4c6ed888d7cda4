//! Per-tile video playback state.
//!
//! Every video tile has its own play and mute state; nothing is shared between
//! tiles. Tiles are recreated on each render, so a render resets every tile to
//! paused and muted.

use std::collections::HashMap;

use crate::types::AttachmentId;

/// Interaction on a video tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Overlay button or play/pause control.
    TogglePlay,
    /// Mute/unmute control.
    ToggleMute,
    /// Playback reached the end on its own.
    Ended,
    /// The browser refused to start playback.
    Refused,
}

/// Play and mute state of one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TilePlayback {
    pub playing: bool,
    pub muted: bool,
}

impl Default for TilePlayback {
    fn default() -> Self {
        Self {
            playing: false,
            muted: true,
        }
    }
}

impl TilePlayback {
    pub fn apply(self, event: PlaybackEvent) -> Self {
        match event {
            PlaybackEvent::TogglePlay => Self {
                playing: !self.playing,
                ..self
            },
            PlaybackEvent::ToggleMute => Self {
                muted: !self.muted,
                ..self
            },
            PlaybackEvent::Ended | PlaybackEvent::Refused => Self {
                playing: false,
                ..self
            },
        }
    }

    /// Icon class for the play/pause control.
    pub fn play_icon(&self) -> &'static str {
        if self.playing {
            "fas fa-pause"
        } else {
            "fas fa-play"
        }
    }

    /// Icon class for the mute control.
    pub fn mute_icon(&self) -> &'static str {
        if self.muted {
            "fas fa-volume-mute"
        } else {
            "fas fa-volume-up"
        }
    }
}

/// Playback state for every rendered video tile, keyed by attachment id.
#[derive(Clone, Debug, Default)]
pub struct PlaybackBook {
    tiles: HashMap<AttachmentId, TilePlayback>,
}

impl PlaybackBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start over with fresh tiles for the given videos.
    pub fn reset(&mut self, video_ids: impl IntoIterator<Item = AttachmentId>) {
        self.tiles = video_ids
            .into_iter()
            .map(|id| (id, TilePlayback::default()))
            .collect();
    }

    /// Apply an event to one tile. Returns the new state, or `None` if no
    /// video tile with that id is rendered.
    pub fn apply(&mut self, id: AttachmentId, event: PlaybackEvent) -> Option<TilePlayback> {
        let tile = self.tiles.get_mut(&id)?;
        *tile = tile.apply(event);
        Some(*tile)
    }

    pub fn get(&self, id: AttachmentId) -> Option<TilePlayback> {
        self.tiles.get(&id).copied()
    }

    pub fn forget(&mut self, id: AttachmentId) {
        self.tiles.remove(&id);
    }
}
