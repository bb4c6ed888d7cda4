//! Click classification for preview tile controls.
//!
//! Tiles are rebuilt on every render, so clicks are handled by one listener on
//! the document and mapped back to an attachment through `data-id`.

use composer_core::AttachmentId;
use web_sys::Element;

use crate::render::ADD_MORE_ID;

/// What a click inside the preview grid asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileAction {
    TogglePlay(AttachmentId),
    ToggleMute(AttachmentId),
    Remove(AttachmentId),
    AddMore,
}

/// Classify a click target.
///
/// Walks up from the target so clicks on the inner icon count as clicks on
/// the button. Returns `None` for anything that isn't a tile control, or for
/// controls whose `data-id` doesn't parse.
pub fn tile_action(target: &Element) -> Option<TileAction> {
    if let Some(button) = closest(target, ".remove-media") {
        return control_id(&button).map(TileAction::Remove);
    }
    if let Some(button) = closest(target, ".mute-unmute") {
        return control_id(&button).map(TileAction::ToggleMute);
    }
    if let Some(button) = closest(target, ".video-overlay, .play-pause") {
        return control_id(&button).map(TileAction::TogglePlay);
    }
    if closest(target, &format!("#{}", ADD_MORE_ID)).is_some() {
        return Some(TileAction::AddMore);
    }
    None
}

fn closest(target: &Element, selector: &str) -> Option<Element> {
    target.closest(selector).ok().flatten()
}

fn control_id(button: &Element) -> Option<AttachmentId> {
    let raw = button.get_attribute("data-id")?;
    match raw.parse() {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::debug!(%raw, error = %e, "ignoring control with bad data-id");
            None
        }
    }
}
