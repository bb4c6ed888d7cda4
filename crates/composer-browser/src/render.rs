//! Drawing a `PreviewProjection` into the page.
//!
//! The preview grid is emptied and rebuilt from the projection every time.
//! Every control carries the tile's attachment id in `data-id` so delegated
//! click handling can find its way back to the attachment.

use composer_core::{AttachmentId, PreviewProjection, PreviewTile, TilePlayback};
use js_sys::Promise;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlVideoElement};

use crate::elements::ComposerElements;

pub const ADD_MORE_ID: &str = "addMoreBtn";

/// Rebuild the attachment area from a projection.
pub fn draw(elements: &ComposerElements, view: &PreviewProjection) -> Result<(), JsValue> {
    let container = &elements.preview_container;
    container.set_inner_html("");

    show(&elements.upload_area, view.upload_target_visible, "block")?;
    if !view.grid_visible {
        set_display(container, "none")?;
        set_display(&elements.media_count, "none")?;
        return Ok(());
    }

    set_display(container, "grid")?;

    for tile in &view.tiles {
        let node = tile_element(&elements.document, tile)?;
        container.append_child(&node)?;
    }

    match &view.summary {
        Some(summary) => {
            elements.media_count.set_text_content(Some(summary));
            set_display(&elements.media_count, "block")?;
        }
        None => set_display(&elements.media_count, "none")?,
    }
    Ok(())
}

fn set_display(element: &HtmlElement, value: &str) -> Result<(), JsValue> {
    element.style().set_property("display", value)
}

fn show(element: &HtmlElement, visible: bool, display: &str) -> Result<(), JsValue> {
    set_display(element, if visible { display } else { "none" })
}

fn tile_element(document: &Document, tile: &PreviewTile) -> Result<Element, JsValue> {
    match tile {
        PreviewTile::Image { id, src, alt } => {
            let root = element(document, "div", "media-preview")?;
            root.set_attribute("data-id", &id.to_string())?;

            let img = document.create_element("img")?;
            img.set_attribute("src", src)?;
            img.set_attribute("alt", alt)?;
            root.append_child(&img)?;

            root.append_child(&badge(document, tile)?.into())?;
            root.append_child(&remove_button(document, *id)?.into())?;
            Ok(root)
        }
        PreviewTile::Video {
            id,
            src,
            duration_label,
        } => {
            let root = element(document, "div", "media-preview")?;
            root.set_attribute("data-id", &id.to_string())?;

            let video: HtmlVideoElement = document
                .create_element("video")?
                .dyn_into()
                .map_err(|_| JsValue::from_str("created element is not a video"))?;
            video.set_muted(true);
            video.set_attribute("muted", "")?;
            video.set_preload("metadata");
            video.set_src(src);
            root.append_child(&video)?;

            root.append_child(&badge(document, tile)?.into())?;

            if let Some(label) = duration_label {
                let duration = element(document, "div", "video-duration")?;
                duration.set_text_content(Some(label));
                root.append_child(&duration)?;
            }

            let initial = TilePlayback::default();
            let overlay = icon_button(document, "video-overlay", *id, initial.play_icon())?;
            root.append_child(&overlay)?;

            let controls = element(document, "div", "video-controls")?;
            controls.append_child(&icon_button(
                document,
                "video-control-btn play-pause",
                *id,
                initial.play_icon(),
            )?.into())?;
            controls.append_child(&icon_button(
                document,
                "video-control-btn mute-unmute",
                *id,
                initial.mute_icon(),
            )?.into())?;
            root.append_child(&controls)?;

            root.append_child(&remove_button(document, *id)?.into())?;
            Ok(root)
        }
        PreviewTile::AddMore { label } => {
            let root = element(
                document,
                "div",
                "media-preview d-flex align-items-center justify-content-center",
            )?;
            root.set_id(ADD_MORE_ID);
            root.set_attribute("style", "border: 2px dashed #dee2e6; cursor: pointer;")?;

            let inner = element(document, "div", "text-center")?;
            let icon = element(document, "i", "fas fa-plus fa-2x text-muted mb-2")?;
            inner.append_child(&icon)?;
            let text = element(document, "p", "text-muted mb-0 small")?;
            text.set_text_content(Some(label));
            inner.append_child(&text)?;
            root.append_child(&inner)?;
            Ok(root)
        }
    }
}

fn element(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    el.set_class_name(class);
    Ok(el)
}

fn badge(document: &Document, tile: &PreviewTile) -> Result<Element, JsValue> {
    let badge = element(document, "div", "media-type-badge")?;
    badge.set_text_content(tile.badge());
    Ok(badge)
}

fn icon_button(
    document: &Document,
    class: &str,
    id: AttachmentId,
    icon: &str,
) -> Result<Element, JsValue> {
    let button = element(document, "button", class)?;
    button.set_attribute("type", "button")?;
    button.set_attribute("data-id", &id.to_string())?;
    button.append_child(&element(document, "i", icon)?.into())?;
    Ok(button)
}

fn remove_button(document: &Document, id: AttachmentId) -> Result<Element, JsValue> {
    icon_button(document, "remove-media", id, "fas fa-times")
}

/// Find the rendered tile for an attachment.
pub fn find_tile(elements: &ComposerElements, id: AttachmentId) -> Option<Element> {
    elements
        .preview_container
        .query_selector(&format!(".media-preview[data-id=\"{}\"]", id))
        .ok()
        .flatten()
}

/// Update a tile's overlay and control icons to match its playback state.
pub fn sync_tile_icons(tile: &Element, state: TilePlayback) -> Result<(), JsValue> {
    if let Some(overlay) = tile.query_selector(".video-overlay")? {
        overlay
            .class_list()
            .toggle_with_force("playing", state.playing)?;
        if let Some(icon) = overlay.query_selector("i")? {
            icon.set_class_name(state.play_icon());
        }
    }
    if let Some(icon) = tile.query_selector(".play-pause i")? {
        icon.set_class_name(state.play_icon());
    }
    if let Some(icon) = tile.query_selector(".mute-unmute i")? {
        icon.set_class_name(state.mute_icon());
    }
    Ok(())
}

/// Drive a tile's video element to match its playback state, then sync icons.
///
/// Starting playback returns the `play()` promise. It rejects when the
/// browser refuses to play, and the caller is expected to roll the tile back.
pub fn apply_playback(tile: &Element, state: TilePlayback) -> Result<Option<Promise>, JsValue> {
    let mut started = None;
    if let Some(video) = tile.query_selector("video")? {
        let video: HtmlVideoElement = video
            .dyn_into()
            .map_err(|_| JsValue::from_str("tile video is not a video element"))?;
        video.set_muted(state.muted);
        if state.playing && video.paused() {
            started = Some(video.play()?);
        } else if !state.playing && !video.paused() {
            video.pause()?;
        }
    }
    sync_tile_icons(tile, state)?;
    Ok(started)
}
