//! Binding a composer to the page.
//!
//! [`MountedComposer::mount`] locates the page elements, installs every event
//! listener and keeps them alive for as long as the handle lives. Dropping
//! the handle detaches all listeners.
//!
//! The composer sits in a `RefCell` shared by all handlers. A borrow is never
//! held across an await: ingestion screens files under a borrow, loads them
//! with no borrow held, then settles each result under a fresh borrow.

use std::cell::RefCell;
use std::rc::Rc;

use composer_core::{
    Accepted, Attachment, AttachmentId, Composer, ComposerConfig, DecodeError, FormField, Notice,
    Notifier, PlatformError, PlaybackEvent, Submission, load_batch,
};
use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{DragEvent, Element, Event, HtmlElement};

use crate::decode::FileReaderDecoder;
use crate::elements::ComposerElements;
use crate::events::{TileAction, tile_action};
use crate::file::{BrowserFile, files_from_list};
use crate::form_data::to_form_data;
use crate::host::{AlertNotifier, DocumentRichText};
use crate::js_error;
use crate::probe::VideoProbe;
use crate::render::{apply_playback, draw, find_tile, sync_tile_icons};

struct Shared {
    composer: RefCell<Composer<BrowserFile>>,
    elements: ComposerElements,
    decoder: FileReaderDecoder,
    probe: VideoProbe,
    notifier: Box<dyn Notifier>,
    host: DocumentRichText,
    on_submit: Option<js_sys::Function>,
}

/// A composer attached to the current page.
pub struct MountedComposer {
    shared: Rc<Shared>,
    _listeners: Vec<EventListener>,
}

impl MountedComposer {
    /// Attach to the page's composer elements, reporting through `alert`.
    ///
    /// `on_submit` receives `(formData, summary)` for every valid submission.
    pub fn mount(
        config: ComposerConfig,
        on_submit: Option<js_sys::Function>,
    ) -> Result<Self, PlatformError> {
        Self::mount_with_notifier(config, on_submit, AlertNotifier)
    }

    /// Attach to the page's composer elements with a custom notifier.
    pub fn mount_with_notifier(
        mut config: ComposerConfig,
        on_submit: Option<js_sys::Function>,
        notifier: impl Notifier + 'static,
    ) -> Result<Self, PlatformError> {
        let document = gloo_utils::document();
        let elements = ComposerElements::locate(&document)?;

        if config.placeholder.is_none() {
            config.placeholder = elements.description_placeholder();
        }
        let composer = Composer::new(config).map_err(|e| PlatformError(e.to_string()))?;

        let shared = Rc::new(Shared {
            composer: RefCell::new(composer),
            host: DocumentRichText::new(elements.description.clone()),
            elements,
            decoder: FileReaderDecoder,
            probe: VideoProbe,
            notifier: Box::new(notifier),
            on_submit,
        });

        let listeners = install_listeners(&shared);
        shared.redraw();
        tracing::debug!(listeners = listeners.len(), "composer mounted");

        Ok(Self {
            shared,
            _listeners: listeners,
        })
    }

    pub fn config(&self) -> ComposerConfig {
        self.shared.composer.borrow().config().clone()
    }

    pub fn attachment_count(&self) -> usize {
        self.shared.composer.borrow().attachments().len()
    }

    /// Ids of the current attachments, in list order.
    pub fn attachment_ids(&self) -> Vec<AttachmentId> {
        self.shared.composer.borrow().attachments().ids().collect()
    }

    /// Remove by textual id. Returns whether anything was removed.
    pub fn remove(&self, id: &str) -> bool {
        match id.parse::<AttachmentId>() {
            Ok(id) => self.shared.remove(id),
            Err(e) => {
                tracing::debug!(%id, error = %e, "remove with malformed id");
                false
            }
        }
    }

    /// Feed files into ingestion as if they had been picked.
    pub fn ingest_files(&self, files: Vec<BrowserFile>) {
        Shared::ingest(&self.shared, files);
    }
}

impl Shared {
    fn redraw(&self) {
        let view = self.composer.borrow_mut().render();
        if let Err(e) = draw(&self.elements, &view) {
            tracing::error!("failed to draw previews: {:?}", e);
        }
    }

    fn notify_all(&self, notices: &[Notice]) {
        for notice in notices {
            self.notifier.notify(notice);
        }
    }

    fn remove(&self, id: AttachmentId) -> bool {
        let removed = self.composer.borrow_mut().remove(id);
        if removed {
            self.redraw();
        }
        removed
    }

    fn ingest(this: &Rc<Self>, files: Vec<BrowserFile>) {
        if files.is_empty() {
            return;
        }
        let (Accepted { pending, notices }, order, limit) = {
            let mut composer = this.composer.borrow_mut();
            let accepted = composer.accept(files);
            (
                accepted,
                composer.config().order,
                composer.config().probe_timeout(),
            )
        };
        this.notify_all(&notices);
        if pending.is_empty() {
            return;
        }

        let shared = Rc::clone(this);
        wasm_bindgen_futures::spawn_local(async move {
            load_batch(
                pending,
                &shared.decoder,
                &shared.probe,
                limit,
                order,
                |landed| shared.land(landed),
            )
            .await;
        });
    }

    /// Append a group of loaded files, redraw once, then report failures.
    fn land(&self, landed: Vec<Result<Attachment<BrowserFile>, DecodeError>>) {
        let mut appended = false;
        let mut notices = Vec::new();
        {
            let mut composer = self.composer.borrow_mut();
            for loaded in landed {
                match composer.settle(loaded) {
                    Ok(_) => appended = true,
                    Err(notice) => notices.push(notice),
                }
            }
        }
        if appended {
            self.redraw();
        }
        self.notify_all(&notices);
    }

    fn tile_clicked(this: &Rc<Self>, action: TileAction) {
        match action {
            TileAction::TogglePlay(id) => Self::playback(this, id, PlaybackEvent::TogglePlay),
            TileAction::ToggleMute(id) => Self::playback(this, id, PlaybackEvent::ToggleMute),
            TileAction::Remove(id) => {
                this.remove(id);
            }
            TileAction::AddMore => this.elements.open_file_picker(),
        }
    }

    fn playback(this: &Rc<Self>, id: AttachmentId, event: PlaybackEvent) {
        let Some(state) = this.composer.borrow_mut().playback(id, event) else {
            return;
        };
        let Some(tile) = find_tile(&this.elements, id) else {
            return;
        };
        match apply_playback(&tile, state) {
            Ok(Some(started)) => {
                let shared = Rc::clone(this);
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = JsFuture::from(started).await {
                        tracing::debug!(%id, "video refused to play: {:?}", e);
                        shared.playback_refused(id);
                    }
                });
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(%id, "playback control failed: {:?}", e),
        }
    }

    fn playback_refused(&self, id: AttachmentId) {
        let Some(state) = self.composer.borrow_mut().playback(id, PlaybackEvent::Refused) else {
            return;
        };
        if let Some(tile) = find_tile(&self.elements, id) {
            if let Err(e) = sync_tile_icons(&tile, state) {
                tracing::warn!(%id, "could not reset tile icons: {:?}", e);
            }
        }
    }

    fn video_ended(&self, video: &Element) {
        let Some(tile) = video.closest(".media-preview").ok().flatten() else {
            return;
        };
        let Some(id) = tile
            .get_attribute("data-id")
            .and_then(|raw| raw.parse::<AttachmentId>().ok())
        else {
            return;
        };
        let Some(state) = self.composer.borrow_mut().playback(id, PlaybackEvent::Ended) else {
            return;
        };
        if let Err(e) = sync_tile_icons(&tile, state) {
            tracing::warn!(%id, "could not reset tile icons: {:?}", e);
        }
    }

    fn toolbar_clicked(&self, button: &HtmlElement) {
        let Some(command) = button.get_attribute("data-command") else {
            return;
        };
        let active = self.composer.borrow_mut().format(&command, &self.host);
        match active {
            Ok(active) => {
                if let Err(e) = button.class_list().toggle_with_force("active", active) {
                    tracing::debug!("could not toggle toolbar state: {:?}", e);
                }
            }
            Err(e) => tracing::warn!(%command, error = %e, "formatting command failed"),
        }
    }

    fn description_focus(&self, focused: bool) {
        let text = self.elements.description.text_content().unwrap_or_default();
        let muted = {
            let composer = self.composer.borrow();
            let field = composer.description();
            if focused {
                field.on_focus(&text)
            } else {
                field.on_blur(&text)
            }
        };
        let Some(muted) = muted else {
            return;
        };
        if let Err(e) = self
            .elements
            .description
            .class_list()
            .toggle_with_force("text-muted", muted)
        {
            tracing::debug!("could not toggle placeholder style: {:?}", e);
        }
    }

    fn submit(&self) {
        let title = self.elements.title.value();
        let description = self.elements.description.inner_html();

        let submitted = {
            let composer = self.composer.borrow();
            composer
                .submit(&title, &description)
                .map_err(|e| (e, e.message(composer.messages())))
        };

        match submitted {
            Ok(submission) => {
                if let Err(e) = self.hand_off(&submission) {
                    tracing::error!("submission hand-off failed: {:?}", e);
                    self.notifier.notify(&Notice::error(js_error(e).to_string()));
                    return;
                }
                let message = self.composer.borrow().messages().post_created();
                self.notifier.notify(&Notice::info(message));
            }
            Err((error, message)) => {
                self.notifier.notify(&Notice::error(message));
                let focused = match error.field() {
                    FormField::Title => self.elements.title.focus(),
                    FormField::Description => self.elements.description.focus(),
                };
                if let Err(e) = focused {
                    tracing::debug!("could not focus {:?}: {:?}", error.field(), e);
                }
            }
        }
    }

    fn hand_off(&self, submission: &Submission<BrowserFile>) -> Result<(), JsValue> {
        let form = to_form_data(&submission.payload)?;
        let Some(callback) = &self.on_submit else {
            return Ok(());
        };
        let summary = serde_wasm_bindgen::to_value(&submission.summary)?;
        callback.call2(&JsValue::NULL, &form, &summary)?;
        Ok(())
    }
}

fn install_listeners(shared: &Rc<Shared>) -> Vec<EventListener> {
    let elements = &shared.elements;
    let mut listeners = Vec::new();

    for button in &elements.toolbar_buttons {
        let s = Rc::clone(shared);
        let target = button.clone();
        listeners.push(EventListener::new_with_options(
            button,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                s.toolbar_clicked(&target);
            },
        ));
    }

    let s = Rc::clone(shared);
    listeners.push(EventListener::new(&elements.description, "focus", move |_| {
        s.description_focus(true)
    }));
    let s = Rc::clone(shared);
    listeners.push(EventListener::new(&elements.description, "blur", move |_| {
        s.description_focus(false)
    }));

    let s = Rc::clone(shared);
    listeners.push(EventListener::new(&elements.file_input, "change", move |_| {
        let files = s
            .elements
            .file_input
            .files()
            .map(|list| files_from_list(&list))
            .unwrap_or_default();
        // Clear so picking the same file again still fires `change`.
        s.elements.file_input.set_value("");
        Shared::ingest(&s, files);
    }));

    for opener in [&elements.select_media, &elements.upload_area] {
        let s = Rc::clone(shared);
        listeners.push(EventListener::new_with_options(
            opener,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                s.elements.open_file_picker();
            },
        ));
    }

    let s = Rc::clone(shared);
    listeners.push(EventListener::new_with_options(
        &elements.upload_area,
        "dragover",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            set_dragover(&s.elements.upload_area, true);
        },
    ));
    let s = Rc::clone(shared);
    listeners.push(EventListener::new_with_options(
        &elements.upload_area,
        "dragleave",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            set_dragover(&s.elements.upload_area, false);
        },
    ));
    let s = Rc::clone(shared);
    listeners.push(EventListener::new_with_options(
        &elements.upload_area,
        "drop",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            set_dragover(&s.elements.upload_area, false);
            let files = event
                .dyn_ref::<DragEvent>()
                .and_then(DragEvent::data_transfer)
                .and_then(|transfer| transfer.files())
                .map(|list| files_from_list(&list))
                .unwrap_or_default();
            Shared::ingest(&s, files);
        },
    ));

    let s = Rc::clone(shared);
    listeners.push(EventListener::new(&elements.document, "click", move |event| {
        if let Some(action) = event_element(event).as_ref().and_then(tile_action) {
            Shared::tile_clicked(&s, action);
        }
    }));

    // `ended` does not bubble, so catch it on the way down.
    let s = Rc::clone(shared);
    listeners.push(EventListener::new_with_options(
        &elements.document,
        "ended",
        EventListenerOptions::run_in_capture_phase(),
        move |event| {
            if let Some(target) = event_element(event) {
                if target.tag_name().eq_ignore_ascii_case("video") {
                    s.video_ended(&target);
                }
            }
        },
    ));

    let s = Rc::clone(shared);
    listeners.push(EventListener::new_with_options(
        &elements.post_form,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            event.prevent_default();
            s.submit();
        },
    ));

    listeners
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn set_dragover(area: &HtmlElement, on: bool) {
    if let Err(e) = area.class_list().toggle_with_force("dragover", on) {
        tracing::debug!("could not toggle dragover: {:?}", e);
    }
}
