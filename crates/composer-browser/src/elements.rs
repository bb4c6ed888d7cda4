//! Page elements the composer attaches to.
//!
//! The composer does not create its own form; it binds to a page that already
//! contains these elements:
//!
//! | id | element |
//! |---|---|
//! | `title` | title `<input>` |
//! | `description` | contenteditable description, optional `data-placeholder` |
//! | `fileInput` | hidden `<input type="file" multiple>` |
//! | `uploadArea` | click/drop target shown while nothing is attached |
//! | `selectMediaBtn` | button opening the file picker |
//! | `mediaPreviewContainer` | preview grid |
//! | `mediaCount` | selection summary |
//! | `postForm` | the surrounding `<form>` |
//!
//! Toolbar buttons are every `button` under `.rich-text-toolbar`, each with
//! a `data-command` attribute.

use composer_core::PlatformError;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlFormElement, HtmlInputElement};

pub const TITLE_ID: &str = "title";
pub const DESCRIPTION_ID: &str = "description";
pub const FILE_INPUT_ID: &str = "fileInput";
pub const UPLOAD_AREA_ID: &str = "uploadArea";
pub const SELECT_MEDIA_ID: &str = "selectMediaBtn";
pub const PREVIEW_CONTAINER_ID: &str = "mediaPreviewContainer";
pub const MEDIA_COUNT_ID: &str = "mediaCount";
pub const POST_FORM_ID: &str = "postForm";
pub const TOOLBAR_BUTTONS: &str = ".rich-text-toolbar button";

/// Cached handles to the composer's page elements.
#[derive(Clone, Debug)]
pub struct ComposerElements {
    pub document: Document,
    pub title: HtmlInputElement,
    pub description: HtmlElement,
    pub file_input: HtmlInputElement,
    pub upload_area: HtmlElement,
    pub select_media: HtmlElement,
    pub preview_container: HtmlElement,
    pub media_count: HtmlElement,
    pub post_form: HtmlFormElement,
    pub toolbar_buttons: Vec<HtmlElement>,
}

impl ComposerElements {
    /// Look up every element, failing on the first one that is missing.
    pub fn locate(document: &Document) -> Result<Self, PlatformError> {
        let toolbar_buttons = {
            let list = document
                .query_selector_all(TOOLBAR_BUTTONS)
                .map_err(crate::js_error)?;
            (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
                .collect()
        };

        Ok(Self {
            document: document.clone(),
            title: by_id(document, TITLE_ID)?,
            description: by_id(document, DESCRIPTION_ID)?,
            file_input: by_id(document, FILE_INPUT_ID)?,
            upload_area: by_id(document, UPLOAD_AREA_ID)?,
            select_media: by_id(document, SELECT_MEDIA_ID)?,
            preview_container: by_id(document, PREVIEW_CONTAINER_ID)?,
            media_count: by_id(document, MEDIA_COUNT_ID)?,
            post_form: by_id(document, POST_FORM_ID)?,
            toolbar_buttons,
        })
    }

    /// `data-placeholder` of the description, if any.
    pub fn description_placeholder(&self) -> Option<String> {
        self.description.get_attribute("data-placeholder")
    }

    /// Open the native file picker.
    pub fn open_file_picker(&self) {
        self.file_input.click();
    }
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, PlatformError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| PlatformError(format!("missing element #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| PlatformError(format!("element #{} has unexpected type", id)))
}
