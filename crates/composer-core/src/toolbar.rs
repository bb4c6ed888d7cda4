//! Rich-text toolbar and description placeholder state.

use std::collections::HashSet;

use smol_str::SmolStr;

use crate::platform::{PlatformError, RichTextHost};

/// Which toolbar buttons are shown as active.
///
/// A click flips the button regardless of what the host's selection looks
/// like; the toolbar does not read formatting state back.
#[derive(Clone, Debug, Default)]
pub struct ToolbarState {
    active: HashSet<SmolStr>,
}

impl ToolbarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `command` on the host, flip the button and refocus the description.
    ///
    /// Returns whether the button is now active. A host failure leaves the
    /// button untouched.
    pub fn apply<H: RichTextHost + ?Sized>(
        &mut self,
        command: &str,
        host: &H,
    ) -> Result<bool, PlatformError> {
        host.exec_command(command)?;
        let active = if self.active.remove(command) {
            false
        } else {
            self.active.insert(SmolStr::new(command));
            true
        };
        host.focus_description();
        tracing::debug!(command, active, "toolbar command");
        Ok(active)
    }

    pub fn is_active(&self, command: &str) -> bool {
        self.active.contains(command)
    }
}

/// Placeholder handling for the description field.
///
/// Only a blank field changes style: focusing it drops the muted style so
/// typing starts in the normal colour, blurring it restores the muted style.
/// A field holding text keeps whatever style the page gave it.
#[derive(Clone, Debug)]
pub struct DescriptionField {
    placeholder: Option<String>,
}

impl DescriptionField {
    pub fn new(placeholder: Option<String>) -> Self {
        Self { placeholder }
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Muted style to apply on focus, or `None` to leave it alone.
    pub fn on_focus(&self, text: &str) -> Option<bool> {
        text.trim().is_empty().then_some(false)
    }

    /// Muted style to apply on blur, or `None` to leave it alone.
    pub fn on_blur(&self, text: &str) -> Option<bool> {
        text.trim().is_empty().then_some(true)
    }

    /// Whether `html` is still just the placeholder.
    pub fn is_placeholder(&self, html: &str) -> bool {
        self.placeholder.as_deref() == Some(html)
    }
}
