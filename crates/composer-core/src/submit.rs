//! Submission validation and multipart payload assembly.
//!
//! The composer never transmits anything. It validates the form, then hands
//! an ordered field list to whoever owns the network.

use serde::Serialize;
use thiserror::Error;

use crate::attachments::AttachmentList;
use crate::format::{format_duration, format_file_size};
use crate::messages::Messages;
use crate::toolbar::DescriptionField;
use crate::types::{MediaFile, MediaKind};

/// Form fields that can fail validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
}

/// Why a submission was blocked.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    #[error("title is required")]
    MissingTitle,
    #[error("description is required")]
    MissingDescription,
}

impl SubmitError {
    /// Field that should receive focus.
    pub fn field(&self) -> FormField {
        match self {
            SubmitError::MissingTitle => FormField::Title,
            SubmitError::MissingDescription => FormField::Description,
        }
    }

    /// Localized message for the user.
    pub fn message(&self, messages: &Messages) -> &'static str {
        match self {
            SubmitError::MissingTitle => messages.missing_title(),
            SubmitError::MissingDescription => messages.missing_description(),
        }
    }
}

/// Check title and description, returning both trimmed.
///
/// The title is checked first. A description equal to the placeholder counts
/// as missing.
pub fn validate(
    title: &str,
    description_html: &str,
    field: &DescriptionField,
) -> Result<(String, String), SubmitError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(SubmitError::MissingTitle);
    }

    let description = description_html.trim();
    if description.is_empty() || field.is_placeholder(description) {
        return Err(SubmitError::MissingDescription);
    }

    Ok((title.to_string(), description.to_string()))
}

/// One media entry of the payload.
#[derive(Clone, Debug)]
pub struct PayloadMedia<F> {
    pub index: usize,
    pub file: F,
    pub kind: MediaKind,
}

/// Assembled multipart content, ready for transmission.
#[derive(Clone, Debug)]
pub struct Payload<F> {
    pub title: String,
    pub description: String,
    pub media: Vec<PayloadMedia<F>>,
}

/// Value of a single multipart field.
#[derive(Clone, Copy, Debug)]
pub enum PayloadValue<'a, F> {
    Text(&'a str),
    File(&'a F),
}

/// Named multipart field.
#[derive(Clone, Debug)]
pub struct PayloadField<'a, F> {
    pub name: String,
    pub value: PayloadValue<'a, F>,
}

impl<F: MediaFile> Payload<F> {
    pub fn assemble(title: String, description: String, list: &AttachmentList<F>) -> Self {
        let media = list
            .iter()
            .enumerate()
            .map(|(index, attachment)| PayloadMedia {
                index,
                file: attachment.source.clone(),
                kind: attachment.kind,
            })
            .collect();
        Self {
            title,
            description,
            media,
        }
    }

    /// Fields in transmission order: `title`, `description`, then
    /// `media[i]` followed by `mediaTypes[i]` for every attachment.
    pub fn fields(&self) -> Vec<PayloadField<'_, F>> {
        let mut fields = Vec::with_capacity(2 + self.media.len() * 2);
        fields.push(PayloadField {
            name: "title".to_string(),
            value: PayloadValue::Text(&self.title),
        });
        fields.push(PayloadField {
            name: "description".to_string(),
            value: PayloadValue::Text(&self.description),
        });
        for media in &self.media {
            fields.push(PayloadField {
                name: format!("media[{}]", media.index),
                value: PayloadValue::File(&media.file),
            });
            fields.push(PayloadField {
                name: format!("mediaTypes[{}]", media.index),
                value: PayloadValue::Text(media.kind.as_str()),
            });
        }
        fields
    }
}

/// Loggable description of one submitted attachment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MediaSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub size: String,
    pub duration: Option<String>,
}

/// Loggable description of a submission.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubmissionSummary {
    pub title: String,
    pub description: String,
    pub media: Vec<MediaSummary>,
}

impl SubmissionSummary {
    pub fn from_list<F: MediaFile>(
        title: &str,
        description: &str,
        list: &AttachmentList<F>,
    ) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            media: list
                .iter()
                .map(|a| MediaSummary {
                    name: a.name().to_string(),
                    kind: a.kind,
                    size: format_file_size(a.byte_size),
                    duration: a
                        .duration_seconds
                        .filter(|s| *s > 0.0)
                        .map(format_duration),
                })
                .collect(),
        }
    }
}

/// Result of a successful submit.
#[derive(Clone, Debug)]
pub struct Submission<F> {
    pub payload: Payload<F>,
    pub summary: SubmissionSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(placeholder: Option<&str>) -> DescriptionField {
        DescriptionField::new(placeholder.map(str::to_string))
    }

    #[test]
    fn test_title_checked_first() {
        assert_eq!(validate("  ", "", &field(None)), Err(SubmitError::MissingTitle));
        assert_eq!(SubmitError::MissingTitle.field(), FormField::Title);
    }

    #[test]
    fn test_description_required() {
        assert_eq!(validate("Hi", "   ", &field(None)), Err(SubmitError::MissingDescription));
        assert_eq!(
            validate("Hi", " Tell us more ", &field(Some("Tell us more"))),
            Err(SubmitError::MissingDescription)
        );
        assert_eq!(SubmitError::MissingDescription.field(), FormField::Description);
    }

    #[test]
    fn test_valid_form_is_trimmed() {
        assert_eq!(
            validate("  Hi ", " <b>body</b> ", &field(Some("Tell us more"))),
            Ok(("Hi".to_string(), "<b>body</b>".to_string()))
        );
    }

    #[test]
    fn test_localized_messages() {
        let m = Messages::default();
        assert_eq!(SubmitError::MissingTitle.message(&m), "Please enter a title");
        assert_eq!(
            SubmitError::MissingDescription.message(&m),
            "Please enter a description"
        );
    }
}
