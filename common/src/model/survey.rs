//! Survey records: the transient draft collected by the form, the persisted
//! survey and its product associations.
//!
//! The validation rules live on [`SurveyDraft`] as `validator` attributes so
//! that the schema is declared once, next to the fields it constrains. See
//! [`crate::validation::check`] for how the rules are evaluated.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use validator::{Validate, ValidationError};

/// Largest logo accepted, both as raw upload and after optimization (750 KB).
pub const MAX_LOGO_BYTES: usize = 750 * 1024;

/// Every survey is published under this base; the short code is appended.
pub const SURVEY_URL_BASE: &str = "https://reviewzone.ai/survey/";

/// Status given to a survey when it is created.
pub const STATUS_ACTIVE: &str = "ACTIVE";

/// Builds the canonical public URL of a survey from its short code.
pub fn survey_url(short_code: &str) -> String {
    format!("{}{}", SURVEY_URL_BASE, short_code)
}

/// A logo image picked in the form, before optimization.
#[derive(Clone, PartialEq)]
pub struct LogoFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl LogoFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for LogoFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogoFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Serializes the metadata only, so validation error payloads never carry
/// the image bytes.
impl Serialize for LogoFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LogoFile", 3)?;
        state.serialize_field("file_name", &self.file_name)?;
        state.serialize_field("content_type", &self.content_type)?;
        state.serialize_field("size", &self.bytes.len())?;
        state.end()
    }
}

fn validate_logo_size(logo: &LogoFile) -> Result<(), ValidationError> {
    if logo.size() > MAX_LOGO_BYTES {
        return Err(ValidationError::new("logo_size").with_message("Logo must be less than 750KB".into()));
    }
    Ok(())
}

/// Form input for a new survey.
///
/// Serialized without the logo: the logo travels as its own multipart part
/// and is attached to the draft by whoever receives it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct SurveyDraft {
    #[validate(length(min = 1, message = "Survey name is required"))]
    pub survey_name: String,
    #[validate(length(min = 1, message = "Survey type is required"))]
    pub survey_style: String,
    #[validate(length(min = 1, message = "Minimum review length is required"))]
    pub minimum_review_length: String,
    #[validate(length(min = 1, message = "Minimum star rating is required"))]
    pub minimum_star_rating: String,
    #[validate(length(min = 1, message = "Time delay is required"))]
    pub time_delay: String,
    #[serde(skip)]
    #[validate(custom(function = "validate_logo_size"))]
    pub logo: Option<LogoFile>,
    #[validate(length(min = 1, message = "At least one product must be selected"))]
    pub product_ids: Vec<String>,
}

/// A survey as persisted, including the server-assigned fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    pub id: String,
    pub user_id: String,
    pub survey_name: String,
    pub survey_style: String,
    pub minimum_review_length: String,
    pub minimum_star_rating: String,
    pub time_delay: String,
    pub logo_path: Option<String>,
    pub short_code: String,
    pub url: String,
    pub qr_code: String,
    pub survey_status: String,
    pub created_at: String,
}

/// The survey record handed to the relational store; the store assigns `id`
/// and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSurvey {
    pub user_id: String,
    pub survey_name: String,
    pub survey_style: String,
    pub minimum_review_length: String,
    pub minimum_star_rating: String,
    pub time_delay: String,
    pub logo_path: Option<String>,
    pub short_code: String,
    pub url: String,
    pub qr_code: String,
    pub survey_status: String,
}

/// Links a survey to one of the products selected at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurveyProduct {
    pub survey_id: String,
    pub product_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survey_url_appends_the_short_code() {
        assert_eq!(survey_url("aB3xY9zQ"), "https://reviewzone.ai/survey/aB3xY9zQ");
    }

    #[test]
    fn draft_json_never_carries_the_logo() {
        let draft = SurveyDraft {
            survey_name: "Launch".into(),
            logo: Some(LogoFile {
                file_name: "logo.png".into(),
                content_type: Some("image/png".into()),
                bytes: vec![1, 2, 3],
            }),
            ..Default::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("logo").is_none());

        let back: SurveyDraft = serde_json::from_value(json).unwrap();
        assert_eq!(back.survey_name, "Launch");
        assert!(back.logo.is_none());
    }

    #[test]
    fn logo_serializes_as_metadata_only() {
        let logo = LogoFile {
            file_name: "logo.png".into(),
            content_type: Some("image/png".into()),
            bytes: vec![7; 1500],
        };
        assert_eq!(
            serde_json::to_value(&logo).unwrap(),
            serde_json::json!({
                "file_name": "logo.png",
                "content_type": "image/png",
                "size": 1500
            })
        );
    }

    #[test]
    fn logo_debug_output_hides_bytes() {
        let logo = LogoFile {
            file_name: "logo.png".into(),
            content_type: None,
            bytes: vec![0; 2048],
        };
        let printed = format!("{:?}", logo);
        assert!(printed.contains("size: 2048"));
        assert!(!printed.contains("[0, 0"));
    }
}
