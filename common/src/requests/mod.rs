use crate::validation::FieldErrors;
use serde::{Deserialize, Serialize};

/// Header carrying the authenticated user's id on every API request.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Multipart part holding the JSON-encoded `SurveyDraft`.
pub const DRAFT_PART: &str = "json";

/// Multipart part holding the optional logo file.
pub const LOGO_PART: &str = "logo";

/// Body of every non-2xx API response.
///
/// `errors` is set only for validation failures and maps field names to the
/// message the form should show under that field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}
