//! Errors raised while serving the survey API.
//!
//! Every failure of the creation workflow maps to exactly one variant, so the
//! log line and the HTTP status both tell which step broke. None of them are
//! retried and none undo the steps that already completed.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::requests::{ErrorResponse, LOGO_PART};
use common::validation::FieldErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SurveyError {
    /// The draft failed its schema; nothing was sent to the backend.
    #[error("survey draft is invalid")]
    Validation(FieldErrors),

    #[error("logo upload failed: {0}")]
    Upload(String),

    #[error("short code generation failed: {0}")]
    Rpc(String),

    #[error("insert into {table} failed: {reason}")]
    Insert { table: &'static str, reason: String },

    /// The logo is not an image the optimizer can decode.
    #[error("logo is not a supported image: {0}")]
    UnsupportedImage(String),

    /// The logo could not be brought under the size bound.
    #[error("logo cannot be encoded within {max_bytes} bytes: {reason}")]
    Encoding { max_bytes: usize, reason: String },

    #[error("qr code rendering failed: {0}")]
    QrCode(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("missing or empty user id")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

const UNSUPPORTED_LOGO_MESSAGE: &str = "Logo is not a supported image";
const OVERSIZED_LOGO_MESSAGE: &str = "Logo could not be reduced below 750KB";

fn logo_error(message: &str) -> FieldErrors {
    FieldErrors::from([(LOGO_PART.to_string(), message.to_string())])
}

impl SurveyError {
    pub fn insert(table: &'static str, err: impl std::fmt::Display) -> Self {
        SurveyError::Insert {
            table,
            reason: err.to_string(),
        }
    }
}

impl ResponseError for SurveyError {
    fn status_code(&self) -> StatusCode {
        match self {
            SurveyError::Validation(_)
            | SurveyError::UnsupportedImage(_)
            | SurveyError::Encoding { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            SurveyError::BadRequest(_) => StatusCode::BAD_REQUEST,
            SurveyError::Unauthorized => StatusCode::UNAUTHORIZED,
            SurveyError::NotFound => StatusCode::NOT_FOUND,
            SurveyError::Upload(_) | SurveyError::Rpc(_) | SurveyError::Insert { .. } => {
                StatusCode::BAD_GATEWAY
            }
            SurveyError::QrCode(_) | SurveyError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let errors = match self {
            SurveyError::Validation(fields) => Some(fields.clone()),
            SurveyError::UnsupportedImage(_) => Some(logo_error(UNSUPPORTED_LOGO_MESSAGE)),
            SurveyError::Encoding { .. } => Some(logo_error(OVERSIZED_LOGO_MESSAGE)),
            _ => None,
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            message: self.to_string(),
            errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_failures_map_to_distinct_statuses() {
        assert_eq!(
            SurveyError::Validation(FieldErrors::new()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(SurveyError::Rpc("down".into()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            SurveyError::insert("surveys", "constraint").status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(SurveyError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn insert_error_names_the_table() {
        let err = SurveyError::insert("survey_products", "FOREIGN KEY constraint failed");
        assert_eq!(
            err.to_string(),
            "insert into survey_products failed: FOREIGN KEY constraint failed"
        );
    }

    async fn logo_field_message(err: &SurveyError) -> Option<String> {
        let bytes = actix_web::body::to_bytes(err.error_response().into_body())
            .await
            .ok()?;
        let body: ErrorResponse = serde_json::from_slice(&bytes).ok()?;
        body.errors?.get(LOGO_PART).cloned()
    }

    #[actix_web::test]
    async fn logo_failures_name_their_cause() {
        let unreadable = SurveyError::UnsupportedImage("unknown format".into());
        let too_big = SurveyError::Encoding {
            max_bytes: 768_000,
            reason: "smallest encoding was 900000 bytes".into(),
        };
        assert_eq!(unreadable.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(too_big.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        assert_eq!(
            logo_field_message(&unreadable).await.as_deref(),
            Some(UNSUPPORTED_LOGO_MESSAGE)
        );
        assert_eq!(
            logo_field_message(&too_big).await.as_deref(),
            Some(OVERSIZED_LOGO_MESSAGE)
        );
    }
}
