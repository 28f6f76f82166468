//! # Survey Creation Endpoint
//!
//! `POST /api/surveys` accepts `multipart/form-data` with:
//!
//! - a `json` part carrying the `SurveyDraft` fields (everything but the logo);
//! - an optional `logo` part carrying the image file.
//!
//! The assembled draft is checked against the same schema the form runs in
//! the browser. Nothing reaches the backend unless the whole draft is valid;
//! then the workflow runs and the persisted survey is returned.

use crate::auth::CurrentUser;
use crate::config::AppConfig;
use crate::error::SurveyError;
use crate::platform::HostedBackend;
use crate::services::surveys::workflow::create_survey;
use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse};
use common::model::survey::{LogoFile, SurveyDraft};
use common::requests::{DRAFT_PART, LOGO_PART};
use common::validation::{self, FieldErrors};
use futures_util::StreamExt;
use log::info;

/// The draft JSON is a handful of short strings and ids.
const MAX_DRAFT_BYTES: usize = 64 * 1024;

pub async fn process(
    user: CurrentUser,
    backend: web::Data<HostedBackend>,
    config: web::Data<AppConfig>,
    payload: Multipart,
) -> Result<HttpResponse, SurveyError> {
    let draft = read_draft(payload, config.max_upload_bytes).await?;
    validation::check(&draft).map_err(SurveyError::Validation)?;

    info!(
        "creating survey {:?} for user {} with {} product(s)",
        draft.survey_name,
        user.id,
        draft.product_ids.len()
    );
    let survey = create_survey(backend.get_ref(), &user, draft).await?;
    Ok(HttpResponse::Created().json(survey))
}

/// Collects the draft and the optional logo from the multipart stream.
///
/// Parts may arrive in any order; unknown parts are ignored. An empty `logo`
/// part (a file input left blank) counts as no logo.
async fn read_draft(mut payload: Multipart, max_logo_bytes: usize) -> Result<SurveyDraft, SurveyError> {
    let mut draft: Option<SurveyDraft> = None;
    let mut logo: Option<LogoFile> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| SurveyError::BadRequest(e.to_string()))?;
        let part_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match part_name.as_deref() {
            Some(DRAFT_PART) => {
                let bytes = read_part(&mut field, MAX_DRAFT_BYTES)
                    .await?
                    .ok_or_else(|| SurveyError::BadRequest("survey draft is too large".into()))?;
                let parsed: SurveyDraft = serde_json::from_slice(&bytes)
                    .map_err(|e| SurveyError::BadRequest(format!("invalid survey draft: {}", e)))?;
                draft = Some(parsed);
            }
            Some(LOGO_PART) => {
                let file_name = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                    .unwrap_or_default();
                let content_type = field.content_type().map(|mime| mime.to_string());
                let bytes = read_part(&mut field, max_logo_bytes).await?.ok_or_else(|| {
                    SurveyError::Validation(FieldErrors::from([(
                        LOGO_PART.to_string(),
                        "Logo must be less than 750KB".to_string(),
                    )]))
                })?;
                if !bytes.is_empty() {
                    logo = Some(LogoFile {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            }
            _ => {}
        }
    }

    let mut draft = draft.ok_or_else(|| SurveyError::BadRequest("missing json part".into()))?;
    draft.logo = logo;
    Ok(draft)
}

/// Reads a whole part, or `None` once it grows past `limit` bytes.
async fn read_part(field: &mut Field, limit: usize) -> Result<Option<Vec<u8>>, SurveyError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| SurveyError::BadRequest(e.to_string()))?;
        if bytes.len() + chunk.len() > limit {
            return Ok(None);
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(Some(bytes))
}
