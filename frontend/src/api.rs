//! Thin client for the backend's JSON API.
//!
//! Every request carries the signed-in user's id in the `X-User-Id` header.

use std::fmt;

use common::model::enums::EnumCatalog;
use common::model::product::{NewProduct, Product};
use common::model::survey::{Survey, SurveyDraft};
use common::requests::{DRAFT_PART, ErrorResponse, LOGO_PART, USER_ID_HEADER};
use common::validation::FieldErrors;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use web_sys::{File, FormData};

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The server rejected the draft; messages are keyed by field.
    Validation(FieldErrors),
    Http(u16, String),
    Network(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(errors) => {
                write!(f, "Please fix {} field(s) and try again", errors.len())
            }
            ApiError::Http(status, message) => write!(f, "Request failed ({}): {}", status, message),
            ApiError::Network(message) => write!(f, "Network error: {}", message),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

pub async fn get_products(user_id: &str) -> Result<Vec<Product>, ApiError> {
    let response = Request::get("/api/products")
        .header(USER_ID_HEADER, user_id)
        .send()
        .await?;
    read_json(response).await
}

pub async fn create_product(user_id: &str, product: &NewProduct) -> Result<Product, ApiError> {
    let response = Request::post("/api/products")
        .header(USER_ID_HEADER, user_id)
        .json(product)?
        .send()
        .await?;
    read_json(response).await
}

pub async fn get_enums() -> Result<EnumCatalog, ApiError> {
    let response = Request::get("/api/enums").send().await?;
    read_json(response).await
}

pub async fn get_surveys(user_id: &str) -> Result<Vec<Survey>, ApiError> {
    let response = Request::get("/api/surveys")
        .header(USER_ID_HEADER, user_id)
        .send()
        .await?;
    read_json(response).await
}

/// Submits a draft as multipart form data: the draft as JSON in the `json`
/// part and the picked file, if any, in the `logo` part.
pub async fn create_survey(
    user_id: &str,
    draft: &SurveyDraft,
    logo: Option<&File>,
) -> Result<Survey, ApiError> {
    let payload = serde_json::to_string(draft).map_err(|e| ApiError::Network(e.to_string()))?;
    let form = FormData::new().map_err(js_error)?;
    form.append_with_str(DRAFT_PART, &payload).map_err(js_error)?;
    if let Some(file) = logo {
        form.append_with_blob_and_filename(LOGO_PART, file, &file.name())
            .map_err(js_error)?;
    }

    let response = Request::post("/api/surveys")
        .header(USER_ID_HEADER, user_id)
        .body(form)?
        .send()
        .await?;
    read_json(response).await
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if response.ok() {
        return response.json::<T>().await.map_err(ApiError::from);
    }

    let body = response.text().await.unwrap_or_default();
    Err(error_from_body(status, &body))
}

fn error_from_body(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            errors: Some(errors),
            ..
        }) if status == 422 && !errors.is_empty() => ApiError::Validation(errors),
        Ok(ErrorResponse { message, .. }) => ApiError::Http(status, message),
        Err(_) if body.is_empty() => ApiError::Http(status, "no response body".to_string()),
        Err(_) => ApiError::Http(status, body.to_string()),
    }
}

fn js_error(value: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Network(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unprocessable_with_field_map_is_a_validation_error() {
        let body = r#"{"message":"validation failed","errors":{"survey_name":"Survey name is required"}}"#;
        match error_from_body(422, body) {
            ApiError::Validation(errors) => {
                assert_eq!(errors["survey_name"], "Survey name is required");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn other_failures_keep_status_and_message() {
        let body = r#"{"message":"short code request failed"}"#;
        assert_eq!(
            error_from_body(502, body),
            ApiError::Http(502, "short code request failed".into())
        );
        assert_eq!(
            error_from_body(500, "boom"),
            ApiError::Http(500, "boom".into())
        );
    }
}
