//! The survey creation pipeline.
//!
//! Steps run strictly one after another, each awaiting the previous one:
//!
//! 1. optimize and upload the logo, if any, and resolve its public URL;
//! 2. ask the backend for a fresh short code;
//! 3. derive the public survey URL from it;
//! 4. render the URL as a QR code data URL;
//! 5. insert the survey as `ACTIVE`;
//! 6. insert one product link per selected product.
//!
//! A failing step stops the pipeline and is returned to the caller. Work done
//! by earlier steps stays in place: an uploaded logo is not deleted when a
//! later insert fails.

use crate::auth::CurrentUser;
use crate::error::SurveyError;
use crate::media::optimize::{optimize, OptimizedImage};
use crate::media::qr::render_data_url;
use crate::platform::{SurveyBackend, LOGO_BUCKET};
use chrono::Utc;
use common::model::survey::{
    survey_url, LogoFile, NewSurvey, Survey, SurveyDraft, SurveyProduct, MAX_LOGO_BYTES,
    STATUS_ACTIVE,
};
use log::{debug, error, info};
use rand::Rng;
use std::collections::HashSet;

const LOGO_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Runs the whole pipeline for an already validated draft.
pub async fn create_survey<B>(
    backend: &B,
    user: &CurrentUser,
    draft: SurveyDraft,
) -> Result<Survey, SurveyError>
where
    B: SurveyBackend + ?Sized,
{
    let result = SurveyCreation { backend, user }.run(draft).await;
    match &result {
        Ok(survey) => info!(
            "survey {} created for user {} as {}",
            survey.id, user.id, survey.short_code
        ),
        Err(e) => error!("Error creating survey for user {}: {}", user.id, e),
    }
    result
}

struct SurveyCreation<'a, B: ?Sized> {
    backend: &'a B,
    user: &'a CurrentUser,
}

impl<B> SurveyCreation<'_, B>
where
    B: SurveyBackend + ?Sized,
{
    async fn run(&self, draft: SurveyDraft) -> Result<Survey, SurveyError> {
        let logo_path = match &draft.logo {
            Some(logo) => Some(self.upload_logo(logo).await?),
            None => None,
        };
        let short_code = self.request_short_code().await?;
        let url = survey_url(&short_code);
        let qr_code = render_data_url(&url)?;
        let survey = self
            .insert_survey(&draft, logo_path, short_code, url, qr_code)
            .await?;
        self.link_products(&survey, &draft.product_ids).await?;
        Ok(survey)
    }

    async fn upload_logo(&self, logo: &LogoFile) -> Result<String, SurveyError> {
        let optimized = optimize_off_thread(logo.bytes.clone()).await?;
        let key = logo_key(&self.user.id, Utc::now().timestamp_millis(), &random_suffix());
        debug!(
            "uploading {} ({} bytes, {}) as {}/{}",
            logo.file_name,
            optimized.len(),
            optimized.content_type(),
            LOGO_BUCKET,
            key
        );
        let path = self.backend.upload(LOGO_BUCKET, &key, optimized.bytes).await?;
        Ok(self.backend.public_url(LOGO_BUCKET, &path))
    }

    async fn request_short_code(&self) -> Result<String, SurveyError> {
        self.backend.generate_short_code().await
    }

    async fn insert_survey(
        &self,
        draft: &SurveyDraft,
        logo_path: Option<String>,
        short_code: String,
        url: String,
        qr_code: String,
    ) -> Result<Survey, SurveyError> {
        self.backend
            .insert_survey(NewSurvey {
                user_id: self.user.id.clone(),
                survey_name: draft.survey_name.clone(),
                survey_style: draft.survey_style.clone(),
                minimum_review_length: draft.minimum_review_length.clone(),
                minimum_star_rating: draft.minimum_star_rating.clone(),
                time_delay: draft.time_delay.clone(),
                logo_path,
                short_code,
                url,
                qr_code,
                survey_status: STATUS_ACTIVE.to_string(),
            })
            .await
    }

    async fn link_products(&self, survey: &Survey, product_ids: &[String]) -> Result<(), SurveyError> {
        let rows = product_rows(&survey.id, product_ids);
        if rows.is_empty() {
            return Ok(());
        }
        self.backend.insert_survey_products(rows).await
    }
}

/// One link per distinct product id, in selection order.
///
/// The form cannot select a product twice, but a hand-built request can.
/// Repeated ids collapse to their first occurrence instead of failing the
/// whole link batch on the `(survey_id, product_id)` key.
fn product_rows(survey_id: &str, product_ids: &[String]) -> Vec<SurveyProduct> {
    let mut seen = HashSet::new();
    product_ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .map(|id| SurveyProduct {
            survey_id: survey_id.to_string(),
            product_id: id.clone(),
        })
        .collect()
}

/// Runs the optimizer on the blocking pool.
async fn optimize_off_thread(bytes: Vec<u8>) -> Result<OptimizedImage, SurveyError> {
    tokio::task::spawn_blocking(move || optimize(&bytes, MAX_LOGO_BYTES))
        .await
        .map_err(|e| SurveyError::Encoding {
            max_bytes: MAX_LOGO_BYTES,
            reason: format!("optimizer task failed: {}", e),
        })?
}

/// Storage key for a logo: partitioned by user, unique by time and suffix.
fn logo_key(user_id: &str, timestamp_ms: i64, suffix: &str) -> String {
    format!("{}/{}_{}", user_id, timestamp_ms, suffix)
}

fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..LOGO_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}
