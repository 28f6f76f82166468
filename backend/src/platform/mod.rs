//! Backend capabilities the survey workflow depends on.
//!
//! The workflow only ever sees [`SurveyBackend`]: object upload, public URL
//! resolution, short-code issuance and the two inserts. [`HostedBackend`] is
//! the production implementation, composed of the filesystem object store and
//! the SQLite relational store; tests substitute a recording fake.

pub mod database;
pub mod storage;

use crate::error::SurveyError;
use async_trait::async_trait;
use common::model::survey::{NewSurvey, Survey, SurveyProduct};
use database::Database;
use storage::ObjectStorage;

/// Bucket holding uploaded survey logos.
pub const LOGO_BUCKET: &str = "logos";

#[async_trait]
pub trait SurveyBackend: Send + Sync {
    /// Stores `bytes` under `key` in `bucket` and returns the stored path.
    async fn upload(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<String, SurveyError>;

    /// Public URL for a path returned by [`SurveyBackend::upload`].
    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Issues a short code that has never been issued before.
    async fn generate_short_code(&self) -> Result<String, SurveyError>;

    async fn insert_survey(&self, survey: NewSurvey) -> Result<Survey, SurveyError>;

    async fn insert_survey_products(&self, rows: Vec<SurveyProduct>) -> Result<(), SurveyError>;
}

#[derive(Clone)]
pub struct HostedBackend {
    db: Database,
    storage: ObjectStorage,
}

impl HostedBackend {
    pub fn new(db: Database, storage: ObjectStorage) -> Self {
        Self { db, storage }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn storage(&self) -> &ObjectStorage {
        &self.storage
    }
}

#[async_trait]
impl SurveyBackend for HostedBackend {
    async fn upload(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<String, SurveyError> {
        self.storage.put(bucket, key, &bytes).await
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.storage.public_url(bucket, path)
    }

    async fn generate_short_code(&self) -> Result<String, SurveyError> {
        self.db.generate_short_code()
    }

    async fn insert_survey(&self, survey: NewSurvey) -> Result<Survey, SurveyError> {
        self.db.insert_survey(survey)
    }

    async fn insert_survey_products(&self, rows: Vec<SurveyProduct>) -> Result<(), SurveyError> {
        self.db.insert_survey_products(&rows)
    }
}
