use common::model::enums::EnumCatalog;
use common::model::product::Product;
use common::model::survey::{LogoFile, Survey, SurveyDraft};

use crate::api::ApiError;

/// Text fields of the draft that are edited through an input or a select.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftField {
    SurveyName,
    SurveyStyle,
    MinimumReviewLength,
    MinimumStarRating,
    TimeDelay,
}

impl DraftField {
    /// Field name as used in validation error maps.
    pub fn key(self) -> &'static str {
        match self {
            DraftField::SurveyName => "survey_name",
            DraftField::SurveyStyle => "survey_style",
            DraftField::MinimumReviewLength => "minimum_review_length",
            DraftField::MinimumStarRating => "minimum_star_rating",
            DraftField::TimeDelay => "time_delay",
        }
    }

    pub fn get(self, draft: &SurveyDraft) -> &str {
        match self {
            DraftField::SurveyName => &draft.survey_name,
            DraftField::SurveyStyle => &draft.survey_style,
            DraftField::MinimumReviewLength => &draft.minimum_review_length,
            DraftField::MinimumStarRating => &draft.minimum_star_rating,
            DraftField::TimeDelay => &draft.time_delay,
        }
    }

    pub fn set(self, draft: &mut SurveyDraft, value: String) {
        let slot = match self {
            DraftField::SurveyName => &mut draft.survey_name,
            DraftField::SurveyStyle => &mut draft.survey_style,
            DraftField::MinimumReviewLength => &mut draft.minimum_review_length,
            DraftField::MinimumStarRating => &mut draft.minimum_star_rating,
            DraftField::TimeDelay => &mut draft.time_delay,
        };
        *slot = value;
    }
}

pub enum Msg {
    ProductsLoaded(Result<Vec<Product>, ApiError>),
    EnumsLoaded(Result<EnumCatalog, ApiError>),
    SetField(DraftField, String),
    LogoSelected(web_sys::File),
    /// Bytes of the pick numbered by the first field.
    LogoRead(u64, LogoFile),
    LogoReadFailed(u64),
    LogoCleared,
    ToggleProduct(String),
    AddProduct(String),
    ProductAdded(Result<Product, ApiError>),
    Submit,
    SubmitFinished(Result<Survey, ApiError>),
    Cancel,
}
