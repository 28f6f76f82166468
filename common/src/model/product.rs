use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A product from the user's catalog, offered for selection in the survey form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub user_id: String,
    pub product_name: String,
    pub image_url: Option<String>,
    pub created_at: String,
}

/// Body of `POST /api/products`. The owner comes from the request context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(custom(function = "validate_not_blank"))]
    pub product_name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Product name is required".into()));
    }
    Ok(())
}
