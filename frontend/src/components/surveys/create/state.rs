//! Runtime state of the survey creation form.

use common::model::enums::EnumCatalog;
use common::model::product::Product;
use common::model::survey::SurveyDraft;
use common::validation::FieldErrors;
use yew::AttrValue;

pub struct SurveyCreateComponent {
    /// Values bound 1:1 to the form controls. `draft.logo` is filled once the
    /// picked file has been read into memory.
    pub draft: SurveyDraft,

    /// The picked file itself, sent as the `logo` multipart part.
    pub logo_file: Option<web_sys::File>,

    /// Counts logo picks; a read result is kept only if it belongs to the
    /// latest pick.
    pub logo_pick: u64,

    /// Object URL backing the logo preview; revoked when replaced or on unmount.
    pub logo_preview: Option<String>,

    pub products: Vec<Product>,
    pub products_loading: bool,
    pub product_adding: bool,
    pub enums: EnumCatalog,

    /// Messages shown under each field, from the local check or a 422 response.
    pub errors: FieldErrors,

    /// Set while the create request is in flight; disables the submit button.
    pub is_submitting: bool,

    /// Guard for first-render loading.
    pub loaded: bool,
}

impl SurveyCreateComponent {
    pub fn new() -> Self {
        Self {
            draft: SurveyDraft::default(),
            logo_file: None,
            logo_pick: 0,
            logo_preview: None,
            products: Vec::new(),
            products_loading: true,
            product_adding: false,
            enums: EnumCatalog::default(),
            errors: FieldErrors::new(),
            is_submitting: false,
            loaded: false,
        }
    }

    pub fn error_for(&self, field: &str) -> Option<AttrValue> {
        self.errors
            .get(field)
            .map(|message| AttrValue::from(message.clone()))
    }

    /// Starts a new logo pick and returns its number.
    pub fn begin_logo_pick(&mut self) -> u64 {
        self.logo_pick += 1;
        self.logo_pick
    }

    /// Whether bytes read for `pick` still belong to the selected file.
    /// Clearing the logo also starts a pick, so reads finishing after a clear
    /// are dropped too.
    pub fn is_current_pick(&self, pick: u64) -> bool {
        pick == self.logo_pick
    }

    /// Drops the current logo preview URL, if any.
    pub fn release_preview(&mut self) {
        if let Some(url) = self.logo_preview.take() {
            web_sys::Url::revoke_object_url(&url).ok();
        }
    }
}
