//! Evaluation of the survey draft schema.

use std::collections::BTreeMap;
use validator::{Validate, ValidationErrors};

/// Field name to the first human-readable message reported for it.
pub type FieldErrors = BTreeMap<String, String>;

/// Checks a draft (or any other form payload) against its declared rules.
///
/// Returns every failing field at once so the form can mark all of them in a
/// single pass; a draft with any error must not be submitted.
pub fn check<T: Validate>(form: &T) -> Result<(), FieldErrors> {
    form.validate().map_err(|errors| field_errors(&errors))
}

fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect()
}
