use serde::{Deserialize, Serialize};

/// One selectable code for an enumerated survey field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumOption {
    pub value: String,
    pub label: String,
}

/// Option lists for every enumerated field of a survey draft.
///
/// The form renders its selects only from this catalog, which the backend
/// serves from the `enum_options` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumCatalog {
    pub survey_style: Vec<EnumOption>,
    pub minimum_review_length: Vec<EnumOption>,
    pub minimum_star_rating: Vec<EnumOption>,
    pub time_delay: Vec<EnumOption>,
}

/// Names of the enumerated fields, as stored in the `field` column.
pub const ENUM_FIELDS: [&str; 4] = [
    "survey_style",
    "minimum_review_length",
    "minimum_star_rating",
    "time_delay",
];

impl EnumCatalog {
    /// Mutable access to the option list of `field`, if it is an enumerated field.
    pub fn options_mut(&mut self, field: &str) -> Option<&mut Vec<EnumOption>> {
        match field {
            "survey_style" => Some(&mut self.survey_style),
            "minimum_review_length" => Some(&mut self.minimum_review_length),
            "minimum_star_rating" => Some(&mut self.minimum_star_rating),
            "time_delay" => Some(&mut self.time_delay),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_enum_field_has_a_list() {
        let mut catalog = EnumCatalog::default();
        for field in ENUM_FIELDS {
            assert!(catalog.options_mut(field).is_some(), "{field}");
        }
        assert!(catalog.options_mut("survey_name").is_none());
    }
}
