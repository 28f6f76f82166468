//! Labelled form controls with an inline error line.

mod form_input;
mod form_select;

pub use form_input::FormInput;
pub use form_select::FormSelect;
