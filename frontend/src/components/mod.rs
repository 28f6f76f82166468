pub mod form;
pub mod surveys;
