pub mod enums;
pub mod product;
pub mod survey;
