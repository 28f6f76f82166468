//! Survey screens: the creation form and the list it returns to.

pub mod create;
pub mod list;
mod logo_upload;
mod product_grid;
