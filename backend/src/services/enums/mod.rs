//! Enumeration catalog route: the option lists behind the form's selects.

mod get;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/enums";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(get::process))
}
