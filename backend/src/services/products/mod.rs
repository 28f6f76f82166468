//! Product catalog routes. The form loads the catalog on every mount, so the
//! listing is marked uncacheable.

mod create;
mod get;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/products";

/// Configures and returns the Actix scope for product routes.
///
/// *   **`GET /api/products`**: the caller's catalog, sorted by name.
/// *   **`POST /api/products`**: adds a product (`{ "product_name", "image_url"? }`)
///     to the caller's catalog and answers `201 Created` with it.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::process))
        .route("", post().to(create::process))
}
