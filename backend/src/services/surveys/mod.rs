//! # Survey Service Module
//!
//! Routes under `/api/surveys`.
//!
//! ## Sub-modules:
//! - `create`: multipart intake, validation and the creation workflow.
//! - `list`: the caller's surveys for the dashboard list view.
//! - `workflow`: the ordered creation pipeline itself.

mod create;
mod list;
pub mod workflow;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for all survey-related API endpoints.
const API_PATH: &str = "/api/surveys";

/// Configures and returns the Actix `Scope` for survey routes.
///
/// # Registered Routes:
///
/// *   **`POST /api/surveys`**:
///     - **Handler**: `create::process`
///     - **Description**: Creates a survey from a multipart form with a `json` part
///       (the draft) and an optional `logo` file part. Answers `201 Created` with the
///       persisted survey, or `422` with per-field messages when the draft is invalid.
///
/// *   **`GET /api/surveys`**:
///     - **Handler**: `list::process`
///     - **Description**: Returns the caller's surveys, newest first.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("", get().to(list::process))
}
