//! Types shared by the survey backend and the browser frontend.
//!
//! Everything here compiles for both native targets and `wasm32`, so the same
//! validation schema blocks a submission in the browser and guards the
//! server endpoint.

pub mod model;
pub mod requests;
pub mod validation;
