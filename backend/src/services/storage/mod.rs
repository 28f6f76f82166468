//! Public read access to stored objects: the targets of logo `logo_path` URLs.

use crate::error::SurveyError;
use crate::platform::HostedBackend;
use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::web::{get, scope};
use actix_web::{web, HttpResponse, Scope};

const PUBLIC_PATH: &str = "/storage";

pub fn configure_routes() -> Scope {
    scope(PUBLIC_PATH).route("/{bucket}/{path:.*}", get().to(process))
}

/// Serves one object. Keys carry no extension, so the content type is sniffed
/// from the bytes. Objects are write-once and may be cached indefinitely.
async fn process(
    path: web::Path<(String, String)>,
    backend: web::Data<HostedBackend>,
) -> Result<HttpResponse, SurveyError> {
    let (bucket, object) = path.into_inner();
    let bytes = backend.storage().get(&bucket, &object).await?;
    let content_type = image::guess_format(&bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream");

    Ok(HttpResponse::Ok()
        .content_type(content_type)
        .insert_header(CacheControl(vec![
            CacheDirective::Public,
            CacheDirective::MaxAge(31_536_000),
            CacheDirective::Extension("immutable".to_string(), None),
        ]))
        .body(bytes))
}
