use crate::auth::CurrentUser;
use crate::error::SurveyError;
use crate::platform::HostedBackend;
use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::{web, HttpResponse};

/// `GET /api/products`: the caller's products, sorted by name.
pub async fn process(
    user: CurrentUser,
    backend: web::Data<HostedBackend>,
) -> Result<HttpResponse, SurveyError> {
    let products = backend.database().products_for_user(&user.id)?;
    Ok(HttpResponse::Ok()
        .insert_header(CacheControl(vec![CacheDirective::NoStore]))
        .json(products))
}
