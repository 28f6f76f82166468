use crate::auth::CurrentUser;
use crate::error::SurveyError;
use crate::platform::HostedBackend;
use actix_web::{web, HttpResponse};

pub async fn process(
    user: CurrentUser,
    backend: web::Data<HostedBackend>,
) -> Result<HttpResponse, SurveyError> {
    let surveys = backend.database().surveys_for_user(&user.id)?;
    Ok(HttpResponse::Ok().json(surveys))
}
