//! The authenticated caller, passed explicitly into every handler.
//!
//! Authentication itself happens upstream; by the time a request reaches this
//! service the identity provider has put the user id in `X-User-Id`.

use crate::error::SurveyError;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use common::requests::USER_ID_HEADER;
use std::future::{ready, Ready};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
}

impl CurrentUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl FromRequest for CurrentUser {
    type Error = SurveyError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let id = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty());

        ready(match id {
            Some(id) => Ok(CurrentUser::new(id)),
            None => Err(SurveyError::Unauthorized),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn user_id_is_read_from_the_header() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, " user-1 "))
            .to_http_request();
        let user = CurrentUser::extract(&req).await.unwrap();
        assert_eq!(user.id, "user-1");
    }

    #[actix_web::test]
    async fn missing_or_blank_header_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(
            CurrentUser::extract(&req).await,
            Err(SurveyError::Unauthorized)
        ));

        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "   "))
            .to_http_request();
        assert!(CurrentUser::extract(&req).await.is_err());
    }
}
