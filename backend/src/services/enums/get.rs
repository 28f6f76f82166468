use crate::error::SurveyError;
use crate::platform::HostedBackend;
use actix_web::{web, HttpResponse};

pub async fn process(backend: web::Data<HostedBackend>) -> Result<HttpResponse, SurveyError> {
    let catalog = backend.database().enum_catalog()?;
    Ok(HttpResponse::Ok().json(catalog))
}

#[cfg(test)]
mod tests {
    use crate::platform::database::Database;
    use crate::platform::storage::ObjectStorage;
    use crate::platform::HostedBackend;
    use crate::services::enums::configure_routes;
    use actix_web::{test, web, App};
    use common::model::enums::EnumCatalog;

    #[actix_web::test]
    async fn serves_the_seeded_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let backend = HostedBackend::new(
            Database::open_in_memory().unwrap(),
            ObjectStorage::new(dir.path(), "http://localhost/storage"),
        );
        let expected = backend.database().enum_catalog().unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(backend))
                .service(configure_routes()),
        )
        .await;
        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/enums").to_request()).await;
        let catalog: EnumCatalog = test::read_body_json(resp).await;
        assert_eq!(catalog, expected);
        assert!(catalog.time_delay.iter().any(|o| o.value == "NONE"));
    }
}
