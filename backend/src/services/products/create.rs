use crate::auth::CurrentUser;
use crate::error::SurveyError;
use crate::platform::HostedBackend;
use actix_web::{web, HttpResponse};
use common::model::product::NewProduct;
use common::validation;
use log::info;

/// `POST /api/products`: adds a product to the caller's catalog.
pub async fn process(
    user: CurrentUser,
    backend: web::Data<HostedBackend>,
    body: web::Json<NewProduct>,
) -> Result<HttpResponse, SurveyError> {
    let product = body.into_inner();
    validation::check(&product).map_err(SurveyError::Validation)?;

    let created = backend.database().insert_product(
        &user.id,
        &product.product_name,
        product.image_url.as_deref().filter(|url| !url.trim().is_empty()),
    )?;
    info!("product {} added for user {}", created.id, user.id);
    Ok(HttpResponse::Created().json(created))
}

#[cfg(test)]
mod tests {
    use crate::platform::database::Database;
    use crate::platform::storage::ObjectStorage;
    use crate::platform::HostedBackend;
    use crate::services::products::configure_routes;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use common::model::product::Product;
    use common::requests::{ErrorResponse, USER_ID_HEADER};
    use serde_json::json;

    fn fresh_backend(dir: &tempfile::TempDir) -> HostedBackend {
        HostedBackend::new(
            Database::open_in_memory().unwrap(),
            ObjectStorage::new(dir.path(), "http://localhost/storage"),
        )
    }

    #[actix_web::test]
    async fn fresh_database_serves_added_products_to_the_form() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(fresh_backend(&dir)))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/products")
            .insert_header((USER_ID_HEADER, "user-1"))
            .set_json(json!({ "product_name": " Pour-over kettle " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Product = test::read_body_json(resp).await;
        assert_eq!(created.product_name, "Pour-over kettle");
        assert_eq!(created.user_id, "user-1");
        assert_eq!(created.image_url, None);

        let req = test::TestRequest::get()
            .uri("/api/products")
            .insert_header((USER_ID_HEADER, "user-1"))
            .to_request();
        let catalog: Vec<Product> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(catalog, vec![created]);
    }

    #[actix_web::test]
    async fn blank_product_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let backend = fresh_backend(&dir);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(backend.clone()))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/products")
            .insert_header((USER_ID_HEADER, "user-1"))
            .set_json(json!({ "product_name": "   " }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(
            body.errors.unwrap().get("product_name").unwrap(),
            "Product name is required"
        );
        assert!(backend.database().products_for_user("user-1").unwrap().is_empty());
    }
}
