mod auth;
mod config;
mod error;
mod media;
mod platform;
mod services;

use crate::config::AppConfig;
use crate::platform::database::Database;
use crate::platform::storage::ObjectStorage;
use crate::platform::HostedBackend;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{error, info};
use mime_guess::from_path;
use std::io;
use std::thread;
use std::time::Duration;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Serves the embedded frontend; unknown paths fall back to `index.html` so
/// client-side views survive a reload.
async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    match STATIC_DIR.get_file(file_path) {
        Some(file) => {
            let mime = from_path(file_path).first_or_octet_stream();
            HttpResponse::Ok()
                .content_type(mime.as_ref())
                .body(file.contents().to_vec())
        }
        None => match STATIC_DIR.get_file("index.html") {
            Some(index) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(index.contents().to_vec()),
            None => HttpResponse::NotFound().body("Not Found"),
        },
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        error!("configuration error: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;
    let url = config.base_url();

    let db = Database::open(&config.db_path).map_err(|e| {
        error!("cannot open {}: {}", config.db_path.display(), e);
        io::Error::other(e.to_string())
    })?;
    std::fs::create_dir_all(&config.storage_dir)?;
    let storage = ObjectStorage::new(&config.storage_dir, config.public_storage_url.clone());
    let backend = HostedBackend::new(db, storage);

    if config.open_browser {
        let url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url_clone);
        });
    }

    info!(
        "Server running at {} (db {}, storage {})",
        url,
        config.db_path.display(),
        backend.storage().root().display()
    );

    let bind = (config.host.clone(), config.port);
    let config = web::Data::new(config);
    let backend = web::Data::new(backend);

    HttpServer::new(move || {
        App::new()
            .app_data(config.clone())
            .app_data(backend.clone())
            .service(services::surveys::configure_routes())
            .service(services::products::configure_routes())
            .service(services::enums::configure_routes())
            .service(services::storage::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
        .bind(bind)?
        .run()
        .await
}
