// server/src/web/routes.rs

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::middleware::from_fn;
use actix_web::{web, HttpRequest};
use tracing::debug;

use crate::errors::AppError;
use crate::web::guard::page_guard;
use crate::web::handlers::{auth_handlers, barang_handlers, kategori_handlers, ruangan_handlers, user_handlers};
use crate::web::pages;

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Any body that is not the expected JSON shape is a 400 with one fixed message.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  debug!(error = %err, "Rejecting malformed JSON body.");
  AppError::Validation("Format data tidak valid".to_string()).into()
}

/// An `{id}` that is not a UUID cannot name a record, so it answers like a missing one.
fn path_config(not_found: &'static str) -> web::PathConfig {
  web::PathConfig::default().error_handler(move |err: PathError, _req: &HttpRequest| {
    debug!(error = %err, "Rejecting malformed path id.");
    AppError::NotFound(not_found.to_string()).into()
  })
}

// Called from `main.rs` (and the HTTP tests) to configure the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .service(
      web::scope("/api")
        .route("/health", web::get().to(health_check_handler))
        .service(
          web::scope("/auth")
            .route("/login", web::post().to(auth_handlers::login_handler))
            .route("/logout", web::post().to(auth_handlers::logout_handler))
            .route("/me", web::get().to(auth_handlers::me_handler)),
        )
        .service(
          web::scope("/barang")
            .app_data(path_config("Barang tidak ditemukan"))
            .route("", web::get().to(barang_handlers::list_barang_handler))
            .route("", web::post().to(barang_handlers::create_barang_handler))
            .route("/{id}", web::get().to(barang_handlers::get_barang_handler))
            .route("/{id}", web::put().to(barang_handlers::update_barang_handler))
            .route("/{id}", web::delete().to(barang_handlers::delete_barang_handler)),
        )
        .service(
          web::scope("/kategori")
            .app_data(path_config("Kategori tidak ditemukan"))
            .route("", web::get().to(kategori_handlers::list_kategori_handler))
            .route("", web::post().to(kategori_handlers::create_kategori_handler))
            .route("/{id}", web::get().to(kategori_handlers::get_kategori_handler))
            .route("/{id}", web::put().to(kategori_handlers::update_kategori_handler))
            .route("/{id}", web::delete().to(kategori_handlers::delete_kategori_handler)),
        )
        .service(
          web::scope("/ruangan")
            .app_data(path_config("Ruangan tidak ditemukan"))
            .route("", web::get().to(ruangan_handlers::list_ruangan_handler))
            .route("", web::post().to(ruangan_handlers::create_ruangan_handler))
            .route("/{id}", web::get().to(ruangan_handlers::get_ruangan_handler))
            .route("/{id}", web::put().to(ruangan_handlers::update_ruangan_handler))
            .route("/{id}", web::delete().to(ruangan_handlers::delete_ruangan_handler)),
        )
        .service(
          web::scope("/users")
            .app_data(path_config("User tidak ditemukan"))
            .route("", web::get().to(user_handlers::list_users_handler))
            .route("", web::post().to(user_handlers::create_user_handler))
            .route("/{id}", web::get().to(user_handlers::get_user_handler))
            .route("/{id}", web::put().to(user_handlers::update_user_handler))
            .route("/{id}", web::delete().to(user_handlers::delete_user_handler)),
        ),
    )
    // HTML pages and their assets. `/` has no route of its own; the guard redirects it.
    .service(
      web::scope("")
        .wrap(from_fn(page_guard))
        .route("/login", web::get().to(pages::login_page))
        .route("/dashboard", web::get().to(pages::dashboard_page))
        .route("/dashboard/{resource}", web::get().to(pages::resource_page))
        .route("/assets/{file}", web::get().to(pages::asset)),
    );
}
