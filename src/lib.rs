//! Client management web application: a searchable client list and a
//! two-step dialog for creating clients, backed by a JSON API.

#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::db::{establish_connection_pool, run_migrations};
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::store::ClientStore;

pub mod db;
pub mod domain;
pub mod dto;
mod error_conversions;
pub mod forms;
pub mod models;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
pub mod services;
pub mod store;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    run_migrations(&pool)
        .map_err(|e| std::io::Error::other(format!("Failed to run migrations: {e}")))?;

    let repo = DieselRepository::new(pool);
    let store = ClientStore::new();

    // Keys and stores for sessions and flash messages.
    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid secret key: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(server_config.domain.as_ref().map(|d| format!(".{d}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(store.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
