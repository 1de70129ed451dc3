pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod schema;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::ports::QuoteRepository;

pub use application::{build_mediator, Mediator};
pub use config::AppConfig;
pub use db::{create_pool, run_migrations, DbPool};
pub use infrastructure::{DieselQuoteRepository, InMemoryQuoteRepository};

/// Shared state plus routes for one app instance; used by the server and by tests.
pub fn configure_app(
    repo: Arc<dyn QuoteRepository>,
    mediator: Arc<Mediator>,
) -> impl Fn(&mut web::ServiceConfig) + Clone {
    let repo = web::Data::from(repo);
    let mediator = web::Data::from(mediator);
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(repo.clone())
            .app_data(mediator.clone())
            .configure(handlers::routes);
    }
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    repo: Arc<dyn QuoteRepository>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let mediator = Arc::new(build_mediator(Arc::clone(&repo)));
    let configure = configure_app(repo, mediator);
    let api_doc = openapi::ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(configure.clone())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", api_doc.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
