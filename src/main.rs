use std::sync::Arc;

use quote_service::domain::ports::QuoteRepository;
use quote_service::{
    build_server, create_pool, run_migrations, AppConfig, DieselQuoteRepository,
    InMemoryQuoteRepository,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let repo: Arc<dyn QuoteRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = create_pool(database_url).map_err(std::io::Error::other)?;
            run_migrations(&pool).map_err(std::io::Error::other)?;
            Arc::new(DieselQuoteRepository::new(pool))
        }
        None => {
            log::warn!("DATABASE_URL not set; quotes are kept in memory only");
            Arc::new(InMemoryQuoteRepository::new())
        }
    };

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(repo, &config.host, config.port)?.await
}
