use std::sync::Arc;

use blog_api::{
    config::Config,
    repositories::{MemoryRepo, PostgresRepo},
    routes::create_routes,
    AppState,
};
use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("blog_api=debug,tower_http=info")),
        )
        .with_target(true)
        .init();

    let config = Config::init();

    let app_state = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = match PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await
            {
                Ok(pool) => {
                    info!("✅ Connection to the database is successful!");
                    pool
                }
                Err(err) => {
                    error!("🔥 Failed to connect to the database: {:?}", err);
                    std::process::exit(1);
                }
            };

            if let Err(err) = sqlx::migrate!().run(&pool).await {
                error!("🔥 Failed to run database migrations: {:?}", err);
                std::process::exit(1);
            }

            let repo = Arc::new(PostgresRepo::new(pool));
            AppState::new(config.clone(), repo.clone(), repo)
        }
        None => {
            warn!("DATABASE_URL is not set, records are kept in memory only");
            let repo = Arc::new(MemoryRepo::new());
            AppState::new(config.clone(), repo.clone(), repo)
        }
    };

    let app = create_routes(Arc::new(app_state));

    let listener = match tokio::net::TcpListener::bind(format!("[::]:{}", config.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("🔥 Failed to bind port {}: {:?}", config.port, err);
            std::process::exit(1);
        }
    };

    info!("🚀 Listening on port {}", config.port);
    if let Err(err) = axum::serve(listener, app).await {
        error!("🔥 Server error: {:?}", err);
    }
}
