use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod config;
mod error;
mod jwt;
mod middleware;
mod models;
mod password;
mod rate_limiter;
mod repositories;
mod routes;
mod session;
mod state;
mod validation;

#[cfg(test)]
mod test_support;

use common::database::{DatabaseConfig, health_check, init_pool};
use tokio::net::TcpListener;

use crate::{
    config::ServerConfig,
    jwt::{JwtConfig, TokenService},
    rate_limiter::RateLimiter,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting portal service");

    let server_config = ServerConfig::from_env()?;
    let token_service = TokenService::new(JwtConfig::from_env()?)?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let app_state = AppState::new(
        pool,
        token_service,
        server_config.secure_cookies(),
        RateLimiter::default(),
    );

    let app = routes::create_router(app_state);

    let address = server_config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!(
        "Portal service listening on {} ({:?})",
        address, server_config.environment
    );

    axum::serve(listener, app).await?;

    Ok(())
}
