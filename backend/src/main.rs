//! Backend entry-point: loads configuration, prepares storage and serves the
//! REST API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bloglist_backend::inbound::http::health::HealthState;
use bloglist_backend::inbound::http::token_config::{BuildMode, token_secret_from_env};
use bloglist_backend::outbound::persistence::{DbPool, run_migrations};

use server::{AppSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("invalid configuration: {err}")))?;
    let token_secret = token_secret_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(settings.bind_addr(), token_secret, settings.token_ttl());
    if let Some(pool_config) = settings.pool_config() {
        run_migrations(pool_config.database_url())
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %settings.bind_addr(), "starting server");
    create_server(health_state, config)?.await
}
