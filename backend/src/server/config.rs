//! Server settings loaded via OrthoConfig and the runtime configuration
//! built from them.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use bloglist_backend::domain::DEFAULT_TOKEN_TTL;
use bloglist_backend::inbound::http::token_config::TokenSecret;
use bloglist_backend::outbound::persistence::{DbPool, PoolConfig};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 3003;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Settings read from `BLOGLIST_*` environment variables, config files and
/// command-line flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOGLIST")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<IpAddr>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// PostgreSQL connection string; in-memory storage when absent.
    pub database_url: Option<String>,
    /// Bearer token lifetime in seconds.
    pub token_ttl_secs: Option<u64>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl AppSettings {
    /// Socket address built from the configured host and port.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Token lifetime, falling back to one hour.
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TOKEN_TTL)
    }

    /// Database URL with blank values treated as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool configuration for `database_url`, when one is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url().map(|url| {
            PoolConfig::new(url).with_max_size(
                self.db_max_connections
                    .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
            )
        })
    }
}

/// Runtime configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_secret: TokenSecret,
    pub(crate) token_ttl: Duration,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration using in-memory storage.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_secret: TokenSecret, token_ttl: Duration) -> Self {
        Self {
            bind_addr,
            token_secret,
            token_ttl,
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the persistence adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and defaults.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "BLOGLIST_HOST",
        "BLOGLIST_PORT",
        "BLOGLIST_DATABASE_URL",
        "BLOGLIST_TOKEN_TTL_SECS",
        "BLOGLIST_DB_MAX_CONNECTIONS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("bloglist-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(settings.bind_addr(), SocketAddr::from(([0, 0, 0, 0], 3003)));
        assert_eq!(settings.token_ttl(), Duration::from_secs(3600));
        assert!(settings.database_url().is_none());
        assert!(settings.pool_config().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("BLOGLIST_HOST", Some("127.0.0.1".to_owned())),
            ("BLOGLIST_PORT", Some("8080".to_owned())),
            (
                "BLOGLIST_DATABASE_URL",
                Some("postgres://localhost/bloglist".to_owned()),
            ),
            ("BLOGLIST_TOKEN_TTL_SECS", Some("60".to_owned())),
            ("BLOGLIST_DB_MAX_CONNECTIONS", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(settings.bind_addr(), SocketAddr::from(([127, 0, 0, 1], 8080)));
        assert_eq!(settings.token_ttl(), Duration::from_secs(60));
        let pool = settings.pool_config().expect("pool configured");
        assert_eq!(pool.database_url(), "postgres://localhost/bloglist");
    }

    #[rstest]
    #[case(Some("   "))]
    #[case(Some(""))]
    fn blank_database_urls_mean_in_memory(#[case] url: Option<&str>) {
        let settings = AppSettings {
            host: None,
            port: None,
            database_url: url.map(str::to_owned),
            token_ttl_secs: None,
            db_max_connections: None,
        };
        assert!(settings.pool_config().is_none());
    }
}
