//! Server settings loaded via OrthoConfig and the resolved server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use kunooz::outbound::persistence::{DbPool, PoolConfig};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Problems found while resolving [`ServerSettings`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("database_url is required (set KUNOOZ_DATABASE_URL)")]
    MissingDatabaseUrl,
    #[error("bind_addr `{value}` is not a socket address: {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

/// Configuration values for the HTTP server, read from `KUNOOZ_*`
/// environment variables, CLI flags or a config file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "KUNOOZ")]
pub struct ServerSettings {
    /// Listen address, `0.0.0.0:8080` when unset.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// File holding the session cookie signing key.
    pub session_key_file: Option<PathBuf>,
    /// Fall back to a throwaway session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
}

impl ServerSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Required database URL.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Pool settings derived from the database options.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)))
    }

    /// Path of the session key file.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }
}

/// Resolved configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    /// Assemble the server configuration. Cookies use `SameSite=Lax`.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            key,
            cookie_secure,
            same_site: SameSite::Lax,
            bind_addr,
            db_pool,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "KUNOOZ_BIND_ADDR",
        "KUNOOZ_DATABASE_URL",
        "KUNOOZ_POOL_MAX_SIZE",
        "KUNOOZ_SESSION_KEY_FILE",
        "KUNOOZ_SESSION_ALLOW_EPHEMERAL",
        "KUNOOZ_COOKIE_SECURE",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("kunooz")]).expect("config should load")
    }

    #[rstest]
    fn defaults_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default bind addr"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("socket addr")
        );
        assert!(!settings.session_allow_ephemeral);
        assert!(settings.cookie_secure);
        assert_eq!(
            settings.session_key_file(),
            PathBuf::from(DEFAULT_SESSION_KEY_FILE)
        );
        assert!(matches!(
            settings.database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        ));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("KUNOOZ_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "KUNOOZ_DATABASE_URL",
                Some("postgres://kunooz@localhost/kunooz".to_owned()),
            ),
            ("KUNOOZ_POOL_MAX_SIZE", Some("4".to_owned())),
            ("KUNOOZ_SESSION_KEY_FILE", Some("/tmp/key".to_owned())),
            ("KUNOOZ_SESSION_ALLOW_EPHEMERAL", Some("true".to_owned())),
            ("KUNOOZ_COOKIE_SECURE", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("socket addr")
        );
        let pool = settings.pool_config().expect("pool config");
        assert_eq!(pool.database_url(), "postgres://kunooz@localhost/kunooz");
        assert_eq!(pool.max_size(), 4);
        assert_eq!(settings.session_key_file(), PathBuf::from("/tmp/key"));
        assert!(settings.session_allow_ephemeral);
        assert!(!settings.cookie_secure);
    }

    #[rstest]
    fn malformed_bind_addr_is_reported() {
        let _guard = lock_env([
            ("KUNOOZ_BIND_ADDR", Some("localhost".to_owned())),
            ("KUNOOZ_DATABASE_URL", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr { .. })
        ));
    }
}
