//! Backend entry-point: loads settings, applies migrations and serves the API.

mod server;

use std::io;

use actix_web::cookie::Key;
use actix_web::web;
use diesel::{Connection, PgConnection};
use diesel_migrations::MigrationHarness;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use kunooz::inbound::http::health::HealthState;
use kunooz::outbound::persistence::{DbPool, MIGRATIONS};
use server::{ServerConfig, ServerSettings, create_server};

fn load_session_key(settings: &ServerSettings) -> io::Result<Key> {
    let key_path = settings.session_key_file();
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            if cfg!(debug_assertions) || settings.session_allow_ephemeral {
                warn!(
                    path = %key_path.display(),
                    error = %e,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            } else {
                Err(io::Error::other(format!(
                    "failed to read session key at {}: {e}",
                    key_path.display()
                )))
            }
        }
    }
}

async fn run_migrations(database_url: String) -> io::Result<()> {
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url)
            .map_err(|e| io::Error::other(format!("database connection failed: {e}")))?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| io::Error::other(format!("migrations failed: {e}")))?;
        info!(count = applied.len(), "migrations applied");
        Ok(())
    })
    .await
    .map_err(|e| io::Error::other(format!("migration task failed: {e}")))?
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("invalid configuration: {e}")))?;
    let key = load_session_key(&settings)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let pool_config = settings.pool_config().map_err(io::Error::other)?;

    run_migrations(pool_config.database_url().to_owned()).await?;
    let db_pool = DbPool::new(pool_config)
        .await
        .map_err(|e| io::Error::other(format!("database pool: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(key, settings.cookie_secure, bind_addr, db_pool);
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
