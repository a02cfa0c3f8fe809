//! One-shot schema setup: applies the embedded migrations.
//!
//! Creates `user_profiles` with its unique `user_id` constraint. Reads
//! `PROFILE_API_DATABASE_URL` (or the `--database-url` flag) like the server
//! does.

use color_eyre::eyre::{Context, Result, eyre};
use diesel::{Connection, PgConnection};
use diesel_migrations::MigrationHarness;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use user_profile_api::outbound::persistence::MIGRATIONS;
use user_profile_api::settings::ProfileServiceSettings;

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(error) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(%error, "tracing init failed");
    }

    let settings = ProfileServiceSettings::load()
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let pool_config = settings.pool_config()?;
    let mut conn = PgConnection::establish(pool_config.database_url())
        .context("failed to connect to PostgreSQL")?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| eyre!("migration failed: {err}"))?;

    info!(count = applied.len(), "migrations applied");
    for version in applied {
        info!(%version, "applied migration");
    }
    Ok(())
}
