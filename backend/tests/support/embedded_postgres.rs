//! Migrated PostgreSQL databases for adapter tests.
//!
//! When `PROFILE_API_TEST_DATABASE_URL` is set the suite runs against that
//! disposable database. Otherwise an embedded cluster is downloaded, started
//! in a temporary data directory and stopped when the handle drops. Setup
//! failures panic so a broken environment never reads as a passing test.

use diesel::{Connection, PgConnection};
use diesel_migrations::MigrationHarness;
use postgresql_embedded::PostgreSQL;
use user_profile_api::outbound::persistence::MIGRATIONS;

/// Points the suite at an existing database instead of an embedded one.
pub const DATABASE_URL_VAR: &str = "PROFILE_API_TEST_DATABASE_URL";

const DATABASE_NAME: &str = "user_profiles_test";

/// A migrated database; owns the embedded cluster when one was started.
pub struct TestDatabase {
    url: String,
    _cluster: Option<PostgreSQL>,
}

impl TestDatabase {
    /// Connection string for the migrated database.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Provision and migrate a database for one test.
pub async fn test_database() -> TestDatabase {
    if let Ok(url) = std::env::var(DATABASE_URL_VAR) {
        migrate(&url);
        return TestDatabase {
            url,
            _cluster: None,
        };
    }

    let mut cluster = PostgreSQL::default();
    if let Err(err) = cluster.setup().await {
        panic!(
            "embedded PostgreSQL setup failed: {err}. \
             Set {DATABASE_URL_VAR} to use an existing database."
        );
    }
    if let Err(err) = cluster.start().await {
        panic!("embedded PostgreSQL failed to start: {err}");
    }
    if let Err(err) = cluster.create_database(DATABASE_NAME).await {
        panic!("creating {DATABASE_NAME} failed: {err}");
    }
    let url = cluster.settings().url(DATABASE_NAME);
    migrate(&url);
    TestDatabase {
        url,
        _cluster: Some(cluster),
    }
}

fn migrate(url: &str) {
    let mut conn = PgConnection::establish(url)
        .unwrap_or_else(|err| panic!("connect for migrations: {err}"));
    conn.run_pending_migrations(MIGRATIONS)
        .unwrap_or_else(|err| panic!("migrations apply: {err}"));
}
