//! Throwaway schema lifecycle for `PostgreSQL` tests.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::Connection;
use skilltrack::{
    app::{PgPool, PostgresWorkflows},
    config::{AppConfig, AuthConfig, DatabaseConfig},
};

/// Environment variable naming the test server.
pub const TEST_DATABASE_URL_VAR: &str = "SKILLTRACK_TEST_DATABASE_URL";

const MIGRATION: &str =
    include_str!("../../migrations/2026-01-15-000000_create_skilltrack/up.sql");

/// A migrated schema that is dropped with the value.
pub struct TestSchema {
    base_url: String,
    name: String,
    url: String,
}

impl TestSchema {
    /// Creates and migrates a fresh schema, or `None` without a test server.
    pub fn create() -> eyre::Result<Option<Self>> {
        let Ok(base_url) = std::env::var(TEST_DATABASE_URL_VAR) else {
            return Ok(None);
        };
        let name = format!("skilltrack_{}", uuid::Uuid::new_v4().simple());
        let separator = if base_url.contains('?') { '&' } else { '?' };
        let url = format!("{base_url}{separator}options=-csearch_path%3D{name}");

        let mut admin = PgConnection::establish(&base_url)?;
        admin.batch_execute(&format!("CREATE SCHEMA {name}"))?;
        let mut scoped = PgConnection::establish(&url)?;
        scoped.batch_execute(MIGRATION)?;

        Ok(Some(Self {
            base_url,
            name,
            url,
        }))
    }

    /// Builds a small pool scoped to the schema.
    pub fn pool(&self) -> eyre::Result<PgPool> {
        Ok(Pool::builder()
            .max_size(2)
            .build(ConnectionManager::<PgConnection>::new(&self.url))?)
    }

    /// Wires every workflow over the schema.
    pub fn workflows(&self) -> eyre::Result<PostgresWorkflows> {
        let config = AppConfig {
            database: DatabaseConfig {
                url: self.url.clone(),
                max_connections: 2,
            },
            auth: AuthConfig {
                jwt_secret: "postgres-test-secret".to_owned(),
                ..AuthConfig::default()
            },
            ..AppConfig::default()
        };
        Ok(PostgresWorkflows::postgres(&config)?)
    }
}

impl Drop for TestSchema {
    fn drop(&mut self) {
        if let Ok(mut admin) = PgConnection::establish(&self.base_url) {
            drop(admin.batch_execute(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.name)));
        }
    }
}
