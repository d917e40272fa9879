use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::config::Config;

/// Process-wide connection pool. Opened once at startup, closed on shutdown.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn connect(config: &Config) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;

        info!(
            max_connections = config.max_connections,
            "Connection to the database is successful"
        );
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}
