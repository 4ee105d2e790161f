pub mod entities;
pub mod migrator;
pub mod repositories;

pub use repositories::SeaOrmRepositoryProvider;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use migrator::Migrator;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./board.db?mode=rwc")
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./board.db?mode=rwc".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 8,
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            ..Default::default()
        }
    }

    fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.url.clone());
        // every pooled connection to an in-memory SQLite gets its own database
        let max = if self.url.contains(":memory:") {
            1
        } else {
            self.max_connections
        };
        options
            .max_connections(max)
            .min_connections(self.min_connections.min(max))
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .sqlx_logging(false);
        options
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let db = Database::connect(config.connect_options()).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Apply pending migrations
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    Migrator::up(db, None).await?;
    info!("Database migrations applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RepositoryProvider;

    #[tokio::test]
    async fn in_memory_database_is_single_connection() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".into(),
            ..Default::default()
        };
        let db = init_database(&config).await.unwrap();
        run_migrations(&db).await.unwrap();

        let repos = SeaOrmRepositoryProvider::new(db);
        assert_eq!(repos.categories().find_all().await.unwrap().len(), 5);
    }

    #[test]
    fn sqlite_url_from_path() {
        assert_eq!(
            DatabaseConfig::sqlite("/tmp/board.db").url,
            "sqlite:///tmp/board.db?mode=rwc"
        );
    }
}
