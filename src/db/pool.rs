use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::error::{AppError, DatabaseError};

/// Opens the connection pool described by `config`.
///
/// Idle connections are never reaped: an in-memory database disappears with
/// its last connection.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

    info!("Connected to database at {}", config.url);
    Ok(pool)
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DbPoolStatus {
    pub total_connections: u32,
    pub active_connections: u32,
    pub idle_connections: u32,
}

impl DbPoolStatus {
    pub fn of(pool: &SqlitePool) -> Self {
        let size = pool.size();
        let idle = pool.num_idle() as u32;

        Self {
            total_connections: size,
            active_connections: size.saturating_sub(idle),
            idle_connections: idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[tokio::test]
    async fn test_connect_in_memory() {
        let settings = Settings::new_for_test().unwrap();
        let pool = connect_pool(&settings.database).await.unwrap();

        let status = DbPoolStatus::of(&pool);
        assert!(status.total_connections <= 1, "Total connections should not exceed max");
        assert_eq!(
            status.active_connections + status.idle_connections,
            status.total_connections,
            "Active + Idle should equal Total"
        );

        pool.close().await;
    }

    #[tokio::test]
    async fn test_connect_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("users.db");
        let mut settings = Settings::new_for_test().unwrap();
        settings.database.url = format!("sqlite://{}", path.display());

        let result = connect_pool(&settings.database).await;
        assert!(matches!(
            result,
            Err(AppError::DatabaseError(DatabaseError::ConnectionError(_)))
        ));
    }

    #[tokio::test]
    async fn test_connect_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.db");
        let mut settings = Settings::new_for_test().unwrap();
        settings.database.url = format!("sqlite://{}", path.display());

        let pool = connect_pool(&settings.database).await.unwrap();
        assert!(path.exists());
        pool.close().await;
    }
}
