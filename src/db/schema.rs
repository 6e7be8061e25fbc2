use sqlx::{Connection, SqliteConnection};
use tracing::info;

use crate::error::AppError;

pub const CREATE_TABLE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    age INTEGER NOT NULL CHECK (age >= 1 AND age < 150),
    email TEXT NOT NULL UNIQUE
)
"#;

/// Creates the `users` table if it is absent. Safe to run on every start.
///
/// The caller keeps ownership of `conn`; it is not closed here.
pub async fn ensure_schema(conn: &mut SqliteConnection) -> Result<(), AppError> {
    let mut transaction = conn.begin().await?;

    sqlx::query(CREATE_TABLE_USERS)
        .execute(&mut *transaction)
        .await?;

    transaction.commit().await?;
    info!("Database initialized");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn table_count(conn: &mut SqliteConnection) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'users'")
            .fetch_one(conn)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();

        ensure_schema(&mut conn).await.unwrap();
        sqlx::query("INSERT INTO users (name, age, email) VALUES ('Alice', 30, 'alice@example.com')")
            .execute(&mut conn)
            .await
            .unwrap();

        ensure_schema(&mut conn).await.unwrap();

        assert_eq!(table_count(&mut conn).await, 1);
        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut conn)
            .await
            .unwrap();
        assert_eq!(rows, 1, "re-running the schema must not drop data");
    }

    #[tokio::test]
    async fn test_ensure_schema_propagates_failure() {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        sqlx::query("PRAGMA query_only = ON")
            .execute(&mut conn)
            .await
            .unwrap();

        let result = ensure_schema(&mut conn).await;
        assert!(result.is_err());
    }
}
