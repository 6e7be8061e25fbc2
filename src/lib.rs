pub mod config;
pub mod db;
pub mod error;
pub mod users;

use std::sync::Arc;
use sqlx::SqlitePool;
use actix_web::{web, HttpResponse};

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use db::{CreateOutcome, NewUser, UpdateOutcome, User, UserUpdate};

/// Health check endpoint handler
/// Returns a JSON response with server status, timestamp and pool usage
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "database": db::DbPoolStatus::of(&state.db_pool),
    }))
}

/// Application state shared across all workers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub db_pool: Arc<SqlitePool>,
}

impl AppState {
    /// Connects to the configured database and makes sure the schema exists.
    pub async fn new(config: Settings) -> Result<Self> {
        let db_pool = db::connect_pool(&config.database).await?;

        let mut conn = db_pool.acquire().await?;
        db::ensure_schema(&mut conn).await?;
        drop(conn);

        Ok(Self {
            config: Arc::new(config),
            db_pool: Arc::new(db_pool),
        })
    }

    pub async fn shutdown(&self) -> Result<()> {
        // Close database connections
        self.db_pool.close().await;
        Ok(())
    }
}
