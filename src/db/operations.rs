use sqlx::{Connection, QueryBuilder, Sqlite, SqliteConnection};
use tracing::{info, warn};

use crate::db::models::{CreateOutcome, FieldValue, NewUser, UpdateOutcome, User, UserUpdate};
use crate::error::AppError;

/// Inserts a user and returns the id the store assigned.
///
/// A taken email is an expected outcome and comes back as
/// [`CreateOutcome::DuplicateEmail`]; every other failure, including the age
/// check, is returned as an error.
pub async fn create_user(
    conn: &mut SqliteConnection,
    user: &NewUser,
) -> Result<CreateOutcome, AppError> {
    let mut transaction = conn.begin().await?;

    let result = sqlx::query("INSERT INTO users (name, age, email) VALUES (?, ?, ?)")
        .bind(&user.name)
        .bind(user.age)
        .bind(&user.email)
        .execute(&mut *transaction)
        .await;

    match result {
        Ok(done) => {
            transaction.commit().await?;
            let id = done.last_insert_rowid();
            info!("Created user {} with email {}", id, user.email);
            Ok(CreateOutcome::Created(id))
        }
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            transaction.rollback().await?;
            info!("User with email {} already exists", user.email);
            Ok(CreateOutcome::DuplicateEmail)
        }
        Err(e) => {
            transaction.rollback().await?;
            Err(e.into())
        }
    }
}

pub async fn get_all_users(conn: &mut SqliteConnection) -> Result<Vec<User>, AppError> {
    let users = sqlx::query_as::<_, User>("SELECT id, name, age, email FROM users ORDER BY id")
        .fetch_all(conn)
        .await?;

    Ok(users)
}

/// Writes only the fields present in `update`.
pub async fn update_user(
    conn: &mut SqliteConnection,
    id: i64,
    update: &UserUpdate,
) -> Result<UpdateOutcome, AppError> {
    if update.is_empty() {
        info!("No fields to update for user {}", id);
        return Ok(UpdateOutcome::NoFieldsGiven);
    }

    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE users SET ");
    let mut assignments = builder.separated(", ");
    for (field, value) in update.assignments() {
        assignments.push(format!("{} = ", field.column()));
        match value {
            FieldValue::Text(text) => assignments.push_bind_unseparated(text),
            FieldValue::Integer(number) => assignments.push_bind_unseparated(number),
        };
    }
    builder.push(" WHERE id = ").push_bind(id);

    let mut transaction = conn.begin().await?;
    let done = builder.build().execute(&mut *transaction).await?;
    transaction.commit().await?;

    if done.rows_affected() == 0 {
        warn!("Update requested for unknown user {}", id);
        return Ok(UpdateOutcome::NotFound);
    }

    info!("User {} updated, fields: {:?}", id, update.field_names());
    Ok(UpdateOutcome::Updated)
}

/// Returns `true` iff a row was removed.
pub async fn delete_user(conn: &mut SqliteConnection, id: i64) -> Result<bool, AppError> {
    let mut transaction = conn.begin().await?;

    let done = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(&mut *transaction)
        .await?;

    transaction.commit().await?;

    let deleted = done.rows_affected() == 1;
    if deleted {
        info!("Deleted user {}", id);
    }
    Ok(deleted)
}
