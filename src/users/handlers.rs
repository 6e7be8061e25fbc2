use actix_web::{web, HttpResponse};
use serde::Serialize;
use tracing::{error, info};

use crate::db::{self, CreateOutcome, NewUser, UpdateOutcome, UserUpdate};
use crate::error::{AppError, DatabaseError};
use crate::users::validation::{validate_new_user, validate_update};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl MessageResponse {
    fn new(message: impl Into<String>, user_id: Option<i64>) -> Self {
        Self {
            message: message.into(),
            user_id,
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(welcome))
        .route("/users/get_users", web::get().to(list_users))
        .route("/users/creat_user", web::post().to(create_user))
        .route("/users/user_update/{user_id}", web::put().to(update_user))
        .route("/users/delete_user/{user_id}", web::delete().to(delete_user));
}

pub async fn welcome() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse::new("Welcome to the user API", None))
}

pub async fn list_users(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let mut conn = state.db_pool.acquire().await?;
    let users = db::get_all_users(&mut conn).await?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn create_user(
    req: web::Json<NewUser>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received create request for email: {}", req.email);
    validate_new_user(&req)?;

    let mut conn = state.db_pool.acquire().await?;
    match db::create_user(&mut conn, &req).await {
        Ok(CreateOutcome::Created(id)) => Ok(HttpResponse::Created()
            .json(MessageResponse::new("User created successfully", Some(id)))),
        Ok(CreateOutcome::DuplicateEmail) => Err(AppError::Conflict(
            "User with this email already exists".into(),
        )),
        Err(e) => {
            error!("Create failed for email: {}: {}", req.email, e);
            Err(e)
        }
    }
}

pub async fn update_user(
    path: web::Path<i64>,
    query: web::Query<UserUpdate>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let update = query.into_inner();
    validate_update(&update)?;

    let mut conn = state.db_pool.acquire().await?;
    match db::update_user(&mut conn, user_id, &update).await? {
        UpdateOutcome::Updated => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "User updated",
            "user_id": user_id,
            "updated_fields": update.field_names(),
        }))),
        UpdateOutcome::NoFieldsGiven => {
            Ok(HttpResponse::Ok().json(MessageResponse::new("Nothing to update", Some(user_id))))
        }
        UpdateOutcome::NotFound => Err(DatabaseError::NotFound.into()),
    }
}

pub async fn delete_user(
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();

    let mut conn = state.db_pool.acquire().await?;
    if db::delete_user(&mut conn, user_id).await? {
        Ok(HttpResponse::Ok().json(serde_json::json!({
            "deleted": true,
            "user_id": user_id,
        })))
    } else {
        Err(DatabaseError::NotFound.into())
    }
}
