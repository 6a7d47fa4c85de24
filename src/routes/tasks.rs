use crate::{
    auth::CurrentUser,
    db::tasks::TaskRepository,
    error::AppError,
    models::{TaskInput, TaskListResponse, TaskUpdate},
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Creates a new task for the authenticated user.
///
/// The owner is always the caller resolved from the token; a client cannot
/// create tasks on another user's behalf.
///
/// ## Request Body:
/// - `title`: 2 to 255 characters (required).
/// - `description` (optional): up to 5000 characters.
///
/// ## Responses:
/// - `201 Created`: the new task, with `is_completed` false.
/// - `400 Bad Request`: validation failure, or the insert yielded no row.
/// - `401/403`: missing or invalid authentication.
#[post("")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
    current_user: CurrentUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = TaskRepository::create(&pool, current_user.0.id, &task_data).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Lists all tasks owned by the authenticated user.
///
/// ## Responses:
/// - `200 OK`: `{"tasks": [...], "total": N}`; an owner with no tasks gets
///   an empty list.
/// - `401/403`: missing or invalid authentication.
#[get("")]
pub async fn get_tasks(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let tasks = TaskRepository::list_by_owner(&pool, current_user.0.id).await?;
    let total = tasks.len();

    Ok(HttpResponse::Ok().json(TaskListResponse { tasks, total }))
}

/// Partially updates a task owned by the authenticated user.
///
/// Only the supplied subset of `{title, description, is_completed}` is
/// changed. An empty body set is rejected here, before the repository.
///
/// ## Responses:
/// - `200 OK`: the updated task.
/// - `400 Bad Request`: empty update, invalid field values, or no row
///   matched (id, owner) — a task belonging to someone else looks exactly
///   like a nonexistent one.
/// - `401/403`: missing or invalid authentication.
#[patch("/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
    task_data: web::Json<TaskUpdate>,
    current_user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();
    if task_id <= 0 {
        return Err(AppError::ValidationError("Task id must be positive".into()));
    }

    task_data.validate()?;
    if task_data.is_empty() {
        return Err(AppError::ValidationError(
            "At least one field must be provided for update".into(),
        ));
    }

    let task = TaskRepository::update(&pool, task_id, current_user.0.id, &task_data).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task owned by the authenticated user.
///
/// ## Responses:
/// - `204 No Content`: exactly one row removed.
/// - `400 Bad Request`: no row matched (id, owner); "not found" and "not
///   yours" are deliberately indistinguishable.
/// - `401/403`: missing or invalid authentication.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
    current_user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();
    if task_id <= 0 {
        return Err(AppError::ValidationError("Task id must be positive".into()));
    }

    TaskRepository::delete(&pool, task_id, current_user.0.id).await?;

    Ok(HttpResponse::NoContent().finish())
}
