//! Task CRUD routes.
//!
//! Payload handling is explicit at the handler boundary: typed serde
//! deserialization plus field validation. No automatic model validation
//! layer sits in front of these functions.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::rest::error::ApiError;
use crate::tasks::{Task, TaskPayload};
use crate::AppContext;

/// The user-supplied title is required and must be non-empty after trimming.
fn validate_title(title: &str) -> Result<String, ApiError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ApiError::BadRequest("title must not be empty".to_string()));
    }
    Ok(title.to_string())
}

/// GET /api/tasks
pub async fn list_tasks(State(ctx): State<Arc<AppContext>>) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(ctx.tasks.list().await?))
}

/// GET /api/tasks/{id}
pub async fn get_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<i64>,
) -> Result<Json<Task>, ApiError> {
    match ctx.tasks.get(id).await? {
        Some(task) => Ok(Json(task)),
        None => Err(ApiError::NotFound),
    }
}

/// POST /api/tasks
///
/// Returns 201 with the created record and a `Location` header pointing at
/// it. Any caller-supplied id is ignored; the store assigns one.
pub async fn create_task(
    State(ctx): State<Arc<AppContext>>,
    Json(payload): Json<TaskPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let title = validate_title(&payload.title)?;
    let task = ctx.tasks.create(&title, payload.completed).await?;
    let location = format!("/api/tasks/{}", task.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(task),
    ))
}

/// PUT /api/tasks/{id}
///
/// Full-record replace. The body id must equal the path id; 404 when the id
/// does not exist, detected on the write itself (see `TaskStorage::replace`).
pub async fn replace_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<i64>,
    Json(payload): Json<TaskPayload>,
) -> Result<StatusCode, ApiError> {
    if payload.id != Some(id) {
        return Err(ApiError::BadRequest(format!(
            "body id must match path id {id}"
        )));
    }
    let title = validate_title(&payload.title)?;
    let task = Task {
        id,
        title,
        completed: payload.completed,
    };
    if ctx.tasks.replace(&task).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if ctx.tasks.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}
