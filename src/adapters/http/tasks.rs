use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use super::AppState;
use crate::application::{AppError, CreateTaskInput, UpdateTaskInput};
use crate::domain::{Task, TaskId};

/// Response envelope used by every endpoint: `error` is present iff
/// `success` is false.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }

    fn empty() -> Json<Self> {
        Json(Self {
            success: true,
            data: None,
            error: None,
        })
    }
}

/// A failed request, already mapped to its status code and the message
/// the client is allowed to see.
struct ApiFailure {
    status: StatusCode,
    message: String,
}

impl ApiFailure {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "Task not found".to_string(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(self.message),
        });
        (self.status, body).into_response()
    }
}

/// Map an application error to a response. Validation messages pass
/// through verbatim; internal detail is logged and replaced with the
/// generic `context` message.
fn failure(err: AppError, context: &'static str) -> ApiFailure {
    match err {
        AppError::Validation(errors) => ApiFailure::bad_request(errors.to_string()),
        AppError::Repository(err) => {
            tracing::error!("{context}: {err}");
            ApiFailure {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: context.to_string(),
            }
        }
    }
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/{id}", get(get_task).put(update_task).delete(delete_task))
}

async fn list_tasks(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<Task>>>), ApiFailure> {
    let tasks = state
        .service
        .list_tasks()
        .await
        .map_err(|e| failure(e, "Failed to fetch tasks"))?;
    Ok((StatusCode::OK, ApiResponse::ok(tasks)))
}

async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), ApiFailure> {
    let task = state
        .service
        .get_task(&TaskId(id))
        .await
        .map_err(|e| failure(e, "Failed to fetch task"))?
        .ok_or_else(ApiFailure::not_found)?;
    Ok((StatusCode::OK, ApiResponse::ok(task)))
}

async fn create_task(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateTaskInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), ApiFailure> {
    let Json(input) = payload.map_err(|rejection| ApiFailure::bad_request(rejection.body_text()))?;
    let task = state
        .service
        .create_task(input)
        .await
        .map_err(|e| failure(e, "Failed to create task"))?;
    Ok((StatusCode::CREATED, ApiResponse::ok(task)))
}

async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), ApiFailure> {
    let Json(input) = payload.map_err(|rejection| ApiFailure::bad_request(rejection.body_text()))?;
    let task = state
        .service
        .update_task(&TaskId(id), input)
        .await
        .map_err(|e| failure(e, "Failed to update task"))?
        .ok_or_else(ApiFailure::not_found)?;
    Ok((StatusCode::OK, ApiResponse::ok(task)))
}

async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<Task>>), ApiFailure> {
    let deleted = state
        .service
        .delete_task(&TaskId(id))
        .await
        .map_err(|e| failure(e, "Failed to delete task"))?;
    if !deleted {
        return Err(ApiFailure::not_found());
    }
    Ok((StatusCode::OK, ApiResponse::empty()))
}
