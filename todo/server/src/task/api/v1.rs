use crate::task::web::TaskState;
use crate::task::{Task, TaskStore, TaskStoreError};
use crate::web::api::v1::ServerErrorResponse;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// JSON representation of a Task for API responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskJson {
    /// Unique identifier for the task
    id: u32,
    /// The text of the task
    content: String,
    /// When the task was created
    created_at: DateTime<Utc>,
}

impl From<Task> for TaskJson {
    fn from(task: Task) -> Self {
        Self {
            id: task.id(),
            content: task.content().to_string(),
            created_at: task.created_at(),
        }
    }
}

/// API response for listing all tasks.
#[derive(Debug, Serialize)]
pub struct TasksResponse {
    /// Tasks, oldest first
    tasks: Vec<TaskJson>,
    /// Total number of tasks
    count: usize,
}

type ApiError = (StatusCode, Json<ServerErrorResponse>);

/// Handler for GET /api/v1/tasks - Returns all tasks in JSON format.
#[tracing::instrument(skip(state))]
pub async fn get_tasks_handler(
    State(state): State<Arc<TaskState>>,
) -> Result<Json<TasksResponse>, ApiError> {
    let store = TaskStore::new(&state.db);

    match store.list_ordered_by_created_at().await {
        Ok(tasks) => {
            let json_tasks: Vec<TaskJson> = tasks.into_iter().map(TaskJson::from).collect();
            let count = json_tasks.len();

            Ok(Json(TasksResponse {
                tasks: json_tasks,
                count,
            }))
        }
        Err(err) => {
            tracing::error!("Failed to get tasks: {}", err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ServerErrorResponse::new(
                    "Failed to retrieve tasks".to_string(),
                )),
            ))
        }
    }
}

/// Handler for GET /api/v1/tasks/{id} - Returns a single task in JSON format.
#[tracing::instrument(skip(state))]
pub async fn get_task_handler(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<u32>,
) -> Result<Json<TaskJson>, ApiError> {
    let store = TaskStore::new(&state.db);

    match store.get(id).await {
        Ok(task) => Ok(Json(TaskJson::from(task))),
        Err(TaskStoreError::NotFound(id)) => Err((
            StatusCode::NOT_FOUND,
            Json(ServerErrorResponse::new(format!(
                "Task with ID {} not found",
                id
            ))),
        )),
        Err(err) => {
            tracing::error!("Failed to get task {}: {}", id, err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ServerErrorResponse::new(
                    "Failed to retrieve tasks".to_string(),
                )),
            ))
        }
    }
}

/// Creates and returns the tasks API router.
pub fn create_api_router(state: Arc<TaskState>) -> Router {
    Router::new()
        .route("/tasks", get(get_tasks_handler))
        .route("/tasks/{id}", get(get_task_handler))
        .with_state(state)
}
