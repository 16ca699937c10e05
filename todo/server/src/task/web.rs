use askama::Template;
use axum::{
    Form, Router,
    extract::{FromRequestParts, Path, State},
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

use crate::task::{Task, TaskStore, TaskStoreError};

/// Form submitted by both the create and the update views.
#[derive(Debug, Deserialize)]
pub struct TaskForm {
    content: Option<String>,
}

impl TaskForm {
    fn into_content(self) -> Result<String, TaskError> {
        self.content.ok_or(TaskError::MissingContent)
    }
}

/// Task ID taken from the request path. Segments that do not parse as an ID are not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskId(u32);

impl<S> FromRequestParts<S> for TaskId
where
    S: Send + Sync,
{
    type Rejection = TaskError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<u32>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(TaskId(id)),
            Err(rejection) => Err(TaskError::UnknownId(rejection.body_text())),
        }
    }
}

/// The storage operation a handler was performing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    Load,
    Add,
    Update,
    Delete,
}

impl TaskAction {
    fn failure_message(self) -> &'static str {
        match self {
            TaskAction::Load => "There was an issue loading your tasks",
            TaskAction::Add => "There was an issue adding your task",
            TaskAction::Update => "There was an issue updating your task",
            TaskAction::Delete => "There was an issue deleting your task",
        }
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            TaskAction::Load => "load",
            TaskAction::Add => "add",
            TaskAction::Update => "update",
            TaskAction::Delete => "delete",
        };
        f.write_str(verb)
    }
}

/// Custom error type for task handler operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// Represents an error during template rendering.
    #[error("Template rendering failed")]
    Template(#[from] askama::Error),
    /// The referenced task does not exist.
    #[error("Task with ID {0} not found")]
    NotFound(u32),
    /// The path segment is not a task ID.
    #[error("Invalid task ID: {0}")]
    UnknownId(String),
    /// The submitted form has no `content` field.
    #[error("The content field is required")]
    MissingContent,
    /// The store failed while performing `action`.
    #[error("Failed to {action} task")]
    Storage {
        action: TaskAction,
        #[source]
        source: TaskStoreError,
    },
}

impl TaskError {
    fn from_store(action: TaskAction) -> impl Fn(TaskStoreError) -> TaskError {
        move |err| match err {
            TaskStoreError::NotFound(id) => TaskError::NotFound(id),
            source => TaskError::Storage { action, source },
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        match self {
            TaskError::NotFound(_) | TaskError::UnknownId(_) => {
                (StatusCode::NOT_FOUND, "The requested task was not found").into_response()
            }
            TaskError::MissingContent => (
                StatusCode::BAD_REQUEST,
                "The task content field is required",
            )
                .into_response(),
            TaskError::Storage { action, source } => {
                tracing::error!("Failed to {} task: {}", action, source);
                (StatusCode::INTERNAL_SERVER_ERROR, action.failure_message()).into_response()
            }
            TaskError::Template(err) => {
                tracing::error!("Failed to render template: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(
                        "<h1>Internal Server Error</h1><p>An unexpected error occurred while processing your request. Please try again later.</p>",
                    ),
                )
                    .into_response()
            }
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    tasks: Vec<Task>,
}

impl IndexTemplate {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

#[derive(Template)]
#[template(path = "update.html")]
struct UpdateTemplate {
    task: Task,
}

impl UpdateTemplate {
    pub fn new(task: Task) -> Self {
        Self { task }
    }
}

#[derive(Clone, Debug)]
pub struct TaskState {
    pub db: Arc<sea_orm::DatabaseConnection>,
}

/// Handler for GET / that renders every task and the creation form.
#[tracing::instrument(skip(state))]
async fn index_handler(State(state): State<Arc<TaskState>>) -> Result<Html<String>, TaskError> {
    let store = TaskStore::new(&state.db);
    let tasks = store
        .list_ordered_by_created_at()
        .await
        .map_err(TaskError::from_store(TaskAction::Load))?;
    let template = IndexTemplate::new(tasks);
    template.render().map(Html).map_err(TaskError::from)
}

/// Handler for POST / that creates a task from the submitted form.
#[tracing::instrument(skip(state))]
async fn create_task_handler(
    State(state): State<Arc<TaskState>>,
    Form(form): Form<TaskForm>,
) -> Result<Redirect, TaskError> {
    let content = form.into_content()?;
    let store = TaskStore::new(&state.db);
    store
        .insert(content)
        .await
        .map_err(TaskError::from_store(TaskAction::Add))?;
    Ok(Redirect::to("/"))
}

/// Handler for GET /delete/{id}.
#[tracing::instrument(skip(state))]
async fn delete_task_handler(
    State(state): State<Arc<TaskState>>,
    TaskId(id): TaskId,
) -> Result<Redirect, TaskError> {
    let store = TaskStore::new(&state.db);
    let to_storage_error = TaskError::from_store(TaskAction::Delete);
    let task = store.get(id).await.map_err(&to_storage_error)?;
    store.delete(task.id()).await.map_err(to_storage_error)?;
    Ok(Redirect::to("/"))
}

/// Handler for GET /update/{id} that renders the pre-filled edit form.
#[tracing::instrument(skip(state))]
async fn edit_task_handler(
    State(state): State<Arc<TaskState>>,
    TaskId(id): TaskId,
) -> Result<Html<String>, TaskError> {
    let store = TaskStore::new(&state.db);
    let task = store
        .get(id)
        .await
        .map_err(TaskError::from_store(TaskAction::Load))?;
    let template = UpdateTemplate::new(task);
    template.render().map(Html).map_err(TaskError::from)
}

/// Handler for POST /update/{id} that replaces the task content.
#[tracing::instrument(skip(state))]
async fn update_task_handler(
    State(state): State<Arc<TaskState>>,
    TaskId(id): TaskId,
    Form(form): Form<TaskForm>,
) -> Result<Redirect, TaskError> {
    let store = TaskStore::new(&state.db);
    let task = store
        .get(id)
        .await
        .map_err(TaskError::from_store(TaskAction::Update))?;
    let content = form.into_content()?;
    store
        .update_content(task.id(), content)
        .await
        .map_err(TaskError::from_store(TaskAction::Update))?;
    Ok(Redirect::to("/"))
}

/// Creates and returns the task router with the list, create, update and delete routes.
pub fn create_task_router(state: Arc<TaskState>) -> Router {
    Router::new()
        .route("/", get(index_handler).post(create_task_handler))
        .route("/delete/{id}", get(delete_task_handler))
        .route(
            "/update/{id}",
            get(edit_task_handler).post(update_task_handler),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    async fn body_text(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn can_map_not_found_to_404() {
        let response = TaskError::NotFound(9999).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn can_map_missing_content_to_bad_request() {
        let response = TaskError::MissingContent.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_snapshot!(body_text(response).await, @"The task content field is required");
    }

    #[tokio::test]
    async fn can_map_storage_failure_to_fixed_message_per_action() {
        let cases = [
            (TaskAction::Add, "There was an issue adding your task"),
            (TaskAction::Update, "There was an issue updating your task"),
            (TaskAction::Delete, "There was an issue deleting your task"),
        ];

        for (action, expected) in cases {
            let error = TaskError::Storage {
                action,
                source: TaskStoreError::Storage(sea_orm::DbErr::Custom("disk full".into())),
            };
            let response = error.into_response();

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body_text(response).await, expected);
        }
    }

    #[test]
    fn store_not_found_stays_not_found_for_every_action() {
        let error = TaskError::from_store(TaskAction::Delete)(TaskStoreError::NotFound(3));

        assert!(matches!(error, TaskError::NotFound(3)));
    }

    #[test]
    fn can_require_content_in_form() {
        let form = TaskForm { content: None };

        assert!(matches!(form.into_content(), Err(TaskError::MissingContent)));
    }
}
