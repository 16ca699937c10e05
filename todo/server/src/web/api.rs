use std::sync::Arc;

use crate::task::web::TaskState;

use axum::Router;

pub mod v1 {
    use serde::{Deserialize, Serialize};

    /// Error body returned by every JSON endpoint.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ServerErrorResponse {
        error: String,
    }

    impl ServerErrorResponse {
        pub fn new(error: String) -> Self {
            Self { error }
        }
    }
}

/// Creates the API routes for JSON API endpoints.
pub fn create_api_router(task_state: Arc<TaskState>) -> Router {
    let tasks_router = crate::task::api::v1::create_api_router(task_state);
    Router::new().nest("/api/v1", tasks_router)
}
