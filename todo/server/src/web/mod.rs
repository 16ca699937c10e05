use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::task::web::{TaskState, create_task_router};

pub mod api;

/// Opens the database named by the configuration and brings its schema up to date.
#[tracing::instrument(skip(config))]
pub async fn connect_database(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.db_url.clone());
    options.sqlx_logging(config.debug);

    let db = Database::connect(options).await?;
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied successfully");
    Ok(db)
}

/// Builds the full application router around an open database connection.
pub fn create_app(db: DatabaseConnection) -> axum::Router {
    let task_state = Arc::new(TaskState { db: Arc::new(db) });

    axum::Router::new()
        .route("/health", axum::routing::get(health_check_handler))
        .merge(create_task_router(task_state.clone()))
        .merge(api::create_api_router(task_state))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let server_address = format!("{}:{}", &config.host, &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    let db = connect_database(&config).await?;
    let app = create_app(db);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn can_report_health_without_touching_the_database() {
        let app = axum::Router::new().route("/health", axum::routing::get(health_check_handler));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"OK");
    }
}
