//! Health check endpoints

use axum::{extract::State, http::StatusCode, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy` when the database answers, `unhealthy` otherwise
    pub status: String,
    pub service: String,
    pub environment: String,
    /// `connected` or `disconnected: <reason>`
    pub database: String,
    pub timestamp: String,
    /// Version of the service
    pub version: String,
    pub api_docs: String,
}

#[derive(Serialize, ToSchema)]
pub struct SimpleHealthResponse {
    pub message: String,
    pub status: String,
    pub timestamp: String,
}

#[derive(Serialize, ToSchema)]
pub struct DatabaseHealthResponse {
    pub database: String,
    pub status: String,
    /// PostgreSQL server version
    pub version: String,
    pub table_count: i64,
    pub connection_pool: String,
    pub timestamp: String,
}

#[derive(Serialize, ToSchema)]
pub struct DatabaseHealthFailure {
    pub database: String,
    pub status: String,
    pub error: String,
    pub timestamp: String,
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Health check endpoint (includes a database round trip)
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health report", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.services.health.check_database().await {
        Ok(()) => "connected".to_string(),
        Err(e) => {
            tracing::warn!("Health check database probe failed: {}", e);
            format!("disconnected: {}", e)
        }
    };
    let status = if database == "connected" {
        "healthy"
    } else {
        "unhealthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        service: state.config.app.name.clone(),
        environment: state.config.app.environment.clone(),
        database,
        timestamp: timestamp(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        api_docs: "/docs".to_string(),
    })
}

/// Liveness endpoint, never touches the database
#[utoipa::path(
    get,
    path = "/health/simple",
    tag = "health",
    responses(
        (status = 200, description = "Service is running", body = SimpleHealthResponse)
    )
)]
pub async fn simple_health_check(State(state): State<AppState>) -> Json<SimpleHealthResponse> {
    Json(SimpleHealthResponse {
        message: format!("{} is running", state.config.app.name),
        status: "healthy".to_string(),
        timestamp: timestamp(),
    })
}

/// Database health endpoint
#[utoipa::path(
    get,
    path = "/health/database",
    tag = "health",
    responses(
        (status = 200, description = "Database is reachable", body = DatabaseHealthResponse),
        (status = 503, description = "Database is unreachable", body = DatabaseHealthFailure)
    )
)]
pub async fn database_health_check(
    State(state): State<AppState>,
) -> Result<Json<DatabaseHealthResponse>, (StatusCode, Json<DatabaseHealthFailure>)> {
    match state.services.health.database_info().await {
        Ok(info) => Ok(Json(DatabaseHealthResponse {
            database: "connected".to_string(),
            status: "healthy".to_string(),
            version: info.version,
            table_count: info.table_count,
            connection_pool: "active".to_string(),
            timestamp: timestamp(),
        })),
        Err(e) => {
            tracing::error!("Database health check failed: {}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(DatabaseHealthFailure {
                    database: "disconnected".to_string(),
                    status: "unhealthy".to_string(),
                    error: e.to_string(),
                    timestamp: timestamp(),
                }),
            ))
        }
    }
}
