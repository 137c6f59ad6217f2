//! Welcome and API description endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
    pub environment: String,
    pub api_docs: String,
    pub api_version: String,
}

#[derive(Serialize, ToSchema)]
pub struct RootHealthResponse {
    pub status: String,
    pub service: String,
    pub environment: String,
}

#[derive(Serialize, ToSchema)]
pub struct DocumentationLinks {
    pub swagger_ui: String,
    pub openapi_json: String,
}

#[derive(Serialize, ToSchema)]
pub struct AvailableEndpoints {
    pub health_check: String,
    pub simple_health: String,
    pub database_health: String,
    pub books: String,
    pub demo: String,
}

#[derive(Serialize, ToSchema)]
pub struct ApiInfoResponse {
    pub message: String,
    pub version: String,
    pub environment: String,
    pub documentation: DocumentationLinks,
    pub available_endpoints: AvailableEndpoints,
    pub features: Vec<String>,
}

/// Service welcome message, served outside the versioned API
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("Welcome to {}!", state.config.app.name),
        status: "running".to_string(),
        environment: state.config.app.environment.clone(),
        api_docs: "/docs".to_string(),
        api_version: state.config.api.prefix.clone(),
    })
}

/// Minimal health check, served outside the versioned API
pub async fn root_health(State(state): State<AppState>) -> Json<RootHealthResponse> {
    Json(RootHealthResponse {
        status: "healthy".to_string(),
        service: state.config.app.name.clone(),
        environment: state.config.app.environment.clone(),
    })
}

/// API v1 description
#[utoipa::path(
    get,
    path = "/",
    tag = "info",
    responses(
        (status = 200, description = "API description", body = ApiInfoResponse)
    )
)]
pub async fn api_info(State(state): State<AppState>) -> Json<ApiInfoResponse> {
    let prefix = &state.config.api.prefix;
    Json(ApiInfoResponse {
        message: format!("Welcome to {} API v1", state.config.app.name),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.app.environment.clone(),
        documentation: DocumentationLinks {
            swagger_ui: "/docs".to_string(),
            openapi_json: "/openapi.json".to_string(),
        },
        available_endpoints: AvailableEndpoints {
            health_check: format!("{}/health", prefix),
            simple_health: format!("{}/health/simple", prefix),
            database_health: format!("{}/health/database", prefix),
            books: format!("{}/books", prefix),
            demo: format!("{}/demo/info", prefix),
        },
        features: vec![
            "Comprehensive Health Monitoring".to_string(),
            "Database Connectivity Checks".to_string(),
            "Book Catalog with Soft Delete".to_string(),
            "Interactive API Documentation".to_string(),
            "CORS Support for Frontend Integration".to_string(),
        ],
    })
}
