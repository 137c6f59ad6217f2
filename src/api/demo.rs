//! Demo endpoints serving fixed in-memory data, handy for frontend wiring

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        common::MessageResponse,
        pagination::{PageParams, PaginatedResponse},
    },
    AppState,
};

use super::{ApiPath, ValidatedQuery};

const DEMO_ITEM_COUNT: i64 = 50;

static DEMO_ITEMS: Lazy<Vec<DemoItem>> = Lazy::new(|| {
    (1..=DEMO_ITEM_COUNT)
        .map(|i| DemoItem {
            id: i,
            name: format!("Demo Item {}", i),
            description: format!("This is test item number {}", i),
            active: true,
        })
        .collect()
});

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DemoItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub active: bool,
}

#[derive(Serialize, ToSchema)]
pub struct DemoItemDetails {
    #[serde(flatten)]
    pub item: DemoItem,
    pub retrieved_at: DateTime<Utc>,
    pub endpoint: String,
}

#[derive(Serialize, ToSchema)]
pub struct EchoResponse {
    pub message: String,
    #[schema(value_type = Object)]
    pub echoed_data: Value,
    pub received_at: DateTime<Utc>,
    /// JSON type of the echoed payload
    pub data_type: String,
}

#[derive(Serialize, ToSchema)]
pub struct DemoEndpoints {
    pub health: String,
    pub demo_items: String,
    pub docs: String,
}

#[derive(Serialize, ToSchema)]
pub struct DemoInfoResponse {
    pub message: String,
    pub version: String,
    pub environment: String,
    pub features: Vec<String>,
    pub endpoints: DemoEndpoints,
    /// Absolute documentation URLs for the configured port
    pub documentation: super::info::DocumentationLinks,
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Demo API information
#[utoipa::path(
    get,
    path = "/demo/info",
    tag = "demo",
    responses(
        (status = 200, description = "Demo API information", body = DemoInfoResponse)
    )
)]
pub async fn demo_info(State(state): State<AppState>) -> Json<DemoInfoResponse> {
    let prefix = &state.config.api.prefix;
    let port = state.config.server.port;
    Json(DemoInfoResponse {
        message: format!("Welcome to {}", state.config.app.name),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.app.environment.clone(),
        features: [
            "Health Monitoring",
            "Database Integration",
            "Soft Delete Support",
            "Pagination",
            "CORS Support",
            "Interactive Documentation",
        ]
        .iter()
        .map(|f| f.to_string())
        .collect(),
        endpoints: DemoEndpoints {
            health: format!("{}/health", prefix),
            demo_items: format!("{}/demo/items", prefix),
            docs: "/docs".to_string(),
        },
        documentation: super::info::DocumentationLinks {
            swagger_ui: format!("http://localhost:{}/docs", port),
            openapi_json: format!("http://localhost:{}/openapi.json", port),
        },
    })
}

/// Paginated demo items
#[utoipa::path(
    get,
    path = "/demo/items",
    tag = "demo",
    params(PageParams),
    responses(
        (status = 200, description = "Page of demo items", body = PaginatedResponse<DemoItem>),
        (status = 422, description = "Invalid pagination parameters", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_demo_items(
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> Json<PaginatedResponse<DemoItem>> {
    let total = DEMO_ITEMS.len() as i64;
    let window = params.window(total);
    let items = DEMO_ITEMS
        .iter()
        .skip(window.skip as usize)
        .take(window.limit as usize)
        .cloned()
        .collect();

    Json(PaginatedResponse::new(items, total, params))
}

/// Single demo item
#[utoipa::path(
    get,
    path = "/demo/items/{id}",
    tag = "demo",
    params(("id" = i64, Path, description = "Demo item ID")),
    responses(
        (status = 200, description = "Demo item", body = DemoItemDetails),
        (status = 404, description = "Demo item not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_demo_item(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<DemoItemDetails>> {
    let item = DEMO_ITEMS
        .iter()
        .find(|item| item.id == id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Demo item with ID {} not found", id)))?;

    Ok(Json(DemoItemDetails {
        item,
        retrieved_at: Utc::now(),
        endpoint: format!("{}/demo/items/{}", state.config.api.prefix, id),
    }))
}

/// Echo back any JSON payload
#[utoipa::path(
    post,
    path = "/demo/echo",
    tag = "demo",
    responses(
        (status = 200, description = "Payload echoed", body = EchoResponse)
    )
)]
pub async fn echo(Json(data): Json<Value>) -> Json<EchoResponse> {
    Json(EchoResponse {
        message: "Data received successfully".to_string(),
        data_type: json_type(&data).to_string(),
        echoed_data: data,
        received_at: Utc::now(),
    })
}

/// Demo status
#[utoipa::path(
    get,
    path = "/demo/status",
    tag = "demo",
    responses(
        (status = 200, description = "Demo endpoints status", body = MessageResponse)
    )
)]
pub async fn demo_status() -> Json<MessageResponse> {
    Json(MessageResponse::ok("Demo endpoints are working correctly!"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn demo_catalog_has_fifty_sequential_items() {
        assert_eq!(DEMO_ITEMS.len(), 50);
        assert_eq!(DEMO_ITEMS[0].name, "Demo Item 1");
        assert_eq!(DEMO_ITEMS[49].id, 50);
    }

    #[test]
    fn reports_json_type_of_payload() {
        assert_eq!(json_type(&json!({ "a": 1 })), "object");
        assert_eq!(json_type(&json!([1, 2])), "array");
        assert_eq!(json_type(&json!("x")), "string");
        assert_eq!(json_type(&json!(null)), "null");
    }
}
