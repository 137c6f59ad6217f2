//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, demo, health, info};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reactive Hub API",
        version = "1.0.0",
        description = "Book curation backend built with axum, sqlx and PostgreSQL",
        license(name = "MIT")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Info
        info::api_info,
        // Health
        health::health_check,
        health::simple_health_check,
        health::database_health_check,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Demo
        demo::demo_info,
        demo::list_demo_items,
        demo::get_demo_item,
        demo::echo,
        demo::demo_status,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::record::Record,
            crate::models::common::MessageResponse,
            // Info
            info::ApiInfoResponse,
            info::DocumentationLinks,
            info::AvailableEndpoints,
            // Health
            health::HealthResponse,
            health::SimpleHealthResponse,
            health::DatabaseHealthResponse,
            health::DatabaseHealthFailure,
            // Demo
            demo::DemoItem,
            demo::DemoItemDetails,
            demo::EchoResponse,
            demo::DemoEndpoints,
            demo::DemoInfoResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "info", description = "API description"),
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog management"),
        (name = "demo", description = "Demo endpoints with in-memory data")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}
