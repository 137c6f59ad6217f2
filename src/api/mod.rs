//! API handlers for Reactive Hub REST endpoints

pub mod books;
pub mod demo;
pub mod health;
pub mod info;
pub mod openapi;

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::{request::Parts, HeaderValue},
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};
use validator::Validate;

use crate::{config::CorsConfig, error::AppError, AppState};

/// JSON body extractor that also runs field validation.
///
/// Bodies that parse but carry wrong or missing fields are reported as
/// validation errors; malformed JSON stays a bad request.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::JsonDataError(e) => AppError::Validation(e.body_text()),
                other => AppError::BadRequest(other.body_text()),
            })?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Query string extractor that also runs field validation
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| AppError::Validation(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedQuery(value))
    }
}

/// Path parameter extractor whose rejections render as `ErrorResponse`.
///
/// Segments that do not parse into `T` (`/books/abc`) are validation errors.
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| match rejection {
                PathRejection::FailedToDeserializePathParams(e) => {
                    AppError::Validation(e.body_text())
                }
                other => AppError::BadRequest(other.body_text()),
            })?;
        Ok(ApiPath(value))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    // API v1 routes
    let api_v1 = Router::new()
        .route("/", get(info::api_info))
        // Health check
        .route("/health", get(health::health_check))
        .route("/health/simple", get(health::simple_health_check))
        .route("/health/database", get(health::database_health_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .patch(books::update_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Demo
        .route("/demo/info", get(demo::demo_info))
        .route("/demo/items", get(demo::list_demo_items))
        .route("/demo/items/:id", get(demo::get_demo_item))
        .route("/demo/echo", post(demo::echo))
        .route("/demo/status", get(demo::demo_status))
        .with_state(state.clone());

    // Nesting only serves the bare prefix; answer its trailing-slash form too
    let prefix = state.config.api.prefix.trim_end_matches('/').to_string();

    Router::new()
        .route("/", get(info::root))
        .route("/health", get(info::root_health))
        .route(&format!("{}/", prefix), get(info::api_info))
        .with_state(state.clone())
        .nest(&prefix, api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// CORS for the configured frontend origin, with credentials
fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    match config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            tracing::warn!(
                "Invalid frontend URL {:?}, cross-origin requests disabled",
                config.frontend_url
            );
            cors
        }
    }
}
