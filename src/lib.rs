use axum::{Router, extract::FromRef, http::HeaderName};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Catalog core: filter, pagination, read operations and the role gate in front of them.
pub mod catalog;
pub mod filter;
pub mod gate;
pub mod pagination;

// Supporting components.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;

pub mod routes;
use routes::{catalog as catalog_router, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::CatalogError;
pub use repository::{InMemoryRepository, PostgresRepository, RepositoryState};

/// ApiDoc
///
/// Aggregates the `#[utoipa::path]` handlers and `ToSchema` models into the OpenAPI
/// document served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::find_movies, handlers::find_movie, handlers::find_genres),
    components(
        schemas(
            models::MovieSummary, models::MovieDetail, models::GenreDto, error::ErrorBody,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "movieflix", description = "Movie catalog API")
    )
)]
struct ApiDoc;

/// Registers the `bearer` security scheme referenced by the catalog paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// AppState
///
/// The single, immutable container shared by every request: the repository and the
/// loaded configuration.
#[derive(Clone)]
pub struct AppState {
    /// Repository Layer: read access to movies, genres and user accounts.
    pub repo: RepositoryState,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// Let extractors (notably `Principal`) pull only the components they need.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the routing structure, applies the observability and CORS layers, and
/// registers the application state.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS: the catalog is read by browser clients on other origins.
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Correlation header shared by the request-id layers and the span builder.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Routes
    let base_router = Router::new()
        // Documentation: Swagger UI plus the raw OpenAPI document.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public: /health only.
        .merge(public::public_routes())
        // Catalog: anonymous requests get through here and are stopped by the handler gate.
        .merge(catalog_router::catalog_routes())
        .with_state(state);

    // 3. Observability. ServiceBuilder runs these top to bottom on the way in.
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Tag the request with a fresh UUID unless the client sent one.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. One span per request; the response is logged at INFO with latency.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Echo x-request-id back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS goes outermost so preflight requests never reach the tracing stack.
        .layer(cors)
}

/// trace_span_logger
///
/// Builds the per-request span with method, URI and the `x-request-id` header, so every
/// log line of one request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    // Field names match what the JSON log pipeline indexes on.
    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
