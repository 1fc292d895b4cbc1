//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Routes are mounted at the root (`/rounds`, `/totals`, `/round/...`)
//! to match the paths the scoreboard front end calls.

pub mod dto;
pub mod handlers;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::config::LedgerConfig;
use crate::error::LedgerError;

/// OpenAPI document for every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "round-ledger",
        description = "Per-round competition scores with main and Legion leaderboards"
    ),
    paths(
        handlers::rounds::list_rounds,
        handlers::rounds::get_round,
        handlers::rounds::upsert_round,
        handlers::totals::get_totals,
        handlers::system::health_handler,
    ),
    components(schemas(
        crate::domain::RoundRecord,
        crate::domain::RoundNumber,
        crate::domain::ScoreMap,
        crate::domain::Totals,
        crate::domain::LeaderboardEntry,
        crate::error::ErrorResponse,
        dto::UpsertRoundRequest,
        dto::MessageResponse,
        handlers::system::HealthResponse,
    )),
    tags(
        (name = "Rounds", description = "Per-round score storage"),
        (name = "Leaderboards", description = "Aggregated totals"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

/// Builds the API router with all REST endpoints (no middleware).
pub fn build_router() -> Router<AppState> {
    let router = Router::new().merge(handlers::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}

/// Builds the CORS policy: explicit origin allow-list, credentials allowed.
///
/// # Errors
///
/// Returns [`LedgerError::Config`] if an origin is not a valid header value.
pub fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer, LedgerError> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| LedgerError::Config(format!("origin {origin:?}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let headers: [HeaderName; 3] = [header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT];

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(headers)
        .allow_credentials(true))
}

/// Builds the full application: routes, tracing, timeout and CORS layers,
/// bound to `state`.
///
/// # Errors
///
/// Returns [`LedgerError::Config`] if the CORS origins are invalid.
pub fn build_app(state: AppState, config: &LedgerConfig) -> Result<Router, LedgerError> {
    let app = build_router()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(cors_layer(&config.allowed_origins)?)
        .with_state(state);
    Ok(app)
}
