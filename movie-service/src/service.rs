use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{Method, StatusCode, header},
    middleware::from_fn,
    response::Json,
    routing::get,
};
use movie_aggregator::{AggregatorError, Config, MovieAggregator, MovieRecord};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use crate::{
    models::{ErrorResponse, MovieQuery},
    telemetry::correlation_id_middleware,
};

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn bad_request_error(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn internal_error(message: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

#[derive(Clone)]
pub struct AppState {
    pub aggregator: MovieAggregator,
}

pub fn create_app(config: &Config) -> Result<Router, AggregatorError> {
    let aggregator = MovieAggregator::from_config(config)?;

    if aggregator.policy().is_default() {
        warn!(
            "Candidate selection prefers releases from {}; this looks like a placeholder, set RELEASE_YEAR_PREFIX to override",
            aggregator.policy().release_year_prefix()
        );
    }

    Ok(build_router(AppState { aggregator }))
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/movie", get(get_movie))
        .layer(
            ServiceBuilder::new()
                .layer(from_fn(correlation_id_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
        .with_state(app_state)
}

/// Browser clients from any origin may call the API.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_LENGTH])
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Movie Aggregator Service",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Movie metadata merged with a short excerpt of reviews",
        "endpoints": {
            "GET /movie?title=<title>": "Fetch merged movie metadata and up to 3 reviews",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn get_movie(
    State(state): State<AppState>,
    query: Result<Query<MovieQuery>, QueryRejection>,
) -> ApiResult<MovieRecord> {
    let Query(query) = query.map_err(|rejection| {
        warn!("Rejected movie query: {}", rejection.body_text());
        bad_request_error(&rejection.body_text())
    })?;
    let title = validate_title(query.title.as_deref())?;
    info!("Movie lookup requested for: {}", title);

    state.aggregator.fetch(title).await.map(Json).map_err(|e| {
        if e.is_client_error() {
            return bad_request_error(&e.to_string());
        }
        error!("Movie lookup for '{}' failed: {}", title, e);
        internal_error("Failed to fetch movie data")
    })
}

fn validate_title(title: Option<&str>) -> Result<&str, ApiError> {
    match title.map(str::trim) {
        Some(title) if !title.is_empty() => Ok(title),
        _ => Err(bad_request_error("The 'title' query parameter is required")),
    }
}
