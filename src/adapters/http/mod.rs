//! HTTP adapters - REST API implementations.
//!
//! Each application area has its own adapter; `api_router` nests them all
//! under `/api` and adds the cross-cutting layers.

pub mod ballot;
pub mod charter;
pub mod document;
pub mod error;
pub mod middleware;

use std::time::Duration;

use axum::{http::HeaderValue, routing::get, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use ballot::{ballot_routes, BallotHandlers};
pub use charter::{charter_routes, CharterHandlers};
pub use document::{document_routes, DocumentHandlers};
pub use error::{handle_document_error, ErrorResponse};
pub use middleware::Actor;

/// Handler state for every API area.
#[derive(Clone)]
pub struct ApiHandlers {
    pub documents: DocumentHandlers,
    pub ballots: BallotHandlers,
    pub charters: CharterHandlers,
}

/// Layer settings for [`api_router`].
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub request_timeout: Duration,
    /// Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

/// Builds the complete router.
pub fn api_router(handlers: ApiHandlers, settings: &HttpSettings) -> Router {
    let api = Router::new()
        .merge(document_routes(handlers.documents))
        .merge(ballot_routes(handlers.ballots))
        .merge(charter_routes(handlers.charters));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(cors_layer(&settings.cors_origins))
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
