pub mod rag_routes;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use faq_widget_core::wire::{COMPLETE_PATH, RETRIEVE_PATH};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::service::answer_service::AnswerBackend;
use rag_routes::{complete_handler, health_handler, retrieve_handler};

pub fn router(backend: AnswerBackend, site_base_url: Option<&str>) -> Router {
    Router::new()
        .route(RETRIEVE_PATH, get(retrieve_handler))
        .route(COMPLETE_PATH, post(complete_handler))
        .route("/health", get(health_handler))
        .layer(cors_layer(site_base_url))
        .layer(TraceLayer::new_for_http())
        .with_state(backend)
}

/// Only the widget's site may call the API when its URL is known.
fn cors_layer(site_base_url: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    match site_base_url.map(|url| url.trim_end_matches('/').parse::<HeaderValue>()) {
        Some(Ok(origin)) => layer.allow_origin(origin),
        Some(Err(e)) => {
            warn!("Ignoring unusable site base URL for CORS: {e}");
            layer.allow_origin(Any)
        }
        None => layer.allow_origin(Any),
    }
}
