use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Document management
        .route("/documents", get(handlers::list_documents::<S>))
        .route("/documents", post(handlers::create_document::<S>))
        .route("/documents/:doc_id", get(handlers::get_document::<S>))
        .route("/documents/:doc_id", delete(handlers::delete_document::<S>))
        // Document state and operation log
        .route("/documents/:doc_id/state", get(handlers::get_document_state::<S>))
        .route(
            "/documents/:doc_id/operations",
            get(handlers::list_operations::<S>),
        )
        .route(
            "/documents/:doc_id/actions",
            post(handlers::dispatch_actions::<S>),
        )
        .route(
            "/documents/:doc_id/replay",
            post(handlers::replay_document::<S>),
        )
        // The editor UI runs on its own origin
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
}
