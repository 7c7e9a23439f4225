pub mod api;
pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export the mutation core
pub use error::{EntityKind, ReducerError, ReducerResult};
pub use logic::{
    ensure_integrity, integrity_violations, reduce, IntegrityError,
    IntegrityViolation, ReplayError,
};

// Export all model types
pub use model::*;

// Export store types
pub use store::{DocumentStore, FileStore, MemoryStore, Store};

/// Serve the HTTP API for the given store until the listener fails
pub async fn serve<S: Store + 'static>(
    store: std::sync::Arc<S>,
    config: &config::AppConfig,
) -> anyhow::Result<()> {
    use tokio::net::TcpListener;

    let app = crate::api::routes::create_router().with_state(store);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("page data architecture server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
