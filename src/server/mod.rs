// ============================================================
// Layer 7 — HTTP Service
// ============================================================
// Exposes a CropRecommender over HTTP/JSON using warp.
//
//   routes.rs — the route tree, handlers, and the single place
//               where rejections and prediction failures become
//               JSON error bodies
//   openapi.rs — static OpenAPI 3 document for GET /openapi.json
//
// The recommender is loaded once before the server starts and
// shared read-only (Arc) with every request; no locks are taken.

/// Route tree and handlers
pub mod routes;

/// Machine-readable API description
pub mod openapi;

use anyhow::Result;
use std::net::SocketAddr;
use warp::Filter;

use routes::{api_routes, SharedRecommender};

/// Bind `addr` and serve until Ctrl-C.
///
/// Fails immediately if the address cannot be bound.
pub async fn serve(recommender: SharedRecommender, addr: SocketAddr) -> Result<()> {
    let routes = api_routes(recommender).with(warp::trace::request());

    let (bound, server) =
        warp::serve(routes).try_bind_with_graceful_shutdown(addr, shutdown_signal())?;

    tracing::info!("Crop recommendation service listening on http://{}", bound);
    server.await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        // Without a signal handler, keep serving until the process is killed
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
