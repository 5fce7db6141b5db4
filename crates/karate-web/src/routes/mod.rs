//! REST API routes
//!
//! ## Route Structure
//!
//! - `GET /health` - Health check
//! - `GET /api/graph` - Nodes with 3D positions and per-node metrics, edges, full report
//! - `GET /api/metrics` - Full metrics report
//! - `GET /api/centrality/{measure}` - Top nodes for one measure
//! - `POST|DELETE /api/node/{id}` - Add or remove a node
//! - `POST|DELETE /api/edge` - Add or remove an edge (`{source, target}` body)
//! - `POST /api/reset` - Restore the canonical graph
//! - `GET /api/adjacency-matrix` - Dense adjacency matrix

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod centrality;
pub mod edges;
pub mod graph;
pub mod health;
pub mod metrics;
pub mod nodes;

/// Create the API router; state is supplied by the caller.
pub fn api_router() -> Router<AppState> {
    let api_routes = Router::new()
        .route("/graph", get(graph::get_graph))
        .route("/metrics", get(metrics::get_metrics))
        .route("/centrality/{measure}", get(centrality::get_centrality))
        .route("/node/{id}", post(nodes::add_node).delete(nodes::remove_node))
        .route("/edge", post(edges::add_edge).delete(edges::remove_edge))
        .route("/reset", post(graph::reset_graph))
        .route("/adjacency-matrix", get(graph::adjacency_matrix));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes)
}
