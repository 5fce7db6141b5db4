//! Whole-graph endpoints: GET /api/graph, POST /api/reset, GET /api/adjacency-matrix

use axum::{extract::State, response::Json};
use karate_core::graph::AdjacencyMatrix;
use karate_core::layout::compute_layout;
use karate_core::metrics::{NodeCentrality, compute_metrics, node_profiles};
use karate_core::{MetricsReport, NodeId, Position3D};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::edges::EdgeRequest;
use super::nodes::MutationResponse;
use crate::error::Result;
use crate::state::AppState;

/// A node as drawn by the frontend.
#[derive(Debug, Serialize, Deserialize)]
pub struct NodeView {
    pub id: NodeId,
    pub position: Position3D,
    pub degree: usize,
    pub clustering: f64,
    pub triangles: usize,
    pub k_core: usize,
    pub centrality: NodeCentrality,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GraphResponse {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeRequest>,
    pub layout_fallback: bool,
    pub metrics: MetricsReport,
}

/// GET /api/graph
pub async fn get_graph(State(state): State<AppState>) -> Result<Json<GraphResponse>> {
    let response = state
        .compute(|snapshot, layout_config, metrics_config| {
            let layout = compute_layout(snapshot, layout_config);
            let nodes = node_profiles(snapshot, metrics_config)
                .into_iter()
                // both follow snapshot iteration order
                .zip(&layout.positions)
                .map(|(profile, &(_, position))| NodeView {
                    id: profile.id,
                    position,
                    degree: profile.degree,
                    clustering: profile.clustering,
                    triangles: profile.triangles,
                    k_core: profile.k_core,
                    centrality: profile.centrality,
                })
                .collect();
            let edges = snapshot
                .edge_ids()
                .into_iter()
                .map(|(source, target)| EdgeRequest { source, target })
                .collect();

            GraphResponse {
                nodes,
                edges,
                layout_fallback: layout.fallback,
                metrics: compute_metrics(snapshot, metrics_config),
            }
        })
        .await?;
    Ok(Json(response))
}

/// POST /api/reset
pub async fn reset_graph(State(state): State<AppState>) -> Json<MutationResponse> {
    state.graph.write().await.reset();
    info!("Graph reset to the Karate Club topology");
    Json(MutationResponse::done())
}

/// GET /api/adjacency-matrix
pub async fn adjacency_matrix(State(state): State<AppState>) -> Json<AdjacencyMatrix> {
    Json(state.snapshot().await.adjacency_matrix())
}
