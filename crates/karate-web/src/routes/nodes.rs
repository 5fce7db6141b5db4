//! Node mutation endpoints: POST /api/node/{id}, DELETE /api/node/{id}

use axum::{
    extract::{Path, State, rejection::PathRejection},
    response::Json,
};
use karate_core::NodeId;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Body returned by every successful mutation.
#[derive(Debug, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub node_id: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub edge: Option<[NodeId; 2]>,
}

impl MutationResponse {
    pub const fn done() -> Self {
        Self {
            success: true,
            node_id: None,
            edge: None,
        }
    }

    pub const fn node(id: NodeId) -> Self {
        Self {
            node_id: Some(id),
            ..Self::done()
        }
    }

    pub const fn edge(source: NodeId, target: NodeId) -> Self {
        Self {
            edge: Some([source, target]),
            ..Self::done()
        }
    }
}

fn node_id(path: std::result::Result<Path<NodeId>, PathRejection>) -> Result<NodeId> {
    path.map(|Path(id)| id)
        .map_err(|e| AppError::BadRequest(format!("Invalid node id: {e}")))
}

/// POST /api/node/{id}
pub async fn add_node(
    State(state): State<AppState>,
    path: std::result::Result<Path<NodeId>, PathRejection>,
) -> Result<Json<MutationResponse>> {
    let id = node_id(path)?;
    state.graph.write().await.add_node(id)?;
    info!("Added node {}", id);
    Ok(Json(MutationResponse::node(id)))
}

/// DELETE /api/node/{id}
pub async fn remove_node(
    State(state): State<AppState>,
    path: std::result::Result<Path<NodeId>, PathRejection>,
) -> Result<Json<MutationResponse>> {
    let id = node_id(path)?;
    state.graph.write().await.remove_node(id)?;
    info!("Removed node {}", id);
    Ok(Json(MutationResponse::node(id)))
}
