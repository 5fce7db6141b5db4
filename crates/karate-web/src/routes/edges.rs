//! Edge mutation endpoints: POST /api/edge, DELETE /api/edge

use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use karate_core::NodeId;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::nodes::MutationResponse;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// `{source, target}` pair, used both as request body and in graph responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRequest {
    pub source: NodeId,
    pub target: NodeId,
}

fn edge_request(body: std::result::Result<Json<EdgeRequest>, JsonRejection>) -> Result<EdgeRequest> {
    body.map(|Json(edge)| edge)
        .map_err(|e| AppError::BadRequest(format!("Invalid edge body: {}", e.body_text())))
}

/// POST /api/edge
pub async fn add_edge(
    State(state): State<AppState>,
    body: std::result::Result<Json<EdgeRequest>, JsonRejection>,
) -> Result<Json<MutationResponse>> {
    let EdgeRequest { source, target } = edge_request(body)?;
    state.graph.write().await.add_edge(source, target)?;
    info!("Added edge {} -- {}", source, target);
    Ok(Json(MutationResponse::edge(source, target)))
}

/// DELETE /api/edge
pub async fn remove_edge(
    State(state): State<AppState>,
    body: std::result::Result<Json<EdgeRequest>, JsonRejection>,
) -> Result<Json<MutationResponse>> {
    let EdgeRequest { source, target } = edge_request(body)?;
    state.graph.write().await.remove_edge(source, target)?;
    info!("Removed edge {} -- {}", source, target);
    Ok(Json(MutationResponse::edge(source, target)))
}
