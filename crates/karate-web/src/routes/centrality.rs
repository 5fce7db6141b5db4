//! Centrality endpoint: GET /api/centrality/{measure}

use axum::{
    extract::{Path, State},
    response::Json,
};
use karate_core::CentralityMeasure;
use karate_core::metrics::RankedNode;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct CentralityResponse {
    pub measure: CentralityMeasure,
    pub top_nodes: Vec<RankedNode>,
}

/// GET /api/centrality/{measure}
///
/// Unknown measures are rejected before any computation runs.
pub async fn get_centrality(
    State(state): State<AppState>,
    Path(measure): Path<String>,
) -> Result<Json<CentralityResponse>> {
    let measure: CentralityMeasure = measure.parse()?;
    let top_nodes = state
        .compute(move |snapshot, _, config| measure.top_nodes(snapshot, config))
        .await??;
    Ok(Json(CentralityResponse { measure, top_nodes }))
}
