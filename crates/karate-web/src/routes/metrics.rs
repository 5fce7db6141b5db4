//! Metrics report endpoint: GET /api/metrics

use axum::{extract::State, response::Json};
use karate_core::MetricsReport;
use karate_core::metrics::compute_metrics;
use tracing::debug;

use crate::error::Result;
use crate::state::AppState;

/// GET /api/metrics
pub async fn get_metrics(State(state): State<AppState>) -> Result<Json<MetricsReport>> {
    let report = state
        .compute(|snapshot, _, config| compute_metrics(snapshot, config))
        .await?;
    debug!("Served metrics for {} nodes", report.basic.order);
    Ok(Json(report))
}
