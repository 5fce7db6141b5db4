//! Result alias and combinators for turning failures into report fields.

use crate::error::GraphError;
use crate::statistic::Statistic;

/// Result type for every fallible graph operation.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Extension trait bridging [`Result`] and [`Statistic`].
///
/// The metrics engine isolates every sub-computation: a failure is logged
/// and recorded as `Unavailable` instead of aborting the whole report.
pub trait ResultExt<T> {
    /// Convert into a statistic, logging the error if present.
    fn into_statistic(self) -> Statistic<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn into_statistic(self) -> Statistic<T> {
        match self {
            Ok(value) => Statistic::Available(value),
            Err(e) => {
                tracing::warn!("Statistic unavailable: {}", e);
                Statistic::Unavailable(e.to_string())
            }
        }
    }
}
