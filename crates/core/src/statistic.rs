//! Per-field outcome of a metric computation.
//!
//! A report never carries NaN, infinities or silently substituted values:
//! each statistic that can be undefined or can fail is wrapped in
//! [`Statistic`], so consumers see why a value is missing.

use serde::{Deserialize, Serialize};

/// Outcome of a single statistic.
///
/// Serializes adjacently tagged:
///
/// ```json
/// {"status": "available", "value": 5}
/// {"status": "not_applicable"}
/// {"status": "unavailable", "value": "eigenvector did not converge"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Statistic<T> {
    /// The statistic was computed.
    Available(T),
    /// The statistic is undefined for this graph (disconnected, empty, zero variance).
    NotApplicable,
    /// The computation failed; the string says why.
    Unavailable(String),
}

impl<T> Statistic<T> {
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    #[must_use]
    pub const fn as_option(&self) -> Option<&T> {
        match self {
            Self::Available(value) => Some(value),
            Self::NotApplicable | Self::Unavailable(_) => None,
        }
    }

    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Available(value) => Some(value),
            Self::NotApplicable | Self::Unavailable(_) => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Statistic<U> {
        match self {
            Self::Available(value) => Statistic::Available(f(value)),
            Self::NotApplicable => Statistic::NotApplicable,
            Self::Unavailable(reason) => Statistic::Unavailable(reason),
        }
    }
}

impl Statistic<f64> {
    /// Wrap a float, turning NaN and infinities into `NotApplicable`.
    #[must_use]
    pub fn finite(value: f64) -> Self {
        if value.is_finite() {
            Self::Available(value)
        } else {
            Self::NotApplicable
        }
    }
}

impl<T> From<Option<T>> for Statistic<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NotApplicable, Self::Available)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_finite_rejects_nan_and_infinity() {
        assert_eq!(Statistic::finite(f64::NAN), Statistic::NotApplicable);
        assert_eq!(Statistic::finite(f64::INFINITY), Statistic::NotApplicable);
        assert_eq!(Statistic::finite(0.5), Statistic::Available(0.5));
    }

    #[test]
    fn test_serializes_adjacently_tagged() {
        let available = serde_json::to_value(Statistic::Available(5_u32)).unwrap();
        assert_eq!(available, serde_json::json!({"status": "available", "value": 5}));

        let missing = serde_json::to_value(Statistic::<u32>::NotApplicable).unwrap();
        assert_eq!(missing, serde_json::json!({"status": "not_applicable"}));

        let failed = serde_json::to_value(Statistic::<u32>::Unavailable("boom".into())).unwrap();
        assert_eq!(
            failed,
            serde_json::json!({"status": "unavailable", "value": "boom"})
        );
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Statistic::from(Some(3)), Statistic::Available(3));
        assert_eq!(Statistic::<i32>::from(None), Statistic::NotApplicable);
        assert_eq!(Statistic::Available(2).map(|v| v * 2).into_option(), Some(4));
    }
}
