//! # karate-core
//!
//! In-memory undirected graph store plus the two engines that read it:
//!
//! - [`layout`] places every node in 3D (spring embedding for x/y,
//!   betweenness for z).
//! - [`metrics`] computes the full structural report: degree statistics,
//!   clustering, motifs, cliques, k-cores, centralities, connectivity and
//!   assortativity.
//!
//! Both engines work on an immutable [`GraphSnapshot`] so a report never
//! observes a half-applied mutation.
//!
//! ```
//! use karate_core::{GraphStore, MetricsConfig, metrics};
//!
//! let store = GraphStore::karate_club();
//! let report = metrics::compute_metrics(&store.snapshot(), &MetricsConfig::default());
//! assert_eq!(report.basic.order, 34);
//! assert_eq!(report.basic.size, 78);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod graph;
pub mod layout;
pub mod metrics;
pub mod result;
pub mod statistic;

pub use error::GraphError;
pub use graph::{GraphSnapshot, GraphStore, NodeId};
pub use layout::{Layout, LayoutConfig, Position3D};
pub use metrics::{CentralityMeasure, MetricsConfig, MetricsReport};
pub use result::{Result, ResultExt};
pub use statistic::Statistic;
