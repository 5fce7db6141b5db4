//! # 3D layout
//!
//! x/y come from a seeded Fruchterman–Reingold spring embedding, z from
//! normalized betweenness centrality. Same graph and seed give the same
//! layout.

use std::ops::AddAssign;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::graph::{GraphSnapshot, NodeId};
use crate::metrics::centrality::betweenness_centrality;

/// Minimum pairwise distance used in force computation
const MIN_DISTANCE: f64 = 0.01;
/// Mean displacement below which the embedding stops early
const CONVERGENCE_THRESHOLD: f64 = 1e-4;

/// Tunables for [`compute_layout`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub seed: u64,
    pub iterations: usize,
    /// Multiplier applied to every coordinate
    pub scale: f64,
    /// Multiplier from betweenness to z before scaling
    pub z_factor: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            iterations: 50,
            scale: 10.0,
            z_factor: 2.0,
        }
    }
}

/// A point in 3D; always finite once produced by [`compute_layout`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position3D {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Replace any non-finite component with 0.0.
    #[must_use]
    pub const fn sanitized(self) -> Self {
        const fn clean(v: f64) -> f64 {
            if v.is_finite() { v } else { 0.0 }
        }
        Self::new(clean(self.x), clean(self.y), clean(self.z))
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Positions of every node, in iteration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub positions: Vec<(NodeId, Position3D)>,
    /// True when the spring embedding failed and random coordinates were used
    pub fallback: bool,
}

/// 2D point used by the spring embedding.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

impl Point {
    const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

/// Lay out every node of the snapshot.
#[must_use]
pub fn compute_layout(snapshot: &GraphSnapshot, config: &LayoutConfig) -> Layout {
    let n = snapshot.node_count();
    if n == 0 {
        return Layout {
            positions: Vec::new(),
            fallback: false,
        };
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let (planar, fallback) = if n == 1 {
        (vec![Point::new(0.0, 0.0)], false)
    } else {
        let spring = spring_layout(snapshot, config.iterations, &mut rng);
        planar_or_fallback(spring, n, &mut rng)
    };

    let betweenness = betweenness_centrality(snapshot);
    let positions = snapshot
        .node_ids()
        .zip(planar)
        .zip(betweenness)
        .map(|((id, point), b)| {
            let z = b * config.z_factor;
            let position = Position3D::new(
                point.x * config.scale,
                point.y * config.scale,
                z * config.scale,
            );
            (id, position.sanitized())
        })
        .collect();

    debug!("Computed layout for {} nodes (fallback: {})", n, fallback);
    Layout {
        positions,
        fallback,
    }
}

/// Keep the spring embedding, or draw random coordinates when it failed.
///
/// The flag is true when the random layout was used.
fn planar_or_fallback(spring: Option<Vec<Point>>, n: usize, rng: &mut StdRng) -> (Vec<Point>, bool) {
    match spring {
        Some(points) => (points, false),
        None => {
            warn!("Spring layout produced non-finite coordinates, using random layout");
            (random_layout(n, rng), true)
        }
    }
}

/// Uniform random coordinates in `[-1, 1]`.
fn random_layout(n: usize, rng: &mut StdRng) -> Vec<Point> {
    (0..n)
        .map(|_| Point::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0)))
        .collect()
}

/// Fruchterman–Reingold embedding rescaled into `[-1, 1]`; `None` if any
/// coordinate became non-finite.
#[allow(clippy::cast_precision_loss)]
fn spring_layout(snapshot: &GraphSnapshot, iterations: usize, rng: &mut StdRng) -> Option<Vec<Point>> {
    let n = snapshot.node_count();
    let k = 1.0 / (n as f64).sqrt();

    let mut pos: Vec<Point> = (0..n)
        .map(|_| Point::new(rng.r#gen::<f64>(), rng.r#gen::<f64>()))
        .collect();

    let mut temperature = 0.1 * spread(&pos);
    let cooling = temperature / (iterations as f64 + 1.0);

    for iteration in 0..iterations {
        let displacement: Vec<Point> = (0..n)
            .map(|i| {
                let mut force = Point::new(0.0, 0.0);
                for j in (0..n).filter(|&j| j != i) {
                    let dx = pos[i].x - pos[j].x;
                    let dy = pos[i].y - pos[j].y;
                    let distance = dx.hypot(dy).max(MIN_DISTANCE);
                    let attraction = if snapshot.has_edge(i, j) {
                        distance / k
                    } else {
                        0.0
                    };
                    let magnitude = k * k / (distance * distance) - attraction;
                    force += Point::new(dx * magnitude, dy * magnitude);
                }
                force
            })
            .collect();

        let mut moved = 0.0;
        for (point, force) in pos.iter_mut().zip(&displacement) {
            let length = force.norm();
            let length = if length < MIN_DISTANCE { 0.1 } else { length };
            let step = Point::new(force.x * temperature / length, force.y * temperature / length);
            moved += step.x * step.x + step.y * step.y;
            *point += step;
        }
        temperature -= cooling;

        if moved.sqrt() / (n as f64) < CONVERGENCE_THRESHOLD {
            debug!("Spring layout converged after {} iterations", iteration + 1);
            break;
        }
    }

    rescale(&mut pos);
    pos.iter().all(|point| point.is_finite()).then_some(pos)
}

/// Largest coordinate range over both axes.
fn spread(points: &[Point]) -> f64 {
    let range = |values: &mut dyn Iterator<Item = f64>| {
        let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        hi - lo
    };
    range(&mut points.iter().map(|p| p.x)).max(range(&mut points.iter().map(|p| p.y)))
}

/// Centre at the origin and scale so the largest absolute coordinate is 1.
#[allow(clippy::cast_precision_loss)]
fn rescale(points: &mut [Point]) {
    if points.is_empty() {
        return;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / n;
    for point in points.iter_mut() {
        point.x -= mean_x;
        point.y -= mean_y;
    }
    let limit = points
        .iter()
        .map(|p| p.x.abs().max(p.y.abs()))
        .fold(0.0, f64::max);
    if limit > 0.0 {
        for point in points.iter_mut() {
            point.x /= limit;
            point.y /= limit;
        }
    }
}
