//! Bezier geometry of adjacency curves between positioned block ends.

use crate::error::CactusError;
use crate::model::{Adjacency, PinchGraph, Point};
use crate::pinch::layout::LayoutConfig;

/// Cubic Bezier curve from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Curve {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

impl Curve {
    /// Evaluates the curve at `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        Point::new(
            a * self.start.x + b * self.control1.x + c * self.control2.x + d * self.end.x,
            a * self.start.y + b * self.control1.y + c * self.control2.y + d * self.end.y,
        )
    }
}

fn end_points(graph: &PinchGraph, adjacency: &Adjacency) -> Result<(Point, Point), CactusError> {
    let source = graph.end(adjacency.source()).position();
    let target = graph.end(adjacency.target()).position();
    if source.is_positioned() && target.is_positioned() {
        Ok((source, target))
    } else {
        Err(CactusError::unpositioned_adjacency(format!(
            "adjacency on thread '{}' between ends {} and {}",
            adjacency.thread_id(),
            adjacency.source(),
            adjacency.target()
        )))
    }
}

/// Euclidean distance between the two ends of `adjacency`.
///
/// # Errors
/// [UnpositionedAdjacency](crate::error::CactusErrorType::UnpositionedAdjacency)
/// if either end has not been laid out yet.
pub fn adjacency_extent(graph: &PinchGraph, adjacency: &Adjacency) -> Result<f64, CactusError> {
    let (source, target) = end_points(graph, adjacency)?;
    Ok(source.distance(&target))
}

/// Vertical offset (in units of curve spacing) of the `adj_number`-th of
/// `multiplicity` parallel curves. Odd counts are centred on zero
/// (0, -1, +1, -2, ...), even counts straddle it (-0.5, +0.5, -1.5, ...).
fn apex_offset(multiplicity: usize, adj_number: usize) -> f64 {
    if multiplicity % 2 == 1 {
        // 0 -> 0, 1 -> -1, 2 -> +1, 3 -> -2, 4 -> +2
        let rank = adj_number.div_ceil(2) as f64;
        if adj_number % 2 == 1 { -rank } else { rank }
    } else {
        // 0 -> -0.5, 1 -> +0.5, 2 -> -1.5, 3 -> +1.5
        let rank = (adj_number / 2) as f64 + 0.5;
        if adj_number % 2 == 0 { -rank } else { rank }
    }
}

/// Curve drawn for `adjacency`.
///
/// Both ends at the same point give a self-loop whose size grows with the
/// adjacency number. Otherwise the curve rises to an apex above the
/// midpoint, fanned out by adjacency number among parallel adjacencies and
/// lifted further for wide horizontal spans.
///
/// # Errors
/// [UnpositionedAdjacency](crate::error::CactusErrorType::UnpositionedAdjacency)
/// if either end has not been laid out yet.
pub fn adjacency_curve(
    graph: &PinchGraph,
    adjacency: &Adjacency,
    config: &LayoutConfig,
) -> Result<Curve, CactusError> {
    let (start, end) = end_points(graph, adjacency)?;

    if start == end {
        let radius = config.self_loop_radius * (adjacency.adj_number() + 1) as f64;
        return Ok(Curve {
            start,
            control1: Point::new(start.x - radius, start.y - radius),
            control2: Point::new(start.x + radius, start.y - radius),
            end,
        });
    }

    let dx = end.x - start.x;
    let mut apex_y = (start.y + end.y) / 2.0
        + apex_offset(adjacency.multiplicity(), adjacency.adj_number()) * config.curve_spacing;
    if dx.abs() > config.far_span {
        apex_y -= config.far_span_factor * dx.abs();
    }

    Ok(Curve {
        start,
        control1: Point::new(start.x + dx / 3.0, apex_y),
        control2: Point::new(start.x + 2.0 * dx / 3.0, apex_y),
        end,
    })
}

/// Curves of all adjacencies of `graph`, in adjacency order.
pub fn curves(graph: &PinchGraph, config: &LayoutConfig) -> Result<Vec<Curve>, CactusError> {
    graph
        .adjacencies()
        .iter()
        .map(|adjacency| adjacency_curve(graph, adjacency, config))
        .collect()
}
