//! Pinch graph construction, layout and curve geometry.
//!
//! [PinchGraphBuilder] turns the parsed blocks of a dump into a
//! [PinchGraph](crate::model::PinchGraph) with adjacencies,
//! [GreedyLayout] assigns coordinates to its block ends and the functions
//! in [curve] derive drawable curves for its adjacencies.

pub mod builder;
pub mod curve;
pub mod layout;

pub use builder::PinchGraphBuilder;
pub use curve::{Curve, adjacency_curve, adjacency_extent, curves};
pub use layout::{GreedyLayout, LayoutConfig, LayoutReport};
