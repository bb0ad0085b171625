//! Data model for cactus dumps.
//!
//! # Trees
//! [TreeNode] is the generic labelled tree produced by the
//! [tree notation parser](crate::newick). The
//! [annotator](crate::cactus::CactusTreeAnnotator) turns these into a
//! [Forest], which uses the arena pattern: every NET/CHAIN node lives in one
//! vector and is referenced by [NodeIndex]; BLOCK wrappers become
//! [BlockLink] edges between node indices.
//!
//! # Pinch graph
//! [PinchBlock]s and their [PinchSegment]s come straight from `G` records.
//! The [builder](crate::pinch::PinchGraphBuilder) turns them into a
//! [PinchGraph], again arena based: [BlockIndex], [EndIndex] and
//! [AdjacencyIndex] reference blocks, block ends and adjacencies.

pub mod forest;
pub mod pinch_graph;
pub mod point;
pub mod segment;
pub mod tree_node;

pub use forest::{BlockLink, CactusNode, Forest, NodeIndex, NodeKind};
pub use pinch_graph::{
    Adjacency, AdjacencyIndex, BlockEnd, BlockIndex, EndIndex, EndSide, PinchGraph, SegmentRef,
    Thread,
};
pub use point::Point;
pub use segment::{NIL_MARKER, Orientation, PinchBlock, PinchLink, PinchSegment};
pub use tree_node::TreeNode;
