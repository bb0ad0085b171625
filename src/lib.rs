//! Cactusgraph is a library to read cactus graph dumps and lay out the
//! graphs they describe.
//!
//! A dump describes a cactus graph twice: as nested net/chain trees (the
//! hierarchical decomposition) and as a pinch graph of aligned blocks whose
//! segments are threaded together by sequences. This crate turns the dump
//! text into in-memory structures with 2-D coordinates, ready to be handed
//! to a renderer.
//! Core functionality provided:
//! - Tree notation: Parse (and write) the arbitrary-degree tree strings of
//!   `C` records, including single-quoted labels.
//! - Dump records: Parse `C`, `G`, `M` and legacy `P` records, eagerly or
//!   one `STEP`-separated segment at a time.
//! - Cactus trees: Reinterpret generic trees as typed NET/CHAIN nodes
//!   connected by BLOCK links.
//! - Pinch graph: Resolve right-adjacencies between block ends, group them
//!   into threads and number parallel adjacencies.
//! - Layout: Greedy per-thread layout of the pinch graph, plus Bezier
//!   geometry for the adjacency curves.
//! - Models use the arena pattern, so structures hold indices rather than
//!   references. See [crate::model] for more details.
//!
//! Laying out the net/chain trees themselves is left to the caller; see
//! [TreeLayout](crate::cactus::TreeLayout).
//!
//! # Usage patterns
//! 1. [parse_dump_str] (or parsing into [CactusDump]) runs every stage with
//!    default settings.
//! 2. Run the stages yourself with [DumpParser](crate::dump::DumpParser),
//!    [CactusTreeAnnotator](crate::cactus::CactusTreeAnnotator),
//!    [PinchGraphBuilder](crate::pinch::PinchGraphBuilder) and
//!    [GreedyLayout](crate::pinch::GreedyLayout) for full control.
//!
//! ## Example Default Configuration
//! ```
//! use cactusgraph::parse_dump_str;
//!
//! let dump = "C\t((CHAIN1)BLOCK7_120)NET0;\n\
//!             G\tb1\tt1\t0\t10\tb2\t(nil)\t+\n\
//!             G\tb2\tt1\t15\t30\t(nil)\tb1\t+\n\
//!             M\tNET0\tb1\tb2\n";
//! let dump = parse_dump_str(dump)?;
//!
//! assert_eq!(dump.forest.num_nodes(), 2);
//! assert_eq!(dump.pinch_graph.adjacencies().len(), 1);
//! assert!(dump.pinch_graph.is_positioned());
//! assert_eq!(dump.corresponding_names("b1"), vec!["b1", "NET0"]);
//! # Ok::<(), cactusgraph::error::CactusError>(())
//! ```
//!
//! ## Example Stage Configuration
//! ```
//! use cactusgraph::dump::{CactusDump, DumpParser, SegmentFormat};
//! use cactusgraph::pinch::{GreedyLayout, LayoutConfig};
//!
//! let records = DumpParser::new()
//!     .with_segment_format(SegmentFormat::Basic) // 6-field segments only
//!     .with_stop_at_step(false)                  // read past STEP lines
//!     .parse_str("G\tb1\tt1\t0\t10\t(nil)\t(nil)\t+\nSTEP\nG\tb2\tt2\t0\t4\t(nil)\t(nil)\t-\n")?;
//!
//! let layout = GreedyLayout::new().with_config(LayoutConfig {
//!     separation: 40.0,
//!     ..LayoutConfig::default()
//! });
//! let dump = CactusDump::from_records(records, &layout)?;
//! assert_eq!(dump.layout.drawn.len(), 2);
//! # Ok::<(), cactusgraph::error::CactusError>(())
//! ```

pub mod cactus;
pub mod dump;
pub mod error;
pub mod model;
pub mod newick;
pub mod parser;
pub mod pinch;

pub use crate::dump::CactusDump;
use crate::error::CactusError;
use crate::model::TreeNode;

// ============================================================================
// Quick Dump API
// ============================================================================
/// Parses dump text (up to the first `STEP`) and runs annotation, pinch
/// graph building and layout with default settings.
///
/// # Errors
/// The first [CactusError] of any stage; dump-line errors carry the line
/// number.
pub fn parse_dump_str<S: AsRef<str>>(dump: S) -> Result<CactusDump, CactusError> {
    CactusDump::from_lines(dump.as_ref().lines())
}

// ============================================================================
// Quick Tree API
// ============================================================================
/// Parse a tree notation string into a generic [TreeNode].
///
/// See [`newick::parse_str`] for full documentation of this convenience function.
pub fn parse_tree_str<S: AsRef<str>>(tree: S) -> Result<TreeNode, CactusError> {
    newick::parse_str(tree)
}
