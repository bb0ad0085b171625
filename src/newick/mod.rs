//! Tree notation reader and writer.
//!
//! Cactus dumps carry each net/chain hierarchy as one tree string of
//! arbitrary degree, e.g. `((CHAIN1)BLOCK7_120,(NET2)BLOCK9)NET0;`.
//!
//! # Quick API
//! * [`parse_str`] - parses a single string into a [TreeNode]
//!
//! # Full API
//! * [TreeNotationParser] - reusable parser over a [ByteParser]
//! * [to_newick] - writes a [TreeNode] back to tree notation
//!
//! # Format
//! * `(` opens a child list, `,` separates siblings, `)` closes a child
//!   list, `;` ends the tree
//! * A name follows its child list: `(a,b)parent;`
//! * Names may be empty, and may be single-quoted to hold any of the
//!   structural characters or whitespace; `''` inside quotes is a quote
//! * Unquoted space and newline are ignored

pub mod parser;
pub mod writer;

pub use parser::TreeNotationParser;
pub use writer::to_newick;

use crate::error::CactusError;
use crate::model::TreeNode;
use crate::parser::ByteParser;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single tree string to obtain a [TreeNode].
///
/// # Returns
/// * [TreeNode] - Root of the tree parsed from the string
/// * [CactusError] - `UnterminatedTree` if the string has no terminating `;`
///
/// # Example
/// ```
/// use cactusgraph::newick::parse_str;
///
/// let tree = parse_str("(node1,(node2,node3))root;")?;
/// assert_eq!(tree.name(), "root");
/// assert_eq!(tree.num_nodes(), 5);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<TreeNode, CactusError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    TreeNotationParser::new().parse(&mut byte_parser)
}
