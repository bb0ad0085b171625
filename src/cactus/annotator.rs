//! Reinterpretation of generic trees as typed NET/CHAIN trees.
//!
//! Dump trees nest `NET -> BLOCK -> CHAIN -> BLOCK -> NET ...`. The
//! [CactusTreeAnnotator] keeps the NET/CHAIN nodes as typed forest nodes
//! and collapses every BLOCK node into a [BlockLink] from its parent to its
//! only child.

use crate::error::CactusError;
use crate::model::{BlockLink, Forest, NodeIndex, NodeKind, TreeNode};

/// Label prefix of BLOCK wrapper nodes.
const BLOCK_PREFIX: &str = "BLOCK";

// =#========================================================================#=
// CACTUS TREE ANNOTATOR
// =#========================================================================$=
/// Builds a [Forest] from one or more generic trees.
///
/// Each call to [annotate](Self::annotate) adds one tree. A failing tree
/// leaves the forest as it was before the call.
///
/// # Example
/// ```
/// use cactusgraph::cactus::CactusTreeAnnotator;
/// use cactusgraph::model::NodeKind;
/// use cactusgraph::newick::parse_str;
///
/// let tree = parse_str("((NET2)BLOCK5_120)CHAIN1;").unwrap();
/// let mut annotator = CactusTreeAnnotator::new();
/// let root = annotator.annotate(&tree).unwrap();
/// let forest = annotator.into_forest();
///
/// assert_eq!(forest[root].kind(), NodeKind::Chain);
/// assert_eq!(forest.num_nodes(), 2);
/// assert_eq!(forest.links()[0].name, "5");
/// assert_eq!(forest.links()[0].length, Some(120));
/// ```
#[derive(Debug, Default)]
pub struct CactusTreeAnnotator {
    forest: Forest,
}

impl CactusTreeAnnotator {
    /// Creates an annotator with an empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `tree` to the forest and returns the index of its root.
    ///
    /// # Errors
    /// * `UnrecognizedNodeKind` - a node lacks the `NET`/`CHAIN` prefix, or a
    ///   child of a NET/CHAIN node lacks the `BLOCK` prefix
    /// * `InvalidTreeStructure` - a BLOCK node does not wrap exactly one node
    pub fn annotate(&mut self, tree: &TreeNode) -> Result<NodeIndex, CactusError> {
        let num_nodes = self.forest.num_nodes();
        let num_links = self.forest.links().len();
        let num_roots = self.forest.num_trees();

        self.annotate_node(tree, None).inspect_err(|_| {
            self.forest.truncate(num_nodes, num_links, num_roots);
        })
    }

    /// Returns the forest built so far.
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Consumes the annotator and returns the forest.
    pub fn into_forest(self) -> Forest {
        self.forest
    }

    /// Adds `node` below `parent`, then its BLOCK-wrapped descendants.
    fn annotate_node(&mut self, node: &TreeNode, parent: Option<NodeIndex>) -> Result<NodeIndex, CactusError> {
        let (kind, name) = NodeKind::split_label(node.name())
            .ok_or_else(|| CactusError::unrecognized_node_kind(node.name()))?;
        let index = self.forest.add_node(name.to_string(), kind, parent);

        let Some(children) = node.children() else {
            return Ok(index);
        };
        self.forest.open_children(index);

        for block in children {
            let (block_name, length) = split_block_label(block.name())
                .ok_or_else(|| CactusError::unrecognized_node_kind(block.name()))?;
            let wrapped = match block.children() {
                Some([wrapped]) => wrapped,
                other => {
                    return Err(CactusError::invalid_tree_structure(format!(
                        "{} must wrap exactly one node but has {}",
                        block.name(),
                        other.map_or(0, <[TreeNode]>::len)
                    )));
                }
            };

            let target = self.annotate_node(wrapped, Some(index))?;
            self.forest.add_link(BlockLink {
                name: block_name.to_string(),
                length,
                source: index,
                target,
            });
        }

        Ok(index)
    }
}

/// Splits `BLOCK<name>[_<length>]` into name and optional length.
///
/// A suffix after the last `_` only counts as length if it is an integer;
/// otherwise it stays part of the name.
fn split_block_label(label: &str) -> Option<(&str, Option<i64>)> {
    let rest = label.strip_prefix(BLOCK_PREFIX)?;
    let split = rest
        .rsplit_once('_')
        .and_then(|(name, length)| length.parse().ok().map(|length| (name, Some(length))));
    Some(split.unwrap_or((rest, None)))
}

// ============================================================================
// QUICK API (pub)
// ============================================================================
/// Annotates a single tree into its own [Forest].
pub fn annotate(tree: &TreeNode) -> Result<Forest, CactusError> {
    annotate_all(std::slice::from_ref(tree))
}

/// Annotates all trees of a dump, in order, into one [Forest].
pub fn annotate_all(trees: &[TreeNode]) -> Result<Forest, CactusError> {
    let mut annotator = CactusTreeAnnotator::new();
    for tree in trees {
        annotator.annotate(tree)?;
    }
    Ok(annotator.into_forest())
}
