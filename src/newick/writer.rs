//! Tree notation writing for [TreeNode]s.

use crate::model::TreeNode;
use crate::parser::utils::escape_label;

/// Extra buffer in tree string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Returns the tree notation of this tree with closing semicolon.
///
/// Labels needing it are quoted, so that parsing the result with
/// [TreeNotationParser](super::TreeNotationParser) gives back an equal
/// tree. Nodes with an empty child list are written as `()`, which reads
/// back as a single empty-named child, so `()root;` does not round-trip.
///
/// # Example
/// ```
/// use cactusgraph::model::TreeNode;
/// use cactusgraph::newick::to_newick;
///
/// let tree = TreeNode::with_children(
///     "NET0",
///     vec![TreeNode::leaf("BLOCK1"), TreeNode::leaf("odd name")],
/// );
/// assert_eq!(to_newick(&tree), "(BLOCK1,'odd name')NET0;");
/// ```
pub fn to_newick(tree: &TreeNode) -> String {
    // Recursive helper for building the string
    fn build_newick(node: &TreeNode, newick: &mut String) {
        if let Some(children) = node.children() {
            newick.push('(');
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    newick.push(',');
                }
                build_newick(child, newick);
            }
            newick.push(')');
        }
        newick.push_str(&escape_label(node.name()));
    }

    let mut newick = String::with_capacity(estimate_newick_len(tree));
    build_newick(tree, &mut newick);
    newick.push(';');

    newick
}

/// Estimates the length of the tree notation of a tree: each node
/// contributes its (escaped) name plus about two structural characters.
fn estimate_newick_len(tree: &TreeNode) -> usize {
    fn name_len(node: &TreeNode) -> usize {
        node.name().len() + 2 + node.children().map_or(0, |c| c.iter().map(name_len).sum())
    }

    name_len(tree) + BUFFER_CHARS
}
