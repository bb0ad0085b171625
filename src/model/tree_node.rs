//! Generic labelled tree as read from tree notation.

// =$========================================================================$=
// TREE NODE
// =$========================================================================$=
/// A node of a parsed tree: a name and, for non-leaves, an ordered child list.
///
/// A node that owns a child list has `Some(children)`; a node that never had
/// a child list has `None`. The parser always gives a closed list at least
/// one child (`()` holds one empty-named leaf), so `Some` with an empty list
/// only comes from [TreeNode::with_children].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TreeNode {
    name: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    /// Creates a leaf (no child list at all).
    pub fn leaf<S: Into<String>>(name: S) -> Self {
        TreeNode {
            name: name.into(),
            children: None,
        }
    }

    /// Creates a node with the given (possibly empty) child list.
    pub fn with_children<S: Into<String>>(name: S, children: Vec<TreeNode>) -> Self {
        TreeNode {
            name: name.into(),
            children: Some(children),
        }
    }

    /// Returns the (unescaped) name of this node.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the children, or `None` if this node never had a child list.
    pub fn children(&self) -> Option<&[TreeNode]> {
        self.children.as_deref()
    }

    /// Returns whether this node has no child list.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Returns the number of nodes in the subtree rooted here.
    pub fn num_nodes(&self) -> usize {
        1 + self
            .children()
            .map_or(0, |children| children.iter().map(TreeNode::num_nodes).sum())
    }

    /// Returns the depth of the subtree rooted here (a leaf has depth 0).
    pub fn depth(&self) -> usize {
        self.children()
            .and_then(|children| children.iter().map(TreeNode::depth).max().map(|d| d + 1))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_differs_from_empty_child_list() {
        let leaf = TreeNode::leaf("a");
        let empty = TreeNode::with_children("a", vec![]);
        assert_ne!(leaf, empty);
        assert!(leaf.is_leaf());
        assert!(!empty.is_leaf());
        assert_eq!(empty.children(), Some(&[][..]));
    }

    #[test]
    fn test_counts() {
        let tree = TreeNode::with_children(
            "root",
            vec![
                TreeNode::leaf("a"),
                TreeNode::with_children("", vec![TreeNode::leaf("b"), TreeNode::leaf("c")]),
            ],
        );
        assert_eq!(tree.num_nodes(), 5);
        assert_eq!(tree.depth(), 2);
    }
}
