//! Typed NET/CHAIN forest with BLOCK links.
//!
//! Provides:
//! * [NodeKind] - the NET/CHAIN discriminant decoded once from label prefixes
//! * [CactusNode] - a typed node stored in the arena
//! * [BlockLink] - a collapsed BLOCK wrapper, i.e. an edge between a node and
//!   its former grandchild
//! * [Forest] - arena of all nodes of all trees of one dump, plus links

use crate::model::point::Point;
use std::fmt;

/// Index of a node in a [Forest] (arena).
pub type NodeIndex = usize;

// =$========================================================================$=
// NODE KIND
// =$========================================================================$=
/// Kind of a node in the cactus hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NodeKind {
    /// A bubble in the alignment graph
    Net,
    /// A linear run of aligned blocks
    Chain,
}

impl NodeKind {
    /// Label prefix encoding this kind in a dump.
    pub fn prefix(&self) -> &'static str {
        match self {
            NodeKind::Net => "NET",
            NodeKind::Chain => "CHAIN",
        }
    }

    /// Splits a raw label into its kind and the remaining name.
    ///
    /// # Returns
    /// `None` if the label starts with neither `NET` nor `CHAIN`.
    pub fn split_label(label: &str) -> Option<(NodeKind, &str)> {
        [NodeKind::Net, NodeKind::Chain]
            .into_iter()
            .find_map(|kind| label.strip_prefix(kind.prefix()).map(|rest| (kind, rest)))
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

// =$========================================================================$=
// CACTUS NODE
// =$========================================================================$=
/// A NET or CHAIN node of a [Forest].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CactusNode {
    index: NodeIndex,
    name: String,
    kind: NodeKind,
    parent: Option<NodeIndex>,
    children: Option<Vec<NodeIndex>>,
}

impl CactusNode {
    /// Index of this node in its forest.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Name with the NET/CHAIN prefix stripped.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Parent node, `None` for tree roots.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Child nodes, `None` if the source node had no child list.
    pub fn children(&self) -> Option<&[NodeIndex]> {
        self.children.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

// =$========================================================================$=
// BLOCK LINK
// =$========================================================================$=
/// Edge standing in for a BLOCK wrapper node.
///
/// `source` is the NET/CHAIN node that held the BLOCK child, `target` the
/// node below the BLOCK. Both index into the same [Forest].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BlockLink {
    pub name: String,
    pub length: Option<i64>,
    pub source: NodeIndex,
    pub target: NodeIndex,
}

// =$========================================================================$=
// FOREST
// =$========================================================================$=
/// All typed trees of one dump, stored in a single arena, plus their links.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Forest {
    nodes: Vec<CactusNode>,
    roots: Vec<NodeIndex>,
    links: Vec<BlockLink>,
}

impl Forest {
    /// Creates an empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, attaching it to `parent` if given, and returns its index.
    ///
    /// A node without parent is registered as a new tree root.
    ///
    /// # Panics
    /// Panics if `parent` is out of bounds.
    pub fn add_node(&mut self, name: String, kind: NodeKind, parent: Option<NodeIndex>) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(CactusNode {
            index,
            name,
            kind,
            parent,
            children: None,
        });

        match parent {
            Some(parent) => self.nodes[parent]
                .children
                .get_or_insert_with(Vec::new)
                .push(index),
            None => self.roots.push(index),
        }

        index
    }

    /// Marks a node as having a child list, even if no child gets added.
    pub fn open_children(&mut self, index: NodeIndex) {
        self.nodes[index].children.get_or_insert_with(Vec::new);
    }

    /// Appends a link.
    pub fn add_link(&mut self, link: BlockLink) {
        self.links.push(link);
    }

    /// Drops every node, link and root added after the forest had the given
    /// sizes. Only valid if no node added since has a parent from before.
    pub(crate) fn truncate(&mut self, num_nodes: usize, num_links: usize, num_roots: usize) {
        self.nodes.truncate(num_nodes);
        self.links.truncate(num_links);
        self.roots.truncate(num_roots);
    }

    /// Returns a reference to the node at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn node(&self, index: NodeIndex) -> &CactusNode {
        &self.nodes[index]
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> &[CactusNode] {
        &self.nodes
    }

    /// Root indices, one per tree, in dump order.
    pub fn roots(&self) -> &[NodeIndex] {
        &self.roots
    }

    /// All links in creation order.
    pub fn links(&self) -> &[BlockLink] {
        &self.links
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_trees(&self) -> usize {
        self.roots.len()
    }

    /// Finds the first node with the given (prefix-stripped) name and kind.
    pub fn find(&self, kind: NodeKind, name: &str) -> Option<NodeIndex> {
        self.nodes
            .iter()
            .find(|node| node.kind == kind && node.name == name)
            .map(CactusNode::index)
    }

    /// Returns the nodes of the tree rooted at `root` in pre-order.
    pub fn pre_order(&self, root: NodeIndex) -> Vec<NodeIndex> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            order.push(index);
            if let Some(children) = self.nodes[index].children() {
                stack.extend(children.iter().rev());
            }
        }
        order
    }

    /// Maps positions computed by a tree layout (parallel to the node
    /// arena) onto the endpoints of every link, in link order.
    ///
    /// Links touching a node without a position get [Point::UNSET] ends.
    pub fn link_endpoints(&self, positions: &[Point]) -> Vec<(Point, Point)> {
        let position_of = |index: NodeIndex| positions.get(index).copied().unwrap_or(Point::UNSET);
        self.links
            .iter()
            .map(|link| (position_of(link.source), position_of(link.target)))
            .collect()
    }
}

impl std::ops::Index<NodeIndex> for Forest {
    type Output = CactusNode;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_label() {
        assert_eq!(NodeKind::split_label("NET12"), Some((NodeKind::Net, "12")));
        assert_eq!(NodeKind::split_label("CHAIN"), Some((NodeKind::Chain, "")));
        assert_eq!(NodeKind::split_label("BLOCK3"), None);
        assert_eq!(NodeKind::split_label("net1"), None);
    }

    #[test]
    fn test_add_nodes_and_pre_order() {
        let mut forest = Forest::new();
        let root = forest.add_node("0".to_string(), NodeKind::Net, None);
        let a = forest.add_node("1".to_string(), NodeKind::Chain, Some(root));
        let b = forest.add_node("2".to_string(), NodeKind::Net, Some(a));
        let c = forest.add_node("3".to_string(), NodeKind::Chain, Some(root));

        assert_eq!(forest.roots(), &[root]);
        assert_eq!(forest[root].children(), Some(&[a, c][..]));
        assert_eq!(forest[b].parent(), Some(a));
        assert_eq!(forest.pre_order(root), vec![root, a, b, c]);
        assert_eq!(forest.find(NodeKind::Net, "2"), Some(b));
        assert_eq!(forest.find(NodeKind::Chain, "2"), None);
    }

    #[test]
    fn test_link_endpoints() {
        let mut forest = Forest::new();
        let root = forest.add_node("0".to_string(), NodeKind::Net, None);
        let child = forest.add_node("1".to_string(), NodeKind::Chain, Some(root));
        forest.add_link(BlockLink {
            name: "7".to_string(),
            length: Some(10),
            source: root,
            target: child,
        });

        let ends = forest.link_endpoints(&[Point::new(0.0, 0.0), Point::new(1.0, 2.0)]);
        assert_eq!(ends, vec![(Point::new(0.0, 0.0), Point::new(1.0, 2.0))]);

        let ends = forest.link_endpoints(&[Point::new(0.0, 0.0)]);
        assert!(!ends[0].1.is_positioned());
    }
}
