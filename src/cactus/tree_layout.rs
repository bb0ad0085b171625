//! Seam to an external tree layout.
//!
//! Positioning the nodes of a tree is left to a [TreeLayout]
//! implementation supplied by the caller. This module feeds it the typed
//! [Forest] and maps the resulting positions onto the BLOCK links.

use crate::model::{Forest, Point};

/// Assigns a position to every node of a [Forest].
pub trait TreeLayout {
    /// Returns one position per forest node, indexed by
    /// [NodeIndex](crate::model::NodeIndex). Nodes the layout leaves out may
    /// be given [Point::UNSET] or omitted at the end.
    fn layout(&mut self, forest: &Forest) -> Vec<Point>;
}

/// Node positions from a [TreeLayout] plus the link endpoints derived from them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TreePlacement {
    /// Position per forest node
    pub positions: Vec<Point>,
    /// `(source, target)` position per forest link, in link order
    pub link_endpoints: Vec<(Point, Point)>,
}

/// Runs `layout` on `forest` and places the endpoints of every BLOCK link.
pub fn place_forest<L: TreeLayout + ?Sized>(layout: &mut L, forest: &Forest) -> TreePlacement {
    let positions = layout.layout(forest);
    let link_endpoints = forest.link_endpoints(&positions);
    TreePlacement {
        positions,
        link_endpoints,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cactus::annotate;
    use crate::newick::parse_str;

    /// Places each node at (depth, pre-order rank).
    struct DepthLayout;

    impl TreeLayout for DepthLayout {
        fn layout(&mut self, forest: &Forest) -> Vec<Point> {
            let mut positions = vec![Point::UNSET; forest.num_nodes()];
            let mut rank = 0.0;
            for &root in forest.roots() {
                for index in forest.pre_order(root) {
                    let mut depth = 0.0;
                    let mut current = forest[index].parent();
                    while let Some(parent) = current {
                        depth += 1.0;
                        current = forest[parent].parent();
                    }
                    positions[index] = Point::new(depth, rank);
                    rank += 1.0;
                }
            }
            positions
        }
    }

    #[test]
    fn test_place_forest() {
        let tree = parse_str("((CHAIN1)BLOCK7,((NET3)BLOCK8)CHAIN2)NET0;");
        // CHAIN2 is not wrapped in a BLOCK, so this tree is invalid
        assert!(annotate(&tree.unwrap()).is_err());

        let tree = parse_str("((CHAIN1)BLOCK7,(((NET3)BLOCK8)CHAIN2)BLOCK9)NET0;").unwrap();
        let forest = annotate(&tree).unwrap();
        let placement = place_forest(&mut DepthLayout, &forest);

        assert_eq!(placement.positions.len(), 4);
        // Links are appended after their subtree: BLOCK7, BLOCK8, BLOCK9
        let names: Vec<&str> = forest.links().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["7", "8", "9"]);
        assert_eq!(placement.link_endpoints[0], (Point::new(0.0, 0.0), Point::new(1.0, 1.0)));
        assert_eq!(placement.link_endpoints[1], (Point::new(1.0, 2.0), Point::new(2.0, 3.0)));
        assert_eq!(placement.link_endpoints[2], (Point::new(0.0, 0.0), Point::new(1.0, 2.0)));
    }
}
