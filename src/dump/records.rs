//! Typed content of one dump segment.

use crate::model::{PinchBlock, PinchLink, TreeNode};
use std::collections::HashMap;

// =#========================================================================#=
// DUMP RECORDS
// =#========================================================================$=
/// Everything read from one dump segment (a whole dump, or the part up to
/// a `STEP` line).
///
/// The two maps are the cross-highlighting lookups between net/chain tree
/// and pinch graph views: `net_to_components` maps an owner id (from `M`
/// records) to its members, `component_to_net` maps each member back to
/// its owner.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DumpRecords {
    /// Trees from `C` records, in dump order
    pub trees: Vec<TreeNode>,
    /// Blocks from `G` records, in dump order
    pub blocks: Vec<PinchBlock>,
    /// Block-to-block edges from legacy `P` records
    pub links: Vec<PinchLink>,
    pub net_to_components: HashMap<String, Vec<String>>,
    pub component_to_net: HashMap<String, String>,
    /// Members whose owner was replaced by a later `M` record
    reassigned_members: Vec<String>,
}

impl DumpRecords {
    /// Creates empty records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether no record of any kind was read.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
            && self.blocks.is_empty()
            && self.links.is_empty()
            && self.net_to_components.is_empty()
    }

    /// Records a one-to-many mapping from `owner` to `members`.
    ///
    /// Last write wins: a later call for the same owner replaces its member
    /// list, and a member already mapped to some owner is moved to the new
    /// one. The moved member is remembered in
    /// [reassigned_members](Self::reassigned_members).
    pub fn add_mapping(&mut self, owner: &str, members: Vec<String>) {
        for member in &members {
            let previous = self
                .component_to_net
                .insert(member.clone(), owner.to_string());
            if previous.is_some_and(|previous| previous != owner) {
                #[cfg(feature = "tracing")]
                tracing::warn!(member = %member, owner = %owner, "member reassigned to new owner");
                self.reassigned_members.push(member.clone());
            }
        }
        self.net_to_components.insert(owner.to_string(), members);
    }

    /// Members whose owner was overwritten by a later `M` record, in the
    /// order the overwrites happened.
    pub fn reassigned_members(&self) -> &[String] {
        &self.reassigned_members
    }

    /// Owner of the given member, if any.
    pub fn net_of(&self, member: &str) -> Option<&str> {
        self.component_to_net.get(member).map(String::as_str)
    }

    /// Members of the given owner, if any.
    pub fn components_of(&self, owner: &str) -> Option<&[String]> {
        self.net_to_components.get(owner).map(Vec::as_slice)
    }

    /// Names to highlight together with `name`: the name itself, plus its
    /// owner if `name` is a member, otherwise its members if `name` is an
    /// owner.
    pub fn corresponding_names<'a>(&'a self, name: &'a str) -> Vec<&'a str> {
        let mut names = vec![name];
        if let Some(owner) = self.net_of(name) {
            names.push(owner);
        } else if let Some(members) = self.components_of(name) {
            names.extend(members.iter().map(String::as_str));
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_mapping_both_directions() {
        let mut records = DumpRecords::new();
        records.add_mapping("NET1", strings(&["c1", "c2"]));
        assert_eq!(records.net_of("c2"), Some("NET1"));
        assert_eq!(records.components_of("NET1"), Some(&strings(&["c1", "c2"])[..]));
        assert!(records.reassigned_members().is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let mut records = DumpRecords::new();
        records.add_mapping("NET1", strings(&["c1", "c2"]));
        records.add_mapping("NET2", strings(&["c2"]));
        assert_eq!(records.net_of("c2"), Some("NET2"));
        assert_eq!(records.net_of("c1"), Some("NET1"));
        // The earlier owner keeps its stale member list
        assert_eq!(records.components_of("NET1").unwrap().len(), 2);
        assert_eq!(records.reassigned_members(), &strings(&["c2"])[..]);

        // Redefining with the same owner is not a reassignment
        records.add_mapping("NET1", strings(&["c1"]));
        assert_eq!(records.reassigned_members().len(), 1);
    }

    #[test]
    fn test_corresponding_names() {
        let mut records = DumpRecords::new();
        records.add_mapping("NET1", strings(&["c1", "c2"]));
        assert_eq!(records.corresponding_names("c1"), vec!["c1", "NET1"]);
        assert_eq!(records.corresponding_names("NET1"), vec!["NET1", "c1", "c2"]);
        assert_eq!(records.corresponding_names("other"), vec!["other"]);
    }
}
