//! Root split of a reference tree and choice of outgroup side.

use crate::error::RttError;
use crate::model::PhylogeneticTree;
use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::fmt;

/// Side of a [Bipartition].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Returns the other side.
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Tip names below the two (largest) children of a tree's root.
///
/// `a` belongs to the child with more tips (or the earlier one on a tie).
/// Both sides are non-empty and disjoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Bipartition {
    pub a: BTreeSet<String>,
    pub b: BTreeSet<String>,
}

impl Bipartition {
    /// Returns the tip names of the given side.
    pub fn side(&self, side: Side) -> &BTreeSet<String> {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    /// Returns the side [select_outgroup] picks for re-rooting.
    pub fn outgroup_side(&self) -> Side {
        if std::ptr::eq(select_outgroup(&self.a, &self.b), &self.a) {
            Side::A
        } else {
            Side::B
        }
    }

    /// Returns all tip names on either side.
    pub fn all_tips(&self) -> BTreeSet<&str> {
        self.a.iter().chain(self.b.iter()).map(String::as_str).collect()
    }
}

/// Derives the root bipartition of a reference tree.
///
/// The two root children with the most tips define the sides (stable on
/// ties, so earlier children win). Tips of any further root children are
/// dropped.
///
/// # Errors
/// [RttError::State] if the tree has no root, and [RttError::Structural]
/// if the root has fewer than two children.
///
/// # Example
/// ```
/// use rtt_reconcile::parse_tree;
/// use rtt_reconcile::reconcile::derive_bipartition;
///
/// let tree = parse_tree("((A,B),(C,D,E),F);").unwrap();
/// let split = derive_bipartition(&tree).unwrap();
/// assert_eq!(split.a.len(), 3);
/// assert_eq!(split.b.len(), 2);
/// assert!(!split.all_tips().contains("F"));
/// ```
pub fn derive_bipartition(tree: &PhylogeneticTree) -> Result<Bipartition, RttError> {
    let root = tree
        .try_root()
        .ok_or_else(|| RttError::State("tree is not rooted".to_string()))?;

    if root.num_children() < 2 {
        return Err(RttError::Structural(
            "time tree root has <2 children; cannot define a split".to_string(),
        ));
    }

    let leaf_counts = tree.subtree_leaf_counts();
    let mut children = root.children().to_vec();
    children.sort_by_key(|&child| Reverse(leaf_counts[child]));

    let a = tree.subtree_tip_names(children[0]);
    let b = tree.subtree_tip_names(children[1]);

    if children.len() > 2 {
        let dropped: usize = children[2..].iter().map(|&c| leaf_counts[c]).sum();
        log::debug!(
            "Reference root has {} children; dropping {} tips outside the two largest",
            children.len(),
            dropped
        );
    }

    Ok(Bipartition { a, b })
}

/// Returns the smaller of the two sets, `a` on a tie.
pub fn select_outgroup<'a>(a: &'a BTreeSet<String>, b: &'a BTreeSet<String>) -> &'a BTreeSet<String> {
    if a.len() <= b.len() { a } else { b }
}

/// Returns the set [select_outgroup] did not pick.
pub fn complement_side<'a>(a: &'a BTreeSet<String>, b: &'a BTreeSet<String>) -> &'a BTreeSet<String> {
    if std::ptr::eq(select_outgroup(a, b), a) { b } else { a }
}
