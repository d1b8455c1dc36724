//! Incremental construction of [PhylogeneticTree]s during parsing.
//!
//! The Newick parser emits vertices bottom-up (leaves first, root last);
//! [TreeBuilder] turns these calls into arena insertions, converts raw
//! branch length values into [BranchLength]s and keeps track of the tip
//! names seen so far so duplicates can be rejected.

use crate::model::tree::{PhylogeneticTree, VertexIndex};
use crate::model::vertex::BranchLength;
use std::collections::HashSet;

/// Builder that constructs [PhylogeneticTree] instances.
///
/// Call [init_next](Self::init_next) before each tree, then add vertices,
/// and take the finished tree with [finish_tree](Self::finish_tree).
#[derive(Debug, Default)]
pub struct TreeBuilder {
    current_tree: PhylogeneticTree,
    labels: HashSet<String>,
}

impl TreeBuilder {
    /// Creates a new builder in the empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new tree, with a capacity guess based on the number of leaves.
    pub fn init_next(&mut self, num_leaves_guess: usize) {
        self.current_tree = PhylogeneticTree::with_capacity(2 * num_leaves_guess.max(1));
        self.labels.clear();
    }

    /// Returns `true` if no leaf with the given name was added to the current tree yet.
    pub fn is_new_label(&self, label: &str) -> bool {
        !self.labels.contains(label)
    }

    /// Adds a leaf; `branch_len` must already be validated (non-negative, finite).
    pub fn add_leaf(&mut self, branch_len: Option<BranchLength>, label: String) -> VertexIndex {
        self.labels.insert(label.clone());
        self.current_tree.add_leaf(branch_len, label)
    }

    /// Adds an internal vertex over the given children.
    pub fn add_internal(
        &mut self,
        children: Vec<VertexIndex>,
        branch_len: Option<BranchLength>,
        name: Option<String>,
    ) -> VertexIndex {
        self.current_tree
            .add_internal_vertex(children, branch_len, name)
    }

    /// Adds the root over the given children.
    pub fn add_root(
        &mut self,
        children: Vec<VertexIndex>,
        branch_len: Option<BranchLength>,
        name: Option<String>,
    ) -> VertexIndex {
        self.current_tree.add_root(children, branch_len, name)
    }

    /// Names the tree under construction.
    pub fn set_name(&mut self, tree_name: String) {
        self.current_tree.set_name(tree_name);
    }

    /// Returns the finished tree and resets the builder.
    pub fn finish_tree(&mut self) -> PhylogeneticTree {
        self.labels.clear();
        std::mem::take(&mut self.current_tree)
    }
}
