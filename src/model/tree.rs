//! Rooted tree stored as an arena of [Vertex] values.
//!
//! Vertices refer to each other by [VertexIndex]. Re-rooting rebuilds the
//! arena instead of moving references around, and all traversals
//! ([PreOrderIter], [PostOrderIter]) use an explicit stack.

use crate::model::vertex::{BranchLength, Vertex};
use std::collections::{BTreeSet, HashSet};
use std::ops::Index;

/// Position of a vertex in its tree's arena.
pub type VertexIndex = usize;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted tree with any number of children per vertex.
///
/// Built bottom-up: leaves first, then each internal vertex from already
/// added children, the root last. Adding a vertex sets the parent of its
/// children. [is_valid](Self::is_valid) checks the result.
///
/// ```
/// use rtt_reconcile::model::{BranchLength, PhylogeneticTree};
///
/// let mut tree = PhylogeneticTree::new();
/// let a = tree.add_leaf(Some(BranchLength::new(1.0)), "A".to_string());
/// let b = tree.add_leaf(Some(BranchLength::new(2.0)), "B".to_string());
/// let c = tree.add_leaf(None, "C".to_string());
/// tree.add_root(vec![a, b, c], None, None);
///
/// assert!(tree.is_valid());
/// assert_eq!(tree.num_leaves(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PhylogeneticTree {
    vertices: Vec<Vertex>,
    root: Option<VertexIndex>,
    /// e.g. `tree1` in `TREE tree1 = ...`
    name: Option<String>,
}

impl PhylogeneticTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tree with room for `num_vertices` vertices.
    pub fn with_capacity(num_vertices: usize) -> Self {
        PhylogeneticTree {
            vertices: Vec::with_capacity(num_vertices),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Appends `vertex` and makes it the parent of its children.
    fn push(&mut self, vertex: Vertex) -> VertexIndex {
        let index = vertex.index();
        for &child in vertex.children() {
            self.vertices[child].set_parent(index);
        }
        self.vertices.push(vertex);
        index
    }

    /// Adds the root over `children` and returns its index.
    pub fn add_root(
        &mut self,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
        name: Option<String>,
    ) -> VertexIndex {
        let index = self.push(Vertex::new_root(self.vertices.len(), children, branch_length, name));
        self.root = Some(index);
        index
    }

    /// Adds an internal vertex over `children`; `branch_length` is the edge to its future parent.
    pub fn add_internal_vertex(
        &mut self,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
        name: Option<String>,
    ) -> VertexIndex {
        self.push(Vertex::new_internal(self.vertices.len(), children, branch_length, name))
    }

    pub fn add_leaf(&mut self, branch_length: Option<BranchLength>, label: String) -> VertexIndex {
        self.push(Vertex::new_leaf(self.vertices.len(), branch_length, label))
    }

    pub fn is_root_set(&self) -> bool {
        self.root.is_some()
    }

    /// # Panics
    /// Panics if no root has been added.
    pub fn root_index(&self) -> VertexIndex {
        match self.root {
            Some(root) => root,
            None => panic!("tree has no root"),
        }
    }

    /// # Panics
    /// Panics if no root has been added.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index()]
    }

    pub fn try_root(&self) -> Option<&Vertex> {
        self.root.and_then(|root| self.vertices.get(root))
    }

    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_leaf()).count()
    }

    pub fn leaf_index(&self, name: &str) -> Option<VertexIndex> {
        self.vertices.iter().position(|v| v.label() == Some(name))
    }

    /// Tip names in pre-order, which for a parsed tree is the order of the input.
    pub fn tip_names(&self) -> Vec<&str> {
        self.pre_order_iter().filter_map(Vertex::label).collect()
    }

    pub fn subtree_tip_names(&self, index: VertexIndex) -> BTreeSet<String> {
        self.pre_order_iter_from(index)
            .filter_map(|v| v.label().map(String::from))
            .collect()
    }

    /// Leaf count below every vertex, indexed like the arena.
    pub fn subtree_leaf_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.vertices.len()];
        for vertex in self.post_order_iter() {
            counts[vertex.index()] = if vertex.is_leaf() {
                1
            } else {
                vertex.children().iter().map(|&c| counts[c]).sum()
            };
        }
        counts
    }

    /// Returns `index`, its parent, grandparent, ... up to the root.
    pub fn path_to_root(&self, index: VertexIndex) -> Vec<VertexIndex> {
        std::iter::successors(Some(index), |&current| self[current].parent()).collect()
    }

    /// Checks that the arena forms one rooted tree with unique, non-empty tip names.
    ///
    /// Every vertex must sit at its own index and be reachable from the
    /// single root, parent and child links must agree, and only leaves may
    /// be childless.
    pub fn is_valid(&self) -> bool {
        let Some(root) = self.try_root() else {
            return false;
        };
        if !root.is_root() {
            return false;
        }

        let mut tip_names = HashSet::with_capacity(self.vertices.len());
        for (index, vertex) in self.vertices.iter().enumerate() {
            let parent_ok = match vertex.parent() {
                None => vertex.index() == root.index(),
                Some(parent) => self
                    .vertices
                    .get(parent)
                    .is_some_and(|p| p.children().contains(&index)),
            };
            let children_ok = vertex
                .children()
                .iter()
                .all(|&child| self.vertices.get(child).is_some_and(|c| c.parent() == Some(index)));
            let label_ok = match vertex.label() {
                Some(label) => !label.is_empty() && tip_names.insert(label),
                None => vertex.num_children() > 0,
            };

            if vertex.index() != index || !parent_ok || !children_ok || !label_ok {
                return false;
            }
        }

        self.pre_order_iter().count() == self.vertices.len()
    }
}

impl Index<VertexIndex> for PhylogeneticTree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Vertex {
        &self.vertices[index]
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl PhylogeneticTree {
    /// Visits children before their parent, siblings in input order.
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter {
            tree: self,
            stack: self.root.map(|root| (root, false)).into_iter().collect(),
        }
    }

    /// Visits every vertex before its children, siblings in input order.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter {
            tree: self,
            stack: self.root.into_iter().collect(),
        }
    }

    /// Pre-order over the subtree below (and including) `index`.
    pub fn pre_order_iter_from(&self, index: VertexIndex) -> PreOrderIter<'_> {
        PreOrderIter {
            tree: self,
            stack: vec![index],
        }
    }
}

/// See [PhylogeneticTree::post_order_iter].
pub struct PostOrderIter<'a> {
    tree: &'a PhylogeneticTree,
    /// Vertex and whether its children are already on the stack
    stack: Vec<(VertexIndex, bool)>,
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<&'a Vertex> {
        loop {
            let (index, expanded) = self.stack.pop()?;
            let vertex = &self.tree[index];
            if expanded || vertex.is_leaf() {
                return Some(vertex);
            }

            self.stack.push((index, true));
            self.stack
                .extend(vertex.children().iter().rev().map(|&child| (child, false)));
        }
    }
}

/// See [PhylogeneticTree::pre_order_iter].
pub struct PreOrderIter<'a> {
    tree: &'a PhylogeneticTree,
    stack: Vec<VertexIndex>,
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<&'a Vertex> {
        let vertex = &self.tree[self.stack.pop()?];
        self.stack.extend(vertex.children().iter().rev());
        Some(vertex)
    }
}
