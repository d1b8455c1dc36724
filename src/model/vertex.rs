//! Vertices of a [PhylogeneticTree](crate::model::PhylogeneticTree) and their branch lengths.

use crate::model::tree::VertexIndex;
use std::fmt;
use std::ops::{Add, Deref};

/// Position of a vertex in its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexKind {
    Root,
    Internal,
    Leaf,
}

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// One vertex of a rooted tree, stored in the tree's arena.
///
/// Links to parent and children are arena indices. A vertex created on its
/// own has no parent yet; the tree sets it when the parent is added.
///
/// Leaves carry their tip name, which identifies them. Root and internal
/// vertices may carry a name too (`NODE_0000012` in TreeTime output, or a
/// support value), which is only kept for writing the tree back out.
#[derive(PartialEq, Debug, Clone)]
pub struct Vertex {
    index: VertexIndex,
    kind: VertexKind,
    parent: Option<VertexIndex>,
    children: Vec<VertexIndex>,
    branch_length: Option<BranchLength>,
    name: Option<String>,
}

impl Vertex {
    pub fn new_root(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
        name: Option<String>,
    ) -> Self {
        Vertex {
            index,
            kind: VertexKind::Root,
            parent: None,
            children,
            branch_length,
            name,
        }
    }

    pub fn new_internal(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
        name: Option<String>,
    ) -> Self {
        Vertex {
            kind: VertexKind::Internal,
            ..Self::new_root(index, children, branch_length, name)
        }
    }

    pub fn new_leaf(index: VertexIndex, branch_length: Option<BranchLength>, label: String) -> Self {
        Vertex {
            kind: VertexKind::Leaf,
            ..Self::new_root(index, Vec::new(), branch_length, Some(label))
        }
    }

    pub fn index(&self) -> VertexIndex {
        self.index
    }

    pub fn kind(&self) -> VertexKind {
        self.kind
    }

    pub fn is_leaf(&self) -> bool {
        self.kind == VertexKind::Leaf
    }

    /// True for vertices with parent and children; the root is not internal.
    pub fn is_internal(&self) -> bool {
        self.kind == VertexKind::Internal
    }

    pub fn is_root(&self) -> bool {
        self.kind == VertexKind::Root
    }

    /// Returns the incoming branch length, if the input gave one.
    pub fn branch_length(&self) -> Option<BranchLength> {
        self.branch_length
    }

    pub fn has_branch_length(&self) -> bool {
        self.branch_length.is_some()
    }

    /// Returns the incoming branch length, with a missing one counting as `0.0`.
    pub fn branch_length_or_zero(&self) -> f64 {
        self.branch_length.map_or(0.0, |bl| *bl)
    }

    /// Returns the tip name of a leaf; `None` for other vertices.
    pub fn label(&self) -> Option<&str> {
        if self.is_leaf() {
            self.name.as_deref()
        } else {
            None
        }
    }

    /// Returns the name of a root or internal vertex, if it has one.
    pub fn name(&self) -> Option<&str> {
        if self.is_leaf() {
            None
        } else {
            self.name.as_deref()
        }
    }

    /// Returns the children in input order; empty for leaves.
    pub fn children(&self) -> &[VertexIndex] {
        &self.children
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    pub fn parent(&self) -> Option<VertexIndex> {
        self.parent
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// Links this vertex to its parent.
    ///
    /// # Panics
    /// Panics on a root, which never has a parent.
    pub fn set_parent(&mut self, parent: VertexIndex) {
        assert!(!self.is_root(), "root vertex {} cannot get parent {}", self.index, parent);
        self.parent = Some(parent);
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Length of the edge above a vertex: substitutions per site in a
/// divergence tree, years in a time tree. Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct BranchLength(f64);

impl BranchLength {
    pub const ZERO: BranchLength = BranchLength(0.0);

    /// # Panics
    /// Panics if `length` is negative, infinite or NaN.
    pub fn new(length: f64) -> Self {
        match Self::try_new(length) {
            Some(bl) => bl,
            None => panic!("invalid branch length {length}"),
        }
    }

    /// Returns `None` if `length` is negative, infinite or NaN.
    pub fn try_new(length: f64) -> Option<Self> {
        // `+ 0.0` turns -0.0 into 0.0
        (length.is_finite() && length >= 0.0).then(|| BranchLength(length + 0.0))
    }
}

impl Deref for BranchLength {
    type Target = f64;

    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for BranchLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Add for BranchLength {
    type Output = BranchLength;

    fn add(self, other: BranchLength) -> BranchLength {
        BranchLength(self.0 + other.0)
    }
}
