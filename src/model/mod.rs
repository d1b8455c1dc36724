//! Data model for rooted phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [PhylogeneticTree], which uses the arena pattern
//! to store [Vertex] nodes. Each vertex is either a `Root`, `Internal`, or
//! `Leaf`, referenced by [VertexIndex]. Vertices may have any number of
//! children, so multifurcating roots (e.g. from an unrooted input) and unary
//! roots (e.g. `((A,B));`) are representable; whether they are acceptable is
//! up to the algorithm consuming the tree.
//!
//! # Building trees
//! Trees are constructed during parsing via [TreeBuilder]; Nexus labels flow
//! through a [LabelResolver] first.

pub mod label_resolver;
pub mod tree;
pub mod tree_builder;
pub mod vertex;

pub use label_resolver::LabelResolver;
pub use tree::{PhylogeneticTree, VertexIndex};
pub use tree_builder::TreeBuilder;
pub use vertex::{BranchLength, Vertex, VertexKind};
