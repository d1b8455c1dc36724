use rtt_reconcile::model::{
    BranchLength, LabelResolver, PhylogeneticTree, TreeBuilder, Vertex, VertexKind,
};
use std::collections::HashMap;

// ----- trees -----

#[test]
fn test_building_tree() {
    let mut tree = PhylogeneticTree::new();
    let kea = tree.add_leaf(Some(BranchLength::new(1.0)), "Kea".to_string());
    let kaka = tree.add_leaf(Some(BranchLength::new(1.0)), "Kaka".to_string());
    let kakapo = tree.add_leaf(Some(BranchLength::new(0.5)), "Kakapo".to_string());
    let nestor = tree.add_internal_vertex(
        vec![kea, kaka],
        Some(BranchLength::new(1.5)),
        Some("Nestor".to_string()),
    );
    let top = tree.add_root(vec![kakapo, nestor], None, None);

    // Counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_vertices(), 5);
    let total: f64 = tree.pre_order_iter().map(Vertex::branch_length_or_zero).sum();
    assert_eq!(total, 4.0);
    assert!(tree.is_valid());

    // Root
    let root = tree.root();
    assert_eq!(root.index(), top);
    assert!(root.is_root());
    assert_eq!(root.children(), &[kakapo, nestor]);

    // Leaf
    let kaka_vertex = &tree[kaka];
    assert!(kaka_vertex.is_leaf());
    assert_eq!(kaka_vertex.label(), Some("Kaka"));
    assert_eq!(kaka_vertex.parent(), Some(nestor));
    assert!(kaka_vertex.children().is_empty());

    // Internal
    let nestor_vertex = &tree[nestor];
    assert!(nestor_vertex.is_internal());
    assert_eq!(nestor_vertex.name(), Some("Nestor"));
    assert_eq!(nestor_vertex.branch_length(), Some(BranchLength::new(1.5)));
    assert_eq!(nestor_vertex.parent(), Some(top));
}

#[test]
fn test_traversal_orders() {
    let mut tree = PhylogeneticTree::new();
    let a = tree.add_leaf(None, "A".to_string());
    let b = tree.add_leaf(None, "B".to_string());
    let c = tree.add_leaf(None, "C".to_string());
    let ab = tree.add_internal_vertex(vec![a, b], None, None);
    let d = tree.add_leaf(None, "D".to_string());
    let root = tree.add_root(vec![ab, c, d], None, None);

    let pre: Vec<usize> = tree.pre_order_iter().map(Vertex::index).collect();
    assert_eq!(pre, vec![root, ab, a, b, c, d]);

    let post: Vec<usize> = tree.post_order_iter().map(Vertex::index).collect();
    assert_eq!(post, vec![a, b, ab, c, d, root]);

    assert_eq!(tree.tip_names(), vec!["A", "B", "C", "D"]);
    assert_eq!(tree.path_to_root(b), vec![b, ab, root]);

    let counts = tree.subtree_leaf_counts();
    assert_eq!(counts[root], 4);
    assert_eq!(counts[ab], 2);
    assert_eq!(counts[d], 1);

    let names: Vec<String> = tree.subtree_tip_names(ab).into_iter().collect();
    assert_eq!(names, vec!["A".to_string(), "B".to_string()]);
}

#[test]
fn test_deep_ladder_traversal() {
    let mut tree = PhylogeneticTree::with_capacity(20_001);
    let mut current = tree.add_leaf(Some(BranchLength::new(1.0)), "t0".to_string());
    for i in 1..10_000 {
        let leaf = tree.add_leaf(Some(BranchLength::new(1.0)), format!("t{i}"));
        current = tree.add_internal_vertex(vec![current, leaf], Some(BranchLength::new(1.0)), None);
    }
    let last = tree.add_leaf(Some(BranchLength::new(1.0)), "t10000".to_string());
    tree.add_root(vec![current, last], None, None);

    assert!(tree.is_valid());
    assert_eq!(tree.post_order_iter().count(), tree.num_vertices());
    assert_eq!(tree.num_leaves(), 10_001);
}

#[test]
fn test_invalid_trees() {
    assert!(!PhylogeneticTree::new().is_valid());

    let mut duplicate = PhylogeneticTree::new();
    let a = duplicate.add_leaf(None, "A".to_string());
    let b = duplicate.add_leaf(None, "A".to_string());
    duplicate.add_root(vec![a, b], None, None);
    assert!(!duplicate.is_valid());

    let mut empty_name = PhylogeneticTree::new();
    let a = empty_name.add_leaf(None, String::new());
    let b = empty_name.add_leaf(None, "B".to_string());
    empty_name.add_root(vec![a, b], None, None);
    assert!(!empty_name.is_valid());

    let mut unreachable = PhylogeneticTree::new();
    let a = unreachable.add_leaf(None, "A".to_string());
    let b = unreachable.add_leaf(None, "B".to_string());
    unreachable.add_leaf(None, "C".to_string());
    unreachable.add_root(vec![a, b], None, None);
    assert!(!unreachable.is_valid());
}

#[test]
#[should_panic]
fn test_root_of_empty_tree_panics() {
    let tree = PhylogeneticTree::new();
    tree.root();
}

#[test]
fn test_try_root_on_empty_tree() {
    let tree = PhylogeneticTree::new();
    assert!(tree.try_root().is_none());
    assert!(!tree.is_root_set());
}

#[test]
#[should_panic]
fn test_index_out_of_bounds_panics() {
    let tree = PhylogeneticTree::new();
    let _ = &tree[3];
}

// ----- branch lengths -----

#[test]
fn test_branch_length_arithmetic() {
    let vertex = Vertex::new_internal(5, vec![1, 2], Some(BranchLength::new(1.234)), None);
    assert_eq!(vertex.branch_length_or_zero(), 1.234);
    assert_eq!(vertex.kind(), VertexKind::Internal);
    assert_eq!(BranchLength::new(0.5) + BranchLength::new(0.25), BranchLength::new(0.75));
}

#[test]
#[should_panic]
fn test_negative_branch_length() {
    let _ = BranchLength::new(-1.0);
}

#[test]
fn test_try_new_branch_length() {
    assert!(BranchLength::try_new(-0.1).is_none());
    assert!(BranchLength::try_new(f64::NAN).is_none());
    assert!(BranchLength::try_new(f64::INFINITY).is_none());
    assert_eq!(*BranchLength::try_new(-0.0).unwrap(), 0.0);
}

// ----- vertices -----

#[test]
fn test_parent_unset() {
    let vertex = Vertex::new_internal(0, vec![1, 2], None, None);
    assert_eq!(vertex.parent(), None);
    assert!(!vertex.has_parent());

    let leaf = Vertex::new_leaf(0, Some(BranchLength::new(0.5)), "Tui".to_string());
    assert_eq!(leaf.parent(), None);
    assert_eq!(leaf.name(), None);
}

#[test]
#[should_panic]
fn test_set_parent_on_root_panics() {
    let mut root = Vertex::new_root(0, vec![1, 2], None, None);
    root.set_parent(3);
}

// ----- builder and resolver -----

#[test]
fn test_builder_tracks_labels_per_tree() {
    let mut builder = TreeBuilder::new();
    builder.init_next(2);
    let a = builder.add_leaf(None, "A".to_string());
    assert!(!builder.is_new_label("A"));
    let b = builder.add_leaf(None, "B".to_string());
    builder.add_root(vec![a, b], None, None);
    builder.set_name("first".to_string());
    let tree = builder.finish_tree();

    assert!(tree.is_valid());
    assert_eq!(tree.name(), Some("first"));

    builder.init_next(2);
    assert!(builder.is_new_label("A"));
}

#[test]
fn test_resolver_order() {
    let translation = HashMap::from([
        ("1".to_string(), "Pukeko".to_string()),
        ("tak".to_string(), "Takahe".to_string()),
    ]);
    let taxa = vec!["Pukeko".to_string(), "Takahe".to_string(), "Weka".to_string()];
    let resolver = LabelResolver::for_nexus(Some(translation), taxa);

    assert_eq!(resolver.resolve_label("tak").unwrap(), "Takahe");
    assert_eq!(resolver.resolve_label("1").unwrap(), "Pukeko");
    assert_eq!(resolver.resolve_label("3").unwrap(), "Weka");
    assert_eq!(resolver.resolve_label("Weka").unwrap(), "Weka");
    assert!(resolver.resolve_label("4").is_err());
    assert_eq!(LabelResolver::Verbatim.resolve_label("4").unwrap(), "4");
}
