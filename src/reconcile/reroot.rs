//! MRCA lookup and re-rooting by rebuilding the arena.

use crate::error::RttError;
use crate::model::{BranchLength, PhylogeneticTree, VertexIndex};
use std::collections::BTreeSet;

/// Returns the most recent common ancestor of all leaves whose names are in
/// `names`; names absent from the tree are ignored.
///
/// A single present name yields that leaf itself.
///
/// # Errors
/// [RttError::Structural] if none of the names is a tip of `tree`.
pub fn find_mrca(tree: &PhylogeneticTree, names: &BTreeSet<String>) -> Result<VertexIndex, RttError> {
    let mut present = vec![0usize; tree.num_vertices()];
    let mut total = 0;
    for vertex in tree.post_order_iter() {
        let index = vertex.index();
        present[index] = match vertex.label() {
            Some(label) if names.contains(label) => {
                total += 1;
                1
            }
            Some(_) => 0,
            None => vertex.children().iter().map(|&c| present[c]).sum(),
        };
    }

    if total == 0 {
        return Err(RttError::Structural(
            "none of the provided tips are present to define the MRCA".to_string(),
        ));
    }

    // Post-order reaches the deepest vertex covering all present tips first.
    tree.post_order_iter()
        .map(|v| v.index())
        .find(|&index| present[index] == total)
        .ok_or_else(|| RttError::State("tree is not rooted".to_string()))
}

/// Re-roots `tree` on the edge above `outgroup`.
///
/// The new root has two children: the rest of the tree first, then the
/// `outgroup` clade with branch length zero. The rest of the tree keeps the
/// full length of the original edge above `outgroup`. Edges on the path to
/// the old root are reversed; an old root left with a single child is
/// suppressed, adding its edge length to that child's. Pairwise distances
/// between tips are preserved. If `outgroup` is the root, the tree is
/// returned as is.
///
/// # Panics
/// Panics if `outgroup` is not a vertex of `tree`.
///
/// # Example
/// ```
/// use rtt_reconcile::parse_tree;
/// use rtt_reconcile::newick::to_newick;
/// use rtt_reconcile::reconcile::reroot_at;
///
/// let tree = parse_tree("(((A:1,B:1):1,C:1):1,D:1);").unwrap();
/// let a = tree.leaf_index("A").unwrap();
/// let ab = tree.vertex(a).parent().unwrap();
///
/// let rerooted = reroot_at(tree, ab);
/// assert_eq!(to_newick(&rerooted), "((D:2,C:1):1,(A:1,B:1):0);");
/// ```
pub fn reroot_at(tree: PhylogeneticTree, outgroup: VertexIndex) -> PhylogeneticTree {
    let path = tree.path_to_root(outgroup);
    if path.len() < 2 {
        return tree;
    }

    let num_vertices = tree.num_vertices();
    let new_root = num_vertices;
    let old_root = tree.root_index();

    let mut children: Vec<Vec<VertexIndex>> = (0..num_vertices)
        .map(|i| tree[i].children().to_vec())
        .collect();
    let mut branch_lengths: Vec<Option<BranchLength>> =
        (0..num_vertices).map(|i| tree[i].branch_length()).collect();
    let mut parents: Vec<Option<VertexIndex>> = (0..num_vertices).map(|i| tree[i].parent()).collect();

    // New root over (rest, outgroup)
    children.push(vec![path[1], outgroup]);
    branch_lengths.push(tree.root().branch_length());
    parents.push(None);

    let mut prev_branch_length = Some(tree[outgroup].branch_length().unwrap_or(BranchLength::ZERO));
    branch_lengths[outgroup] = Some(BranchLength::ZERO);
    parents[outgroup] = Some(new_root);
    parents[path[1]] = Some(new_root);

    // Reverse the edges on the path up to the old root
    for i in 1..path.len() {
        let current = path[i];
        children[current].retain(|&c| c != path[i - 1]);
        if let Some(&next) = path.get(i + 1) {
            children[current].insert(0, next);
            parents[next] = Some(current);
        }
        let original = branch_lengths[current];
        branch_lengths[current] = prev_branch_length;
        prev_branch_length = original;
    }

    // Suppress the old root if it became unary. If it became empty, drop it
    // together with every ancestor that is left childless in turn.
    let old_root_parent = parents[old_root].unwrap_or(new_root);
    match children[old_root].len() {
        0 => {
            let mut empty = old_root;
            while let Some(parent) = parents[empty] {
                children[parent].retain(|&c| c != empty);
                if !children[parent].is_empty() {
                    break;
                }
                empty = parent;
            }
        }
        1 => {
            let ingroup = children[old_root][0];
            branch_lengths[ingroup] = match (branch_lengths[ingroup], branch_lengths[old_root]) {
                (None, None) => None,
                (a, b) => Some(a.unwrap_or(BranchLength::ZERO) + b.unwrap_or(BranchLength::ZERO)),
            };
            for child in children[old_root_parent].iter_mut() {
                if *child == old_root {
                    *child = ingroup;
                }
            }
            children[old_root].clear();
        }
        _ => {}
    }

    rebuild(&tree, new_root, &children, &branch_lengths)
}

/// Builds a fresh tree from adjacency lists over the old indices, where
/// `new_root` (one past the old arena) is the root.
fn rebuild(
    tree: &PhylogeneticTree,
    new_root: VertexIndex,
    children: &[Vec<VertexIndex>],
    branch_lengths: &[Option<BranchLength>],
) -> PhylogeneticTree {
    let mut rebuilt = PhylogeneticTree::with_capacity(children.len());
    if let Some(name) = tree.name() {
        rebuilt.set_name(name.to_string());
    }

    let mut new_index = vec![usize::MAX; children.len()];
    let mut stack = vec![(new_root, false)];
    while let Some((old, children_done)) = stack.pop() {
        if !children_done && !children[old].is_empty() {
            stack.push((old, true));
            for &child in children[old].iter().rev() {
                stack.push((child, false));
            }
            continue;
        }

        let mapped: Vec<VertexIndex> = children[old].iter().map(|&c| new_index[c]).collect();
        new_index[old] = if old == new_root {
            rebuilt.add_root(mapped, branch_lengths[old], None)
        } else if let Some(label) = tree[old].label() {
            rebuilt.add_leaf(branch_lengths[old], label.to_string())
        } else {
            rebuilt.add_internal_vertex(
                mapped,
                branch_lengths[old],
                tree[old].name().map(str::to_string),
            )
        };
    }

    rebuilt
}

/// Re-roots `tree` so that the tips named in `outgroup` form one side of the root.
///
/// # Errors
/// [RttError::Structural] if none of the names is a tip of `tree`.
pub fn reroot_to_match(
    tree: PhylogeneticTree,
    outgroup: &BTreeSet<String>,
) -> Result<PhylogeneticTree, RttError> {
    let mrca = find_mrca(&tree, outgroup)?;
    Ok(reroot_at(tree, mrca))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_tree;

    fn names(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_mrca_of_pair_and_single() {
        let tree = parse_tree("((A,B)AB,(C,D)CD)R;").unwrap();
        let mrca = find_mrca(&tree, &names(&["A", "B", "Z"])).unwrap();
        assert_eq!(tree[mrca].name(), Some("AB"));

        let single = find_mrca(&tree, &names(&["C"])).unwrap();
        assert_eq!(tree[single].label(), Some("C"));

        let across = find_mrca(&tree, &names(&["A", "D"])).unwrap();
        assert_eq!(across, tree.root_index());
    }

    #[test]
    fn test_mrca_without_present_tips() {
        let tree = parse_tree("((A,B),(C,D));").unwrap();
        assert!(matches!(
            find_mrca(&tree, &names(&["X"])),
            Err(RttError::Structural(_))
        ));
    }

    #[test]
    fn test_reroot_at_root_is_identity() {
        let tree = parse_tree("((A:1,B:2):1,C:3);").unwrap();
        let root = tree.root_index();
        let rerooted = reroot_at(tree.clone(), root);
        assert_eq!(rerooted.num_vertices(), tree.num_vertices());
        assert_eq!(rerooted.root_index(), root);
    }

    #[test]
    fn test_reroot_keeps_multifurcating_old_root() {
        let tree = parse_tree("((A:1,B:1):1,C:2,D:3);").unwrap();
        let a = tree.leaf_index("A").unwrap();
        let rerooted = reroot_at(tree, a);

        assert!(rerooted.is_valid());
        assert_eq!(rerooted.num_leaves(), 4);
        assert_eq!(rerooted.root().num_children(), 2);
        // old root stays as an internal vertex with C and D
        assert_eq!(rerooted.num_vertices(), 7);
    }

    #[test]
    fn test_reroot_on_leaf_directly_below_root() {
        let tree = parse_tree("((A:1,B:1):2,C:3);").unwrap();
        let c = tree.leaf_index("C").unwrap();
        let rerooted = reroot_at(tree, c);

        assert!(rerooted.is_valid());
        let root = rerooted.root();
        let ab = &rerooted[root.children()[0]];
        let c = &rerooted[root.children()[1]];
        assert_eq!(c.label(), Some("C"));
        assert_eq!(c.branch_length_or_zero(), 0.0);
        assert_eq!(ab.branch_length_or_zero(), 5.0);
    }

    #[test]
    fn test_unary_chain_above_outgroup() {
        let tree = parse_tree("((((A:1,B:1):1,C:1):1):1);").unwrap();
        let rerooted = reroot_to_match(tree, &names(&["A", "B"])).unwrap();

        assert!(rerooted.is_valid());
        assert_eq!(rerooted.num_leaves(), 3);
        let root = rerooted.root();
        assert_eq!(rerooted.subtree_tip_names(root.children()[1]), names(&["A", "B"]));

        let rtt: Vec<(String, f64)> = crate::reconcile::root_to_tip(&rerooted)
            .unwrap()
            .into_iter()
            .map(|r| (r.name, r.root_to_tip))
            .collect();
        assert_eq!(
            rtt,
            vec![("C".to_string(), 2.0), ("A".to_string(), 1.0), ("B".to_string(), 1.0)]
        );
    }

    #[test]
    fn test_branch_lengths_absent_stay_absent() {
        let tree = parse_tree("(((A,B),C),D);").unwrap();
        let a = tree.leaf_index("A").unwrap();
        let ab = tree[a].parent().unwrap();
        let rerooted = reroot_at(tree, ab);

        assert!(rerooted.is_valid());
        let d = rerooted.leaf_index("D").unwrap();
        assert!(!rerooted[d].has_branch_length());
    }
}
