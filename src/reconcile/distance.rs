//! Root-to-tip distances.

use crate::error::RttError;
use crate::model::PhylogeneticTree;

/// One output row: a tip, its distance from the root and, once merged, its date.
#[derive(Debug, Clone, PartialEq)]
pub struct RootToTipRecord {
    pub name: String,
    pub root_to_tip: f64,
    pub date: Option<f64>,
}

/// Returns the root-to-tip distance of every tip, in pre-order.
///
/// Unset branch lengths count as zero; a root edge is not included.
/// The `date` of every record is `None`.
///
/// # Errors
/// [RttError::State] if the tree has no root or is structurally invalid.
///
/// # Example
/// ```
/// use rtt_reconcile::parse_tree;
/// use rtt_reconcile::reconcile::root_to_tip;
///
/// let tree = parse_tree("((A:0.5,B:1):0.25,C):3;").unwrap();
/// let records = root_to_tip(&tree).unwrap();
/// let distances: Vec<f64> = records.iter().map(|r| r.root_to_tip).collect();
/// assert_eq!(distances, vec![0.75, 1.25, 0.0]);
/// ```
pub fn root_to_tip(tree: &PhylogeneticTree) -> Result<Vec<RootToTipRecord>, RttError> {
    if !tree.is_valid() {
        return Err(RttError::State("tree is not rooted".to_string()));
    }

    let root_index = tree.root_index();
    let mut distances = vec![0.0; tree.num_vertices()];
    let mut records = Vec::with_capacity(tree.num_leaves());
    for vertex in tree.pre_order_iter() {
        let index = vertex.index();
        if index != root_index {
            if let Some(parent) = vertex.parent() {
                distances[index] = distances[parent] + vertex.branch_length_or_zero();
            }
        }

        if let Some(label) = vertex.label() {
            records.push(RootToTipRecord {
                name: label.to_string(),
                root_to_tip: distances[index],
                date: None,
            });
        }
    }

    Ok(records)
}
