//! Reconciliation of a divergence tree with the root of a reference tree.
//!
//! The reference (time-scaled) tree defines a root split, see
//! [derive_bipartition]. The divergence tree is re-rooted on the edge above
//! the MRCA of the smaller side ([reroot_to_match]), so that both trees
//! share the split, and then root-to-tip distances are read off
//! ([root_to_tip]).

mod bipartition;
mod distance;
mod reroot;

pub use self::bipartition::{Bipartition, Side, complement_side, derive_bipartition, select_outgroup};
pub use self::distance::{RootToTipRecord, root_to_tip};
pub use self::reroot::{find_mrca, reroot_at, reroot_to_match};

use crate::error::RttError;
use crate::model::PhylogeneticTree;

/// Re-roots `tree` to match the given bipartition.
///
/// Uses the smaller side as outgroup. If none of its tips is present in
/// `tree`, retries once with the other side.
///
/// # Returns
/// The re-rooted tree and the side whose MRCA was used.
///
/// # Errors
/// [RttError::Structural] if neither side shares a tip with `tree`.
pub fn reconcile_root(
    tree: PhylogeneticTree,
    bipartition: &Bipartition,
) -> Result<(PhylogeneticTree, Side), RttError> {
    let side = bipartition.outgroup_side();
    let outgroup = select_outgroup(&bipartition.a, &bipartition.b);
    let (mrca, side) = match find_mrca(&tree, outgroup) {
        Ok(mrca) => (mrca, side),
        Err(RttError::Structural(msg)) => {
            log::warn!(
                "Outgroup side {} has no tips in the divergence tree ({}); trying side {}",
                side,
                msg,
                side.other()
            );
            let fallback = complement_side(&bipartition.a, &bipartition.b);
            (find_mrca(&tree, fallback)?, side.other())
        }
        Err(err) => return Err(err),
    };

    log::debug!(
        "Re-rooting on MRCA of side {} ({} tips in reference)",
        side,
        bipartition.side(side).len()
    );
    Ok((reroot_at(tree, mrca), side))
}
