//! rtt-reconcile re-roots a divergence tree so that its root split matches
//! the root split of a time-scaled tree over the same taxa, and tabulates the
//! root-to-tip distance of every tip against its sampling date.
//!
//! Core functionality provided:
//! - Reading: Newick strings and Nexus files (TAXA and TREES blocks with
//!   optional TRANSLATE), after stripping `[&...]` annotations; see
//!   [parse_tree] and [parse_tree_file].
//! - Tree model: an arena-based rooted tree with multifurcations, see
//!   [crate::model].
//! - Reconciliation: root bipartition of the reference tree, outgroup
//!   selection, MRCA lookup, re-rooting and root-to-tip distances; see
//!   [crate::reconcile].
//! - Dates: reading a tab-separated metadata table, detecting its name and
//!   date columns, and left-joining dates onto the distances; see
//!   [crate::dates].
//! - Pipeline: the whole run from file paths to an output CSV, see
//!   [crate::pipeline].
//!
//! # Example
//! ```
//! use rtt_reconcile::parse_tree;
//! use rtt_reconcile::reconcile::{derive_bipartition, reconcile_root, root_to_tip};
//!
//! let reference = parse_tree("((A:1,B:1):1,(C:1,D:1):1);").unwrap();
//! let divergence = parse_tree("(((A:1,B:1):1,C:1):1,D:1);").unwrap();
//!
//! let bipartition = derive_bipartition(&reference).unwrap();
//! let (rerooted, _side) = reconcile_root(divergence, &bipartition).unwrap();
//! let records = root_to_tip(&rerooted).unwrap();
//!
//! let d = records.iter().find(|r| r.name == "D").unwrap();
//! assert_eq!(d.root_to_tip, 3.0);
//! ```

pub mod dates;
pub mod error;
pub mod model;
pub mod newick;
pub mod nexus;
pub mod parser;
pub mod pipeline;
pub mod reconcile;

pub use crate::error::RttError;
pub use crate::model::PhylogeneticTree;

use crate::parser::parsing_error::{ParsingError, ParsingErrorType};
use crate::parser::preprocess::{TreeFormat, detect_format, strip_annotations};
use std::fs;
use std::path::Path;

// ============================================================================
// Quick tree API
// ============================================================================
/// Parses a tree description in Newick or Nexus format.
///
/// All `[&...]` annotations are removed first; the format is then detected
/// by a `#NEXUS` marker near the start of the text. For Nexus, the first
/// tree of the TREES block is returned with its labels translated; for
/// Newick, the first tree of the text.
///
/// # Errors
/// Returns a [ParsingError] if the text is not a valid rooted tree
/// description, e.g. unbalanced parentheses, a missing `;`, a negative
/// branch length, duplicate tip names, or no tree at all.
pub fn parse_tree<S: AsRef<str>>(text: S) -> Result<PhylogeneticTree, ParsingError> {
    let stripped = strip_annotations(text.as_ref());
    let tree = match detect_format(&stripped) {
        TreeFormat::Nexus => nexus::parse_str(&stripped)?,
        TreeFormat::Newick => newick::parse_str(&stripped)?,
    };

    log::debug!(
        "Parsed tree{} with {} tips",
        tree.name().map(|n| format!(" '{n}'")).unwrap_or_default(),
        tree.num_leaves()
    );
    Ok(tree)
}

/// Reads a file and parses it with [parse_tree].
///
/// # Errors
/// Returns a [ParsingError] of kind [`ParsingErrorType::IoError`] naming the
/// path if the file cannot be read, or any error of [parse_tree].
pub fn parse_tree_file<P: AsRef<Path>>(path: P) -> Result<PhylogeneticTree, ParsingError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| {
        ParsingError::without_context(ParsingErrorType::IoError(format!(
            "{}: {}",
            path.display(),
            err
        )))
    })?;

    parse_tree(text)
}
