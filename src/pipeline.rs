//! End-to-end run: trees and date table in, root-to-tip CSV out.

use crate::dates::{DateTable, count_missing_dates, merge_dates, write_rtt_csv};
use crate::error::RttError;
use crate::newick::write_newick_file;
use crate::parse_tree_file;
use crate::reconcile::{Side, derive_bipartition, reconcile_root, root_to_tip};
use std::path::PathBuf;

/// Default output path of the root-to-tip table
pub const DEFAULT_OUTPUT: &str = "rtt_from_fullrun.csv";

/// Configuration of a run.
#[derive(Debug, Clone)]
pub struct RttConfig {
    /// Tree whose root-to-tip distances are tabulated (Newick or Nexus)
    pub divergence_tree: PathBuf,
    /// Time-scaled tree defining the root split (Newick or Nexus)
    pub timetree: PathBuf,
    /// Tab-separated table with tip names and decimal dates
    pub dates: PathBuf,
    /// Output CSV path
    pub out: PathBuf,
    /// Explicit name column of the date table
    pub name_column: Option<String>,
    /// Explicit date column of the date table
    pub date_column: Option<String>,
    /// Lines to skip at the top of the date table, before its header
    pub skiprows: usize,
    /// Optional path to write the re-rooted divergence tree to, as Newick
    pub rerooted_tree: Option<PathBuf>,
}

impl RttConfig {
    /// Creates a configuration with the default output path and no overrides.
    pub fn new(
        divergence_tree: impl Into<PathBuf>,
        timetree: impl Into<PathBuf>,
        dates: impl Into<PathBuf>,
    ) -> Self {
        RttConfig {
            divergence_tree: divergence_tree.into(),
            timetree: timetree.into(),
            dates: dates.into(),
            out: PathBuf::from(DEFAULT_OUTPUT),
            name_column: None,
            date_column: None,
            skiprows: 0,
            rerooted_tree: None,
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Number of rows written (one per divergence tree tip)
    pub rows_written: usize,
    /// Path of the written CSV
    pub output: PathBuf,
    /// Number of rows without a date
    pub missing_dates: usize,
    /// Side of the reference bipartition whose MRCA was used
    pub outgroup_side: Side,
}

/// Runs the whole pipeline for `config`.
///
/// 1. Parse both trees
/// 2. Derive the root bipartition of the time tree
/// 3. Re-root the divergence tree on it, falling back to the other side once
/// 4. Compute root-to-tip distances
/// 5. Read the date table, detect its columns and left-join dates
/// 6. Write the CSV (and the re-rooted tree, if asked for)
///
/// # Errors
/// Any [RttError]; all are fatal.
pub fn run(config: &RttConfig) -> Result<RunSummary, RttError> {
    let divergence = parse_tree_file(&config.divergence_tree)?;
    let timetree = parse_tree_file(&config.timetree)?;
    log::info!(
        "Read divergence tree with {} tips and time tree with {} tips",
        divergence.num_leaves(),
        timetree.num_leaves()
    );

    let bipartition = derive_bipartition(&timetree)?;
    log::info!(
        "Time tree root split: {} vs {} tips",
        bipartition.a.len(),
        bipartition.b.len()
    );

    let reference_tips = bipartition.all_tips();
    let unmatched = divergence
        .tip_names()
        .into_iter()
        .filter(|name| !reference_tips.contains(name))
        .count();
    if unmatched > 0 {
        log::info!("{} divergence tree tips are not in the time tree root split", unmatched);
    }

    let (rerooted, outgroup_side) = reconcile_root(divergence, &bipartition)?;
    log::info!("Re-rooted divergence tree using side {} as outgroup", outgroup_side);

    if let Some(path) = &config.rerooted_tree {
        write_newick_file(path, std::slice::from_ref(&rerooted)).map_err(|err| RttError::io(path, err))?;
        log::info!("Wrote re-rooted tree to {}", path.display());
    }

    let records = root_to_tip(&rerooted)?;

    let table = DateTable::from_path(&config.dates, config.skiprows)?;
    let merged = merge_dates(
        records,
        &table,
        config.name_column.as_deref(),
        config.date_column.as_deref(),
    )?;

    write_rtt_csv(&merged, &config.out)?;
    log::debug!("Wrote {} rows to {}", merged.len(), config.out.display());

    Ok(RunSummary {
        rows_written: merged.len(),
        output: config.out.clone(),
        missing_dates: count_missing_dates(&merged),
        outgroup_side,
    })
}
