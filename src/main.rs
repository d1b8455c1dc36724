use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use rtt_reconcile::pipeline::{self, DEFAULT_OUTPUT, RttConfig};
use std::path::PathBuf;

/// Recreate the root-to-tip table from TreeTime outputs: re-root the
/// divergence tree to the time tree's root split and join sampling dates.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Divergence tree, e.g. treetime_output/divergence_tree.nexus
    #[arg(long)]
    divergence_tree: PathBuf,

    /// Time tree defining the root split, e.g. treetime_output/timetree.nexus
    #[arg(long)]
    timetree: PathBuf,

    /// Tab-separated dates table, e.g. metadata/dates.tsv (decimal years)
    #[arg(long)]
    dates: PathBuf,

    /// Output CSV
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    out: PathBuf,

    /// Name column of the dates table (auto-detected if omitted)
    #[arg(long)]
    name_column: Option<String>,

    /// Date column of the dates table (auto-detected if omitted)
    #[arg(long)]
    date_column: Option<String>,

    /// Number of lines to skip at the top of the dates table
    #[arg(long, default_value_t = 0)]
    skiprows: usize,

    /// Also write the re-rooted divergence tree to this path (Newick)
    #[arg(long)]
    rerooted_tree: Option<PathBuf>,
}

impl From<Cli> for RttConfig {
    fn from(cli: Cli) -> Self {
        RttConfig {
            divergence_tree: cli.divergence_tree,
            timetree: cli.timetree,
            dates: cli.dates,
            out: cli.out,
            name_column: cli.name_column,
            date_column: cli.date_column,
            skiprows: cli.skiprows,
            rerooted_tree: cli.rerooted_tree,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = RttConfig::from(cli);
    let summary = pipeline::run(&config).with_context(|| {
        format!(
            "could not build RTT table from {} and {}",
            config.divergence_tree.display(),
            config.timetree.display()
        )
    })?;

    println!("Wrote {} rows → {}", summary.rows_written, summary.output.display());
    if summary.missing_dates > 0 {
        println!(
            "Note: {} tips have no date in the TSV (left empty).",
            summary.missing_dates
        );
    }

    Ok(())
}
