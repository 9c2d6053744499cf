//! statement-mill
//!
//! Batch generator for synthetic bank and credit-card PDF statements.
//! Reads a transaction ledger CSV, buckets it into statement periods,
//! draws each period's rows onto overlay pages at fixed coordinates, and
//! stamps those onto a static template PDF: one output file per
//! non-empty period.

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod config;
mod run;
#[cfg(test)]
mod tests;

use run::StatementKind;

/// Command-line arguments for the statement mill
#[derive(Parser, Debug)]
#[command(name = "statement-mill")]
#[command(about = "Generates synthetic PDF statements from a ledger CSV")]
struct Args {
    /// Path to the ledger CSV export
    #[arg(long)]
    ledger: Option<PathBuf>,

    /// Path to the statement template PDF
    #[arg(long)]
    template: Option<PathBuf>,

    /// Directory the generated statements are written to
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Statement kind to generate
    #[arg(long, value_enum)]
    kind: Option<StatementKind>,

    /// Statement year for a single-period run
    #[arg(long, requires = "month")]
    year: Option<i32>,

    /// Statement month for a single-period run
    #[arg(long, requires = "year")]
    month: Option<u32>,

    /// Optional TOML profile supplying defaults for the flags above
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write the intermediate overlay PDFs next to the statements
    #[arg(long)]
    keep_overlays: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = config::resolve(&args)?;
    run::run(&settings)
}
