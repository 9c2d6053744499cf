//! Run configuration
//!
//! CLI flags resolve against an optional TOML profile; a flag always wins
//! over the profile value it shadows.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::run::StatementKind;
use crate::Args;

/// Optional TOML profile supplying defaults for the CLI flags.
///
/// ```toml
/// ledger = "ledger.csv"
/// template = "templates/chequing.pdf"
/// out_dir = "statements"
/// kind = "chequing"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub ledger: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub kind: Option<StatementKind>,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl Profile {
    /// Load a profile from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse a profile from a TOML string.
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML profile")
    }
}

/// Fully resolved settings for one batch run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub ledger: PathBuf,
    pub template: PathBuf,
    pub out_dir: PathBuf,
    pub kind: StatementKind,
    /// `Some((year, month))` restricts the run to a single period.
    pub period: Option<(i32, u32)>,
    pub keep_overlays: bool,
}

/// Merge the CLI flags over the optional profile.
pub fn resolve(args: &Args) -> anyhow::Result<Settings> {
    let profile = match &args.config {
        Some(path) => Profile::from_file(path)?,
        None => Profile::default(),
    };

    let ledger = args
        .ledger
        .clone()
        .or(profile.ledger)
        .context("--ledger is required (flag or profile)")?;
    let template = args
        .template
        .clone()
        .or(profile.template)
        .context("--template is required (flag or profile)")?;
    let out_dir = args
        .out_dir
        .clone()
        .or(profile.out_dir)
        .context("--out-dir is required (flag or profile)")?;
    let kind = args
        .kind
        .or(profile.kind)
        .context("--kind is required (flag or profile)")?;

    // clap enforces that --year and --month come together
    let period = match (args.year, args.month) {
        (Some(year), Some(month)) => Some((year, month)),
        _ => profile.year.zip(profile.month),
    };

    Ok(Settings {
        ledger,
        template,
        out_dir,
        kind,
        period,
        keep_overlays: args.keep_overlays,
    })
}
