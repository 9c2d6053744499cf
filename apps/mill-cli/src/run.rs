//! Batch statement generation
//!
//! The single-pass pipeline: load the ledger, work out which statement
//! periods it covers, then render, stamp, and write one PDF per non-empty
//! period. A stamp-and-write failure is logged and the batch moves on to
//! the next period; everything else propagates.

use std::fs;
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use serde::Deserialize;
use tracing::{debug, error, info};

use overlay_engine::{
    build_overlay_document, load_template, render_card, render_chequing, stamp_template,
    write_document, MergePolicy, OverlayPage,
};
use statement_core::{
    build_card_statement, build_chequing_statement, date_range, periods_covering, read_ledger,
    LedgerEntry, PeriodScheme, StatementPeriod,
};

use crate::config::Settings;

/// The two statement layouts the mill can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatementKind {
    Chequing,
    CreditCard,
}

impl StatementKind {
    /// Calendar scheme bucketing the ledger for this kind.
    pub fn scheme(&self) -> PeriodScheme {
        match self {
            StatementKind::Chequing => PeriodScheme::CalendarMonth,
            StatementKind::CreditCard => PeriodScheme::MidMonthCycle,
        }
    }

    /// How overlay pages land on template pages.
    pub fn merge_policy(&self) -> MergePolicy {
        match self {
            StatementKind::Chequing => MergePolicy::RepeatLast,
            StatementKind::CreditCard => MergePolicy::LeadingPages,
        }
    }

    /// Output file name for one period.
    pub fn file_name(&self, period: &StatementPeriod) -> String {
        let prefix = match self {
            StatementKind::Chequing => "chequing_statement",
            StatementKind::CreditCard => "credit_card_statement",
        };
        format!("{}_{}.pdf", prefix, period.file_stem())
    }
}

/// Run one batch with fully resolved settings.
pub fn run(settings: &Settings) -> anyhow::Result<()> {
    let entries = read_ledger(&settings.ledger)
        .with_context(|| format!("Failed to load ledger {}", settings.ledger.display()))?;
    info!("Loaded {} ledger entries", entries.len());

    let scheme = settings.kind.scheme();
    let periods = match settings.period {
        Some((year, month)) => vec![StatementPeriod::new(scheme, year, month)?],
        None => {
            let (min, max) = date_range(&entries).context("Ledger has no entries")?;
            info!("Ledger covers {} to {}", min, max);
            periods_covering(scheme, min, max)
        }
    };

    fs::create_dir_all(&settings.out_dir)
        .with_context(|| format!("Failed to create {}", settings.out_dir.display()))?;

    let mut written = 0usize;
    for period in periods {
        let Some(pages) = render_period(&entries, settings.kind, period) else {
            info!("No transactions for {}", period.label());
            continue;
        };
        debug!("{}: {} overlay page(s)", period.label(), pages.len());

        let file_name = settings.kind.file_name(&period);
        if settings.keep_overlays {
            let overlay_path = settings.out_dir.join(format!("overlay_{}", file_name));
            if let Err(e) = write_overlay(&pages, &overlay_path) {
                error!("Failed to write overlay {}: {}", overlay_path.display(), e);
            }
        }

        // One bad period must not sink the rest of the batch
        let output = settings.out_dir.join(file_name);
        match stamp_and_write(&settings.template, &pages, settings.kind.merge_policy(), &output) {
            Ok(()) => {
                info!("Generated {}", output.display());
                written += 1;
            }
            Err(e) => {
                error!(
                    "Failed to stamp {} statement onto {}: {}",
                    period.label(),
                    settings.template.display(),
                    e
                );
            }
        }
    }

    info!(
        "Wrote {} statement(s) to {}",
        written,
        settings.out_dir.display()
    );
    Ok(())
}

/// Overlay pages for one period, or `None` when no entry fell inside it.
fn render_period(
    entries: &[LedgerEntry],
    kind: StatementKind,
    period: StatementPeriod,
) -> Option<Vec<OverlayPage>> {
    match kind {
        StatementKind::Chequing => {
            let statement = build_chequing_statement(entries, period);
            if statement.is_empty() {
                return None;
            }
            info!("{}: {} transactions", period.label(), statement.lines.len());
            Some(render_chequing(&statement))
        }
        StatementKind::CreditCard => {
            let statement = build_card_statement(entries, period);
            if statement.is_empty() {
                return None;
            }
            info!("{}: {} transactions", period.label(), statement.lines.len());
            Some(render_card(&statement))
        }
    }
}

fn stamp_and_write(
    template: &Path,
    pages: &[OverlayPage],
    policy: MergePolicy,
    output: &Path,
) -> anyhow::Result<()> {
    let mut document = load_template(template)?;
    stamp_template(&mut document, pages, policy)?;
    write_document(&mut document, output)?;
    Ok(())
}

fn write_overlay(pages: &[OverlayPage], path: &Path) -> anyhow::Result<()> {
    let mut document = build_overlay_document(pages)?;
    write_document(&mut document, path)?;
    Ok(())
}
