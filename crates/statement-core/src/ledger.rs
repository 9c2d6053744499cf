//! Ledger ingestion
//!
//! Reads the CSV export of the transaction ledger. Column headers are
//! trimmed of stray whitespace, rows deserialize into [`LedgerEntry`]
//! records, and the result is sorted by transaction date.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::error::StatementError;

/// One transaction row from the ledger.
///
/// Amounts are optionally absent: a row is typically either a debit or a
/// credit, and some exports omit the running balance. `reference` and
/// `beginning_balance` only appear on credit-card exports; they read as
/// `None` when the column is missing entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerEntry {
    #[serde(rename = "Date", deserialize_with = "de_date")]
    pub date: NaiveDate,
    #[serde(rename = "Payee")]
    pub payee: String,
    #[serde(rename = "Debit")]
    pub debit: Option<Decimal>,
    #[serde(rename = "Credit")]
    pub credit: Option<Decimal>,
    #[serde(rename = "Closing Balance")]
    pub closing_balance: Option<Decimal>,
    #[serde(rename = "Reference", default)]
    pub reference: Option<String>,
    #[serde(rename = "Beginning Balance", default)]
    pub beginning_balance: Option<Decimal>,
}

/// Read and sort the ledger at `path`.
pub fn read_ledger<P: AsRef<Path>>(path: P) -> Result<Vec<LedgerEntry>, StatementError> {
    let file = File::open(path.as_ref())?;
    let entries = read_entries(file)?;
    debug!(
        "Loaded {} ledger entries from {}",
        entries.len(),
        path.as_ref().display()
    );
    Ok(entries)
}

/// Read ledger entries from any CSV source and sort them by date.
pub fn read_entries<R: Read>(reader: R) -> Result<Vec<LedgerEntry>, StatementError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut entries = Vec::new();
    for (i, record) in reader.deserialize::<LedgerEntry>().enumerate() {
        // +2: one for the header row, one for 1-based numbering
        let entry =
            record.map_err(|e| StatementError::Parse(format!("line {}: {}", i + 2, e)))?;
        entries.push(entry);
    }

    entries.sort_by_key(|entry| entry.date);
    Ok(entries)
}

/// Earliest and latest transaction dates, or `None` for an empty ledger.
pub fn date_range(entries: &[LedgerEntry]) -> Option<(NaiveDate, NaiveDate)> {
    let min = entries.iter().map(|entry| entry.date).min()?;
    let max = entries.iter().map(|entry| entry.date).max()?;
    Some((min, max))
}

/// Parse a ledger date in either ISO (`2022-03-01`) or US (`03/01/2022`) form.
pub fn parse_date(raw: &str) -> Result<NaiveDate, StatementError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%m/%d/%Y"))
        .map_err(|_| StatementError::InvalidDate(trimmed.to_string()))
}

fn de_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}
