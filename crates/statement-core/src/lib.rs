//! Statement data model
//!
//! Ledger ingestion, statement periods, derived statement lines, and the
//! exact strings the overlays draw. This crate is PDF-free: everything here
//! produces plain values that `overlay-engine` positions on the page.

pub mod error;
pub mod format;
pub mod ledger;
pub mod period;
pub mod statement;

pub use error::StatementError;
pub use ledger::{date_range, read_entries, read_ledger, LedgerEntry};
pub use period::{periods_covering, PeriodScheme, StatementPeriod};
pub use statement::{
    build_card_statement, build_chequing_statement, signed_amount, CardLine, CardStatement,
    ChequingLine, ChequingStatement,
};
