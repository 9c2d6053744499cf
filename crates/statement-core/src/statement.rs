//! Statement assembly
//!
//! Filters ledger entries into a statement period and derives the lines
//! each overlay draws. Card lines carry two fields the ledger does not
//! always provide: a posting date (transaction date plus a 0-3 day
//! clearing delay) and a reference number. Both derive from a SHA-256
//! digest of the entry, so repeated runs over the same ledger emit
//! identical statements.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

use crate::ledger::LedgerEntry;
use crate::period::StatementPeriod;

/// One rendered chequing row.
#[derive(Debug, Clone, PartialEq)]
pub struct ChequingLine {
    pub date: NaiveDate,
    pub payee: String,
    pub withdrawal: Option<Decimal>,
    pub deposit: Option<Decimal>,
    pub balance: Option<Decimal>,
}

/// A chequing statement for one period.
#[derive(Debug, Clone)]
pub struct ChequingStatement {
    pub period: StatementPeriod,
    pub lines: Vec<ChequingLine>,
}

impl ChequingStatement {
    /// True when no ledger entry fell inside the period.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// One rendered credit-card row.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLine {
    pub date: NaiveDate,
    pub posting_date: NaiveDate,
    pub description: String,
    pub reference: String,
    pub amount: Decimal,
}

/// A credit-card statement for one period.
#[derive(Debug, Clone)]
pub struct CardStatement {
    pub period: StatementPeriod,
    pub beginning_balance: Option<Decimal>,
    pub lines: Vec<CardLine>,
}

impl CardStatement {
    /// True when no ledger entry fell inside the period.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Assemble the chequing statement for `period`.
pub fn build_chequing_statement(
    entries: &[LedgerEntry],
    period: StatementPeriod,
) -> ChequingStatement {
    let mut lines: Vec<ChequingLine> = entries
        .iter()
        .filter(|entry| period.contains(entry.date))
        .map(|entry| ChequingLine {
            date: entry.date,
            payee: entry.payee.clone(),
            // The ledger is kept from the business's side of the books:
            // its credits leave the chequing account, its debits arrive.
            withdrawal: positive(entry.credit),
            deposit: positive(entry.debit),
            balance: entry.closing_balance,
        })
        .collect();
    lines.sort_by_key(|line| line.date);

    ChequingStatement { period, lines }
}

/// Assemble the credit-card statement for `period`. The beginning balance
/// comes from the first in-period entry; `None` when the ledger does not
/// carry the column.
pub fn build_card_statement(entries: &[LedgerEntry], period: StatementPeriod) -> CardStatement {
    let mut in_period: Vec<&LedgerEntry> = entries
        .iter()
        .filter(|entry| period.contains(entry.date))
        .collect();
    in_period.sort_by_key(|entry| entry.date);

    let beginning_balance = in_period.first().and_then(|entry| entry.beginning_balance);
    let lines = in_period
        .into_iter()
        .map(|entry| {
            let amount = signed_amount(entry.debit, entry.credit);
            let digest = entry_digest(entry, amount);
            CardLine {
                date: entry.date,
                posting_date: posting_date(entry.date, &digest),
                description: entry.payee.clone(),
                reference: reference_number(entry, &digest),
                amount,
            }
        })
        .collect();

    CardStatement {
        period,
        beginning_balance,
        lines,
    }
}

/// Signed card amount: a positive debit charges the card (negative line),
/// otherwise a positive credit pays it down (positive line), otherwise zero.
pub fn signed_amount(debit: Option<Decimal>, credit: Option<Decimal>) -> Decimal {
    if let Some(debit) = debit {
        if debit > Decimal::ZERO {
            return -debit;
        }
    }
    if let Some(credit) = credit {
        if credit > Decimal::ZERO {
            return credit;
        }
    }
    Decimal::ZERO
}

fn positive(amount: Option<Decimal>) -> Option<Decimal> {
    amount.filter(|value| *value > Decimal::ZERO)
}

/// Stable per-entry digest driving the derived fields.
fn entry_digest(entry: &LedgerEntry, amount: Decimal) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}|{}|{}", entry.date, entry.payee, amount));
    hasher.finalize().into()
}

/// Transaction date plus a 0-3 day clearing delay.
fn posting_date(date: NaiveDate, digest: &[u8; 32]) -> NaiveDate {
    let delay = u64::from(digest[0] % 4);
    date.checked_add_days(Days::new(delay))
        .expect("date out of range")
}

/// The ledger-provided reference when present, otherwise
/// `REF{YYYYMMDD}{four-digit suffix}`.
fn reference_number(entry: &LedgerEntry, digest: &[u8; 32]) -> String {
    if let Some(reference) = entry.reference.as_deref() {
        let trimmed = reference.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let suffix = 1000 + u16::from_be_bytes([digest[1], digest[2]]) % 9000;
    format!("REF{}{}", entry.date.format("%Y%m%d"), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::PeriodScheme;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn entry(
        day: NaiveDate,
        payee: &str,
        debit: Option<Decimal>,
        credit: Option<Decimal>,
    ) -> LedgerEntry {
        LedgerEntry {
            date: day,
            payee: payee.to_string(),
            debit,
            credit,
            closing_balance: None,
            reference: None,
            beginning_balance: None,
        }
    }

    fn march_2022() -> StatementPeriod {
        StatementPeriod::new(PeriodScheme::MidMonthCycle, 2022, 3).unwrap()
    }

    // ===== Chequing assembly =====

    #[test]
    fn test_chequing_maps_ledger_credit_to_withdrawal() {
        let period = StatementPeriod::new(PeriodScheme::CalendarMonth, 2022, 3).unwrap();
        let entries = vec![
            entry(date(2022, 3, 1), "SUPPLIER", None, Some(dec!(245.10))),
            entry(date(2022, 3, 2), "CLIENT", Some(dec!(1500.00)), None),
        ];

        let statement = build_chequing_statement(&entries, period);

        assert_eq!(statement.lines[0].withdrawal, Some(dec!(245.10)));
        assert_eq!(statement.lines[0].deposit, None);
        assert_eq!(statement.lines[1].withdrawal, None);
        assert_eq!(statement.lines[1].deposit, Some(dec!(1500.00)));
    }

    #[test]
    fn test_chequing_blanks_non_positive_amounts() {
        let period = StatementPeriod::new(PeriodScheme::CalendarMonth, 2022, 3).unwrap();
        let entries = vec![entry(
            date(2022, 3, 1),
            "VOID",
            Some(dec!(0)),
            Some(dec!(-5.00)),
        )];

        let statement = build_chequing_statement(&entries, period);

        assert_eq!(statement.lines[0].withdrawal, None);
        assert_eq!(statement.lines[0].deposit, None);
    }

    #[test]
    fn test_chequing_filters_to_period_and_sorts() {
        let period = StatementPeriod::new(PeriodScheme::CalendarMonth, 2022, 3).unwrap();
        let entries = vec![
            entry(date(2022, 4, 1), "NEXT MONTH", Some(dec!(1)), None),
            entry(date(2022, 3, 20), "LATER", Some(dec!(1)), None),
            entry(date(2022, 3, 5), "EARLIER", Some(dec!(1)), None),
        ];

        let statement = build_chequing_statement(&entries, period);

        assert_eq!(statement.lines.len(), 2);
        assert_eq!(statement.lines[0].payee, "EARLIER");
        assert_eq!(statement.lines[1].payee, "LATER");
    }

    #[test]
    fn test_chequing_empty_period() {
        let period = StatementPeriod::new(PeriodScheme::CalendarMonth, 2023, 1).unwrap();
        let entries = vec![entry(date(2022, 3, 1), "OLD", Some(dec!(1)), None)];

        assert!(build_chequing_statement(&entries, period).is_empty());
    }

    // ===== Card assembly =====

    #[test]
    fn test_signed_amount_debit_charges_the_card() {
        assert_eq!(signed_amount(Some(dec!(129.99)), None), dec!(-129.99));
        assert_eq!(
            signed_amount(Some(dec!(129.99)), Some(dec!(50.00))),
            dec!(-129.99),
            "a positive debit wins over a credit"
        );
    }

    #[test]
    fn test_signed_amount_credit_pays_it_down() {
        assert_eq!(signed_amount(None, Some(dec!(500.00))), dec!(500.00));
        assert_eq!(signed_amount(Some(dec!(0)), Some(dec!(500.00))), dec!(500.00));
    }

    #[test]
    fn test_signed_amount_defaults_to_zero() {
        assert_eq!(signed_amount(None, None), Decimal::ZERO);
        assert_eq!(signed_amount(Some(dec!(0)), Some(dec!(-3))), Decimal::ZERO);
    }

    #[test]
    fn test_card_lines_filter_sort_and_sign() {
        let entries = vec![
            entry(date(2022, 3, 10), "CLOUD HOSTING", Some(dec!(129.99)), None),
            entry(date(2022, 2, 26), "PAYMENT RECEIVED", None, Some(dec!(800.00))),
            entry(date(2022, 3, 26), "NEXT PERIOD", Some(dec!(10.00)), None),
        ];

        let statement = build_card_statement(&entries, march_2022());

        assert_eq!(statement.lines.len(), 2);
        assert_eq!(statement.lines[0].description, "PAYMENT RECEIVED");
        assert_eq!(statement.lines[0].amount, dec!(800.00));
        assert_eq!(statement.lines[1].description, "CLOUD HOSTING");
        assert_eq!(statement.lines[1].amount, dec!(-129.99));
    }

    #[test]
    fn test_card_beginning_balance_comes_from_first_entry_in_period() {
        let mut first = entry(date(2022, 3, 1), "FIRST", Some(dec!(10)), None);
        first.beginning_balance = Some(dec!(4250.00));
        let mut second = entry(date(2022, 3, 9), "SECOND", Some(dec!(20)), None);
        second.beginning_balance = Some(dec!(9999.99));

        // Deliberately out of order
        let statement = build_card_statement(&[second, first], march_2022());

        assert_eq!(statement.beginning_balance, Some(dec!(4250.00)));
    }

    #[test]
    fn test_card_beginning_balance_absent_column() {
        let entries = vec![entry(date(2022, 3, 1), "NO COLUMN", Some(dec!(10)), None)];
        let statement = build_card_statement(&entries, march_2022());
        assert_eq!(statement.beginning_balance, None);
    }

    #[test]
    fn test_posting_date_is_deterministic_and_bounded() {
        let entries = vec![
            entry(date(2022, 3, 1), "ALPHA", Some(dec!(10.00)), None),
            entry(date(2022, 3, 2), "BETA", Some(dec!(20.00)), None),
            entry(date(2022, 3, 3), "GAMMA", None, Some(dec!(30.00))),
        ];

        let first = build_card_statement(&entries, march_2022());
        let second = build_card_statement(&entries, march_2022());
        assert_eq!(first.lines, second.lines, "derived fields must be stable");

        for line in &first.lines {
            let delay = (line.posting_date - line.date).num_days();
            assert!(
                (0..=3).contains(&delay),
                "posting delay {} outside 0..=3 for {}",
                delay,
                line.description
            );
        }
    }

    #[test]
    fn test_reference_keeps_ledger_value() {
        let mut with_reference = entry(date(2022, 3, 1), "KEEP", Some(dec!(10)), None);
        with_reference.reference = Some("  INV-2203  ".to_string());

        let statement = build_card_statement(&[with_reference], march_2022());

        assert_eq!(statement.lines[0].reference, "INV-2203");
    }

    #[test]
    fn test_reference_generated_when_blank() {
        let mut blank = entry(date(2022, 3, 1), "BLANK", Some(dec!(10)), None);
        blank.reference = Some("   ".to_string());

        let statement = build_card_statement(&[blank], march_2022());
        let reference = &statement.lines[0].reference;

        assert!(
            reference.starts_with("REF20220301"),
            "generated reference should embed the date: {}",
            reference
        );
        let suffix: u32 = reference["REF20220301".len()..].parse().unwrap();
        assert!((1000..=9999).contains(&suffix), "suffix {} out of range", suffix);
    }
}
