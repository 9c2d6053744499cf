//! Statement periods
//!
//! A statement period is a fixed calendar window used to bucket ledger
//! entries for one output document. Credit-card statements cycle from the
//! 26th of one month to the 25th of the next; chequing statements cover a
//! calendar month.

use chrono::{Datelike, NaiveDate};

use crate::error::StatementError;

/// How a statement month maps onto a calendar window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodScheme {
    /// 26th of the previous month through the 25th of the statement month.
    MidMonthCycle,
    /// First through last day of the statement month.
    CalendarMonth,
}

/// One statement period: a statement year and month plus the scheme that
/// gives its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementPeriod {
    scheme: PeriodScheme,
    year: i32,
    month: u32,
}

impl StatementPeriod {
    /// Period for a given statement year and month. Statement years are
    /// four digits; anything else is rejected rather than risking the
    /// window arithmetic running off the calendar.
    pub fn new(scheme: PeriodScheme, year: i32, month: u32) -> Result<Self, StatementError> {
        if !(1..=12).contains(&month) {
            return Err(StatementError::InvalidMonth(month));
        }
        if !(1000..=9999).contains(&year) {
            return Err(StatementError::InvalidYear(year));
        }
        Ok(Self {
            scheme,
            year,
            month,
        })
    }

    /// The period whose window contains `date`.
    pub fn containing(scheme: PeriodScheme, date: NaiveDate) -> Self {
        let (year, month) = match scheme {
            PeriodScheme::CalendarMonth => (date.year(), date.month()),
            PeriodScheme::MidMonthCycle => {
                // The 26th onward already belongs to next month's statement.
                if date.day() >= 26 {
                    next_month(date.year(), date.month())
                } else {
                    (date.year(), date.month())
                }
            }
        };
        Self {
            scheme,
            year,
            month,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the window, inclusive.
    pub fn start(&self) -> NaiveDate {
        match self.scheme {
            PeriodScheme::CalendarMonth => ymd(self.year, self.month, 1),
            PeriodScheme::MidMonthCycle => {
                let (year, month) = prev_month(self.year, self.month);
                ymd(year, month, 26)
            }
        }
    }

    /// Last day of the window, inclusive.
    pub fn end(&self) -> NaiveDate {
        match self.scheme {
            PeriodScheme::CalendarMonth => {
                let (year, month) = next_month(self.year, self.month);
                ymd(year, month, 1).pred_opt().expect("date out of range")
            }
            PeriodScheme::MidMonthCycle => ymd(self.year, self.month, 25),
        }
    }

    /// Whether `date` falls inside the window (both ends inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start() <= date && date <= self.end()
    }

    /// The period immediately after this one.
    pub fn next(&self) -> Self {
        let (year, month) = next_month(self.year, self.month);
        Self {
            scheme: self.scheme,
            year,
            month,
        }
    }

    /// Human label for logs, e.g. `March 2022`.
    pub fn label(&self) -> String {
        ymd(self.year, self.month, 1).format("%B %Y").to_string()
    }

    /// File-name stem, e.g. `2022_03`.
    pub fn file_stem(&self) -> String {
        format!("{}_{:02}", self.year, self.month)
    }
}

/// Every consecutive period from the one containing `min` through the one
/// containing `max`. Empty when `min > max`.
pub fn periods_covering(
    scheme: PeriodScheme,
    min: NaiveDate,
    max: NaiveDate,
) -> Vec<StatementPeriod> {
    if min > max {
        return Vec::new();
    }

    let last = StatementPeriod::containing(scheme, max);
    let mut periods = Vec::new();
    let mut current = StatementPeriod::containing(scheme, min);
    loop {
        periods.push(current);
        if current == last {
            break;
        }
        current = current.next();
    }
    periods
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("date out of range")
}

fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}
