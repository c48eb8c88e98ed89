//! Time source and calendar arithmetic
//!
//! Every rule that depends on "today" (future-birthday checks, ages, birthday
//! greetings) reads the date from a [`Clock`]. Production code wires in
//! [`SystemClock`]; tests freeze time with [`FixedClock`]. Nothing in the
//! workspace reads the system date directly.
//!
//! [`CalendarPeriod`] computes exact year/month/day differences the way a
//! person counts their age: a month only elapses once the day-of-month has
//! been reached, and leap days are respected.

use std::fmt;
use std::sync::Arc;

use chrono::{Datelike, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Source of the current calendar date
pub trait Clock: fmt::Debug + Send + Sync {
    /// Returns today's date
    fn today(&self) -> NaiveDate;
}

/// Shared handle to a clock, cheap to clone into every entity
pub type SharedClock = Arc<dyn Clock>;

/// Returns a shared handle to the system clock
pub fn system_clock() -> SharedClock {
    Arc::new(SystemClock)
}

/// Clock backed by the local system date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock frozen on a single date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    /// Creates a clock that always reports `today`
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Creates a clock from calendar components, `None` if the date does not exist
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::new)
    }

    /// Wraps the clock in a shared handle
    pub fn shared(self) -> SharedClock {
        Arc::new(self)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}

/// Exact calendar difference between two dates
///
/// Mirrors ISO-8601 period arithmetic: whole months are counted first, and a
/// shortfall in the day-of-month borrows one month. `years` and `months`
/// always share the sign of the overall difference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarPeriod {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl CalendarPeriod {
    /// Computes the period from `start` (inclusive) to `end` (exclusive)
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        let mut total_months = proleptic_month(end) - proleptic_month(start);
        let mut days = end.day() as i32 - start.day() as i32;

        if total_months > 0 && days < 0 {
            total_months -= 1;
            if let Some(anchor) = start.checked_add_months(Months::new(total_months as u32)) {
                days = (end - anchor).num_days() as i32;
            }
        } else if total_months < 0 && days > 0 {
            total_months += 1;
            days -= days_in_month(end);
        }

        Self {
            years: total_months / 12,
            months: total_months % 12,
            days,
        }
    }

    /// Total number of whole months in the period
    pub fn total_months(&self) -> i32 {
        self.years * 12 + self.months
    }
}

/// Number of whole days from `start` to `end` (negative if `end` is earlier)
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

fn proleptic_month(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

fn days_in_month(date: NaiveDate) -> i32 {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map_or(31, |last| last.day() as i32)
}
