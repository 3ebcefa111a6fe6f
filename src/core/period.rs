//! Monthly period type used as the time index for all frames.

use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// A calendar month, e.g. `2020-01`.
///
/// Periods are totally ordered and support month arithmetic, which makes
/// them suitable as a strictly increasing index for monthly series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    // Months since year 0, i.e. year * 12 + (month - 1).
    ordinal: i64,
}

impl Period {
    /// Create a period from a year and a 1-based month.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(ForecastError::PeriodError(format!(
                "month must be in 1..=12, got {}",
                month
            )));
        }
        Ok(Self {
            ordinal: year as i64 * 12 + (month as i64 - 1),
        })
    }

    /// The period containing the given calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            ordinal: date.year() as i64 * 12 + (date.month() as i64 - 1),
        }
    }

    /// Year component.
    pub fn year(&self) -> i32 {
        self.ordinal.div_euclid(12) as i32
    }

    /// Month component (1-based).
    pub fn month(&self) -> u32 {
        self.ordinal.rem_euclid(12) as u32 + 1
    }

    /// First calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // Valid by construction: month is always in 1..=12.
        NaiveDate::from_ymd_opt(self.year(), self.month(), 1).unwrap()
    }

    /// Last calendar day of the month (month-end label).
    pub fn last_day(&self) -> NaiveDate {
        self.add_months(1).first_day().pred_opt().unwrap()
    }

    /// The period `months` after this one (negative moves backwards).
    pub fn add_months(&self, months: i64) -> Self {
        Self {
            ordinal: self.ordinal + months,
        }
    }

    /// The immediately following period.
    pub fn next(&self) -> Self {
        self.add_months(1)
    }

    /// Number of months from `other` to `self`.
    pub fn months_since(&self, other: &Period) -> i64 {
        self.ordinal - other.ordinal
    }

    /// A contiguous run of `n` periods starting at `start`.
    pub fn range(start: Period, n: usize) -> Vec<Period> {
        (0..n as i64).map(|i| start.add_months(i)).collect()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for Period {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| ForecastError::PeriodError(format!("expected YYYY-MM, got '{}'", s)))?;
        let year: i32 = year
            .parse()
            .map_err(|_| ForecastError::PeriodError(format!("invalid year in '{}'", s)))?;
        let month: u32 = month
            .parse()
            .map_err(|_| ForecastError::PeriodError(format!("invalid month in '{}'", s)))?;
        Period::new(year, month)
    }
}
