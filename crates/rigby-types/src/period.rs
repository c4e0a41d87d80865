//! Reporting periods for the financial dashboard

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Reporting period selected on the dashboard
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// January 1st of the reference year through the reference date
    #[default]
    Ytd,
    Q1,
    Q2,
    Q3,
    Q4,
    /// Every record, dated or not
    All,
}

impl Period {
    /// Inclusive date range for this period relative to `as_of`.
    ///
    /// Returns `None` for [`Period::All`], which has no bounds.
    pub fn date_range(&self, as_of: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let year = as_of.year();
        let (start, end) = match self {
            Period::Ytd => (NaiveDate::from_ymd_opt(year, 1, 1)?, as_of),
            Period::Q1 => quarter(year, 1, 3, 31)?,
            Period::Q2 => quarter(year, 4, 6, 30)?,
            Period::Q3 => quarter(year, 7, 9, 30)?,
            Period::Q4 => quarter(year, 10, 12, 31)?,
            Period::All => return None,
        };
        Some((start, end))
    }

    /// Whether a record dated `date` falls into this period.
    ///
    /// Undated records only belong to [`Period::All`].
    pub fn contains(&self, date: Option<NaiveDate>, as_of: NaiveDate) -> bool {
        match self.date_range(as_of) {
            None => true,
            Some((start, end)) => date.map(|d| d >= start && d <= end).unwrap_or(false),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Ytd => "YTD",
            Period::Q1 => "Q1",
            Period::Q2 => "Q2",
            Period::Q3 => "Q3",
            Period::Q4 => "Q4",
            Period::All => "All time",
        }
    }
}

fn quarter(year: i32, first_month: u32, last_month: u32, last_day: u32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, first_month, 1)?,
        NaiveDate::from_ymd_opt(year, last_month, last_day)?,
    ))
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_ytd_range_ends_at_reference_date() {
        let (start, end) = Period::Ytd.date_range(date(2024, 5, 10)).unwrap();
        assert_eq!(start, date(2024, 1, 1));
        assert_eq!(end, date(2024, 5, 10));
    }

    #[test]
    fn test_quarter_ranges() {
        let as_of = date(2024, 11, 2);
        assert_eq!(
            Period::Q1.date_range(as_of),
            Some((date(2024, 1, 1), date(2024, 3, 31)))
        );
        assert_eq!(
            Period::Q3.date_range(as_of),
            Some((date(2024, 7, 1), date(2024, 9, 30)))
        );
        assert_eq!(
            Period::Q4.date_range(as_of),
            Some((date(2024, 10, 1), date(2024, 12, 31)))
        );
    }

    #[test]
    fn test_all_has_no_range() {
        assert_eq!(Period::All.date_range(date(2024, 1, 1)), None);
        assert!(Period::All.contains(None, date(2024, 1, 1)));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let as_of = date(2024, 6, 15);
        assert!(Period::Q2.contains(Some(date(2024, 4, 1)), as_of));
        assert!(Period::Q2.contains(Some(date(2024, 6, 30)), as_of));
        assert!(!Period::Q2.contains(Some(date(2024, 7, 1)), as_of));
        assert!(!Period::Ytd.contains(Some(date(2024, 6, 16)), as_of));
    }

    #[test]
    fn test_undated_excluded_from_bounded_periods() {
        assert!(!Period::Ytd.contains(None, date(2024, 6, 15)));
    }
}
