//! Calendar keys for the day store.

use chrono::{Datelike, Days, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::error::PlannerError;

/// A Daily Plan key: a calendar date written as canonical `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlanDate(NaiveDate);

impl PlanDate {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// Parse a date key. Only the zero-padded form is accepted, so every key
    /// maps to exactly one file name.
    pub fn parse(raw: &str) -> Result<Self, PlannerError> {
        let invalid = || PlannerError::InvalidDate(raw.to_string());
        let date = NaiveDate::parse_from_str(raw, Self::FORMAT).map_err(|_| invalid())?;
        if date.format(Self::FORMAT).to_string() != raw {
            return Err(invalid());
        }
        Ok(Self(date))
    }

    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    pub fn file_name(&self) -> String {
        format!("{}.txt", self)
    }

    /// Full English weekday name, e.g. "Monday"
    pub fn weekday_name(&self) -> String {
        self.0.format("%A").to_string()
    }
}

impl From<NaiveDate> for PlanDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for PlanDate {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PlanDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

/// A calendar month, parsed from the `{year}/{month}` path segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlanMonth {
    first_day: NaiveDate,
}

impl PlanMonth {
    /// Year must be four digits, month one or two digits in 1..=12.
    pub fn parse(year: &str, month: &str) -> Result<Self, PlannerError> {
        let invalid = || PlannerError::InvalidMonth(format!("{}-{}", year, month));
        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

        if year.len() != 4 || !all_digits(year) || month.len() > 2 || !all_digits(month) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        Ok(Self { first_day })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date - Days::new(u64::from(date.day0())),
        }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn days_in_month(&self) -> u32 {
        self.first_day
            .iter_days()
            .take_while(|d| d.month() == self.month())
            .count() as u32
    }

    pub fn contains(&self, date: PlanDate) -> bool {
        let date = date.naive();
        date.year() == self.year() && date.month() == self.month()
    }
}

impl fmt::Display for PlanMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_date_parse() {
        let date = PlanDate::parse("2025-01-10").unwrap();
        assert_eq!(date.to_string(), "2025-01-10");
        assert_eq!(date.file_name(), "2025-01-10.txt");
        assert_eq!(date.weekday_name(), "Friday");
    }

    #[test]
    fn test_plan_date_rejects_malformed() {
        for raw in ["2024-13-01", "not-a-date", "2024-02-30", "2024-1-05", "", "2024-01-05.txt"] {
            assert!(
                matches!(PlanDate::parse(raw), Err(PlannerError::InvalidDate(_))),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_plan_month_parse() {
        let month = PlanMonth::parse("2025", "04").unwrap();
        assert_eq!(month.to_string(), "2025-04");
        assert_eq!(month.days_in_month(), 30);

        // Single-digit month is normalised
        assert_eq!(PlanMonth::parse("2025", "4").unwrap(), month);
        assert_eq!(PlanMonth::parse("2024", "02").unwrap().days_in_month(), 29);
    }

    #[test]
    fn test_plan_month_rejects_malformed() {
        for (year, month) in [("2024", "13"), ("2024", "00"), ("24", "01"), ("2024", "abc"), ("2024", "011")] {
            assert!(matches!(
                PlanMonth::parse(year, month),
                Err(PlannerError::InvalidMonth(_))
            ));
        }
    }

    #[test]
    fn test_plan_month_contains() {
        let month = PlanMonth::containing(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
        assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert!(month.contains(PlanDate::parse("2025-01-10").unwrap()));
        assert!(!month.contains(PlanDate::parse("2025-02-01").unwrap()));
        assert!(!month.contains(PlanDate::parse("2024-01-10").unwrap()));
    }
}
