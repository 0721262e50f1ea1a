use chrono::{Datelike, NaiveDate};

use crate::error::{Result, SuggesterError};

/// The calendar month a report is priced for, as an inclusive day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetMonth {
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl TargetMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            SuggesterError::Config(format!("invalid target month {year:04}-{month:02}"))
        })?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let last_day = NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .ok_or_else(|| {
                SuggesterError::Config(format!("target month {year:04}-{month:02} out of range"))
            })?;
        Ok(Self {
            first_day,
            last_day,
        })
    }

    /// The month immediately after the one containing `today`.
    pub fn following(today: NaiveDate) -> Result<Self> {
        if today.month() == 12 {
            Self::new(today.year() + 1, 1)
        } else {
            Self::new(today.year(), today.month() + 1)
        }
    }

    /// Parse a `YYYY-MM` label.
    pub fn parse(label: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(&format!("{}-01", label.trim()), "%Y-%m-%d")
            .map_err(|_| {
                SuggesterError::Config(format!(
                    "invalid target month '{label}', expected YYYY-MM"
                ))
            })?;
        Self::new(date.year(), date.month())
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    pub fn total_days(&self) -> u32 {
        self.last_day.day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first_day <= date && date <= self.last_day
    }

    /// `YYYY-MM`, as written in the first report column.
    pub fn label(&self) -> String {
        self.first_day.format("%Y-%m").to_string()
    }

    /// `YYYYMM`, as used in the report file name.
    pub fn compact_label(&self) -> String {
        self.first_day.format("%Y%m").to_string()
    }
}

impl std::fmt::Display for TargetMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
