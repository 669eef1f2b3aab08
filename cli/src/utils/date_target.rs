use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate, Utc};

/// Named creation-date window for `--date`
#[derive(Debug, Clone, PartialEq)]
pub enum DateTarget {
    All,
    Today,
    Yesterday,
    LastWeek,
    LastMonth,
    Specific(NaiveDate),
}

impl DateTarget {
    /// Convert to an inclusive (from, to) range of calendar days, relative to today (UTC)
    pub fn to_date_range(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        self.to_date_range_from(Utc::now().date_naive())
    }

    pub fn to_date_range_from(&self, today: NaiveDate) -> (Option<NaiveDate>, Option<NaiveDate>) {
        match self {
            DateTarget::All => (None, None),
            DateTarget::Today => (Some(today), Some(today)),
            DateTarget::Yesterday => {
                let yesterday = today.pred_opt().unwrap_or(today);
                (Some(yesterday), Some(yesterday))
            }
            DateTarget::LastWeek => {
                // Last 7 days including today
                let start = today.checked_sub_days(Days::new(6)).unwrap_or(today);
                (Some(start), Some(today))
            }
            DateTarget::LastMonth => {
                let start = today.checked_sub_days(Days::new(29)).unwrap_or(today);
                (Some(start), Some(today))
            }
            DateTarget::Specific(date) => (Some(*date), Some(*date)),
        }
    }
}

impl FromStr for DateTarget {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" | "" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "yesterday" => Ok(Self::Yesterday),
            "last week" => Ok(Self::LastWeek),
            "last month" => Ok(Self::LastMonth),
            _ => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                Ok(dt) => Ok(Self::Specific(dt)),
                Err(e) => anyhow::bail!("Invalid date target: {}", e),
            },
        }
    }
}

impl fmt::Display for DateTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTarget::All => f.write_str("all"),
            DateTarget::Today => f.write_str("today"),
            DateTarget::Yesterday => f.write_str("yesterday"),
            DateTarget::LastWeek => f.write_str("last week"),
            DateTarget::LastMonth => f.write_str("last month"),
            DateTarget::Specific(dt) => write!(f, "{}", dt),
        }
    }
}
