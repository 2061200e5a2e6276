//! Filter types for listing todos.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DateBucket;

/// Which todos a list view shows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TodoFilter {
    /// Only todos bucketed for today
    #[default]
    Today,
    /// Today, tomorrow, soon and this week
    ThisWeek,
    /// Everything in [`TodoFilter::ThisWeek`] plus this month
    ThisMonth,
    /// Every open todo
    All,
    /// Open todos whose place currently contains the device
    Nearby,
}

impl TodoFilter {
    /// Whether a todo in `bucket` passes the date part of this filter.
    ///
    /// [`TodoFilter::Nearby`] accepts every bucket; its narrowing comes from
    /// the proximity result, not the date.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geotodo_core::models::{DateBucket, TodoFilter};
    ///
    /// assert!(TodoFilter::ThisWeek.includes(DateBucket::Soon));
    /// assert!(!TodoFilter::ThisWeek.includes(DateBucket::ThisMonth));
    /// assert!(TodoFilter::All.includes(DateBucket::Eventually));
    /// ```
    pub fn includes(&self, bucket: DateBucket) -> bool {
        use DateBucket::*;

        match self {
            TodoFilter::All | TodoFilter::Nearby => true,
            TodoFilter::Today => bucket == Today,
            TodoFilter::ThisWeek => matches!(bucket, Today | Tomorrow | Soon | ThisWeek),
            TodoFilter::ThisMonth => {
                matches!(bucket, Today | Tomorrow | Soon | ThisWeek | ThisMonth)
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TodoFilter::Today => "today",
            TodoFilter::ThisWeek => "this_week",
            TodoFilter::ThisMonth => "this_month",
            TodoFilter::All => "all",
            TodoFilter::Nearby => "nearby",
        }
    }
}

impl FromStr for TodoFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "today" => Ok(TodoFilter::Today),
            "this_week" => Ok(TodoFilter::ThisWeek),
            "this_month" => Ok(TodoFilter::ThisMonth),
            "all" => Ok(TodoFilter::All),
            "nearby" => Ok(TodoFilter::Nearby),
            _ => Err(format!("Invalid todo filter: {s}")),
        }
    }
}
