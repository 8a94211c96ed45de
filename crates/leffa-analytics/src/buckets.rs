//! Fixed time windows for the sales-over-time chart.

use chrono::{DateTime, Datelike, Days, FixedOffset, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dates::local_midnight;
use crate::error::AnalyticsError;

/// Chart granularity. The bucket count and width are fixed per variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Last 7 days, one bucket per day.
    Daily,
    /// Last 8 weeks, one 7-day bucket each.
    Weekly,
    /// Last 30 days, one bucket per day.
    #[default]
    Monthly,
    /// Last 12 calendar months.
    Yearly,
}

impl Granularity {
    #[must_use]
    pub const fn bucket_count(self) -> usize {
        match self {
            Granularity::Daily => 7,
            Granularity::Weekly => 8,
            Granularity::Monthly => 30,
            Granularity::Yearly => 12,
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Granularity::Daily => write!(f, "daily"),
            Granularity::Weekly => write!(f, "weekly"),
            Granularity::Monthly => write!(f, "monthly"),
            Granularity::Yearly => write!(f, "yearly"),
        }
    }
}

impl std::str::FromStr for Granularity {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(AnalyticsError::UnknownGranularity(s.to_string())),
        }
    }
}

/// A half-open window `[start, end)` with its chart label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeBucket {
    pub label: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl TimeBucket {
    fn spanning(label: String, first: NaiveDate, next: NaiveDate, offset: &FixedOffset) -> Self {
        Self {
            label,
            start: local_midnight(first, offset),
            end: local_midnight(next, offset),
        }
    }

    /// `true` when `at` falls in `[start, end)`.
    #[must_use]
    pub fn contains(&self, at: &DateTime<FixedOffset>) -> bool {
        self.start <= *at && *at < self.end
    }
}

/// Builds the buckets for `granularity`, oldest first, in `now`'s offset.
///
/// Labels:
/// - daily: weekday short name (`"Mon"`)
/// - weekly: `"Week N"` where `N = ceil(day_of_month / 7)` of the bucket's
///   first day. This is not an ISO week number and repeats across months.
/// - monthly: day of month (`"17"`)
/// - yearly: month short name (`"Jan"`)
///
/// The weekly buckets are anchored on `today − 7·i`, so the newest one
/// starts today and extends six days past it.
#[must_use]
pub fn generate_time_buckets(now: DateTime<FixedOffset>, granularity: Granularity) -> Vec<TimeBucket> {
    let offset = *now.offset();
    let today = now.date_naive();
    let count = granularity.bucket_count();

    (0..count)
        .rev()
        .filter_map(|back| {
            let back = u64::try_from(back).ok()?;
            match granularity {
                Granularity::Daily => {
                    let day = today.checked_sub_days(Days::new(back))?;
                    let next = day.checked_add_days(Days::new(1))?;
                    Some(TimeBucket::spanning(
                        day.format("%a").to_string(),
                        day,
                        next,
                        &offset,
                    ))
                }
                Granularity::Weekly => {
                    let anchor = today.checked_sub_days(Days::new(back * 7))?;
                    let next = anchor.checked_add_days(Days::new(7))?;
                    Some(TimeBucket::spanning(
                        format!("Week {}", anchor.day().div_ceil(7)),
                        anchor,
                        next,
                        &offset,
                    ))
                }
                Granularity::Monthly => {
                    let day = today.checked_sub_days(Days::new(back))?;
                    let next = day.checked_add_days(Days::new(1))?;
                    Some(TimeBucket::spanning(day.day().to_string(), day, next, &offset))
                }
                Granularity::Yearly => {
                    let month_start = today
                        .with_day(1)?
                        .checked_sub_months(Months::new(u32::try_from(back).ok()?))?;
                    let next = month_start.checked_add_months(Months::new(1))?;
                    Some(TimeBucket::spanning(
                        month_start.format("%b").to_string(),
                        month_start,
                        next,
                        &offset,
                    ))
                }
            }
        })
        .collect()
}
