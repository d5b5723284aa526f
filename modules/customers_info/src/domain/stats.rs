//! Summary statistics over the customer collection.
//!
//! The window arithmetic and the percentage formatting are pure; storage only
//! supplies the raw [`SummaryCounts`].
//!
//! Prior-period figures are derived from `customer_since` alone: a customer
//! whose status changed after the period start is still counted with its
//! current status.

use chrono::{DateTime, Duration, Months, Utc};

use crate::contract::model::{CustomerSummary, Metric, SummaryMetrics, Timeframe};

/// Current and previous windows for one summary request.
///
/// Current window: `[period_start, now]`. Previous window:
/// `[previous_start, period_start)`, same length in whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryWindow {
    pub timeframe: Timeframe,
    pub now: DateTime<Utc>,
    pub period_start: DateTime<Utc>,
    pub previous_start: DateTime<Utc>,
}

impl SummaryWindow {
    pub fn resolve(timeframe: Timeframe, now: DateTime<Utc>) -> Self {
        let period_start = match timeframe {
            Timeframe::Week => now - Duration::days(7),
            Timeframe::Month => now
                .checked_sub_months(Months::new(1))
                .unwrap_or(now - Duration::days(30)),
            Timeframe::Year => now
                .checked_sub_months(Months::new(12))
                .unwrap_or(now - Duration::days(365)),
        };
        let period_length_days = (now - period_start).num_days();
        let previous_start = period_start - Duration::days(period_length_days);
        Self {
            timeframe,
            now,
            period_start,
            previous_start,
        }
    }

    pub fn period_length_days(&self) -> i64 {
        (self.now - self.period_start).num_days()
    }
}

/// Raw figures gathered from storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryCounts {
    pub all: i64,
    pub active: i64,
    pub inactive: i64,
    pub new: i64,
    pub purchasing: i64,
    pub abandoned_carts: i64,
    pub prev_all: i64,
    pub prev_active: i64,
    pub prev_inactive: i64,
    pub prev_new: i64,
}

/// Signed percentage change between two counts.
///
/// `previous == 0` yields `"+100%"` when anything exists now, `"0%"` otherwise.
pub fn percentage_change(current: i64, previous: i64) -> String {
    if previous == 0 {
        return if current > 0 { "+100%" } else { "0%" }.to_string();
    }
    let pct = (current - previous) as f64 / previous as f64 * 100.0;
    format!("{pct:+.2}%")
}

fn tracked(value: i64, previous: i64) -> Metric {
    Metric {
        value,
        change: Some(percentage_change(value, previous)),
    }
}

fn untracked(value: i64) -> Metric {
    Metric {
        value,
        change: None,
    }
}

impl CustomerSummary {
    pub fn from_counts(timeframe: Timeframe, c: &SummaryCounts) -> Self {
        Self {
            timeframe,
            metrics: SummaryMetrics {
                all_customers: tracked(c.all, c.prev_all),
                active_customers: tracked(c.active, c.prev_active),
                inactive_customers: tracked(c.inactive, c.prev_inactive),
                new_customers: tracked(c.new, c.prev_new),
                purchasing_customers: untracked(c.purchasing),
                abandoned_carts: untracked(c.abandoned_carts),
            },
        }
    }
}
