//! crates/subscription_core/src/summary.rs
//!
//! Aggregate spend figures over a (usually filtered) set of records.

use serde::{Deserialize, Serialize};

use crate::domain::{Status, SubscriptionRecord};
use crate::pricing::{annual_value, monthly_value};

/// Spend totals and status counts. Missing fields deserialize to zero, so a
/// client may send a partial or empty summary when saving a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Summary {
    pub total_monthly: f64,
    pub total_annual: f64,
    pub active: usize,
    pub cancelled: usize,
    pub avg_monthly_per_sub: f64,
}

pub fn summarize(records: &[SubscriptionRecord]) -> Summary {
    let total_monthly: f64 = records.iter().map(monthly_value).sum();
    let total_annual: f64 = records.iter().map(annual_value).sum();
    let active = records.iter().filter(|r| r.status == Status::Active).count();
    let cancelled = records.iter().filter(|r| r.status == Status::Cancelled).count();

    let avg_monthly_per_sub = if records.is_empty() {
        0.0
    } else {
        total_monthly / records.len() as f64
    };

    Summary {
        total_monthly,
        total_annual,
        active,
        cancelled,
        avg_monthly_per_sub,
    }
}
