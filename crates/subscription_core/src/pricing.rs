//! crates/subscription_core/src/pricing.rs
//!
//! Normalizes a record's cost into monthly and annual equivalents.
//!
//! A record stores a single `monthly_cost`. When the billing cycle is
//! `Annual` that field holds the yearly total instead. No rounding happens
//! here and no value is rejected, negative costs included.

use crate::domain::{BillingCycle, SubscriptionRecord};

const MONTHS_PER_YEAR: f64 = 12.0;

/// The record's cost expressed per month.
pub fn monthly_value(record: &SubscriptionRecord) -> f64 {
    match record.billing_cycle {
        BillingCycle::Annual => record.monthly_cost / MONTHS_PER_YEAR,
        BillingCycle::Monthly => record.monthly_cost,
    }
}

/// The record's cost expressed per year.
pub fn annual_value(record: &SubscriptionRecord) -> f64 {
    match record.billing_cycle {
        BillingCycle::Annual => record.monthly_cost,
        BillingCycle::Monthly => record.monthly_cost * MONTHS_PER_YEAR,
    }
}
