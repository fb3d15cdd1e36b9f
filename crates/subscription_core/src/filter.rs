//! crates/subscription_core/src/filter.rs
//!
//! The three independent dashboard filters and the stable filter over records.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::SubscriptionRecord;

/// Sentinel labels the UI shows for "no filter". They never act as a filter value.
pub const ALL_CATEGORIES: &str = "All categories";
pub const ALL_BILLING: &str = "All billing";
pub const ALL_STATUSES: &str = "All statuses";

/// Category, billing-cycle and status selectors. `None` means "no filter".
///
/// Values are kept as raw strings so a selector decoded from a share link
/// that names no known variant is still held, and simply matches nothing.
/// The "All ..." labels and empty strings read as `None`, whether they arrive
/// through a setter or through deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "category_selector"
    )]
    pub category: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "billing_selector"
    )]
    pub billing: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "status_selector"
    )]
    pub status: Option<String>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.billing.is_none() && self.status.is_none()
    }

    pub fn set_category(&mut self, value: Option<String>) {
        self.category = selector(value, ALL_CATEGORIES);
    }

    pub fn set_billing(&mut self, value: Option<String>) {
        self.billing = selector(value, ALL_BILLING);
    }

    pub fn set_status(&mut self, value: Option<String>) {
        self.status = selector(value, ALL_STATUSES);
    }

    /// True when every active selector matches the record exactly.
    pub fn matches(&self, record: &SubscriptionRecord) -> bool {
        passes(&self.category, ALL_CATEGORIES, record.category.as_str())
            && passes(&self.billing, ALL_BILLING, record.billing_cycle.as_str())
            && passes(&self.status, ALL_STATUSES, record.status.as_str())
    }
}

/// Keeps the records that pass every filter, in their original order.
pub fn apply_filters(
    records: &[SubscriptionRecord],
    filters: &FilterState,
) -> Vec<SubscriptionRecord> {
    records
        .iter()
        .filter(|record| filters.matches(record))
        .cloned()
        .collect()
}

// Fields are public, so a sentinel assigned directly must still pass everything.
fn passes(selected: &Option<String>, sentinel: &str, actual: &str) -> bool {
    selected
        .as_deref()
        .filter(|wanted| is_active(wanted, sentinel))
        .map_or(true, |wanted| wanted == actual)
}

// Empty strings and the "All ..." label both clear the selector.
fn selector(value: Option<String>, sentinel: &str) -> Option<String> {
    value.filter(|v| is_active(v, sentinel))
}

fn is_active(value: &str, sentinel: &str) -> bool {
    !value.is_empty() && value != sentinel
}

fn category_selector<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(selector(Option::deserialize(d)?, ALL_CATEGORIES))
}

fn billing_selector<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(selector(Option::deserialize(d)?, ALL_BILLING))
}

fn status_selector<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(selector(Option::deserialize(d)?, ALL_STATUSES))
}
