//! crates/subscription_core/src/chart.rs
//!
//! Shapes filtered records into the series the chart views draw from.
//! Layout and rendering happen on the client.

use serde::Serialize;

use crate::domain::{BillingCycle, Category, Status, SubscriptionRecord};
use crate::pricing::{annual_value, monthly_value};

/// One treemap cell / swarm point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slice {
    pub id: String,
    pub service_name: String,
    pub category: Category,
    pub status: Status,
    pub billing_cycle: BillingCycle,
    pub monthly: f64,
    pub annual: f64,
    /// Share of the total monthly spend, 0..=100.
    pub percentage: f64,
}

/// One outer circle of the circle-packing view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub category: Category,
    pub count: usize,
    pub total_monthly: f64,
    pub total_annual: f64,
    pub members: Vec<String>,
}

/// Per-record slices, largest monthly spend first.
pub fn slices(records: &[SubscriptionRecord]) -> Vec<Slice> {
    let total: f64 = records.iter().map(monthly_value).sum();

    let mut out: Vec<Slice> = records
        .iter()
        .map(|r| {
            let monthly = monthly_value(r);
            Slice {
                id: r.id.clone(),
                service_name: r.service_name.clone(),
                category: r.category,
                status: r.status,
                billing_cycle: r.billing_cycle,
                monthly,
                annual: annual_value(r),
                percentage: if total > 0.0 { monthly / total * 100.0 } else { 0.0 },
            }
        })
        .collect();

    // Stable sort keeps input order among equal spends.
    out.sort_by(|a, b| b.monthly.total_cmp(&a.monthly));
    out
}

/// Records grouped by category in first-seen order.
pub fn by_category(records: &[SubscriptionRecord]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();

    for r in records {
        let index = match groups.iter().position(|g| g.category == r.category) {
            Some(i) => i,
            None => {
                groups.push(CategoryGroup {
                    category: r.category,
                    count: 0,
                    total_monthly: 0.0,
                    total_annual: 0.0,
                    members: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[index];
        group.count += 1;
        group.total_monthly += monthly_value(r);
        group.total_annual += annual_value(r);
        group.members.push(r.id.clone());
    }

    groups
}
