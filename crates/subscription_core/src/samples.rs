//! crates/subscription_core/src/samples.rs
//!
//! The fixed sample data set offered on the input step.

use chrono::NaiveDate;

use crate::domain::{BillingCycle, Category, Status, SubscriptionRecord};

struct Sample {
    id: &'static str,
    service_name: &'static str,
    category: Category,
    status: Status,
    billing_cycle: BillingCycle,
    cost: f64,
    start: (i32, u32, u32),
    renewal: (i32, u32, u32),
    usage: f64,
}

// Annual entries carry the yearly total in `cost`.
const SAMPLES: [Sample; 15] = [
    Sample {
        id: "SUB-001",
        service_name: "Netflix",
        category: Category::Streaming,
        status: Status::Active,
        billing_cycle: BillingCycle::Monthly,
        cost: 15.49,
        start: (2024, 1, 12),
        renewal: (2025, 1, 12),
        usage: 40.0,
    },
    Sample {
        id: "SUB-002",
        service_name: "Amazon Prime",
        category: Category::Shopping,
        status: Status::Active,
        billing_cycle: BillingCycle::Annual,
        cost: 139.0,
        start: (2024, 3, 2),
        renewal: (2025, 3, 2),
        usage: 12.0,
    },
    Sample {
        id: "SUB-003",
        service_name: "Disney+",
        category: Category::Streaming,
        status: Status::Active,
        billing_cycle: BillingCycle::Monthly,
        cost: 13.99,
        start: (2024, 2, 15),
        renewal: (2025, 2, 15),
        usage: 25.0,
    },
    Sample {
        id: "SUB-004",
        service_name: "Spotify",
        category: Category::Music,
        status: Status::Active,
        billing_cycle: BillingCycle::Monthly,
        cost: 10.99,
        start: (2023, 11, 4),
        renewal: (2024, 11, 4),
        usage: 60.0,
    },
    Sample {
        id: "SUB-005",
        service_name: "YouTube Premium",
        category: Category::Streaming,
        status: Status::Trial,
        billing_cycle: BillingCycle::Monthly,
        cost: 0.0,
        start: (2024, 5, 10),
        renewal: (2024, 6, 10),
        usage: 15.0,
    },
    Sample {
        id: "SUB-006",
        service_name: "Apple iCloud",
        category: Category::Utilities,
        status: Status::Active,
        billing_cycle: BillingCycle::Monthly,
        cost: 2.99,
        start: (2024, 4, 8),
        renewal: (2025, 4, 8),
        usage: 200.0,
    },
    Sample {
        id: "SUB-007",
        service_name: "Xbox Game Pass",
        category: Category::Gaming,
        status: Status::Paused,
        billing_cycle: BillingCycle::Monthly,
        cost: 16.99,
        start: (2023, 9, 1),
        renewal: (2025, 9, 1),
        usage: 10.0,
    },
    Sample {
        id: "SUB-008",
        service_name: "Hulu",
        category: Category::Streaming,
        status: Status::Cancelled,
        billing_cycle: BillingCycle::Monthly,
        cost: 7.99,
        start: (2024, 6, 14),
        renewal: (2025, 6, 14),
        usage: 5.0,
    },
    Sample {
        id: "SUB-009",
        service_name: "Audible",
        category: Category::News,
        status: Status::Active,
        billing_cycle: BillingCycle::Monthly,
        cost: 14.95,
        start: (2023, 12, 22),
        renewal: (2024, 12, 22),
        usage: 8.0,
    },
    Sample {
        id: "SUB-010",
        service_name: "NYTimes",
        category: Category::News,
        status: Status::Active,
        billing_cycle: BillingCycle::Monthly,
        cost: 8.0,
        start: (2024, 7, 2),
        renewal: (2024, 8, 2),
        usage: 20.0,
    },
    Sample {
        id: "SUB-011",
        service_name: "HBO Max",
        category: Category::Streaming,
        status: Status::Active,
        billing_cycle: BillingCycle::Monthly,
        cost: 15.99,
        start: (2024, 1, 20),
        renewal: (2025, 1, 20),
        usage: 35.0,
    },
    Sample {
        id: "SUB-012",
        service_name: "Apple Music",
        category: Category::Music,
        status: Status::Active,
        billing_cycle: BillingCycle::Monthly,
        cost: 10.99,
        start: (2024, 2, 10),
        renewal: (2025, 2, 10),
        usage: 80.0,
    },
    Sample {
        id: "SUB-013",
        service_name: "PlayStation Plus",
        category: Category::Gaming,
        status: Status::Active,
        billing_cycle: BillingCycle::Annual,
        cost: 60.0,
        start: (2024, 3, 15),
        renewal: (2025, 3, 15),
        usage: 25.0,
    },
    Sample {
        id: "SUB-014",
        service_name: "LinkedIn Premium",
        category: Category::Utilities,
        status: Status::Trial,
        billing_cycle: BillingCycle::Monthly,
        cost: 0.0,
        start: (2024, 6, 1),
        renewal: (2024, 7, 1),
        usage: 5.0,
    },
    Sample {
        id: "SUB-015",
        service_name: "Peacock",
        category: Category::Streaming,
        status: Status::Active,
        billing_cycle: BillingCycle::Monthly,
        cost: 5.99,
        start: (2024, 4, 12),
        renewal: (2025, 4, 12),
        usage: 18.0,
    },
];

/// Returns a fresh copy of the sample subscriptions, in display order.
pub fn sample_records() -> Vec<SubscriptionRecord> {
    SAMPLES
        .iter()
        .map(|s| SubscriptionRecord {
            id: s.id.to_string(),
            service_name: s.service_name.to_string(),
            category: s.category,
            status: s.status,
            billing_cycle: s.billing_cycle,
            monthly_cost: s.cost,
            start_date: date(s.start),
            renewal_date: date(s.renewal),
            usage: Some(s.usage),
            notes: None,
        })
        .collect()
}

fn date((year, month, day): (i32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}
