//! crates/subscription_core/src/domain.rs
//!
//! Defines the core data structures for the subscription dashboard.
//! The serde representation is the JSON shape shared by the HTTP API,
//! the persisted reports, and the JSON export.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::filter::FilterState;
use crate::ports::{PortError, PortResult};
use crate::summary::Summary;

//=========================================================================================
// Enumerations
//=========================================================================================

/// The fixed set of subscription categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Streaming,
    Music,
    Gaming,
    Shopping,
    News,
    Utilities,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Streaming,
        Category::Music,
        Category::Gaming,
        Category::Shopping,
        Category::News,
        Category::Utilities,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Streaming => "Streaming",
            Category::Music => "Music",
            Category::Gaming => "Gaming",
            Category::Shopping => "Shopping",
            Category::News => "News",
            Category::Utilities => "Utilities",
            Category::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Active,
    Cancelled,
    Paused,
    Trial,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Active, Status::Cancelled, Status::Paused, Status::Trial];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Cancelled => "Cancelled",
            Status::Paused => "Paused",
            Status::Trial => "Trial",
        }
    }
}

/// How often a subscription is billed. Decides how `monthly_cost` is read,
/// see [`crate::pricing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillingCycle {
    Monthly,
    Annual,
}

impl BillingCycle {
    pub const ALL: [BillingCycle; 2] = [BillingCycle::Monthly, BillingCycle::Annual];

    pub fn as_str(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "Monthly",
            BillingCycle::Annual => "Annual",
        }
    }
}

/// Which chart the analytics step is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Treemap,
    Swarm,
    Bubble,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Treemap => "treemap",
            ViewMode::Swarm => "swarm",
            ViewMode::Bubble => "bubble",
        }
    }

    /// Strict parse of the lowercase wire name. Anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "treemap" => Some(ViewMode::Treemap),
            "swarm" => Some(ViewMode::Swarm),
            "bubble" => Some(ViewMode::Bubble),
            _ => None,
        }
    }
}

/// What the chart sizes its cells by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Count,
    #[default]
    Revenue,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Count => "count",
            Metric::Revenue => "revenue",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "count" => Some(Metric::Count),
            "revenue" => Some(Metric::Revenue),
            _ => None,
        }
    }
}

/// The two screens of the dashboard. Only `Analytics` is ever carried in a share link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    Input,
    Analytics,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Input => "1",
            Step::Analytics => "2",
        }
    }
}

//=========================================================================================
// Subscription Records
//=========================================================================================

/// One user-entered or sample subscription.
///
/// `monthly_cost` is overloaded: for `BillingCycle::Annual` it holds the annual
/// total. Use [`crate::pricing::monthly_value`] and [`crate::pricing::annual_value`]
/// rather than reading it directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    pub id: String,
    pub service_name: String,
    pub category: Category,
    pub status: Status,
    pub billing_cycle: BillingCycle,
    pub monthly_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renewal_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

//=========================================================================================
// Reports
//=========================================================================================

pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// The identifier of a persisted report. Rendered as a hyphenated UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportId(Uuid);

impl ReportId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses the external string form. A malformed string is `PortError::InvalidId`,
    /// which callers must keep distinct from `PortError::NotFound`.
    pub fn parse(value: &str) -> PortResult<Self> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| PortError::InvalidId(value.to_string()))
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ReportId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// A snapshot handed to a `ReportStore` for saving, with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    pub subscriptions: Vec<SubscriptionRecord>,
    pub filters: FilterState,
    pub view: ViewMode,
    pub metric: Metric,
    pub summary: Summary,
    pub author_name: String,
}

impl NewReport {
    /// Builds a report from the optional parts of a save request.
    ///
    /// Defaults: no filters, `treemap` view, `revenue` metric, an all-zero summary,
    /// and `"Anonymous"` for an absent or blank author.
    pub fn with_defaults(
        subscriptions: Vec<SubscriptionRecord>,
        filters: Option<FilterState>,
        view: Option<ViewMode>,
        metric: Option<Metric>,
        summary: Option<Summary>,
        author_name: Option<String>,
    ) -> Self {
        let author_name = author_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string());

        Self {
            subscriptions,
            filters: filters.unwrap_or_default(),
            view: view.unwrap_or_default(),
            metric: metric.unwrap_or_default(),
            summary: summary.unwrap_or_default(),
            author_name,
        }
    }

    /// Stamps the snapshot with its identifier and creation time.
    pub fn into_report(self, id: ReportId, created_at: DateTime<Utc>) -> Report {
        Report {
            id: id.to_string(),
            subscriptions: self.subscriptions,
            filters: self.filters,
            view: self.view,
            metric: self.metric,
            summary: self.summary,
            author_name: self.author_name,
            created_at,
            updated_at: created_at,
        }
    }
}

/// A persisted snapshot, as returned by `ReportStore::load_report`.
///
/// `summary` is whatever the client computed at save time. It is never
/// recomputed here and may disagree with `summarize(subscriptions)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub subscriptions: Vec<SubscriptionRecord>,
    pub filters: FilterState,
    pub view: ViewMode,
    pub metric: Metric,
    pub summary: Summary,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
