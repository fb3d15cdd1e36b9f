pub mod chart;
pub mod dashboard;
pub mod domain;
pub mod export;
pub mod filter;
pub mod ports;
pub mod pricing;
pub mod samples;
pub mod share;
pub mod summary;

pub use domain::{
    BillingCycle, Category, Metric, NewReport, Report, ReportId, Status, Step, SubscriptionRecord,
    ViewMode,
};
pub use filter::{apply_filters, FilterState};
pub use ports::{PortError, PortResult, ReportStore};
pub use pricing::{annual_value, monthly_value};
pub use summary::{summarize, Summary};
