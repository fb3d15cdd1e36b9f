//! crates/subscription_core/src/ports.rs
//!
//! Defines the service contracts (traits) for persisting reports.
//! These traits form the boundary of the hexagonal architecture, keeping the
//! core independent of any particular database.

use async_trait::async_trait;

use crate::domain::{NewReport, Report, ReportId};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The identifier is not in the backend's key format.
    #[error("Invalid identifier: {0}")]
    InvalidId(String),
    /// The identifier is well-formed but nothing is stored under it.
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Durable storage for report snapshots. Reports are created once and only read afterwards.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Stores a new report under a freshly generated identifier and returns it.
    /// Never merges into or overwrites an existing report.
    async fn save_report(&self, report: NewReport) -> PortResult<ReportId>;

    /// Fetches a report by its external string identifier.
    async fn load_report(&self, id: &str) -> PortResult<Report>;
}
