//! services/api/src/adapters/db.rs
//!
//! This module contains the PostgreSQL adapter, the concrete implementation
//! of the `ReportStore` port from the core crate. It handles all interactions
//! with the database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use subscription_core::domain::{Metric, NewReport, Report, ReportId, SubscriptionRecord, ViewMode};
use subscription_core::filter::FilterState;
use subscription_core::ports::{PortError, PortResult, ReportStore};
use subscription_core::summary::Summary;
use tracing::debug;
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `ReportStore` port.
#[derive(Clone)]
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    /// Creates a new `PgReportStore`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct ReportRecord {
    id: Uuid,
    subscriptions: Json<Vec<SubscriptionRecord>>,
    filters: Json<FilterState>,
    view: String,
    metric: String,
    summary: Json<Summary>,
    author_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ReportRecord {
    fn to_domain(self) -> PortResult<Report> {
        let view = ViewMode::parse(&self.view).ok_or_else(|| {
            PortError::Unexpected(format!("Report {} has unknown view '{}'", self.id, self.view))
        })?;
        let metric = Metric::parse(&self.metric).ok_or_else(|| {
            PortError::Unexpected(format!(
                "Report {} has unknown metric '{}'",
                self.id, self.metric
            ))
        })?;

        Ok(Report {
            id: ReportId::from(self.id).to_string(),
            subscriptions: self.subscriptions.0,
            filters: self.filters.0,
            view,
            metric,
            summary: self.summary.0,
            author_name: self.author_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

//=========================================================================================
// `ReportStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl ReportStore for PgReportStore {
    async fn save_report(&self, report: NewReport) -> PortResult<ReportId> {
        let id = ReportId::new();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO reports \
             (id, subscriptions, filters, view, metric, summary, author_name, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)",
        )
        .bind(id.as_uuid())
        .bind(Json(&report.subscriptions))
        .bind(Json(&report.filters))
        .bind(report.view.as_str())
        .bind(report.metric.as_str())
        .bind(Json(&report.summary))
        .bind(&report.author_name)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        debug!(report_id = %id, records = report.subscriptions.len(), "Inserted report");
        Ok(id)
    }

    async fn load_report(&self, id: &str) -> PortResult<Report> {
        let report_id = ReportId::parse(id)?;

        let record = sqlx::query_as::<_, ReportRecord>(
            "SELECT id, subscriptions, filters, view, metric, summary, author_name, created_at, updated_at \
             FROM reports WHERE id = $1",
        )
        .bind(report_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                PortError::NotFound(format!("Report {} not found", report_id))
            }
            _ => PortError::Unexpected(e.to_string()),
        })?;

        record.to_domain()
    }
}
