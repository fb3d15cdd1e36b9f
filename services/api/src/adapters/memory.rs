//! services/api/src/adapters/memory.rs
//!
//! An in-process `ReportStore`. Used when no database is configured and by the
//! test suite. Contents are lost when the process exits.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use subscription_core::domain::{NewReport, Report, ReportId};
use subscription_core::ports::{PortError, PortResult, ReportStore};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryReportStore {
    reports: RwLock<HashMap<ReportId, Report>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reports saved so far.
    pub async fn len(&self) -> usize {
        self.reports.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reports.read().await.is_empty()
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn save_report(&self, report: NewReport) -> PortResult<ReportId> {
        let mut reports = self.reports.write().await;

        // A v4 collision is practically impossible, but an existing report must never be replaced.
        let id = loop {
            let candidate = ReportId::new();
            if !reports.contains_key(&candidate) {
                break candidate;
            }
        };

        reports.insert(id, report.into_report(id, Utc::now()));
        Ok(id)
    }

    async fn load_report(&self, id: &str) -> PortResult<Report> {
        let report_id = ReportId::parse(id)?;
        self.reports
            .read()
            .await
            .get(&report_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Report {} not found", report_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subscription_core::samples::sample_records;

    #[tokio::test]
    async fn save_then_load_returns_the_snapshot() {
        let store = MemoryReportStore::new();
        let new_report = NewReport::with_defaults(
            sample_records(),
            None,
            None,
            None,
            None,
            Some("Alice".into()),
        );

        let id = store.save_report(new_report.clone()).await.unwrap();
        let report = store.load_report(&id.to_string()).await.unwrap();

        assert_eq!(report.id, id.to_string());
        assert_eq!(report.subscriptions, new_report.subscriptions);
        assert_eq!(report.author_name, "Alice");
        assert_eq!(report.created_at, report.updated_at);
    }

    #[tokio::test]
    async fn invalid_and_missing_ids_are_distinct() {
        let store = MemoryReportStore::new();
        assert!(matches!(
            store.load_report("nope").await,
            Err(PortError::InvalidId(_))
        ));
        assert!(matches!(
            store.load_report(&ReportId::new().to_string()).await,
            Err(PortError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn every_save_creates_a_new_report() {
        let store = MemoryReportStore::new();
        let report = NewReport::with_defaults(vec![], None, None, None, None, None);
        let a = store.save_report(report.clone()).await.unwrap();
        let b = store.save_report(report).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.len().await, 2);
    }
}
