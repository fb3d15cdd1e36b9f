//! crates/subscription_core/src/dashboard.rs
//!
//! The dashboard's application state and the reducer that drives it.
//! Every UI event and network completion becomes an `Action` applied in order.

use chrono::{Duration, NaiveDate, Utc};

use crate::domain::{
    BillingCycle, Category, Metric, Report, Status, Step, SubscriptionRecord, ViewMode,
};
use crate::filter::{apply_filters, FilterState};
use crate::samples::sample_records;
use crate::share::{ShareLink, UiParams};
use crate::summary::{summarize, Summary};

const DEFAULT_RENEWAL_DAYS: i64 = 30;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("Please enter a service name")]
    MissingServiceName,
    #[error("Add at least one subscription before viewing analytics")]
    NothingToAnalyze,
}

/// The add-subscription form, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub service_name: String,
    pub category: Category,
    pub status: Status,
    pub billing_cycle: BillingCycle,
    pub monthly_cost: f64,
    pub start_date: Option<NaiveDate>,
    pub renewal_date: Option<NaiveDate>,
    pub usage: Option<f64>,
    pub notes: Option<String>,
}

impl Default for NewRecord {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            category: Category::Streaming,
            status: Status::Active,
            billing_cycle: BillingCycle::Monthly,
            monthly_cost: 15.0,
            start_date: None,
            renewal_date: None,
            usage: None,
            notes: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    AddRecord(NewRecord),
    DeleteRecord(String),
    ClearRecords,
    LoadSamples,
    SetCategory(Option<String>),
    SetBilling(Option<String>),
    SetStatus(Option<String>),
    SetView(ViewMode),
    SetMetric(Metric),
    SetStep(Step),
    ApplyShareLink(ShareLink),
    ReportLoaded(Report),
    LoadFailed,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub records: Vec<SubscriptionRecord>,
    pub filters: FilterState,
    pub view: ViewMode,
    pub metric: Metric,
    pub step: Step,
    /// Set once a report is saved or a durable link is opened.
    pub report_id: Option<String>,
    /// True while a report load is outstanding.
    pub loading: bool,
    next_seq: u64,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: Action) -> Result<(), ActionError> {
        match action {
            Action::AddRecord(draft) => {
                let record = self.build_record(draft)?;
                self.records.push(record);
            }
            Action::DeleteRecord(id) => {
                self.records.retain(|r| r.id != id);
                self.leave_empty_analytics();
            }
            Action::ClearRecords => {
                self.records.clear();
                self.leave_empty_analytics();
            }
            Action::LoadSamples => self.records = sample_records(),
            Action::SetCategory(value) => self.filters.set_category(value),
            Action::SetBilling(value) => self.filters.set_billing(value),
            Action::SetStatus(value) => self.filters.set_status(value),
            Action::SetView(view) => self.view = view,
            Action::SetMetric(metric) => self.metric = metric,
            Action::SetStep(Step::Analytics) if self.records.is_empty() => {
                return Err(ActionError::NothingToAnalyze);
            }
            Action::SetStep(step) => self.step = step,
            Action::ApplyShareLink(ShareLink::Durable { report_id }) => {
                self.report_id = Some(report_id);
                self.loading = true;
            }
            Action::ApplyShareLink(ShareLink::Ephemeral(params)) => self.replay(params),
            Action::ReportLoaded(report) => {
                self.records = report.subscriptions;
                self.filters = FilterState::default();
                self.filters.set_category(report.filters.category);
                self.filters.set_billing(report.filters.billing);
                self.filters.set_status(report.filters.status);
                self.view = report.view;
                self.metric = report.metric;
                self.step = Step::Analytics;
                self.report_id = Some(report.id);
                self.loading = false;
            }
            Action::LoadFailed => self.loading = false,
        }
        Ok(())
    }

    // Analytics is only reachable with at least one record.
    fn leave_empty_analytics(&mut self) {
        if self.records.is_empty() {
            self.step = Step::Input;
        }
    }

    pub fn filtered(&self) -> Vec<SubscriptionRecord> {
        apply_filters(&self.records, &self.filters)
    }

    pub fn summary(&self) -> Summary {
        summarize(&self.filtered())
    }

    /// Durable once a report id is known, ephemeral otherwise.
    pub fn share_link(&self) -> ShareLink {
        match &self.report_id {
            Some(report_id) => ShareLink::Durable {
                report_id: report_id.clone(),
            },
            None => ShareLink::Ephemeral(UiParams {
                view: Some(self.view),
                metric: Some(self.metric),
                step: Some(self.step),
                filters: self.filters.clone(),
            }),
        }
    }

    fn replay(&mut self, params: UiParams) {
        if let Some(view) = params.view {
            self.view = view;
        }
        if let Some(metric) = params.metric {
            self.metric = metric;
        }
        if let Some(step) = params.step {
            self.step = step;
        }
        self.filters = params.filters;
    }

    fn build_record(&mut self, draft: NewRecord) -> Result<SubscriptionRecord, ActionError> {
        let service_name = draft.service_name.trim().to_string();
        if service_name.is_empty() {
            return Err(ActionError::MissingServiceName);
        }

        let today = Utc::now().date_naive();
        let start_date = draft.start_date.unwrap_or(today);
        let renewal_date = draft
            .renewal_date
            .unwrap_or_else(|| today + Duration::days(DEFAULT_RENEWAL_DAYS));

        self.next_seq += 1;
        let id = format!("SUB-{}-{}", Utc::now().timestamp_millis(), self.next_seq);

        Ok(SubscriptionRecord {
            id,
            service_name,
            category: draft.category,
            status: draft.status,
            billing_cycle: draft.billing_cycle,
            monthly_cost: draft.monthly_cost,
            start_date: Some(start_date),
            renewal_date: Some(renewal_date),
            usage: draft.usage,
            notes: draft.notes.filter(|n| !n.trim().is_empty()),
        })
    }
}
