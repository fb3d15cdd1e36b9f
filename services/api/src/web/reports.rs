//! services/api/src/web/reports.rs
//!
//! Axum handlers for saving, loading, viewing, and exporting shared reports.

use crate::web::failure::{bad_request, internal, load_failure, ErrorBody, Failure};
use crate::web::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use subscription_core::chart::{by_category, slices, CategoryGroup, Slice};
use subscription_core::domain::{Metric, NewReport, Report, SubscriptionRecord, ViewMode};
use subscription_core::export::ExportFormat;
use subscription_core::filter::{apply_filters, FilterState};
use subscription_core::share::{share_url, ShareLink};
use subscription_core::summary::{summarize, Summary};
use tracing::{debug, info};
use utoipa::{IntoParams, ToSchema};

const SUBSCRIPTIONS_REQUIRED: &str = "Invalid request: subscriptions array required";

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The body of a save request. Only `subscriptions` is required.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveReportRequest {
    #[schema(value_type = Option<Vec<Object>>)]
    pub subscriptions: Option<Vec<SubscriptionRecord>>,
    #[schema(value_type = Option<Object>)]
    pub filters: Option<FilterState>,
    #[schema(value_type = Option<String>, example = "treemap")]
    pub view: Option<ViewMode>,
    #[schema(value_type = Option<String>, example = "revenue")]
    pub metric: Option<Metric>,
    #[schema(value_type = Option<Object>)]
    pub summary: Option<Summary>,
    pub author_name: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveReportResponse {
    pub success: bool,
    pub report_id: String,
    /// A durable link that reopens this report in the dashboard.
    pub share_url: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoadReportResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub report: Report,
}

/// The stored filters re-applied to the stored subscriptions, recomputed on every request.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportViewResponse {
    #[schema(value_type = Vec<Object>)]
    pub records: Vec<SubscriptionRecord>,
    #[schema(value_type = Object)]
    pub summary: Summary,
    #[schema(value_type = Vec<Object>)]
    pub slices: Vec<Slice>,
    #[schema(value_type = Vec<Object>)]
    pub categories: Vec<CategoryGroup>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoadReportParams {
    /// The report identifier returned by the save endpoint.
    pub id: Option<String>,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Save a snapshot of the dashboard as a new report.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = SaveReportRequest,
    responses(
        (status = 201, description = "Report saved", body = SaveReportResponse),
        (status = 400, description = "Missing or malformed subscriptions", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn save_report_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SaveReportRequest>, JsonRejection>,
) -> Result<impl IntoResponse, Failure> {
    let Json(request) = payload.map_err(|rejection| {
        debug!("Rejected save request: {}", rejection.body_text());
        bad_request(SUBSCRIPTIONS_REQUIRED)
    })?;
    let subscriptions = request
        .subscriptions
        .ok_or_else(|| bad_request(SUBSCRIPTIONS_REQUIRED))?;

    let new_report = NewReport::with_defaults(
        subscriptions,
        request.filters,
        request.view,
        request.metric,
        request.summary,
        request.author_name,
    );
    let record_count = new_report.subscriptions.len();

    let report_id = state
        .reports
        .save_report(new_report)
        .await
        .map_err(|e| internal("Failed to save report", e.to_string()))?;

    info!(%report_id, record_count, "Saved report");

    let link = ShareLink::Durable {
        report_id: report_id.to_string(),
    };
    let response = SaveReportResponse {
        success: true,
        report_id: report_id.to_string(),
        share_url: share_url(&state.config.public_base_url, &link).to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Load a saved report by identifier.
#[utoipa::path(
    get,
    path = "/api/reports",
    params(LoadReportParams),
    responses(
        (status = 200, description = "The stored report", body = LoadReportResponse),
        (status = 400, description = "Missing or malformed identifier", body = ErrorBody),
        (status = 404, description = "No report with this identifier", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn load_report_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LoadReportParams>,
) -> Result<impl IntoResponse, Failure> {
    let id = params
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| bad_request("Report ID required"))?;

    let report = state.reports.load_report(&id).await.map_err(load_failure)?;
    debug!(report_id = %report.id, "Loaded report");

    Ok(Json(LoadReportResponse {
        success: true,
        report,
    }))
}

/// Recompute the filtered records, summary and chart series of a saved report.
#[utoipa::path(
    get,
    path = "/api/reports/{id}/view",
    params(("id" = String, Path, description = "Report identifier")),
    responses(
        (status = 200, description = "Live view of the report", body = ReportViewResponse),
        (status = 400, description = "Malformed identifier", body = ErrorBody),
        (status = 404, description = "No report with this identifier", body = ErrorBody)
    )
)]
pub async fn report_view_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, Failure> {
    let report = state.reports.load_report(&id).await.map_err(load_failure)?;
    let records = apply_filters(&report.subscriptions, &report.filters);

    Ok(Json(ReportViewResponse {
        summary: summarize(&records),
        slices: slices(&records),
        categories: by_category(&records),
        records,
    }))
}

/// Download the filtered records of a saved report as CSV or JSON.
#[utoipa::path(
    get,
    path = "/api/reports/{id}/export/{format}",
    params(
        ("id" = String, Path, description = "Report identifier"),
        ("format" = String, Path, description = "`csv` or `json`")
    ),
    responses(
        (status = 200, description = "The export file"),
        (status = 400, description = "Unknown format or malformed identifier", body = ErrorBody),
        (status = 404, description = "No report with this identifier", body = ErrorBody)
    )
)]
pub async fn export_report_handler(
    State(state): State<Arc<AppState>>,
    Path((id, format)): Path<(String, String)>,
) -> Result<impl IntoResponse, Failure> {
    let format =
        ExportFormat::parse(&format).ok_or_else(|| bad_request("Unsupported export format"))?;

    let report = state.reports.load_report(&id).await.map_err(load_failure)?;
    let records = apply_filters(&report.subscriptions, &report.filters);
    let file = format
        .render(&records)
        .map_err(|e| internal("Failed to export report", e.to_string()))?;

    let disposition = format!("attachment; filename=\"{}\"", file.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    ))
}
