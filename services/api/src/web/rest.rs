//! services/api/src/web/rest.rs
//!
//! The master definition for the OpenAPI specification, plus the liveness probe.

use crate::web::failure::ErrorBody;
use crate::web::reports::{
    LoadReportResponse, ReportViewResponse, SaveReportRequest, SaveReportResponse,
};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::reports::save_report_handler,
        crate::web::reports::load_report_handler,
        crate::web::reports::report_view_handler,
        crate::web::reports::export_report_handler,
        health_handler,
    ),
    components(
        schemas(
            SaveReportRequest,
            SaveReportResponse,
            LoadReportResponse,
            ReportViewResponse,
            ErrorBody
        )
    ),
    tags(
        (name = "Subscription Reports API", description = "Save and reopen shared subscription dashboards.")
    )
)]
pub struct ApiDoc;

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = String))
)]
pub async fn health_handler() -> &'static str {
    "ok"
}
