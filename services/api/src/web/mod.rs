pub mod failure;
pub mod reports;
pub mod rest;
pub mod state;

pub use reports::{
    export_report_handler, load_report_handler, report_view_handler, save_report_handler,
};
pub use rest::health_handler;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::get,
    Router,
};
use state::AppState;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the complete application router, API docs included.
pub fn router(app_state: Arc<AppState>) -> Router {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);
    if let Ok(origin) = HeaderValue::from_str(&app_state.config.allowed_origin) {
        cors = cors.allow_origin(origin);
    }

    let api_router = Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/reports",
            get(load_report_handler).post(save_report_handler),
        )
        .route("/api/reports/{id}/view", get(report_view_handler))
        .route("/api/reports/{id}/export/{format}", get(export_report_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", rest::ApiDoc::openapi()))
}
