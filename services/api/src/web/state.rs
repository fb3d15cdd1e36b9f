//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use std::sync::Arc;
use subscription_core::ports::ReportStore;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub reports: Arc<dyn ReportStore>,
    pub config: Arc<Config>,
}
