//! Application State
//!
//! Shared state across all handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use terrenos_agent::ChatAssistant;
use terrenos_config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub assistant: Arc<ChatAssistant>,
    /// Absent when metrics are disabled or the recorder failed to install
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(settings: Settings, assistant: ChatAssistant) -> Self {
        Self {
            settings: Arc::new(settings),
            assistant: Arc::new(assistant),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}
