use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use cadastre_shared::ViewerConfig;

#[derive(Clone)]
pub struct AppState {
    /// Resolved once at startup and never changed afterwards.
    pub viewer_config: Arc<ViewerConfig>,
    pub started_at: Instant,
    pub observability: Arc<ObservabilityCounters>,
}

impl AppState {
    pub fn new(viewer_config: ViewerConfig) -> Self {
        Self {
            viewer_config: Arc::new(viewer_config),
            started_at: Instant::now(),
            observability: Arc::new(ObservabilityCounters::default()),
        }
    }
}

#[derive(Debug, Default)]
pub struct ObservabilityCounters {
    viewer_config_requests_total: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservabilitySnapshot {
    pub viewer_config_requests_total: u64,
}

impl ObservabilityCounters {
    pub fn record_viewer_config_request(&self) {
        self.viewer_config_requests_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ObservabilitySnapshot {
        ObservabilitySnapshot {
            viewer_config_requests_total: self
                .viewer_config_requests_total
                .load(Ordering::Relaxed),
        }
    }
}
