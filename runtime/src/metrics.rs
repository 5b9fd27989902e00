//! Prometheus metrics for the store runtime and the services it drives
//!
//! Recording is always on; metrics only leave the process once a
//! [`MetricsRecorder`] has been installed.
//!
//! # Example
//!
//! ```rust,no_run
//! use comixed_runtime::metrics::MetricsRecorder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let recorder = MetricsRecorder::install()?;
//!
//! // ... dispatch actions ...
//!
//! if let Some(text) = recorder.render() {
//!     println!("{text}");
//! }
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use thiserror::Error;

/// Recorder setup failure
#[derive(Error, Debug)]
pub enum MetricsError {
    /// The exporter configuration was rejected
    #[error("invalid metrics exporter configuration: {0}")]
    Build(String),
    /// The global recorder could not be set
    #[error("cannot install metrics recorder: {0}")]
    Install(String),
}

/// Installed Prometheus recorder.
///
/// Holds the handle used to render the current metric values as text.
#[derive(Clone)]
pub struct MetricsRecorder {
    handle: Option<PrometheusHandle>,
}

impl std::fmt::Debug for MetricsRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsRecorder")
            .field("rendering", &self.handle.is_some())
            .finish()
    }
}

impl MetricsRecorder {
    /// Describe all metrics and install the Prometheus recorder globally.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Build`] if the histogram buckets are rejected,
    /// or [`MetricsError::Install`] if installation fails for a reason other
    /// than a recorder already being present.
    ///
    /// # Note
    ///
    /// If another recorder is already installed (common in tests) the call
    /// succeeds but [`render`](Self::render) returns `None`.
    pub fn install() -> Result<Self, MetricsError> {
        register_metrics();

        let builder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                &[0.000_01, 0.000_1, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0],
            )
            .map_err(|error| MetricsError::Build(error.to_string()))?;

        match builder.install_recorder() {
            Ok(handle) => {
                tracing::info!("Metrics recorder installed");
                Ok(Self {
                    handle: Some(handle),
                })
            },
            Err(error) => {
                let message = error.to_string();
                if message.contains("already initialized") {
                    tracing::warn!("Another metrics recorder is installed; rendering disabled");
                    Ok(Self { handle: None })
                } else {
                    Err(MetricsError::Install(message))
                }
            },
        }
    }

    /// Render current metrics in Prometheus text format.
    ///
    /// Returns `None` if this instance did not install the recorder.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}

/// Describe every metric this crate emits.
fn register_metrics() {
    describe_counter!("store.actions.total", "Total number of actions dispatched, by type");
    describe_histogram!(
        "store.reducer.duration_seconds",
        "Time spent inside the root reducer per action"
    );
    describe_counter!("store.effects.executed", "Effects executed, by kind");
    describe_gauge!("store.subscriptions.active", "Currently registered state listeners");
    describe_counter!(
        "store.shutdown.rejected_actions",
        "Actions rejected because the store was shutting down"
    );
    describe_counter!("store.shutdown.initiated", "Graceful shutdowns started");
    describe_counter!("store.shutdown.completed", "Graceful shutdowns that drained all effects");
    describe_counter!("store.shutdown.timeout", "Graceful shutdowns that timed out");
    describe_counter!("service.calls.failed", "Failed back-end service calls, by operation");
}

/// Metric helpers used by the store
pub mod store {
    use std::time::Duration;

    /// Record one dispatched action and the reducer time it took
    pub fn record_action(action_type: &'static str, reducer_duration: Duration) {
        metrics::counter!("store.actions.total", "type" => action_type).increment(1);
        metrics::histogram!("store.reducer.duration_seconds")
            .record(reducer_duration.as_secs_f64());
    }

    /// Record one executed effect of the given kind
    pub fn record_effect(kind: &'static str) {
        metrics::counter!("store.effects.executed", "type" => kind).increment(1);
    }

    /// Publish the current listener count
    pub fn record_subscriptions(count: usize) {
        #[allow(clippy::cast_precision_loss)]
        metrics::gauge!("store.subscriptions.active").set(count as f64);
    }
}

/// Metric helpers for service collaborators
pub mod service {
    /// Record a failed call to the named service operation
    pub fn record_failure(operation: &'static str) {
        metrics::counter!("service.calls.failed", "operation" => operation).increment(1);
    }
}
