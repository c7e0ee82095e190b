//! Prometheus metrics for the activity service
//!
//! Tracks roster changes, rejected requests and API traffic.
//!
//! # Usage
//!
//! Call `init_metrics()` at application startup to register all metrics.
//! If registration fails, metric operations become no-ops.

use prometheus::{
    register_counter_vec, register_gauge_vec, register_histogram_vec, CounterVec, Encoder,
    GaugeVec, HistogramVec, TextEncoder,
};
use std::sync::OnceLock;

// ============================================================================
// Metrics Storage
// ============================================================================

struct ActivityMetrics {
    enrollments: CounterVec,
    withdrawals: CounterVec,
    rejections: CounterVec,
    roster_size: GaugeVec,
    api_requests: CounterVec,
    api_duration: HistogramVec,
}

impl ActivityMetrics {
    fn register() -> Result<Self, prometheus::Error> {
        Ok(Self {
            enrollments: register_counter_vec!(
                "mergington_enrollments_total",
                "Successful signups by activity",
                &["activity"]
            )?,
            withdrawals: register_counter_vec!(
                "mergington_withdrawals_total",
                "Successful unregistrations by activity",
                &["activity"]
            )?,
            rejections: register_counter_vec!(
                "mergington_rejections_total",
                "Rejected signup and unregister requests by operation and reason",
                &["operation", "reason"]
            )?,
            roster_size: register_gauge_vec!(
                "mergington_roster_size",
                "Current number of participants by activity",
                &["activity"]
            )?,
            api_requests: register_counter_vec!(
                "mergington_api_requests_total",
                "Total API requests by endpoint and status",
                &["endpoint", "status"]
            )?,
            api_duration: register_histogram_vec!(
                "mergington_api_request_duration_seconds",
                "API request duration in seconds",
                &["endpoint"],
                vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]
            )?,
        })
    }
}

static METRICS: OnceLock<Option<ActivityMetrics>> = OnceLock::new();

fn metrics() -> Option<&'static ActivityMetrics> {
    METRICS.get().and_then(Option::as_ref)
}

// ============================================================================
// Initialization
// ============================================================================

/// Register all metrics with the default Prometheus registry.
///
/// Safe to call more than once; only the first call registers. Returns
/// whether metrics are live.
pub fn init_metrics() -> bool {
    METRICS
        .get_or_init(|| match ActivityMetrics::register() {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::warn!(error = %e, "Metrics registration failed, metrics disabled");
                None
            }
        })
        .is_some()
}

/// Check if metrics are registered and live
pub fn metrics_initialized() -> bool {
    metrics().is_some()
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Record a successful signup
pub fn record_enrollment(activity: &str) {
    if let Some(m) = metrics() {
        m.enrollments.with_label_values(&[activity]).inc();
    }
}

/// Record a successful unregistration
pub fn record_withdrawal(activity: &str) {
    if let Some(m) = metrics() {
        m.withdrawals.with_label_values(&[activity]).inc();
    }
}

/// Record a rejected operation
pub fn record_rejection(operation: &str, reason: &str) {
    if let Some(m) = metrics() {
        m.rejections.with_label_values(&[operation, reason]).inc();
    }
}

/// Set the current roster size for an activity
pub fn set_roster_size(activity: &str, size: usize) {
    if let Some(m) = metrics() {
        m.roster_size.with_label_values(&[activity]).set(size as f64);
    }
}

/// Record API request
pub fn record_api_request(endpoint: &str, status: u16, duration_secs: f64) {
    let Some(m) = metrics() else {
        return;
    };

    let status_str = status.to_string();
    m.api_requests
        .with_label_values(&[endpoint, status_str.as_str()])
        .inc();
    m.api_duration
        .with_label_values(&[endpoint])
        .observe(duration_secs);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_metrics_is_idempotent() {
        let first = init_metrics();
        let second = init_metrics();
        assert_eq!(first, second);
        assert_eq!(metrics_initialized(), first);
    }

    #[test]
    fn test_encode_metrics() {
        init_metrics();
        record_enrollment("Chess Club");
        set_roster_size("Chess Club", 3);

        let output = encode_metrics().unwrap();
        assert!(output.contains("mergington_enrollments_total"));
        assert!(output.contains("mergington_roster_size"));
    }

    #[test]
    fn test_rejection_and_api_recording() {
        init_metrics();
        record_rejection("signup", "already_enrolled");
        record_withdrawal("Art Studio");
        record_api_request("/activities", 200, 0.002);

        let output = encode_metrics().unwrap();
        assert!(output.contains("mergington_rejections_total"));
        assert!(output.contains("mergington_api_request_duration_seconds"));
    }
}
