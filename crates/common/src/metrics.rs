//! Metrics collection for the stream registry.
//!
//! Request counters plus call/failure/latency figures for each stream
//! operation, exported as JSON or Prometheus text.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Global metrics instance.
static METRICS: std::sync::OnceLock<Arc<Metrics>> = std::sync::OnceLock::new();

/// Get the global metrics instance.
pub fn get_metrics() -> &'static Arc<Metrics> {
    METRICS.get_or_init(|| Arc::new(Metrics::new()))
}

/// A timed stream operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOperation {
    /// Create-or-replace.
    Upsert,
    /// Fetch one by name.
    Get,
    /// Fetch a page of all streams.
    List,
    /// Remove by name.
    Delete,
}

impl StreamOperation {
    /// All operations, in export order.
    pub const ALL: [Self; 4] = [Self::Upsert, Self::Get, Self::List, Self::Delete];

    /// Label used in logs and exported metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upsert => "upsert",
            Self::Get => "get",
            Self::List => "list",
            Self::Delete => "delete",
        }
    }
}

/// Counters for a single operation.
#[derive(Debug)]
pub struct OperationMetrics {
    /// Calls made.
    pub calls: AtomicU64,
    /// Calls that ended in an error.
    pub failures: AtomicU64,
    /// Total time spent in microseconds.
    pub time_us_total: AtomicU64,
}

impl OperationMetrics {
    const fn new() -> Self {
        Self {
            calls: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            time_us_total: AtomicU64::new(0),
        }
    }

    fn record(&self, duration: Duration, is_error: bool) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.time_us_total
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
        if is_error {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn snapshot(&self, operation: StreamOperation) -> OperationSnapshot {
        let calls = self.calls.load(Ordering::Relaxed);
        let total = self.time_us_total.load(Ordering::Relaxed);
        OperationSnapshot {
            operation: operation.as_str(),
            calls,
            failures: self.failures.load(Ordering::Relaxed),
            avg_time_us: if calls > 0 { total / calls } else { 0 },
        }
    }
}

/// Application metrics collector.
#[derive(Debug)]
pub struct Metrics {
    // === Request Metrics ===
    /// Total HTTP requests received
    pub http_requests_total: AtomicU64,
    /// Active HTTP requests
    pub http_requests_active: AtomicU64,
    /// HTTP requests by status code category (2xx, 4xx, 5xx)
    pub http_requests_2xx: AtomicU64,
    pub http_requests_4xx: AtomicU64,
    pub http_requests_5xx: AtomicU64,
    /// Total request latency in microseconds
    pub http_request_latency_us_total: AtomicU64,
    /// Request count for average calculation
    pub http_request_latency_count: AtomicU64,

    // === Stream Operations ===
    pub stream_upserts: OperationMetrics,
    pub stream_gets: OperationMetrics,
    pub stream_lists: OperationMetrics,
    pub stream_deletes: OperationMetrics,
}

impl Metrics {
    /// Create a new metrics instance with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            http_requests_total: AtomicU64::new(0),
            http_requests_active: AtomicU64::new(0),
            http_requests_2xx: AtomicU64::new(0),
            http_requests_4xx: AtomicU64::new(0),
            http_requests_5xx: AtomicU64::new(0),
            http_request_latency_us_total: AtomicU64::new(0),
            http_request_latency_count: AtomicU64::new(0),

            stream_upserts: OperationMetrics::new(),
            stream_gets: OperationMetrics::new(),
            stream_lists: OperationMetrics::new(),
            stream_deletes: OperationMetrics::new(),
        }
    }

    /// Record an HTTP request.
    pub fn record_http_request(&self, status_code: u16, latency: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);

        match status_code {
            200..=299 => self.http_requests_2xx.fetch_add(1, Ordering::Relaxed),
            400..=499 => self.http_requests_4xx.fetch_add(1, Ordering::Relaxed),
            500..=599 => self.http_requests_5xx.fetch_add(1, Ordering::Relaxed),
            _ => 0,
        };

        self.http_request_latency_us_total
            .fetch_add(latency.as_micros() as u64, Ordering::Relaxed);
        self.http_request_latency_count
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Start tracking an active request.
    pub fn start_request(&self) {
        self.http_requests_active.fetch_add(1, Ordering::Relaxed);
    }

    /// End tracking an active request.
    pub fn end_request(&self) {
        self.http_requests_active.fetch_sub(1, Ordering::Relaxed);
    }

    /// Record one stream operation.
    pub fn record_operation(&self, operation: StreamOperation, duration: Duration, is_error: bool) {
        self.operation(operation).record(duration, is_error);
    }

    const fn operation(&self, operation: StreamOperation) -> &OperationMetrics {
        match operation {
            StreamOperation::Upsert => &self.stream_upserts,
            StreamOperation::Get => &self.stream_gets,
            StreamOperation::List => &self.stream_lists,
            StreamOperation::Delete => &self.stream_deletes,
        }
    }

    /// Get a snapshot of all metrics.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            http_requests_total: self.http_requests_total.load(Ordering::Relaxed),
            http_requests_active: self.http_requests_active.load(Ordering::Relaxed),
            http_requests_2xx: self.http_requests_2xx.load(Ordering::Relaxed),
            http_requests_4xx: self.http_requests_4xx.load(Ordering::Relaxed),
            http_requests_5xx: self.http_requests_5xx.load(Ordering::Relaxed),
            http_request_latency_avg_us: self.average_latency_us(),

            operations: StreamOperation::ALL
                .iter()
                .map(|&op| self.operation(op).snapshot(op))
                .collect(),
        }
    }

    /// Calculate average HTTP request latency.
    fn average_latency_us(&self) -> u64 {
        let total = self.http_request_latency_us_total.load(Ordering::Relaxed);
        let count = self.http_request_latency_count.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Export metrics in Prometheus format.
    #[must_use]
    pub fn to_prometheus(&self) -> String {
        let snapshot = self.snapshot();
        let mut output = String::new();

        // HTTP metrics
        output.push_str("# HELP stream_registry_http_requests_total Total HTTP requests\n");
        output.push_str("# TYPE stream_registry_http_requests_total counter\n");
        output.push_str(&format!(
            "stream_registry_http_requests_total {}\n",
            snapshot.http_requests_total
        ));

        output.push_str("# HELP stream_registry_http_requests_active Active HTTP requests\n");
        output.push_str("# TYPE stream_registry_http_requests_active gauge\n");
        output.push_str(&format!(
            "stream_registry_http_requests_active {}\n",
            snapshot.http_requests_active
        ));

        output.push_str("# HELP stream_registry_http_requests_by_status HTTP requests by status\n");
        output.push_str("# TYPE stream_registry_http_requests_by_status counter\n");
        output.push_str(&format!(
            "stream_registry_http_requests_by_status{{status=\"2xx\"}} {}\n",
            snapshot.http_requests_2xx
        ));
        output.push_str(&format!(
            "stream_registry_http_requests_by_status{{status=\"4xx\"}} {}\n",
            snapshot.http_requests_4xx
        ));
        output.push_str(&format!(
            "stream_registry_http_requests_by_status{{status=\"5xx\"}} {}\n",
            snapshot.http_requests_5xx
        ));

        output.push_str(
            "# HELP stream_registry_http_request_latency_avg_us Average request latency\n",
        );
        output.push_str("# TYPE stream_registry_http_request_latency_avg_us gauge\n");
        output.push_str(&format!(
            "stream_registry_http_request_latency_avg_us {}\n",
            snapshot.http_request_latency_avg_us
        ));

        // Stream operation metrics
        output.push_str("# HELP stream_registry_operations_total Stream operations\n");
        output.push_str("# TYPE stream_registry_operations_total counter\n");
        for op in &snapshot.operations {
            output.push_str(&format!(
                "stream_registry_operations_total{{operation=\"{}\"}} {}\n",
                op.operation, op.calls
            ));
        }

        output.push_str("# HELP stream_registry_operation_failures_total Failed stream operations\n");
        output.push_str("# TYPE stream_registry_operation_failures_total counter\n");
        for op in &snapshot.operations {
            output.push_str(&format!(
                "stream_registry_operation_failures_total{{operation=\"{}\"}} {}\n",
                op.operation, op.failures
            ));
        }

        output.push_str(
            "# HELP stream_registry_operation_time_avg_us Average stream operation time\n",
        );
        output.push_str("# TYPE stream_registry_operation_time_avg_us gauge\n");
        for op in &snapshot.operations {
            output.push_str(&format!(
                "stream_registry_operation_time_avg_us{{operation=\"{}\"}} {}\n",
                op.operation, op.avg_time_us
            ));
        }

        output
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of all metrics at a point in time.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    // HTTP
    pub http_requests_total: u64,
    pub http_requests_active: u64,
    pub http_requests_2xx: u64,
    pub http_requests_4xx: u64,
    pub http_requests_5xx: u64,
    pub http_request_latency_avg_us: u64,

    // Stream operations
    pub operations: Vec<OperationSnapshot>,
}

/// Point-in-time figures for one stream operation.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationSnapshot {
    pub operation: &'static str,
    pub calls: u64,
    pub failures: u64,
    pub avg_time_us: u64,
}

/// Timer guard for measuring operation duration.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    #[must_use]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration since timer start.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new();
        assert_eq!(metrics.http_requests_total.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.stream_upserts.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_record_http_request() {
        let metrics = Metrics::new();

        metrics.record_http_request(200, Duration::from_millis(50));
        metrics.record_http_request(404, Duration::from_millis(10));
        metrics.record_http_request(500, Duration::from_millis(100));

        assert_eq!(metrics.http_requests_total.load(Ordering::Relaxed), 3);
        assert_eq!(metrics.http_requests_2xx.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.http_requests_4xx.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.http_requests_5xx.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_active_request_tracking() {
        let metrics = Metrics::new();

        metrics.start_request();
        metrics.start_request();
        assert_eq!(metrics.http_requests_active.load(Ordering::Relaxed), 2);

        metrics.end_request();
        assert_eq!(metrics.http_requests_active.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_record_operation() {
        let metrics = Metrics::new();

        metrics.record_operation(StreamOperation::Get, Duration::from_micros(100), false);
        metrics.record_operation(StreamOperation::Get, Duration::from_micros(300), true);
        metrics.record_operation(StreamOperation::Delete, Duration::from_micros(50), false);

        let snapshot = metrics.snapshot();
        let get = snapshot
            .operations
            .iter()
            .find(|op| op.operation == "get")
            .unwrap();
        assert_eq!(get.calls, 2);
        assert_eq!(get.failures, 1);
        assert_eq!(get.avg_time_us, 200);

        let upsert = &snapshot.operations[0];
        assert_eq!(upsert.operation, "upsert");
        assert_eq!(upsert.calls, 0);
        assert_eq!(upsert.avg_time_us, 0);
    }

    #[test]
    fn test_prometheus_export() {
        let metrics = Metrics::new();
        metrics.record_http_request(200, Duration::from_millis(50));
        metrics.record_operation(StreamOperation::List, Duration::from_micros(10), false);

        let prometheus = metrics.to_prometheus();
        assert!(prometheus.contains("stream_registry_http_requests_total 1"));
        assert!(prometheus.contains("stream_registry_http_requests_by_status{status=\"2xx\"} 1"));
        assert!(prometheus.contains("stream_registry_operations_total{operation=\"list\"} 1"));
        assert!(prometheus.contains("stream_registry_operations_total{operation=\"delete\"} 0"));
    }

    #[test]
    fn test_timer() {
        let timer = Timer::start();
        std::thread::sleep(Duration::from_millis(10));
        let elapsed = timer.elapsed();
        assert!(elapsed >= Duration::from_millis(10));
    }

    #[test]
    fn test_average_latency_empty() {
        let metrics = Metrics::new();
        assert_eq!(metrics.average_latency_us(), 0);
    }

    #[test]
    fn test_average_latency() {
        let metrics = Metrics::new();
        metrics.record_http_request(200, Duration::from_micros(100));
        metrics.record_http_request(200, Duration::from_micros(200));
        assert_eq!(metrics.average_latency_us(), 150);
    }
}
