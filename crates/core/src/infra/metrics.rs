use serde::Serialize;
use std::sync::Mutex;

use crate::domain::error::RewriteErrorKind;

const MAX_LATENCY_RECORDS: usize = 1000;

/// ローカルメトリクス収集器
pub struct Metrics {
    counters: Mutex<MetricsCounters>,
    latencies: Mutex<Vec<LatencyRecord>>,
}

#[derive(Debug, Default)]
struct MetricsCounters {
    requests: u64,
    succeeded: u64,
    errors_validation: u64,
    errors_timeout: u64,
    errors_provider: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LatencyRecord {
    pub generator: String,
    pub duration_ms: u64,
    pub timestamp: String,
}

/// メトリクスサマリー（GET /api/metrics で返す）
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub requests: u64,
    pub succeeded: u64,
    pub error_counts: ErrorCounts,
    pub avg_generate_latency_ms: Option<f64>,
    pub recent_latencies: Vec<LatencyRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorCounts {
    pub validation: u64,
    pub timeout: u64,
    pub provider: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            counters: Mutex::new(MetricsCounters::default()),
            latencies: Mutex::new(Vec::new()),
        }
    }

    fn with_counters(&self, f: impl FnOnce(&mut MetricsCounters)) {
        // poison されても集計は続ける
        let mut c = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut c);
    }

    pub fn inc_requests(&self) {
        self.with_counters(|c| c.requests += 1);
    }

    pub fn inc_succeeded(&self) {
        self.with_counters(|c| c.succeeded += 1);
    }

    pub fn inc_error(&self, kind: RewriteErrorKind) {
        self.with_counters(|c| match kind {
            RewriteErrorKind::Validation => c.errors_validation += 1,
            RewriteErrorKind::Timeout => c.errors_timeout += 1,
            RewriteErrorKind::Provider => c.errors_provider += 1,
        });
    }

    pub fn record_latency(&self, generator: &str, duration_ms: u64) {
        let record = LatencyRecord {
            generator: generator.to_string(),
            duration_ms,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let mut latencies = self.latencies.lock().unwrap_or_else(|e| e.into_inner());
        latencies.push(record);
        if latencies.len() > MAX_LATENCY_RECORDS {
            let excess = latencies.len() - MAX_LATENCY_RECORDS;
            latencies.drain(0..excess);
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        let c = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        let latencies = self.latencies.lock().unwrap_or_else(|e| e.into_inner());

        let avg = if latencies.is_empty() {
            None
        } else {
            let total: f64 = latencies.iter().map(|r| r.duration_ms as f64).sum();
            Some(total / latencies.len() as f64)
        };

        let recent: Vec<LatencyRecord> = latencies.iter().rev().take(20).cloned().collect();

        MetricsSummary {
            requests: c.requests,
            succeeded: c.succeeded,
            error_counts: ErrorCounts {
                validation: c.errors_validation,
                timeout: c.errors_timeout,
                provider: c.errors_provider,
            },
            avg_generate_latency_ms: avg,
            recent_latencies: recent,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
