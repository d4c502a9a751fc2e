//! Request counters and latency totals

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Running latency totals for one endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(super) struct LatencyTotals {
    pub sum: f64,
    pub count: u64,
}

impl LatencyTotals {
    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

#[derive(Debug, Default)]
pub(super) struct MetricsState {
    pub requests_by_endpoint: BTreeMap<String, u64>,
    pub responses_by_status: BTreeMap<String, u64>,
    pub latency_by_endpoint: BTreeMap<String, LatencyTotals>,
    /// Responses with status >= 500
    pub errors_by_endpoint: BTreeMap<String, u64>,
}

/// Process-wide request metrics.
///
/// Build one at startup and hand it to every request handler behind an
/// `Arc`. All counters sit behind a single mutex, so each recorded request
/// is visible to [`MetricsRegistry::snapshot`] either completely or not at all.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    state: Mutex<MetricsState>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed request
    pub fn record_request(&self, endpoint: &str, status: u16, elapsed_seconds: f64) {
        let elapsed = if elapsed_seconds.is_finite() {
            elapsed_seconds.max(0.0)
        } else {
            0.0
        };
        let status_key = status.to_string();

        let mut state = self.lock();
        increment(&mut state.requests_by_endpoint, endpoint, 1);
        increment(&mut state.responses_by_status, &status_key, 1);
        if status >= 500 {
            increment(&mut state.errors_by_endpoint, endpoint, 1);
        }
        match state.latency_by_endpoint.get_mut(endpoint) {
            Some(totals) => {
                totals.sum += elapsed;
                totals.count += 1;
            }
            None => {
                state.latency_by_endpoint.insert(
                    endpoint.to_string(),
                    LatencyTotals {
                        sum: elapsed,
                        count: 1,
                    },
                );
            }
        }
    }

    /// Record one completed request with a measured duration
    pub fn record_duration(&self, endpoint: &str, status: u16, elapsed: Duration) {
        self.record_request(endpoint, status, elapsed.as_secs_f64());
    }

    /// Start timing a request
    pub fn start(&self, endpoint: impl Into<String>) -> RequestTimer<'_> {
        RequestTimer {
            registry: self,
            endpoint: endpoint.into(),
            started: Instant::now(),
        }
    }

    /// Consistent copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        let state = self.lock();
        MetricsSnapshot {
            requests_by_endpoint: state.requests_by_endpoint.clone(),
            responses_by_status: state.responses_by_status.clone(),
            average_latency_seconds: state
                .latency_by_endpoint
                .iter()
                .map(|(endpoint, totals)| (endpoint.clone(), totals.mean()))
                .collect(),
        }
    }

    /// Prometheus text exposition of the current state
    pub fn render_prometheus(&self) -> String {
        super::exposition::render(&self.lock())
    }

    /// Counter updates are plain additions, so a panic elsewhere cannot leave
    /// the state half-written; keep serving it.
    fn lock(&self) -> MutexGuard<'_, MetricsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn increment(map: &mut BTreeMap<String, u64>, key: &str, by: u64) {
    match map.get_mut(key) {
        Some(count) => *count += by,
        None => {
            map.insert(key.to_string(), by);
        }
    }
}

/// Point-in-time view of the registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub requests_by_endpoint: BTreeMap<String, u64>,
    pub responses_by_status: BTreeMap<String, u64>,
    pub average_latency_seconds: BTreeMap<String, f64>,
}

/// Measures one request from `start` to `finish`
#[derive(Debug)]
pub struct RequestTimer<'a> {
    registry: &'a MetricsRegistry,
    endpoint: String,
    started: Instant,
}

impl RequestTimer<'_> {
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Record the request with its final status
    pub fn finish(self, status: u16) -> Duration {
        let elapsed = self.started.elapsed();
        self.registry.record_duration(&self.endpoint, status, elapsed);
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_average_latency() {
        let registry = MetricsRegistry::new();
        registry.record_request("home", 200, 0.010);
        registry.record_request("home", 200, 0.030);

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.requests_by_endpoint["home"], 2);
        assert_eq!(snapshot.responses_by_status["200"], 2);
        assert!((snapshot.average_latency_seconds["home"] - 0.020).abs() < 1e-12);
    }

    #[test]
    fn test_status_buckets() {
        let registry = MetricsRegistry::new();
        registry.record_request("api_posts", 200, 0.001);
        registry.record_request("api_post_detail", 404, 0.001);
        registry.record_request("api_post_detail", 500, 0.001);

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.responses_by_status.len(), 3);
        assert_eq!(snapshot.responses_by_status["404"], 1);
        assert_eq!(snapshot.requests_by_endpoint["api_post_detail"], 2);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = MetricsRegistry::new().snapshot();
        assert_eq!(snapshot, MetricsSnapshot::default());

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "requests_by_endpoint": {},
                "responses_by_status": {},
                "average_latency_seconds": {}
            })
        );
    }

    #[test]
    fn test_invalid_elapsed_counts_as_zero() {
        let registry = MetricsRegistry::new();
        registry.record_request("home", 200, f64::NAN);
        registry.record_request("home", 200, -1.0);
        assert_eq!(registry.snapshot().average_latency_seconds["home"], 0.0);
    }

    #[test]
    fn test_timer_records() {
        let registry = MetricsRegistry::new();
        let timer = registry.start("health");
        assert_eq!(timer.endpoint(), "health");
        timer.finish(200);

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.requests_by_endpoint["health"], 1);
        assert!(snapshot.average_latency_seconds["health"] >= 0.0);
    }

    #[test]
    fn test_concurrent_records() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 500;

        let registry = Arc::new(MetricsRegistry::new());
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for i in 0..PER_THREAD {
                        let elapsed = ((t * PER_THREAD + i) % 10) as f64 / 100.0;
                        registry.record_request("home", 200, elapsed);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let n = THREADS * PER_THREAD;
        let expected_mean =
            (0..n).map(|k| (k % 10) as f64 / 100.0).sum::<f64>() / n as f64;

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.requests_by_endpoint["home"], n as u64);
        assert_eq!(snapshot.responses_by_status["200"], n as u64);
        assert!((snapshot.average_latency_seconds["home"] - expected_mean).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_during_writes_is_consistent() {
        let registry = Arc::new(MetricsRegistry::new());
        let writer = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..2_000 {
                    registry.record_request("home", 200, 0.5);
                }
            })
        };

        for _ in 0..200 {
            let snapshot = registry.snapshot();
            let requests = snapshot.requests_by_endpoint.get("home").copied().unwrap_or(0);
            let statuses = snapshot.responses_by_status.get("200").copied().unwrap_or(0);
            assert_eq!(requests, statuses);
            if requests > 0 {
                assert_eq!(snapshot.average_latency_seconds["home"], 0.5);
            }
        }
        writer.join().unwrap();
    }
}
