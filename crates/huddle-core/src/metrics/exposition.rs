//! Prometheus text format

use super::registry::MetricsState;
use std::fmt::Write;

pub(super) fn render(state: &MetricsState) -> String {
    let mut out = String::new();

    header(&mut out, "http_requests_total", "Total HTTP requests", "counter");
    for (endpoint, count) in &state.requests_by_endpoint {
        sample(&mut out, "http_requests_total", "endpoint", endpoint, *count as f64);
    }

    header(&mut out, "http_responses_total", "HTTP responses by status code", "counter");
    for (status, count) in &state.responses_by_status {
        sample(&mut out, "http_responses_total", "status", status, *count as f64);
    }

    header(
        &mut out,
        "http_request_latency_seconds",
        "HTTP request latency in seconds",
        "summary",
    );
    for (endpoint, totals) in &state.latency_by_endpoint {
        sample(&mut out, "http_request_latency_seconds_sum", "endpoint", endpoint, totals.sum);
        sample(
            &mut out,
            "http_request_latency_seconds_count",
            "endpoint",
            endpoint,
            totals.count as f64,
        );
    }

    header(
        &mut out,
        "http_request_errors_total",
        "HTTP requests resulting in errors (status >= 500)",
        "counter",
    );
    for (endpoint, count) in &state.errors_by_endpoint {
        sample(&mut out, "http_request_errors_total", "endpoint", endpoint, *count as f64);
    }

    out
}

fn header(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {} {}", name, help);
    let _ = writeln!(out, "# TYPE {} {}", name, kind);
}

fn sample(out: &mut String, name: &str, label: &str, value: &str, number: f64) {
    let _ = writeln!(out, "{}{{{}=\"{}\"}} {}", name, label, escape(value), number);
}

fn escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::super::MetricsRegistry;

    #[test]
    fn test_render_contains_families() {
        let registry = MetricsRegistry::new();
        registry.record_request("health", 200, 0.25);
        registry.record_request("health", 503, 0.75);

        let text = registry.render_prometheus();
        assert!(text.contains("# TYPE http_requests_total counter"));
        assert!(text.contains("http_requests_total{endpoint=\"health\"} 2"));
        assert!(text.contains("http_responses_total{status=\"503\"} 1"));
        assert!(text.contains("http_request_latency_seconds_sum{endpoint=\"health\"} 1"));
        assert!(text.contains("http_request_latency_seconds_count{endpoint=\"health\"} 2"));
        assert!(text.contains("http_request_errors_total{endpoint=\"health\"} 1"));
    }

    #[test]
    fn test_render_escapes_labels() {
        let registry = MetricsRegistry::new();
        registry.record_request("say \"hi\"", 200, 0.0);
        let text = registry.render_prometheus();
        assert!(text.contains(r#"endpoint="say \"hi\"""#));
    }
}
