//! Prometheus collectors for HTTP traffic and token activity.

use prometheus::{
    CounterVec, Gauge, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};
use std::time::{Duration, Instant};

/// Route excluded from request accounting so scrapes don't count themselves
const METRICS_ROUTE: &str = "/api/metrics";

#[derive(Clone)]
pub struct AppMetrics {
    pub registry: Registry,
    pub http_requests_total: CounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub tokens_issued_total: IntCounter,
    pub token_issue_failures_total: IntCounterVec,
    pub token_verifications_total: IntCounterVec,
    pub app_uptime_seconds: Gauge,
    pub start_time: Instant,
}

impl AppMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "status", "route"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
            &["method", "route"],
        )?;

        let tokens_issued_total =
            IntCounter::new("tokens_issued_total", "Stream access tokens issued")?;

        let token_issue_failures_total = IntCounterVec::new(
            Opts::new(
                "token_issue_failures_total",
                "Token issuance requests that produced no token",
            ),
            &["reason"],
        )?;

        let token_verifications_total = IntCounterVec::new(
            Opts::new("token_verifications_total", "Token verification outcomes"),
            &["result"],
        )?;

        let app_uptime_seconds = Gauge::new("app_uptime_seconds", "Application uptime in seconds")?;

        let app_info = CounterVec::new(
            Opts::new("app_info", "Application information"),
            &["version", "commit", "build_time"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(tokens_issued_total.clone()))?;
        registry.register(Box::new(token_issue_failures_total.clone()))?;
        registry.register(Box::new(token_verifications_total.clone()))?;
        registry.register(Box::new(app_uptime_seconds.clone()))?;
        registry.register(Box::new(app_info.clone()))?;

        app_info
            .with_label_values(&[
                env!("CARGO_PKG_VERSION"),
                option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
                option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown"),
            ])
            .inc();

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            tokens_issued_total,
            token_issue_failures_total,
            token_verifications_total,
            app_uptime_seconds,
            start_time: Instant::now(),
        })
    }

    /// Record an HTTP request with method, route, status, and duration
    pub fn record_request(&self, method: &str, route: &str, status: u16, duration: Duration) {
        if route == METRICS_ROUTE {
            return;
        }

        let status = status.to_string();
        self.http_requests_total
            .with_label_values(&[method, status.as_str(), route])
            .inc();

        self.http_request_duration_seconds
            .with_label_values(&[method, route])
            .observe(duration.as_secs_f64());
    }

    pub fn record_token_issued(&self) {
        self.tokens_issued_total.inc();
    }

    /// `reason` is one of `configuration`, `validation`, `internal`, `rate_limited`
    pub fn record_issue_failure(&self, reason: &str) {
        self.token_issue_failures_total
            .with_label_values(&[reason])
            .inc();
    }

    pub fn record_verification(&self, valid: bool) {
        let result = if valid { "valid" } else { "invalid" };
        self.token_verifications_total
            .with_label_values(&[result])
            .inc();
    }

    pub fn update_uptime(&self) {
        self.app_uptime_seconds
            .set(self.start_time.elapsed().as_secs_f64());
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        TextEncoder::new().encode_to_string(&self.registry.gather())
    }
}
