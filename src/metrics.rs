// src/metrics.rs
use anyhow::{Context, Result};
use metrics::{describe_counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Help text for the router's series. Must run against the installed recorder.
fn describe_router_metrics() {
    describe_counter!(
        "contribution_requests_total",
        "Contribution requests received by the router."
    );
    describe_counter!(
        "contribution_noop_total",
        "Requests with a non-positive amount resolved without dispatch."
    );
    describe_counter!(
        "contribution_dispatch_total",
        "Contributions forwarded to a processor, by source."
    );
    describe_counter!(
        "balance_queries_total",
        "Available balance queries, by authoritative source."
    );
}

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder as the process-wide metrics recorder.
    /// Only one recorder can be installed per process.
    pub fn init() -> Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;

        describe_router_metrics();
        gauge!("contribution_router_up").set(1.0);

        Ok(Self { handle })
    }

    /// Prometheus exposition text for everything recorded so far.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}
