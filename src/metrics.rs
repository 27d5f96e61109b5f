use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // Pre-register counters so they appear even before the first increment.
    counter!("wrapped_reports_total").absolute(0);
    counter!("wrapped_report_failures_total").absolute(0);
    counter!("pincodes_created_total").absolute(0);
    counter!("pincode_lookups_total").absolute(0);
    counter!("upstream_errors_total").absolute(0);

    // Histogram is lazily created on first record; force creation.
    histogram!("report_build_seconds").record(0.0);

    handle
}
