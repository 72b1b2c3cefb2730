//! Metrics reporter trait and implementations.

use tracing::{info, warn};

use super::report::MetricsReport;

/// Trait for sinks that consume finalized operation reports.
///
/// Implementations receive each report once, after the operation that produced
/// it completed or failed, and can forward it to logs or monitoring systems.
/// Reports are immutable, so an implementation may share them freely across
/// threads.
pub trait MetricsReporter: Send + Sync + std::fmt::Debug {
    /// Consume one report.
    fn report(&self, report: MetricsReport);
}

/// A reporter that emits each report's canonical JSON at `info` level via
/// [`tracing`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl MetricsReporter for TracingReporter {
    fn report(&self, report: MetricsReport) {
        match report.to_json() {
            Ok(json) => info!(target: "delta_actions::metrics", "{json}"),
            Err(err) => warn!(
                target: "delta_actions::metrics",
                "failed to serialize {} report for {}: {err}",
                report.operation_type(),
                report.table_path(),
            ),
        }
    }
}
