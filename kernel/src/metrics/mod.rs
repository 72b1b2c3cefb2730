//! Metrics collection and reporting for table operations.
//!
//! Each operation (snapshot construction, scan planning, transaction commit)
//! gets a query context when it starts. The context owns a fresh set of
//! metric instruments, is mutated only by the thread driving the operation,
//! and is finalized exactly once — on success or on failure — into an
//! immutable report. Reports render to canonical, byte-reproducible JSON and
//! are pushed to [`MetricsReporter`] sinks.
//!
//! # Example: accumulating and finalizing transaction metrics
//!
//! ```
//! use delta_actions::metrics::{TransactionMetrics, TransactionQueryContext};
//! use uuid::Uuid;
//!
//! let mut context = TransactionQueryContext::new(
//!     "/table",
//!     "WRITE",
//!     "my-engine/1.0",
//!     4,
//!     Uuid::new_v4(), // UUID of the base snapshot's report
//!     vec![],
//!     TransactionMetrics::for_existing_table(None),
//! );
//! context.metrics_mut().commit_attempts_counter.increment();
//! context.metrics_mut().update_for_add_file(1024);
//!
//! let report = context.into_report(Some(5));
//! assert_eq!(report.transaction_metrics().num_add_files, 1);
//! println!("{}", report.to_json().unwrap());
//! ```
//!
//! # Example: a custom reporter
//!
//! ```
//! use delta_actions::metrics::{MetricsReport, MetricsReporter};
//!
//! #[derive(Debug)]
//! struct StdoutReporter;
//!
//! impl MetricsReporter for StdoutReporter {
//!     fn report(&self, report: MetricsReport) {
//!         if let Ok(json) = report.to_json() {
//!             println!("{json}");
//!         }
//!     }
//! }
//! ```

mod context;
mod instruments;
mod operation_metrics;
mod report;
mod reporter;
mod serialize;

pub use context::{ScanQueryContext, SnapshotQueryContext, TransactionQueryContext};
pub use instruments::{Counter, FileSizeHistogram, Timer};
pub use operation_metrics::{
    ScanMetrics, ScanMetricsResult, SnapshotMetrics, SnapshotMetricsResult, TransactionMetrics,
    TransactionMetricsResult,
};
pub use report::{MetricsReport, ScanReport, SnapshotReport, TransactionReport};
pub use reporter::{MetricsReporter, TracingReporter};
