//! Immutable reports describing completed operations.
//!
//! A report is the frozen outcome of one operation: its identity (table path
//! plus a freshly generated UUID), an optional captured failure, the
//! operation-specific attributes, and the metrics that had accumulated by the
//! time the operation finished or failed. Reports never change after
//! construction and are safe to share across threads.

use uuid::Uuid;

use super::operation_metrics::{
    ScanMetricsResult, SnapshotMetricsResult, TransactionMetricsResult,
};
use crate::Version;

/// The outcome of constructing a table snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotReport {
    pub(super) table_path: String,
    pub(super) report_uuid: Uuid,
    pub(super) exception: Option<String>,
    pub(super) version: Option<Version>,
    pub(super) provided_timestamp: Option<i64>,
    pub(super) checkpoint_version: Option<Version>,
    pub(super) snapshot_metrics: SnapshotMetricsResult,
}

impl SnapshotReport {
    pub fn table_path(&self) -> &str {
        &self.table_path
    }

    /// The opaque identifier unique to this report instance.
    pub fn report_uuid(&self) -> Uuid {
        self.report_uuid
    }

    /// The captured failure's rendering, if the operation failed.
    pub fn exception(&self) -> Option<&str> {
        self.exception.as_deref()
    }

    /// The resolved snapshot version. Absent if resolution never completed.
    pub fn version(&self) -> Option<Version> {
        self.version
    }

    /// The user-provided timestamp, for timestamp-based snapshot construction.
    pub fn provided_timestamp(&self) -> Option<i64> {
        self.provided_timestamp
    }

    /// The checkpoint version replay started from, if any.
    pub fn checkpoint_version(&self) -> Option<Version> {
        self.checkpoint_version
    }

    pub fn snapshot_metrics(&self) -> &SnapshotMetricsResult {
        &self.snapshot_metrics
    }
}

/// The outcome of committing a transaction.
#[derive(Debug, Clone)]
pub struct TransactionReport {
    pub(super) table_path: String,
    pub(super) report_uuid: Uuid,
    pub(super) exception: Option<String>,
    pub(super) operation: String,
    pub(super) engine_info: String,
    pub(super) base_snapshot_version: Version,
    pub(super) snapshot_report_uuid: Uuid,
    pub(super) committed_version: Option<Version>,
    pub(super) clustering_columns: Vec<Vec<String>>,
    pub(super) transaction_metrics: TransactionMetricsResult,
}

impl TransactionReport {
    pub fn table_path(&self) -> &str {
        &self.table_path
    }

    pub fn report_uuid(&self) -> Uuid {
        self.report_uuid
    }

    pub fn exception(&self) -> Option<&str> {
        self.exception.as_deref()
    }

    /// The engine-provided name of the operation being committed.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn engine_info(&self) -> &str {
        &self.engine_info
    }

    /// The version of the snapshot this transaction committed against.
    pub fn base_snapshot_version(&self) -> Version {
        self.base_snapshot_version
    }

    /// The UUID of the [`SnapshotReport`] for the snapshot this transaction
    /// committed against (its causal predecessor).
    pub fn snapshot_report_uuid(&self) -> Uuid {
        self.snapshot_report_uuid
    }

    /// The committed version, absent if the commit did not complete.
    pub fn committed_version(&self) -> Option<Version> {
        self.committed_version
    }

    /// The clustering columns in effect, each as a sequence of path segments,
    /// in their declared order.
    pub fn clustering_columns(&self) -> &[Vec<String>] {
        &self.clustering_columns
    }

    pub fn transaction_metrics(&self) -> &TransactionMetricsResult {
        &self.transaction_metrics
    }
}

/// The outcome of planning (and consuming) a scan.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub(super) table_path: String,
    pub(super) report_uuid: Uuid,
    pub(super) exception: Option<String>,
    pub(super) table_version: Version,
    pub(super) table_schema: String,
    pub(super) snapshot_report_uuid: Uuid,
    pub(super) filter: Option<String>,
    pub(super) read_schema: String,
    pub(super) partition_predicate: Option<String>,
    pub(super) data_skipping_filter: Option<String>,
    pub(super) is_fully_consumed: bool,
    pub(super) scan_metrics: ScanMetricsResult,
}

impl ScanReport {
    pub fn table_path(&self) -> &str {
        &self.table_path
    }

    pub fn report_uuid(&self) -> Uuid {
        self.report_uuid
    }

    pub fn exception(&self) -> Option<&str> {
        self.exception.as_deref()
    }

    pub fn table_version(&self) -> Version {
        self.table_version
    }

    /// String form of the table's full schema.
    pub fn table_schema(&self) -> &str {
        &self.table_schema
    }

    pub fn snapshot_report_uuid(&self) -> Uuid {
        self.snapshot_report_uuid
    }

    /// String form of the engine-provided scan filter, if any.
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// String form of the schema actually read.
    pub fn read_schema(&self) -> &str {
        &self.read_schema
    }

    /// String form of the partition-pruning predicate, if any.
    pub fn partition_predicate(&self) -> Option<&str> {
        self.partition_predicate.as_deref()
    }

    /// String form of the data-skipping filter, if any.
    pub fn data_skipping_filter(&self) -> Option<&str> {
        self.data_skipping_filter.as_deref()
    }

    /// Whether the engine consumed the scan's metadata to the end.
    pub fn is_fully_consumed(&self) -> bool {
        self.is_fully_consumed
    }

    pub fn scan_metrics(&self) -> &ScanMetricsResult {
        &self.scan_metrics
    }
}

/// Any of the three report kinds, for sinks that consume all of them.
#[derive(Debug, Clone)]
pub enum MetricsReport {
    Snapshot(SnapshotReport),
    Transaction(TransactionReport),
    Scan(ScanReport),
}

impl MetricsReport {
    pub fn table_path(&self) -> &str {
        match self {
            MetricsReport::Snapshot(report) => report.table_path(),
            MetricsReport::Transaction(report) => report.table_path(),
            MetricsReport::Scan(report) => report.table_path(),
        }
    }

    pub fn report_uuid(&self) -> Uuid {
        match self {
            MetricsReport::Snapshot(report) => report.report_uuid(),
            MetricsReport::Transaction(report) => report.report_uuid(),
            MetricsReport::Scan(report) => report.report_uuid(),
        }
    }

    /// The operation-type discriminant as it appears in the JSON form.
    pub fn operation_type(&self) -> &'static str {
        match self {
            MetricsReport::Snapshot(_) => "Snapshot",
            MetricsReport::Transaction(_) => "Transaction",
            MetricsReport::Scan(_) => "Scan",
        }
    }
}

impl From<SnapshotReport> for MetricsReport {
    fn from(report: SnapshotReport) -> Self {
        MetricsReport::Snapshot(report)
    }
}

impl From<TransactionReport> for MetricsReport {
    fn from(report: TransactionReport) -> Self {
        MetricsReport::Transaction(report)
    }
}

impl From<ScanReport> for MetricsReport {
    fn from(report: ScanReport) -> Self {
        MetricsReport::Scan(report)
    }
}
