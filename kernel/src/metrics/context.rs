//! Query contexts: the mutable state of one in-flight operation.
//!
//! A context is created when an operation starts, mutated only by the thread
//! driving that operation, and finalized exactly once into an immutable
//! report. Finalization takes the context by value, so a second finalization
//! or a post-finalization mutation is rejected by the compiler rather than at
//! runtime.
//!
//! Both finalizers freeze whatever metrics have accumulated so far; a failed
//! operation still reports the partial signal it collected before failing.

use uuid::Uuid;

use super::operation_metrics::{ScanMetrics, SnapshotMetrics, TransactionMetrics};
use super::report::{ScanReport, SnapshotReport, TransactionReport};
use crate::Version;

/// Context for one snapshot construction.
#[derive(Debug)]
pub struct SnapshotQueryContext {
    table_path: String,
    version: Option<Version>,
    provided_timestamp: Option<i64>,
    checkpoint_version: Option<Version>,
    metrics: SnapshotMetrics,
}

impl SnapshotQueryContext {
    fn new(
        table_path: impl Into<String>,
        version: Option<Version>,
        provided_timestamp: Option<i64>,
    ) -> Self {
        Self {
            table_path: table_path.into(),
            version,
            provided_timestamp,
            checkpoint_version: None,
            metrics: SnapshotMetrics::new(),
        }
    }

    /// Context for building the latest snapshot; the version is unknown until
    /// log listing resolves it.
    pub fn for_latest_snapshot(table_path: impl Into<String>) -> Self {
        Self::new(table_path, None, None)
    }

    /// Context for building a snapshot at a known version.
    pub fn for_version_snapshot(table_path: impl Into<String>, version: Version) -> Self {
        Self::new(table_path, Some(version), None)
    }

    /// Context for building a snapshot at a timestamp; the version is unknown
    /// until timestamp resolution runs.
    pub fn for_timestamp_snapshot(table_path: impl Into<String>, timestamp: i64) -> Self {
        Self::new(table_path, None, Some(timestamp))
    }

    /// Records the resolved snapshot version.
    pub fn set_version(&mut self, version: Version) {
        self.version = Some(version);
    }

    /// Records the checkpoint version replay started from.
    pub fn set_checkpoint_version(&mut self, checkpoint_version: Option<Version>) {
        self.checkpoint_version = checkpoint_version;
    }

    pub fn table_path(&self) -> &str {
        &self.table_path
    }

    pub fn version(&self) -> Option<Version> {
        self.version
    }

    pub fn metrics(&self) -> &SnapshotMetrics {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut SnapshotMetrics {
        &mut self.metrics
    }

    fn build(self, exception: Option<String>) -> SnapshotReport {
        SnapshotReport {
            table_path: self.table_path,
            report_uuid: Uuid::new_v4(),
            exception,
            version: self.version,
            provided_timestamp: self.provided_timestamp,
            checkpoint_version: self.checkpoint_version,
            snapshot_metrics: self.metrics.capture(),
        }
    }

    /// Finalizes this context into a success report.
    pub fn into_report(self) -> SnapshotReport {
        self.build(None)
    }

    /// Finalizes this context into an error report carrying the failure's
    /// rendering and the metrics collected so far.
    pub fn into_error_report(self, error: impl std::fmt::Display) -> SnapshotReport {
        self.build(Some(error.to_string()))
    }
}

/// Context for one transaction commit.
#[derive(Debug)]
pub struct TransactionQueryContext {
    table_path: String,
    operation: String,
    engine_info: String,
    base_snapshot_version: Version,
    snapshot_report_uuid: Uuid,
    clustering_columns: Vec<Vec<String>>,
    metrics: TransactionMetrics,
}

impl TransactionQueryContext {
    /// Creates the context for a commit against the snapshot that produced
    /// `snapshot_report_uuid`. The metrics bundle expresses the operation
    /// shape (see [`TransactionMetrics::for_new_table`] and
    /// [`TransactionMetrics::for_existing_table`]).
    pub fn new(
        table_path: impl Into<String>,
        operation: impl Into<String>,
        engine_info: impl Into<String>,
        base_snapshot_version: Version,
        snapshot_report_uuid: Uuid,
        clustering_columns: Vec<Vec<String>>,
        metrics: TransactionMetrics,
    ) -> Self {
        Self {
            table_path: table_path.into(),
            operation: operation.into(),
            engine_info: engine_info.into(),
            base_snapshot_version,
            snapshot_report_uuid,
            clustering_columns,
            metrics,
        }
    }

    pub fn table_path(&self) -> &str {
        &self.table_path
    }

    pub fn metrics(&self) -> &TransactionMetrics {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut TransactionMetrics {
        &mut self.metrics
    }

    fn build(self, committed_version: Option<Version>, exception: Option<String>) -> TransactionReport {
        TransactionReport {
            table_path: self.table_path,
            report_uuid: Uuid::new_v4(),
            exception,
            operation: self.operation,
            engine_info: self.engine_info,
            base_snapshot_version: self.base_snapshot_version,
            snapshot_report_uuid: self.snapshot_report_uuid,
            committed_version,
            clustering_columns: self.clustering_columns,
            transaction_metrics: self.metrics.capture(),
        }
    }

    /// Finalizes this context into a success report. `committed_version` is
    /// absent when the commit resolved without producing a version of its own.
    pub fn into_report(self, committed_version: Option<Version>) -> TransactionReport {
        self.build(committed_version, None)
    }

    /// Finalizes this context into an error report; the committed version is
    /// absent and the metrics collected before the failure are preserved.
    pub fn into_error_report(self, error: impl std::fmt::Display) -> TransactionReport {
        self.build(None, Some(error.to_string()))
    }
}

/// Context for one scan.
#[derive(Debug)]
pub struct ScanQueryContext {
    table_path: String,
    table_version: Version,
    table_schema: String,
    snapshot_report_uuid: Uuid,
    filter: Option<String>,
    read_schema: String,
    partition_predicate: Option<String>,
    data_skipping_filter: Option<String>,
    is_fully_consumed: bool,
    metrics: ScanMetrics,
}

impl ScanQueryContext {
    /// Creates the context for a scan of the snapshot that produced
    /// `snapshot_report_uuid`. Predicates are attached with the `with_*`
    /// builders; schemas and predicates are carried in their string form.
    pub fn new(
        table_path: impl Into<String>,
        table_version: Version,
        table_schema: impl Into<String>,
        snapshot_report_uuid: Uuid,
        read_schema: impl Into<String>,
    ) -> Self {
        Self {
            table_path: table_path.into(),
            table_version,
            table_schema: table_schema.into(),
            snapshot_report_uuid,
            filter: None,
            read_schema: read_schema.into(),
            partition_predicate: None,
            data_skipping_filter: None,
            is_fully_consumed: false,
            metrics: ScanMetrics::new(),
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_partition_predicate(mut self, predicate: impl Into<String>) -> Self {
        self.partition_predicate = Some(predicate.into());
        self
    }

    pub fn with_data_skipping_filter(mut self, filter: impl Into<String>) -> Self {
        self.data_skipping_filter = Some(filter.into());
        self
    }

    /// Records that the engine consumed the scan's metadata to the end.
    pub fn mark_fully_consumed(&mut self) {
        self.is_fully_consumed = true;
    }

    pub fn table_path(&self) -> &str {
        &self.table_path
    }

    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut ScanMetrics {
        &mut self.metrics
    }

    fn build(self, exception: Option<String>) -> ScanReport {
        ScanReport {
            table_path: self.table_path,
            report_uuid: Uuid::new_v4(),
            exception,
            table_version: self.table_version,
            table_schema: self.table_schema,
            snapshot_report_uuid: self.snapshot_report_uuid,
            filter: self.filter,
            read_schema: self.read_schema,
            partition_predicate: self.partition_predicate,
            data_skipping_filter: self.data_skipping_filter,
            is_fully_consumed: self.is_fully_consumed,
            scan_metrics: self.metrics.capture(),
        }
    }

    /// Finalizes this context into a success report.
    pub fn into_report(self) -> ScanReport {
        self.build(None)
    }

    /// Finalizes this context into an error report with the metrics collected
    /// before the failure.
    pub fn into_error_report(self, error: impl std::fmt::Display) -> ScanReport {
        self.build(Some(error.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn snapshot_success_report_freezes_metrics() {
        let mut context = SnapshotQueryContext::for_version_snapshot("/table", 5);
        context.metrics_mut().load_initial_delta_actions_timer.record_ns(1000);
        context.set_checkpoint_version(Some(4));

        let report = context.into_report();
        assert_eq!(report.table_path(), "/table");
        assert_eq!(report.version(), Some(5));
        assert_eq!(report.provided_timestamp(), None);
        assert_eq!(report.checkpoint_version(), Some(4));
        assert_eq!(report.exception(), None);
        assert_eq!(
            report.snapshot_metrics().load_initial_delta_actions_duration_ns,
            1000
        );
    }

    #[test]
    fn snapshot_error_report_preserves_partial_metrics() {
        let mut context = SnapshotQueryContext::for_latest_snapshot("/table");
        context.metrics_mut().load_initial_delta_actions_timer.record_ns(250);

        let error = Error::generic("log listing failed");
        let report = context.into_error_report(&error);
        assert_eq!(
            report.exception(),
            Some("Generic delta kernel error: log listing failed")
        );
        // the version never resolved, but the collected signal survives
        assert_eq!(report.version(), None);
        assert_eq!(
            report.snapshot_metrics().load_initial_delta_actions_duration_ns,
            250
        );
    }

    #[test]
    fn timestamp_snapshot_context_carries_provided_timestamp() {
        let mut context = SnapshotQueryContext::for_timestamp_snapshot("/table", 1700000000000);
        context.metrics_mut().timestamp_to_version_resolution_timer.record_ns(9);
        context.set_version(3);

        let report = context.into_report();
        assert_eq!(report.provided_timestamp(), Some(1700000000000));
        assert_eq!(report.version(), Some(3));
        assert_eq!(
            report.snapshot_metrics().timestamp_to_version_resolution_duration_ns,
            Some(9)
        );
    }

    #[test]
    fn transaction_report_links_snapshot_report() {
        let snapshot_report = SnapshotQueryContext::for_version_snapshot("/table", 1).into_report();
        let mut context = TransactionQueryContext::new(
            "/table",
            "WRITE",
            "engine-1",
            1,
            snapshot_report.report_uuid(),
            vec![vec!["user".to_string(), "id".to_string()]],
            TransactionMetrics::for_existing_table(None),
        );
        context.metrics_mut().commit_attempts_counter.increment();
        context.metrics_mut().update_for_add_file(100);

        let report = context.into_report(Some(2));
        assert_eq!(report.snapshot_report_uuid(), snapshot_report.report_uuid());
        assert_ne!(report.report_uuid(), snapshot_report.report_uuid());
        assert_eq!(report.committed_version(), Some(2));
        assert_eq!(report.base_snapshot_version(), 1);
        assert_eq!(
            report.clustering_columns(),
            &[vec!["user".to_string(), "id".to_string()]]
        );
        assert_eq!(report.transaction_metrics().num_add_files, 1);
    }

    #[test]
    fn transaction_error_report_has_no_committed_version() {
        let mut context = TransactionQueryContext::new(
            "/table",
            "WRITE",
            "engine-1",
            7,
            Uuid::new_v4(),
            vec![],
            TransactionMetrics::for_new_table(),
        );
        context.metrics_mut().commit_attempts_counter.increment();
        context.metrics_mut().commit_attempts_counter.increment();

        let report = context.into_error_report(Error::generic("commit conflict"));
        assert_eq!(report.committed_version(), None);
        assert!(report.exception().unwrap().contains("commit conflict"));
        assert_eq!(report.transaction_metrics().num_commit_attempts, 2);
    }

    #[test]
    fn scan_report_carries_predicates_and_consumption_flag() {
        let mut context = ScanQueryContext::new(
            "/table",
            9,
            "struct<id: long>",
            Uuid::new_v4(),
            "struct<id: long>",
        )
        .with_filter("id > 10")
        .with_data_skipping_filter("minValues.id <= 10");
        context.metrics_mut().add_files_counter.add(4);
        context.mark_fully_consumed();

        let report = context.into_report();
        assert_eq!(report.table_version(), 9);
        assert_eq!(report.filter(), Some("id > 10"));
        assert_eq!(report.partition_predicate(), None);
        assert_eq!(report.data_skipping_filter(), Some("minValues.id <= 10"));
        assert!(report.is_fully_consumed());
        assert_eq!(report.scan_metrics().num_add_files_seen, 4);
    }

    #[test]
    fn each_report_gets_a_fresh_uuid() {
        let first = SnapshotQueryContext::for_latest_snapshot("/t").into_report();
        let second = SnapshotQueryContext::for_latest_snapshot("/t").into_report();
        assert_ne!(first.report_uuid(), second.report_uuid());
    }
}
