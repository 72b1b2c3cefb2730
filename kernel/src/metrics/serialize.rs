//! Canonical JSON encoding of reports.
//!
//! One hand-specified template per report kind: fields are emitted in the
//! documented declaration order, never alphabetically and never in map
//! iteration order, so the output is byte-comparable across runs and
//! implementations. Absent optionals render as literal `null`; the metrics
//! sub-object is always present and fully populated; output is a single line
//! with no trailing newline. Adding a field means updating the template here
//! explicitly — there is no reflective fallback.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::operation_metrics::{
    ScanMetricsResult, SnapshotMetricsResult, TransactionMetricsResult,
};
use super::report::{MetricsReport, ScanReport, SnapshotReport, TransactionReport};
use crate::DeltaResult;

impl SnapshotReport {
    /// Renders this report as canonical single-line JSON.
    pub fn to_json(&self) -> DeltaResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl TransactionReport {
    /// Renders this report as canonical single-line JSON.
    pub fn to_json(&self) -> DeltaResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl ScanReport {
    /// Renders this report as canonical single-line JSON.
    pub fn to_json(&self) -> DeltaResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl MetricsReport {
    /// Renders the wrapped report as canonical single-line JSON.
    pub fn to_json(&self) -> DeltaResult<String> {
        match self {
            MetricsReport::Snapshot(report) => report.to_json(),
            MetricsReport::Transaction(report) => report.to_json(),
            MetricsReport::Scan(report) => report.to_json(),
        }
    }
}

impl Serialize for SnapshotReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("SnapshotReport", 8)?;
        s.serialize_field("tablePath", self.table_path())?;
        s.serialize_field("operationType", "Snapshot")?;
        s.serialize_field("reportUUID", &self.report_uuid())?;
        s.serialize_field("exception", &self.exception())?;
        s.serialize_field("version", &self.version())?;
        s.serialize_field("providedTimestamp", &self.provided_timestamp())?;
        s.serialize_field("checkpointVersion", &self.checkpoint_version())?;
        s.serialize_field("snapshotMetrics", self.snapshot_metrics())?;
        s.end()
    }
}

impl Serialize for SnapshotMetricsResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("SnapshotMetricsResult", 2)?;
        s.serialize_field(
            "timestampToVersionResolutionDurationNs",
            &self.timestamp_to_version_resolution_duration_ns,
        )?;
        s.serialize_field(
            "loadInitialDeltaActionsDurationNs",
            &self.load_initial_delta_actions_duration_ns,
        )?;
        s.end()
    }
}

impl Serialize for TransactionReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("TransactionReport", 11)?;
        s.serialize_field("tablePath", self.table_path())?;
        s.serialize_field("operationType", "Transaction")?;
        s.serialize_field("reportUUID", &self.report_uuid())?;
        s.serialize_field("exception", &self.exception())?;
        s.serialize_field("operation", self.operation())?;
        s.serialize_field("engineInfo", self.engine_info())?;
        s.serialize_field("baseSnapshotVersion", &self.base_snapshot_version())?;
        s.serialize_field("snapshotReportUUID", &self.snapshot_report_uuid())?;
        s.serialize_field("committedVersion", &self.committed_version())?;
        s.serialize_field("clusteringColumns", self.clustering_columns())?;
        s.serialize_field("transactionMetrics", self.transaction_metrics())?;
        s.end()
    }
}

impl Serialize for TransactionMetricsResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("TransactionMetricsResult", 7)?;
        s.serialize_field("totalCommitDurationNs", &self.total_commit_duration_ns)?;
        s.serialize_field("numCommitAttempts", &self.num_commit_attempts)?;
        s.serialize_field("numAddFiles", &self.num_add_files)?;
        s.serialize_field("numRemoveFiles", &self.num_remove_files)?;
        s.serialize_field("numTotalActions", &self.num_total_actions)?;
        s.serialize_field(
            "totalAddFilesSizeInBytes",
            &self.total_add_files_size_in_bytes,
        )?;
        s.serialize_field(
            "totalRemoveFilesSizeInBytes",
            &self.total_remove_files_size_in_bytes,
        )?;
        s.end()
    }
}

impl Serialize for ScanReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ScanReport", 13)?;
        s.serialize_field("tablePath", self.table_path())?;
        s.serialize_field("operationType", "Scan")?;
        s.serialize_field("reportUUID", &self.report_uuid())?;
        s.serialize_field("exception", &self.exception())?;
        s.serialize_field("tableVersion", &self.table_version())?;
        s.serialize_field("tableSchema", self.table_schema())?;
        s.serialize_field("snapshotReportUUID", &self.snapshot_report_uuid())?;
        s.serialize_field("filter", &self.filter())?;
        s.serialize_field("readSchema", self.read_schema())?;
        s.serialize_field("partitionPredicate", &self.partition_predicate())?;
        s.serialize_field("dataSkippingFilter", &self.data_skipping_filter())?;
        s.serialize_field("isFullyConsumed", &self.is_fully_consumed())?;
        s.serialize_field("scanMetrics", self.scan_metrics())?;
        s.end()
    }
}

impl Serialize for ScanMetricsResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ScanMetricsResult", 6)?;
        s.serialize_field("totalPlanningDurationNs", &self.total_planning_duration_ns)?;
        s.serialize_field("numAddFilesSeen", &self.num_add_files_seen)?;
        s.serialize_field(
            "numAddFilesSeenFromDeltaFiles",
            &self.num_add_files_seen_from_delta_files,
        )?;
        s.serialize_field("numActiveAddFiles", &self.num_active_add_files)?;
        s.serialize_field("numDuplicateAddFiles", &self.num_duplicate_add_files)?;
        s.serialize_field(
            "numRemoveFilesSeenFromDeltaFiles",
            &self.num_remove_files_seen_from_delta_files,
        )?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::super::context::{
        ScanQueryContext, SnapshotQueryContext, TransactionQueryContext,
    };
    use super::super::operation_metrics::TransactionMetrics;
    use super::*;
    use uuid::Uuid;

    #[test]
    fn serialization_is_deterministic() {
        let report = SnapshotQueryContext::for_version_snapshot("/t", 1).into_report();
        assert_eq!(report.to_json().unwrap(), report.to_json().unwrap());
    }

    #[test]
    fn output_is_single_line_without_trailing_newline() {
        let report = SnapshotQueryContext::for_latest_snapshot("/t").into_report();
        let json = report.to_json().unwrap();
        assert!(!json.contains('\n'));
        assert!(json.starts_with('{') && json.ends_with('}'));
    }

    #[test]
    fn snapshot_report_template() {
        let mut context = SnapshotQueryContext::for_timestamp_snapshot("/t", 99);
        context.metrics_mut().timestamp_to_version_resolution_timer.record_ns(7);
        context.metrics_mut().load_initial_delta_actions_timer.record_ns(11);
        context.set_version(3);
        context.set_checkpoint_version(Some(2));
        let report = context.into_report();

        let expected = format!(
            "{{\"tablePath\":\"/t\",\"operationType\":\"Snapshot\",\"reportUUID\":\"{}\",\
             \"exception\":null,\"version\":3,\"providedTimestamp\":99,\"checkpointVersion\":2,\
             \"snapshotMetrics\":{{\"timestampToVersionResolutionDurationNs\":7,\
             \"loadInitialDeltaActionsDurationNs\":11}}}}",
            report.report_uuid()
        );
        assert_eq!(report.to_json().unwrap(), expected);
    }

    #[test]
    fn transaction_report_template_with_absent_optionals() {
        let snapshot_report = SnapshotQueryContext::for_version_snapshot("/t", 1).into_report();
        let mut context = TransactionQueryContext::new(
            "/t",
            "op",
            "eng",
            1,
            snapshot_report.report_uuid(),
            vec![vec!["colA".to_string()]],
            TransactionMetrics::for_existing_table(None),
        );
        context.metrics_mut().total_commit_timer.record_ns(200);
        context.metrics_mut().commit_attempts_counter.add(2);
        let report = context.into_report(None);

        let expected = format!(
            "{{\"tablePath\":\"/t\",\"operationType\":\"Transaction\",\"reportUUID\":\"{}\",\
             \"exception\":null,\"operation\":\"op\",\"engineInfo\":\"eng\",\
             \"baseSnapshotVersion\":1,\"snapshotReportUUID\":\"{}\",\"committedVersion\":null,\
             \"clusteringColumns\":[[\"colA\"]],\"transactionMetrics\":{{\
             \"totalCommitDurationNs\":200,\"numCommitAttempts\":2,\"numAddFiles\":0,\
             \"numRemoveFiles\":0,\"numTotalActions\":0,\"totalAddFilesSizeInBytes\":0,\
             \"totalRemoveFilesSizeInBytes\":0}}}}",
            report.report_uuid(),
            snapshot_report.report_uuid()
        );
        assert_eq!(report.to_json().unwrap(), expected);
    }

    #[test]
    fn scan_report_template() {
        let snapshot_uuid = Uuid::new_v4();
        let mut context = ScanQueryContext::new(
            "/t",
            5,
            "struct<id: long>",
            snapshot_uuid,
            "struct<id: long>",
        )
        .with_filter("id > 1");
        context.metrics_mut().total_planning_timer.record_ns(33);
        context.metrics_mut().add_files_counter.add(2);
        context.metrics_mut().active_add_files_counter.add(2);
        context.mark_fully_consumed();
        let report = context.into_report();

        let expected = format!(
            "{{\"tablePath\":\"/t\",\"operationType\":\"Scan\",\"reportUUID\":\"{}\",\
             \"exception\":null,\"tableVersion\":5,\"tableSchema\":\"struct<id: long>\",\
             \"snapshotReportUUID\":\"{snapshot_uuid}\",\"filter\":\"id > 1\",\
             \"readSchema\":\"struct<id: long>\",\"partitionPredicate\":null,\
             \"dataSkippingFilter\":null,\"isFullyConsumed\":true,\"scanMetrics\":{{\
             \"totalPlanningDurationNs\":33,\"numAddFilesSeen\":2,\
             \"numAddFilesSeenFromDeltaFiles\":0,\"numActiveAddFiles\":2,\
             \"numDuplicateAddFiles\":0,\"numRemoveFilesSeenFromDeltaFiles\":0}}}}",
            report.report_uuid()
        );
        assert_eq!(report.to_json().unwrap(), expected);
    }

    #[test]
    fn optional_presence_changes_only_that_field() {
        let with_version = SnapshotQueryContext::for_version_snapshot("/t", 1).into_report();
        let without_version = SnapshotQueryContext::for_latest_snapshot("/t").into_report();
        let left = with_version.to_json().unwrap();
        let right = without_version.to_json().unwrap();
        // normalize the per-report uuid, then the only difference is the field
        let left = left.replace(&with_version.report_uuid().to_string(), "UUID");
        let right = right.replace(&without_version.report_uuid().to_string(), "UUID");
        assert_eq!(left.replace("\"version\":1", "\"version\":null"), right);
    }

    #[test]
    fn exception_renders_as_json_string() {
        let report = SnapshotQueryContext::for_latest_snapshot("/t")
            .into_error_report(crate::Error::generic("boom \"quoted\""));
        let json = report.to_json().unwrap();
        assert!(json.contains("\"exception\":\"Generic delta kernel error: boom \\\"quoted\\\"\""));
    }
}
