//! End-to-end tests of the operation-report pipeline: contexts accumulate
//! metrics while actions flow through an operation, finalize into immutable
//! reports, and render canonical JSON.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use delta_actions::actions::AddFile;
use delta_actions::metrics::{
    MetricsReport, MetricsReporter, ScanQueryContext, SnapshotQueryContext, TransactionMetrics,
    TransactionQueryContext,
};
use delta_actions::{DeltaResult, Error};

#[derive(Debug, Default)]
struct CollectingReporter {
    reports: Mutex<Vec<MetricsReport>>,
}

impl MetricsReporter for CollectingReporter {
    fn report(&self, report: MetricsReport) {
        self.reports.lock().unwrap().push(report);
    }
}

fn add_files() -> Vec<AddFile> {
    (0..3)
        .map(|i| {
            AddFile::new(
                format!("part-{i:05}.parquet"),
                HashMap::new(),
                100 * (i + 1),
                1700000000000,
                true,
            )
            .with_stats(format!(r#"{{"numRecords":{}}}"#, 10 * (i + 1)))
        })
        .collect()
}

#[test]
fn snapshot_then_transaction_reports_are_linked() -> DeltaResult<()> {
    let reporter = CollectingReporter::default();

    // snapshot construction
    let mut snapshot_ctx = SnapshotQueryContext::for_latest_snapshot("/warehouse/events");
    snapshot_ctx
        .metrics_mut()
        .load_initial_delta_actions_timer
        .record_ns(1500);
    snapshot_ctx.set_version(4);
    let snapshot_report = snapshot_ctx.into_report();
    let snapshot_uuid = snapshot_report.report_uuid();
    reporter.report(snapshot_report.into());

    // commit against that snapshot: add three files, remove one of them
    let mut txn_ctx = TransactionQueryContext::new(
        "/warehouse/events",
        "WRITE",
        "integration-test/1.0",
        4,
        snapshot_uuid,
        vec![vec!["colA".to_string()]],
        TransactionMetrics::for_existing_table(None),
    );
    let adds = add_files();
    for add in &adds {
        txn_ctx.metrics_mut().update_for_add_file(add.size());
        txn_ctx.metrics_mut().total_actions_counter.increment();
    }
    let remove = adds[0].to_remove_file_row(true, Some(1700000001000));
    txn_ctx
        .metrics_mut()
        .update_for_remove_file(remove.size().ok_or_else(|| Error::missing_data("size"))?);
    txn_ctx.metrics_mut().total_actions_counter.increment();
    txn_ctx.metrics_mut().commit_attempts_counter.increment();
    txn_ctx.metrics_mut().total_commit_timer.record_ns(80_000);
    let txn_report = txn_ctx.into_report(Some(5));
    reporter.report(txn_report.into());

    let reports = reporter.reports.lock().unwrap();
    assert_eq!(reports.len(), 2);
    let MetricsReport::Transaction(txn) = &reports[1] else {
        panic!("expected a transaction report");
    };
    assert_eq!(txn.snapshot_report_uuid(), snapshot_uuid);
    assert_eq!(txn.committed_version(), Some(5));
    let metrics = txn.transaction_metrics();
    assert_eq!(metrics.num_add_files, 3);
    assert_eq!(metrics.total_add_files_size_in_bytes, 600);
    assert_eq!(metrics.num_remove_files, 1);
    assert_eq!(metrics.total_remove_files_size_in_bytes, 100);
    assert_eq!(metrics.num_total_actions, 4);
    Ok(())
}

#[test]
fn transaction_report_json_matches_documented_template() {
    let snapshot_report = SnapshotQueryContext::for_version_snapshot("/t", 1).into_report();
    let mut ctx = TransactionQueryContext::new(
        "/t",
        "op",
        "eng",
        1,
        snapshot_report.report_uuid(),
        vec![vec!["colA".to_string()]],
        TransactionMetrics::for_existing_table(None),
    );
    ctx.metrics_mut().total_commit_timer.record_ns(200);
    ctx.metrics_mut().commit_attempts_counter.add(2);
    let report = ctx.into_report(None);

    let expected = format!(
        "{{\"tablePath\":\"/t\",\"operationType\":\"Transaction\",\"reportUUID\":\"{}\",\
         \"exception\":null,\"operation\":\"op\",\"engineInfo\":\"eng\",\
         \"baseSnapshotVersion\":1,\"snapshotReportUUID\":\"{}\",\"committedVersion\":null,\
         \"clusteringColumns\":[[\"colA\"]],\"transactionMetrics\":{{\
         \"totalCommitDurationNs\":200,\"numCommitAttempts\":2,\"numAddFiles\":0,\
         \"numRemoveFiles\":0,\"numTotalActions\":0,\"totalAddFilesSizeInBytes\":0,\
         \"totalRemoveFilesSizeInBytes\":0}}}}",
        report.report_uuid(),
        snapshot_report.report_uuid(),
    );
    assert_eq!(report.to_json().unwrap(), expected);
}

#[test]
fn failed_scan_still_reports_partial_metrics() {
    let snapshot_report = SnapshotQueryContext::for_version_snapshot("/t", 2).into_report();
    let mut scan_ctx = ScanQueryContext::new(
        "/t",
        2,
        "struct<id: long, value: string>",
        snapshot_report.report_uuid(),
        "struct<id: long>",
    )
    .with_filter("id > 100");
    scan_ctx.metrics_mut().add_files_counter.add(7);
    scan_ctx.metrics_mut().total_planning_timer.record_ns(12_345);

    let report = scan_ctx.into_error_report(Error::generic("storage read failed"));
    assert_eq!(
        report.exception(),
        Some("Generic delta kernel error: storage read failed")
    );
    assert!(!report.is_fully_consumed());
    assert_eq!(report.scan_metrics().num_add_files_seen, 7);
    assert_eq!(report.scan_metrics().total_planning_duration_ns, 12_345);

    let json = report.to_json().unwrap();
    assert!(json.contains("\"exception\":\"Generic delta kernel error: storage read failed\""));
    assert!(json.contains("\"isFullyConsumed\":false"));
}

#[test]
fn reports_are_shared_across_threads() {
    let report = Arc::new(SnapshotQueryContext::for_latest_snapshot("/t").into_report());
    let expected = report.to_json().unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let report = Arc::clone(&report);
            let expected = expected.clone();
            std::thread::spawn(move || assert_eq!(report.to_json().unwrap(), expected))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn independent_operations_do_not_share_state() {
    let mut first = SnapshotQueryContext::for_latest_snapshot("/a");
    let mut second = SnapshotQueryContext::for_latest_snapshot("/b");
    first.metrics_mut().load_initial_delta_actions_timer.record_ns(10);
    second.metrics_mut().load_initial_delta_actions_timer.record_ns(99);

    let first = first.into_report();
    let second = second.into_report();
    assert_eq!(first.snapshot_metrics().load_initial_delta_actions_duration_ns, 10);
    assert_eq!(second.snapshot_metrics().load_initial_delta_actions_duration_ns, 99);
    assert_ne!(first.report_uuid(), second.report_uuid());
}
