//! Per-operation metric bundles and their frozen result counterparts.
//!
//! A metrics bundle is created when an operation's query context is created,
//! mutated by the executing operation, and frozen into its `…Result`
//! counterpart exactly once, when the context is finalized into a report.
//! Bundles are never reused across operations.

use super::instruments::{Counter, FileSizeHistogram, Timer};

/// Metrics accumulated while constructing a snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotMetrics {
    /// Time spent resolving a user-provided timestamp to a version. Only
    /// recorded for timestamp-based snapshot construction.
    pub timestamp_to_version_resolution_timer: Timer,
    /// Time spent loading the initial delta actions (protocol and metadata).
    pub load_initial_delta_actions_timer: Timer,
}

impl SnapshotMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn capture(&self) -> SnapshotMetricsResult {
        let resolution = &self.timestamp_to_version_resolution_timer;
        SnapshotMetricsResult {
            // present only if timestamp resolution actually ran
            timestamp_to_version_resolution_duration_ns: (resolution.count() > 0)
                .then(|| resolution.total_duration_ns()),
            load_initial_delta_actions_duration_ns: self
                .load_initial_delta_actions_timer
                .total_duration_ns(),
        }
    }
}

/// Frozen snapshot metrics, captured at finalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotMetricsResult {
    pub timestamp_to_version_resolution_duration_ns: Option<u64>,
    pub load_initial_delta_actions_duration_ns: u64,
}

/// Metrics accumulated while planning a scan.
#[derive(Debug, Clone, Default)]
pub struct ScanMetrics {
    pub total_planning_timer: Timer,
    /// All add actions seen during log replay, before deduplication.
    pub add_files_counter: Counter,
    /// Add actions seen in commit (non-checkpoint) files.
    pub add_files_from_delta_files_counter: Counter,
    /// Add actions that survived reconciliation and were emitted.
    pub active_add_files_counter: Counter,
    /// Add actions dropped because a later action already covered the file.
    pub duplicate_add_files_counter: Counter,
    /// Remove actions seen in commit files.
    pub remove_files_from_delta_files_counter: Counter,
}

impl ScanMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn capture(&self) -> ScanMetricsResult {
        ScanMetricsResult {
            total_planning_duration_ns: self.total_planning_timer.total_duration_ns(),
            num_add_files_seen: self.add_files_counter.value(),
            num_add_files_seen_from_delta_files: self.add_files_from_delta_files_counter.value(),
            num_active_add_files: self.active_add_files_counter.value(),
            num_duplicate_add_files: self.duplicate_add_files_counter.value(),
            num_remove_files_seen_from_delta_files: self
                .remove_files_from_delta_files_counter
                .value(),
        }
    }
}

/// Frozen scan metrics, captured at finalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanMetricsResult {
    pub total_planning_duration_ns: u64,
    pub num_add_files_seen: u64,
    pub num_add_files_seen_from_delta_files: u64,
    pub num_active_add_files: u64,
    pub num_duplicate_add_files: u64,
    pub num_remove_files_seen_from_delta_files: u64,
}

/// Metrics accumulated while committing a transaction.
#[derive(Debug, Clone)]
pub struct TransactionMetrics {
    pub total_commit_timer: Timer,
    pub commit_attempts_counter: Counter,
    pub add_files_counter: Counter,
    pub remove_files_counter: Counter,
    /// All actions written by the commit, file actions included.
    pub total_actions_counter: Counter,
    pub total_add_files_size_in_bytes_counter: Counter,
    pub total_remove_files_size_in_bytes_counter: Counter,
    /// Running distribution of the table's data file sizes. Present when the
    /// transaction knows the table's file sizes (a new table starts empty; an
    /// existing table may supply its current histogram, or none at all).
    pub table_file_size_histogram: Option<FileSizeHistogram>,
}

impl TransactionMetrics {
    fn with_histogram(table_file_size_histogram: Option<FileSizeHistogram>) -> Self {
        Self {
            total_commit_timer: Timer::new(),
            commit_attempts_counter: Counter::new(),
            add_files_counter: Counter::new(),
            remove_files_counter: Counter::new(),
            total_actions_counter: Counter::new(),
            total_add_files_size_in_bytes_counter: Counter::new(),
            total_remove_files_size_in_bytes_counter: Counter::new(),
            table_file_size_histogram,
        }
    }

    /// Metrics for a transaction that creates a new table: the file-size
    /// distribution starts from empty.
    pub fn for_new_table() -> Self {
        Self::with_histogram(Some(FileSizeHistogram::default()))
    }

    /// Metrics for a transaction against an existing table, seeded with the
    /// table's current file-size distribution if the caller knows it.
    pub fn for_existing_table(table_file_size_histogram: Option<FileSizeHistogram>) -> Self {
        Self::with_histogram(table_file_size_histogram)
    }

    /// Records one added file of the given size.
    pub fn update_for_add_file(&mut self, size_bytes: i64) {
        self.add_files_counter.increment();
        self.total_add_files_size_in_bytes_counter
            .add(size_bytes.max(0) as u64);
        if let Some(histogram) = &mut self.table_file_size_histogram {
            histogram.insert(size_bytes);
        }
    }

    /// Records one removed file of the given size, reversing the histogram
    /// accounting of [`TransactionMetrics::update_for_add_file`].
    pub fn update_for_remove_file(&mut self, size_bytes: i64) {
        self.remove_files_counter.increment();
        self.total_remove_files_size_in_bytes_counter
            .add(size_bytes.max(0) as u64);
        if let Some(histogram) = &mut self.table_file_size_histogram {
            histogram.remove(size_bytes);
        }
    }

    pub(crate) fn capture(&self) -> TransactionMetricsResult {
        TransactionMetricsResult {
            total_commit_duration_ns: self.total_commit_timer.total_duration_ns(),
            num_commit_attempts: self.commit_attempts_counter.value(),
            num_add_files: self.add_files_counter.value(),
            num_remove_files: self.remove_files_counter.value(),
            num_total_actions: self.total_actions_counter.value(),
            total_add_files_size_in_bytes: self.total_add_files_size_in_bytes_counter.value(),
            total_remove_files_size_in_bytes: self
                .total_remove_files_size_in_bytes_counter
                .value(),
        }
    }
}

/// Frozen transaction metrics, captured at finalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionMetricsResult {
    pub total_commit_duration_ns: u64,
    pub num_commit_attempts: u64,
    pub num_add_files: u64,
    pub num_remove_files: u64,
    pub num_total_actions: u64,
    pub total_add_files_size_in_bytes: u64,
    pub total_remove_files_size_in_bytes: u64,
}
