//! Mutable metric accumulators: timers, counters, and the file-size histogram.
//!
//! Instruments are created fresh for each operation, owned by exactly one
//! query context, and touched only by the thread driving that operation, so
//! they carry no internal synchronization.

use std::time::{Duration, Instant};

/// Accumulates a call count and a running total duration in nanoseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timer {
    count: u64,
    total_duration_ns: u64,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one observation.
    pub fn record(&mut self, duration: Duration) {
        // durations beyond u64::MAX nanoseconds (~584 years) saturate
        self.record_ns(u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX));
    }

    /// Records one observation given directly in nanoseconds.
    pub fn record_ns(&mut self, duration_ns: u64) {
        self.count += 1;
        self.total_duration_ns = self.total_duration_ns.saturating_add(duration_ns);
    }

    /// Runs `f`, recording its wall-clock duration.
    pub fn time<T>(&mut self, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = f();
        self.record(start.elapsed());
        result
    }

    /// Number of recorded observations.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Total recorded duration in nanoseconds.
    pub fn total_duration_ns(&self) -> u64 {
        self.total_duration_ns
    }
}

/// A monotonic, non-negative accumulator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counter {
    value: u64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the counter by one.
    pub fn increment(&mut self) {
        self.add(1);
    }

    /// Increments the counter by `delta`.
    pub fn add(&mut self, delta: u64) {
        self.value = self.value.saturating_add(delta);
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}

/// Bucket boundaries for [`FileSizeHistogram`], in bytes. Power-of-two steps
/// from 8 KiB up to 4 GiB, with a catch-all final bucket.
const FILE_SIZE_BOUNDARIES: [i64; 20] = [
    0,
    8 * 1024,
    16 * 1024,
    32 * 1024,
    64 * 1024,
    128 * 1024,
    256 * 1024,
    512 * 1024,
    1024 * 1024,
    2 * 1024 * 1024,
    4 * 1024 * 1024,
    8 * 1024 * 1024,
    16 * 1024 * 1024,
    32 * 1024 * 1024,
    64 * 1024 * 1024,
    128 * 1024 * 1024,
    256 * 1024 * 1024,
    512 * 1024 * 1024,
    1024 * 1024 * 1024,
    4 * 1024 * 1024 * 1024,
];

/// Per-size-bucket file counts and byte totals, tracking the distribution of
/// data file sizes touched by a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSizeHistogram {
    file_counts: Vec<u64>,
    total_bytes: Vec<u64>,
}

impl FileSizeHistogram {
    /// Which bucket a size falls into: the last boundary that is <= `size`.
    fn bucket_for(size_bytes: i64) -> Option<usize> {
        if size_bytes < 0 {
            return None;
        }
        match FILE_SIZE_BOUNDARIES.binary_search(&size_bytes) {
            Ok(exact) => Some(exact),
            Err(insertion) => Some(insertion - 1),
        }
    }

    /// Records a file of the given size. Negative sizes are ignored.
    pub fn insert(&mut self, size_bytes: i64) {
        let Some(bucket) = Self::bucket_for(size_bytes) else {
            return;
        };
        self.file_counts[bucket] += 1;
        self.total_bytes[bucket] = self.total_bytes[bucket].saturating_add(size_bytes as u64);
    }

    /// Records removal of a file of the given size, reversing a prior
    /// [`FileSizeHistogram::insert`]. Negative sizes are ignored; an already
    /// empty bucket saturates at zero.
    pub fn remove(&mut self, size_bytes: i64) {
        let Some(bucket) = Self::bucket_for(size_bytes) else {
            return;
        };
        self.file_counts[bucket] = self.file_counts[bucket].saturating_sub(1);
        self.total_bytes[bucket] = self.total_bytes[bucket].saturating_sub(size_bytes as u64);
    }

    /// Total number of files recorded across all buckets.
    pub fn total_files(&self) -> u64 {
        self.file_counts.iter().sum()
    }

    /// Total bytes recorded across all buckets.
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes.iter().sum()
    }
}

impl Default for FileSizeHistogram {
    fn default() -> Self {
        Self {
            file_counts: vec![0; FILE_SIZE_BOUNDARIES.len()],
            total_bytes: vec![0; FILE_SIZE_BOUNDARIES.len()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_accumulates_count_and_total() {
        let mut timer = Timer::new();
        assert_eq!(timer.count(), 0);
        assert_eq!(timer.total_duration_ns(), 0);

        timer.record(Duration::from_nanos(100));
        timer.record_ns(50);
        assert_eq!(timer.count(), 2);
        assert_eq!(timer.total_duration_ns(), 150);
    }

    #[test]
    fn timer_time_records_one_observation() {
        let mut timer = Timer::new();
        let result = timer.time(|| 7);
        assert_eq!(result, 7);
        assert_eq!(timer.count(), 1);
    }

    #[test]
    fn timer_saturates_instead_of_overflowing() {
        let mut timer = Timer::new();
        timer.record_ns(u64::MAX);
        timer.record_ns(1);
        assert_eq!(timer.total_duration_ns(), u64::MAX);
        assert_eq!(timer.count(), 2);
    }

    #[test]
    fn counter_accumulates() {
        let mut counter = Counter::new();
        counter.increment();
        counter.add(10);
        assert_eq!(counter.value(), 11);
    }

    #[test]
    fn histogram_buckets_by_size() {
        let mut histogram = FileSizeHistogram::default();
        histogram.insert(0);
        histogram.insert(100);
        histogram.insert(8 * 1024);
        histogram.insert(100 * 1024 * 1024 * 1024);
        assert_eq!(histogram.total_files(), 4);
        assert_eq!(
            histogram.total_bytes(),
            100 + 8 * 1024 + 100 * 1024 * 1024 * 1024
        );
    }

    #[test]
    fn histogram_ignores_negative_sizes() {
        let mut histogram = FileSizeHistogram::default();
        histogram.insert(-1);
        histogram.remove(-1);
        assert_eq!(histogram.total_files(), 0);
        assert_eq!(histogram.total_bytes(), 0);
    }

    #[test]
    fn histogram_remove_reverses_insert() {
        let mut histogram = FileSizeHistogram::default();
        histogram.insert(1024);
        histogram.insert(9000);
        histogram.remove(1024);
        assert_eq!(histogram.total_files(), 1);
        assert_eq!(histogram.total_bytes(), 9000);
    }

    #[test]
    fn histogram_remove_saturates_at_empty_bucket() {
        let mut histogram = FileSizeHistogram::default();
        histogram.remove(1024);
        assert_eq!(histogram.total_files(), 0);
        assert_eq!(histogram.total_bytes(), 0);
    }
}
