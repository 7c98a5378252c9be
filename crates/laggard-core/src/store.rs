//! Bounded, duration-ranked store of the slowest results.

use std::sync::Mutex;

use crate::model::TestResult;

/// Capacity-bounded ranking of the slowest test executions, shared by
/// concurrent aggregations.
///
/// Every operation takes the one internal lock, so a merge is never
/// observed half-sorted or half-truncated.
#[derive(Debug)]
pub struct SlowestResults {
    capacity: usize,
    results: Mutex<Vec<TestResult>>,
}

impl SlowestResults {
    /// Create an empty store keeping at most `capacity` results.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            results: Mutex::new(Vec::new()),
        }
    }

    /// Merge a batch, re-rank, and drop the lowest-duration tail.
    ///
    /// The sort is stable: entries with equal durations keep their
    /// relative insertion order.
    pub fn add(&self, batch: Vec<TestResult>) {
        let mut results = self.results.lock().expect("results lock");
        results.extend(batch);
        results.sort_by(|a, b| b.duration_secs.total_cmp(&a.duration_secs));
        results.truncate(self.capacity);
    }

    /// Clear the ranking. Starts an independent aggregation session;
    /// never invoked implicitly.
    pub fn reset(&self) {
        self.results.lock().expect("results lock").clear();
    }

    /// Copy of the current ordering, slowest first.
    pub fn snapshot(&self) -> Vec<TestResult> {
        self.results.lock().expect("results lock").clone()
    }

    /// Maximum number of retained results.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of currently retained results.
    pub fn len(&self) -> usize {
        self.results.lock().expect("results lock").len()
    }

    /// Whether the ranking is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
