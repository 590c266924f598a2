use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

///
/// CopierMetrics
///
/// Process-local counters fed by `MetricsEvent`s.
/// Relaxed atomics are sufficient: counters never drive correctness.
///

#[derive(Debug, Default)]
pub struct CopierMetrics {
    pub(crate) hits: AtomicU64,
    pub(crate) misses: AtomicU64,
    pub(crate) generations: AtomicU64,
    pub(crate) failures: AtomicU64,
    pub(crate) steps_compiled: AtomicU64,
    pub(crate) properties_skipped: AtomicU64,
    pub(crate) evicted: AtomicU64,
}

impl CopierMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn bump(counter: &AtomicU64, by: u64) {
        counter.fetch_add(by, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            generations: self.generations.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            steps_compiled: self.steps_compiled.load(Ordering::Relaxed),
            properties_skipped: self.properties_skipped.load(Ordering::Relaxed),
            evicted: self.evicted.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        for counter in [
            &self.hits,
            &self.misses,
            &self.generations,
            &self.failures,
            &self.steps_compiled,
            &self.properties_skipped,
            &self.evicted,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

///
/// MetricsSnapshot
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub generations: u64,
    pub failures: u64,
    pub steps_compiled: u64,
    pub properties_skipped: u64,
    pub evicted: u64,
}

///
/// TESTS
///
