//! Metrics sink boundary.
//!
//! Registry and generator logic MUST NOT touch counters directly.
//! All instrumentation flows through `MetricsEvent` and `MetricsSink`.

use crate::obs::metrics::CopierMetrics;

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    CacheHit {
        source_path: &'static str,
        target_path: &'static str,
    },
    CacheMiss {
        source_path: &'static str,
        target_path: &'static str,
    },
    Generated {
        source_path: &'static str,
        target_path: &'static str,
        steps: u64,
        skipped: u64,
    },
    GenerationFailed {
        source_path: &'static str,
        target_path: &'static str,
    },
    Cleared {
        evicted: u64,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink: Send + Sync {
    fn record(&self, event: MetricsEvent);
}

///
/// NoopSink
/// Discards every event.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl MetricsSink for NoopSink {
    fn record(&self, _event: MetricsEvent) {}
}

impl MetricsSink for CopierMetrics {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::CacheHit { .. } => CopierMetrics::bump(&self.hits, 1),
            MetricsEvent::CacheMiss { .. } => CopierMetrics::bump(&self.misses, 1),
            MetricsEvent::Generated { steps, skipped, .. } => {
                CopierMetrics::bump(&self.generations, 1);
                CopierMetrics::bump(&self.steps_compiled, steps);
                CopierMetrics::bump(&self.properties_skipped, skipped);
            }
            MetricsEvent::GenerationFailed { .. } => CopierMetrics::bump(&self.failures, 1),
            MetricsEvent::Cleared { evicted } => CopierMetrics::bump(&self.evicted, evicted),
        }
    }
}
