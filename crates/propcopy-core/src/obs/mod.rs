//! Observability: metrics events, sinks and counter snapshots.
pub mod metrics;
pub mod sink;

pub use metrics::{CopierMetrics, MetricsSnapshot};
pub use sink::{MetricsEvent, MetricsSink, NoopSink};
