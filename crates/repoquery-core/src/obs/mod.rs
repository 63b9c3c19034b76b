//! Observability: runtime telemetry (metrics) and sink abstractions.
//!
//! Query tracing lives with the executor in `db::executor::trace`; this
//! module only owns counters.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventPerf, EventReport, EventState, MethodCounters, MethodSummary};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
