//! Metrics sink boundary.
//!
//! Execution code MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only allowed bridge between execution logic
//! and the thread-local metrics state.
use crate::{db::executor::ExecutionStrategy, error::ErrorClass, obs::metrics};
use std::{cell::RefCell, rc::Rc, sync::Arc, time::Instant};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    ExecStart {
        strategy: ExecutionStrategy,
        method: Arc<str>,
    },
    ExecFinish {
        strategy: ExecutionStrategy,
        method: Arc<str>,
        rows: u64,
        elapsed_micros: u64,
    },
    CountQuery {
        method: Arc<str>,
        executed: bool,
    },
    ContextCleared {
        method: Arc<str>,
    },
    ExecError {
        method: Arc<str>,
        class: ErrorClass,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::ExecStart { strategy, method } => {
                metrics::with_state_mut(|m| metrics::record_call(m, strategy, &method));
            }

            MetricsEvent::ExecFinish {
                strategy,
                method,
                rows,
                elapsed_micros,
            } => {
                metrics::with_state_mut(|m| {
                    if strategy == ExecutionStrategy::Modifying {
                        m.ops.rows_modified = m.ops.rows_modified.saturating_add(rows);
                    } else {
                        m.ops.rows_returned = m.ops.rows_returned.saturating_add(rows);
                    }
                    metrics::add_micros(
                        &mut m.perf.exec_micros_total,
                        &mut m.perf.exec_micros_max,
                        elapsed_micros,
                    );

                    let entry = m.methods.entry(method.to_string()).or_default();
                    entry.rows = entry.rows.saturating_add(rows);
                });
            }

            MetricsEvent::CountQuery { method, executed } => {
                metrics::with_state_mut(|m| {
                    if executed {
                        m.ops.count_queries = m.ops.count_queries.saturating_add(1);
                        let entry = m.methods.entry(method.to_string()).or_default();
                        entry.count_queries = entry.count_queries.saturating_add(1);
                    } else {
                        m.ops.count_queries_skipped = m.ops.count_queries_skipped.saturating_add(1);
                    }
                });
            }

            MetricsEvent::ContextCleared { method } => {
                metrics::with_state_mut(|m| {
                    m.ops.context_clears = m.ops.context_clears.saturating_add(1);
                    let entry = m.methods.entry(method.to_string()).or_default();
                    entry.context_clears = entry.context_clears.saturating_add(1);
                });
            }

            MetricsEvent::ExecError { method, .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.errors = m.ops.errors.saturating_add(1);
                    let entry = m.methods.entry(method.to_string()).or_default();
                    entry.errors = entry.errors.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    // Clone the handle out so a sink that records again does not re-enter the borrow.
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match override_sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state.
///
/// `window_start_ms` filters by window start (`EventState::window_start_ms`),
/// not by per-event timestamps.
#[must_use]
pub fn metrics_report(window_start_ms: Option<u64>) -> metrics::EventReport {
    metrics::report_window_start(window_start_ms)
}

/// Reset all metrics state (counters + perf).
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override on this thread.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

/// Span
/// RAII guard that emits start/finish metrics events for one invocation.
/// Ensures finish accounting happens even on early return or unwind.

pub(crate) struct Span {
    strategy: ExecutionStrategy,
    method: Arc<str>,
    start: Instant,
    rows: u64,
    finished: bool,
}

impl Span {
    #[must_use]
    /// Start a metrics span for one method and strategy.
    pub(crate) fn new(strategy: ExecutionStrategy, method: Arc<str>) -> Self {
        record(MetricsEvent::ExecStart {
            strategy,
            method: Arc::clone(&method),
        });

        Self {
            strategy,
            method,
            start: Instant::now(),
            rows: 0,
            finished: false,
        }
    }

    pub(crate) const fn set_rows(&mut self, rows: u64) {
        self.rows = rows;
    }

    fn finish_inner(&self) {
        let elapsed = self.start.elapsed().as_micros();

        record(MetricsEvent::ExecFinish {
            strategy: self.strategy,
            method: Arc::clone(&self.method),
            rows: self.rows,
            elapsed_micros: u64::try_from(elapsed).unwrap_or(u64::MAX),
        });
    }
}

impl Drop for Span {
    fn drop(&mut self) {
        if !self.finished {
            self.finish_inner();
            self.finished = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        cell::Cell,
        panic::{AssertUnwindSafe, catch_unwind},
    };

    #[derive(Default)]
    struct CountingSink {
        calls: Cell<usize>,
    }

    impl MetricsSink for CountingSink {
        fn record(&self, _: MetricsEvent) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    fn cleared(method: &str) -> MetricsEvent {
        MetricsEvent::ContextCleared {
            method: Arc::from(method),
        }
    }

    #[test]
    fn with_metrics_sink_routes_and_restores_nested_overrides() {
        SINK_OVERRIDE.with(|cell| {
            *cell.borrow_mut() = None;
        });

        let outer = Rc::new(CountingSink::default());
        let inner = Rc::new(CountingSink::default());

        // No override installed yet.
        record(cleared("a"));
        assert_eq!(outer.calls.get(), 0);
        assert_eq!(inner.calls.get(), 0);

        with_metrics_sink(outer.clone(), || {
            record(cleared("b"));
            assert_eq!(outer.calls.get(), 1);
            assert_eq!(inner.calls.get(), 0);

            with_metrics_sink(inner.clone(), || {
                record(cleared("c"));
            });

            // Inner override was restored to outer override.
            record(cleared("d"));
        });

        assert_eq!(outer.calls.get(), 2);
        assert_eq!(inner.calls.get(), 1);

        // Outer override was restored to previous (none).
        SINK_OVERRIDE.with(|cell| {
            assert!(cell.borrow().is_none());
        });
    }

    #[test]
    fn with_metrics_sink_restores_override_on_panic() {
        SINK_OVERRIDE.with(|cell| {
            *cell.borrow_mut() = None;
        });

        let sink = Rc::new(CountingSink::default());

        let panicked = catch_unwind(AssertUnwindSafe(|| {
            with_metrics_sink(sink.clone(), || {
                record(cleared("a"));
                panic!("intentional panic for guard test");
            });
        }))
        .is_err();
        assert!(panicked);
        assert_eq!(sink.calls.get(), 1);

        // Guard restored TLS slot after unwind.
        SINK_OVERRIDE.with(|cell| {
            assert!(cell.borrow().is_none());
        });
    }

    #[test]
    fn span_records_finish_on_drop() {
        metrics_reset_all();

        {
            let mut span = Span::new(ExecutionStrategy::Collection, Arc::from("findAll"));
            span.set_rows(4);
        }

        let counters = metrics_report(None)
            .counters
            .expect("metrics report should include counters");
        assert_eq!(counters.ops.collection_calls, 1);
        assert_eq!(counters.ops.rows_returned, 4);
        assert_eq!(counters.methods["findAll"].rows, 4);
    }

    #[test]
    fn count_query_events_split_executed_and_skipped() {
        metrics_reset_all();

        for executed in [true, false, false] {
            record(MetricsEvent::CountQuery {
                method: Arc::from("findPage"),
                executed,
            });
        }

        let counters = metrics_report(None)
            .counters
            .expect("metrics report should include counters");
        assert_eq!(counters.ops.count_queries, 1);
        assert_eq!(counters.ops.count_queries_skipped, 2);
        assert_eq!(counters.methods["findPage"].count_queries, 1);
    }

    #[test]
    fn metrics_report_window_start_after_window_returns_empty() {
        metrics_reset_all();
        let window_start = metrics::with_state(|m| m.window_start_ms);
        record(cleared("deleteAll"));

        let report = metrics_report(Some(window_start.saturating_add(1)));
        assert!(report.counters.is_none());
        assert!(report.method_counters.is_empty());

        let report = metrics_report(Some(window_start.saturating_sub(1)));
        let counters = report
            .counters
            .expect("metrics report should include counters when window_start_ms is before window");
        assert_eq!(counters.ops.context_clears, 1);
    }
}
