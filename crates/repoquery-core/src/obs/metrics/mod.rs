use crate::db::executor::ExecutionStrategy;
use serde::{Deserialize, Serialize};
use std::{
    cell::RefCell,
    cmp::Ordering,
    collections::BTreeMap,
    time::{SystemTime, UNIX_EPOCH},
};

///
/// EventState
/// Ephemeral, in-memory counters and simple timing totals for invocations.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub perf: EventPerf,
    pub methods: BTreeMap<String, MethodCounters>,
    pub window_start_ms: u64,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            ops: EventOps::default(),
            perf: EventPerf::default(),
            methods: BTreeMap::new(),
            window_start_ms: now_millis(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Strategy entrypoints
    pub single_calls: u64,
    pub collection_calls: u64,
    pub slice_calls: u64,
    pub page_calls: u64,
    pub modify_calls: u64,
    pub procedure_calls: u64,
    pub stream_calls: u64,

    // Rows
    pub rows_returned: u64,
    pub rows_modified: u64,

    // Paging
    pub count_queries: u64,
    pub count_queries_skipped: u64,

    // Side effects and failures
    pub context_clears: u64,
    pub errors: u64,
}

impl EventOps {
    const fn calls_mut(&mut self, strategy: ExecutionStrategy) -> &mut u64 {
        match strategy {
            ExecutionStrategy::SingleEntity => &mut self.single_calls,
            ExecutionStrategy::Collection => &mut self.collection_calls,
            ExecutionStrategy::Sliced => &mut self.slice_calls,
            ExecutionStrategy::Paged => &mut self.page_calls,
            ExecutionStrategy::Modifying => &mut self.modify_calls,
            ExecutionStrategy::Procedure => &mut self.procedure_calls,
            ExecutionStrategy::Stream => &mut self.stream_calls,
        }
    }
}

///
/// MethodCounters
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MethodCounters {
    pub calls: u64,
    pub rows: u64,
    pub count_queries: u64,
    pub context_clears: u64,
    pub errors: u64,
}

///
/// EventPerf
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventPerf {
    // Wall-clock totals across invocations, in microseconds
    pub exec_micros_total: u128,

    // Maximum observed single invocation
    pub exec_micros_max: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all event state: counters, perf, and the window start.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

/// Count one strategy entry, globally and for `method`.
pub(crate) fn record_call(m: &mut EventState, strategy: ExecutionStrategy, method: &str) {
    let calls = m.ops.calls_mut(strategy);
    *calls = calls.saturating_add(1);

    let entry = m.methods.entry(method.to_string()).or_default();
    entry.calls = entry.calls.saturating_add(1);
}

/// Accumulate a wall-clock delta and track a max.
pub(crate) const fn add_micros(total: &mut u128, max: &mut u64, delta: u64) {
    *total = total.saturating_add(delta as u128);
    if delta > *max {
        *max = delta;
    }
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    /// Ephemeral runtime counters since `window_start_ms`.
    pub counters: Option<EventState>,
    /// Per-method counters with averages.
    pub method_counters: Vec<MethodSummary>,
}

///
/// MethodSummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MethodSummary {
    pub method: String,
    pub calls: u64,
    pub rows: u64,
    pub avg_rows_per_call: f64,
    pub count_queries: u64,
    pub context_clears: u64,
    pub errors: u64,
}

/// Build a report, omitting counters when the current window started before
/// `window_start_ms`.
#[must_use]
pub(crate) fn report_window_start(window_start_ms: Option<u64>) -> EventReport {
    let snap = with_state(Clone::clone);
    if let Some(requested) = window_start_ms
        && requested > snap.window_start_ms
    {
        return EventReport::default();
    }

    report_from(snap)
}

#[allow(clippy::cast_precision_loss)]
fn report_from(snap: EventState) -> EventReport {
    let mut method_counters: Vec<MethodSummary> = snap
        .methods
        .iter()
        .map(|(method, ops)| MethodSummary {
            method: method.clone(),
            calls: ops.calls,
            rows: ops.rows,
            avg_rows_per_call: if ops.calls > 0 {
                ops.rows as f64 / ops.calls as f64
            } else {
                0.0
            },
            count_queries: ops.count_queries,
            context_clears: ops.context_clears,
            errors: ops.errors,
        })
        .collect();

    method_counters.sort_by(|a, b| {
        match b
            .avg_rows_per_call
            .partial_cmp(&a.avg_rows_per_call)
            .unwrap_or(Ordering::Equal)
        {
            Ordering::Equal => match b.rows.cmp(&a.rows) {
                Ordering::Equal => a.method.cmp(&b.method),
                other => other,
            },
            other => other,
        }
    });

    EventReport {
        counters: Some(snap),
        method_counters,
    }
}

///
/// TESTS
///
