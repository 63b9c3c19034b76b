//! In-memory fakes shared by unit tests.

use crate::{
    db::{
        executor::trace::{QueryTraceEvent, QueryTraceSink},
        parameter::ParameterAccessor,
        ports::{PersistenceContext, Ports, ProcedureOutput, QueryEngine, QuerySource},
        query::PreparedQuery,
        response::Row,
        source::StatementSource,
        template::QueryTemplate,
    },
    error::{EngineError, QueryError},
    model::MethodDescriptor,
    obs::{MetricsEvent, MetricsSink},
    value::{Record, Value},
};
use std::{
    cell::RefCell,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};
use thiserror::Error as ThisError;

///
/// FakeEngineError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[error("{0}")]
pub(crate) struct FakeEngineError(pub(crate) String);

///
/// Journal
/// Ordered log of side effects shared between fakes.
///

#[derive(Clone, Debug, Default)]
pub(crate) struct Journal(Arc<Mutex<Vec<&'static str>>>);

impl Journal {
    pub(crate) fn push(&self, entry: &'static str) {
        self.0.lock().expect("journal lock should succeed").push(entry);
    }

    pub(crate) fn entries(&self) -> Vec<&'static str> {
        self.0.lock().expect("journal lock should succeed").clone()
    }
}

///
/// RecordingEngine
/// Serves a fixed row set, honours result windows, and records every query.
///

#[derive(Debug, Default)]
pub(crate) struct RecordingEngine {
    rows: Vec<Row>,
    total: Option<u64>,
    affected: u64,
    procedure: ProcedureOutput,
    failure: Option<String>,
    journal: Journal,
    queries: Mutex<Vec<PreparedQuery>>,
}

impl RecordingEngine {
    pub(crate) fn with_rows(rows: impl IntoIterator<Item = Row>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Count reported by the count query; defaults to the row-set length.
    pub(crate) const fn total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    pub(crate) const fn affected(mut self, affected: u64) -> Self {
        self.affected = affected;
        self
    }

    pub(crate) fn procedure(mut self, output: ProcedureOutput) -> Self {
        self.procedure = output;
        self
    }

    pub(crate) fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub(crate) fn journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    pub(crate) fn queries(&self) -> Vec<PreparedQuery> {
        self.queries.lock().expect("query log lock should succeed").clone()
    }

    pub(crate) fn query_count(&self) -> usize {
        self.queries.lock().expect("query log lock should succeed").len()
    }

    fn record(&self, entry: &'static str, query: &PreparedQuery) -> Result<(), EngineError> {
        self.journal.push(entry);
        self.queries
            .lock()
            .expect("query log lock should succeed")
            .push(query.clone());

        match &self.failure {
            Some(message) => Err(EngineError::new(FakeEngineError(message.clone()))),
            None => Ok(()),
        }
    }

    fn window(&self, query: &PreparedQuery) -> Vec<Row> {
        let skip = usize::try_from(query.first_result()).unwrap_or(usize::MAX);
        let take = query
            .max_results()
            .map_or(usize::MAX, |max| usize::try_from(max).unwrap_or(usize::MAX));

        self.rows.iter().skip(skip).take(take).cloned().collect()
    }
}

impl QueryEngine for RecordingEngine {
    fn fetch(&self, query: &PreparedQuery) -> Result<Vec<Row>, EngineError> {
        self.record("fetch", query)?;

        Ok(self.window(query))
    }

    fn fetch_single(&self, query: &PreparedQuery) -> Result<Option<Row>, EngineError> {
        self.record("fetch_single", query)?;

        let mut rows = self.window(query);
        if rows.len() > 1 {
            return Err(EngineError::new(FakeEngineError(
                "query did not return a unique result".to_string(),
            )));
        }

        Ok(rows.pop())
    }

    fn count(&self, query: &PreparedQuery) -> Result<u64, EngineError> {
        self.record("count", query)?;

        Ok(self
            .total
            .unwrap_or_else(|| u64::try_from(self.rows.len()).unwrap_or(u64::MAX)))
    }

    fn execute_update(&self, query: &PreparedQuery) -> Result<u64, EngineError> {
        self.record("update", query)?;

        Ok(self.affected)
    }

    fn call_procedure(&self, query: &PreparedQuery) -> Result<ProcedureOutput, EngineError> {
        self.record("procedure", query)?;

        Ok(self.procedure.clone())
    }
}

///
/// CountingContext
///

#[derive(Debug, Default)]
pub(crate) struct CountingContext {
    clears: AtomicUsize,
    journal: Journal,
}

impl CountingContext {
    pub(crate) fn with_journal(journal: Journal) -> Self {
        Self {
            clears: AtomicUsize::new(0),
            journal,
        }
    }

    pub(crate) fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl PersistenceContext for CountingContext {
    fn clear_pending_changes(&self) {
        self.journal.push("clear");
        self.clears.fetch_add(1, Ordering::SeqCst);
    }
}

///
/// SourceCounters
///

#[derive(Debug, Default)]
pub(crate) struct SourceCounters {
    queries: AtomicUsize,
    count_queries: AtomicUsize,
}

impl SourceCounters {
    pub(crate) fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub(crate) fn count_queries(&self) -> usize {
        self.count_queries.load(Ordering::SeqCst)
    }
}

///
/// CountingSource
/// Declared-statement source that counts every build request.
///

#[derive(Debug)]
pub(crate) struct CountingSource {
    inner: StatementSource,
    counters: Arc<SourceCounters>,
}

impl CountingSource {
    pub(crate) fn new(inner: StatementSource) -> Self {
        Self {
            inner,
            counters: Arc::default(),
        }
    }

    pub(crate) fn counters(&self) -> Arc<SourceCounters> {
        Arc::clone(&self.counters)
    }
}

impl QuerySource for CountingSource {
    fn build_query(
        &self,
        method: &MethodDescriptor,
        args: &ParameterAccessor<'_>,
    ) -> Result<PreparedQuery, QueryError> {
        self.counters.queries.fetch_add(1, Ordering::SeqCst);
        self.inner.build_query(method, args)
    }

    fn build_count_query(
        &self,
        method: &MethodDescriptor,
        args: &ParameterAccessor<'_>,
    ) -> Result<PreparedQuery, QueryError> {
        self.counters.count_queries.fetch_add(1, Ordering::SeqCst);
        self.inner.build_count_query(method, args)
    }
}

///
/// CaptureTraceSink
///

#[derive(Debug, Default)]
pub(crate) struct CaptureTraceSink {
    events: Mutex<Vec<QueryTraceEvent>>,
}

impl CaptureTraceSink {
    /// Leak a fresh sink; templates hold trace sinks for `'static`.
    pub(crate) fn leaked() -> &'static Self {
        Box::leak(Box::default())
    }

    pub(crate) fn events(&self) -> Vec<QueryTraceEvent> {
        self.events.lock().expect("trace lock should succeed").clone()
    }
}

impl QueryTraceSink for CaptureTraceSink {
    fn on_event(&self, event: QueryTraceEvent) {
        self.events.lock().expect("trace lock should succeed").push(event);
    }
}

///
/// CaptureMetricsSink
///

#[derive(Debug, Default)]
pub(crate) struct CaptureMetricsSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl CaptureMetricsSink {
    pub(crate) fn events(&self) -> Vec<MetricsEvent> {
        self.events.borrow().clone()
    }
}

impl MetricsSink for CaptureMetricsSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}

///
/// Fixture
/// A template over a declared statement, wired to recording fakes.
///

pub(crate) struct Fixture {
    pub(crate) template: QueryTemplate<CountingSource>,
    pub(crate) engine: Arc<RecordingEngine>,
    pub(crate) context: Arc<CountingContext>,
    pub(crate) source: Arc<SourceCounters>,
}

impl Fixture {
    pub(crate) fn new(method: MethodDescriptor, engine: RecordingEngine) -> Self {
        Self::with_context(method, engine, CountingContext::default())
    }

    pub(crate) fn with_context(
        method: MethodDescriptor,
        engine: RecordingEngine,
        context: CountingContext,
    ) -> Self {
        let engine = Arc::new(engine);
        let context = Arc::new(context);
        let ports = Ports::new(engine.clone(), context.clone());
        let source = CountingSource::new(StatementSource::new("select u from User u"));
        let counters = source.counters();
        let template = QueryTemplate::new(Arc::new(method), source, ports);

        Self {
            template,
            engine,
            context,
            source: counters,
        }
    }
}

/// Entity-style row: a record with `id` and `name`.
pub(crate) fn user_row(id: i64, name: &str) -> Row {
    let record: Record = [("id", Value::Int(id)), ("name", Value::from(name))]
        .into_iter()
        .collect();

    Row::Value(Value::Record(record))
}

/// `count` sequential user rows with ids starting at 1.
pub(crate) fn user_rows(count: usize) -> Vec<Row> {
    (1..=count)
        .map(|id| user_row(i64::try_from(id).unwrap_or(i64::MAX), &format!("user-{id}")))
        .collect()
}
