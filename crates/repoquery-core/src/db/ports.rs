//! Module: ports
//! Responsibility: contracts of the collaborators this layer consumes.
//! Does not own: any engine, persistence, or projection implementation
//! beyond the in-crate defaults (`StaticGraphResolver`, `ShapeProcessor`).

use crate::{
    db::{
        graph::StaticGraphResolver,
        normalize::{ShapeProcessor, TupleConverter},
        parameter::ParameterAccessor,
        query::PreparedQuery,
        response::{QueryResult, Row},
    },
    error::{ConfigurationError, EngineError, QueryError},
    model::{EntityGraphRef, MethodDescriptor, QueryHint, ResultShape},
    value::{Record, Value},
};
use std::sync::Arc;

///
/// QuerySource
///
/// Data-source-specific builder of the main and count queries for one method.
///

pub trait QuerySource: Send + Sync {
    fn build_query(
        &self,
        method: &MethodDescriptor,
        args: &ParameterAccessor<'_>,
    ) -> Result<PreparedQuery, QueryError>;

    fn build_count_query(
        &self,
        method: &MethodDescriptor,
        args: &ParameterAccessor<'_>,
    ) -> Result<PreparedQuery, QueryError>;
}

///
/// ProcedureOutput
///
/// Raw outcome of a stored-procedure call: named output parameters plus any
/// result rows.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProcedureOutput {
    pub outputs: Record,
    pub rows: Vec<Row>,
}

///
/// QueryEngine
///
/// The relational engine. Failures are opaque to this layer and propagate
/// unchanged.
///

pub trait QueryEngine: Send + Sync {
    /// Every row inside the query's result window, in engine order.
    fn fetch(&self, query: &PreparedQuery) -> Result<Vec<Row>, EngineError>;

    /// At most one row; more than one is an engine failure.
    fn fetch_single(&self, query: &PreparedQuery) -> Result<Option<Row>, EngineError>;

    fn count(&self, query: &PreparedQuery) -> Result<u64, EngineError>;

    /// Run an update/delete statement and return the affected-row count.
    fn execute_update(&self, query: &PreparedQuery) -> Result<u64, EngineError>;

    fn call_procedure(&self, query: &PreparedQuery) -> Result<ProcedureOutput, EngineError>;
}

///
/// EntityGraphResolver
///

pub trait EntityGraphResolver: Send + Sync {
    /// Hints for `graph` on `entity`; empty when no graph is declared.
    fn resolve_fetch_hints(
        &self,
        entity: &str,
        graph: Option<&EntityGraphRef>,
    ) -> Result<Vec<QueryHint>, ConfigurationError>;
}

///
/// PersistenceContext
///

pub trait PersistenceContext: Send + Sync {
    /// Drop every pending, unflushed change tracked by the context.
    fn clear_pending_changes(&self);
}

///
/// ResultProcessor
///
/// Caller-facing result shaping. Receives the tuple converter as a plug-in.
///

pub trait ResultProcessor: Send + Sync {
    fn process(
        &self,
        raw: QueryResult<Row>,
        converter: TupleConverter,
        shape: &ResultShape,
    ) -> Result<QueryResult<Value>, QueryError>;
}

///
/// Ports
///
/// Collaborator handles shared by every invocation of one template.
///

#[derive(Clone)]
pub struct Ports {
    engine: Arc<dyn QueryEngine>,
    persistence: Arc<dyn PersistenceContext>,
    graphs: Arc<dyn EntityGraphResolver>,
    processor: Arc<dyn ResultProcessor>,
}

impl Ports {
    /// Ports with an empty graph registry and the default shape processor.
    pub fn new(engine: Arc<dyn QueryEngine>, persistence: Arc<dyn PersistenceContext>) -> Self {
        Self {
            engine,
            persistence,
            graphs: Arc::new(StaticGraphResolver::default()),
            processor: Arc::new(ShapeProcessor),
        }
    }

    #[must_use]
    pub fn with_graph_resolver(mut self, graphs: Arc<dyn EntityGraphResolver>) -> Self {
        self.graphs = graphs;
        self
    }

    #[must_use]
    pub fn with_result_processor(mut self, processor: Arc<dyn ResultProcessor>) -> Self {
        self.processor = processor;
        self
    }

    #[must_use]
    pub fn engine(&self) -> &dyn QueryEngine {
        self.engine.as_ref()
    }

    #[must_use]
    pub fn persistence(&self) -> &dyn PersistenceContext {
        self.persistence.as_ref()
    }

    #[must_use]
    pub fn graphs(&self) -> &dyn EntityGraphResolver {
        self.graphs.as_ref()
    }

    #[must_use]
    pub fn processor(&self) -> &dyn ResultProcessor {
        self.processor.as_ref()
    }
}
