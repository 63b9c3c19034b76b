//! Module: executor
//! Responsibility: select one execution strategy per method and run it.
//! Does not own: query construction (delegated through `QueryFactory`) or
//! result shaping (owned by `normalize`).
//! Boundary: every strategy returns `QueryResult<Row>`; nothing leaves this
//! module normalized.

mod load;
mod modify;
mod procedure;
pub mod trace;
pub(crate) mod window;


use crate::{
    db::{
        parameter::ParameterAccessor,
        ports::Ports,
        query::PreparedQuery,
        response::{QueryResult, Row},
    },
    error::QueryError,
    model::MethodDescriptor,
};
use derive_more::Display;
use thiserror::Error as ThisError;
use trace::TraceScope;

///
/// UnsupportedOperationError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[error("{operation} is not supported (method '{method}')")]
pub struct UnsupportedOperationError {
    pub method: String,
    pub operation: &'static str,
}

///
/// ExecutionStrategy
///
/// One variant per result cardinality. Chosen from method metadata alone,
/// so every invocation of a method runs the same strategy.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ExecutionStrategy {
    #[display("stream")]
    Stream,
    #[display("procedure")]
    Procedure,
    #[display("collection")]
    Collection,
    #[display("sliced")]
    Sliced,
    #[display("paged")]
    Paged,
    #[display("modifying")]
    Modifying,
    #[display("single_entity")]
    SingleEntity,
}

impl ExecutionStrategy {
    /// Pick the strategy for `method`; the first matching flag wins.
    ///
    /// Priority: stream, procedure, collection, slice, page, modifying, then
    /// single entity as the fallback.
    #[must_use]
    pub const fn resolve(method: &MethodDescriptor) -> Self {
        if method.is_stream_query() {
            Self::Stream
        } else if method.is_procedure_query() {
            Self::Procedure
        } else if method.is_collection_query() {
            Self::Collection
        } else if method.is_slice_query() {
            Self::Sliced
        } else if method.is_page_query() {
            Self::Paged
        } else if method.is_modifying_query() {
            Self::Modifying
        } else {
            Self::SingleEntity
        }
    }

    /// Reject strategies this layer cannot run, before any query is built.
    pub fn ensure_supported(self, method: &MethodDescriptor) -> Result<(), UnsupportedOperationError> {
        match self {
            Self::Stream => Err(stream_unsupported(method)),
            _ => Ok(()),
        }
    }

    /// Run the strategy and return the raw, un-normalized result.
    pub fn run(self, ctx: &ExecutionContext<'_>) -> Result<QueryResult<Row>, QueryError> {
        match self {
            Self::Stream => Err(stream_unsupported(ctx.method).into()),
            Self::Procedure => procedure::execute(ctx),
            Self::Collection => load::execute_collection(ctx),
            Self::Sliced => load::execute_sliced(ctx),
            Self::Paged => load::execute_paged(ctx),
            Self::Modifying => modify::execute(ctx),
            Self::SingleEntity => load::execute_single(ctx),
        }
    }
}

fn stream_unsupported(method: &MethodDescriptor) -> UnsupportedOperationError {
    UnsupportedOperationError {
        method: method.name().to_string(),
        operation: "streaming query execution",
    }
}

///
/// QueryFactory
///
/// Builds fully decorated and bound queries on behalf of a strategy.
/// Implemented by the query template.
///

pub trait QueryFactory {
    fn create_query(&self, args: &ParameterAccessor<'_>) -> Result<PreparedQuery, QueryError>;

    fn create_count_query(&self, args: &ParameterAccessor<'_>)
    -> Result<PreparedQuery, QueryError>;
}

///
/// ExecutionContext
///
/// Everything one strategy run may touch. Invocation-local.
///

pub struct ExecutionContext<'a> {
    pub(crate) method: &'a MethodDescriptor,
    pub(crate) ports: &'a Ports,
    pub(crate) queries: &'a dyn QueryFactory,
    pub(crate) args: ParameterAccessor<'a>,
    pub(crate) trace: Option<&'a TraceScope>,
}

impl<'a> ExecutionContext<'a> {
    #[must_use]
    pub const fn new(
        method: &'a MethodDescriptor,
        ports: &'a Ports,
        queries: &'a dyn QueryFactory,
        args: ParameterAccessor<'a>,
    ) -> Self {
        Self {
            method,
            ports,
            queries,
            args,
            trace: None,
        }
    }

    #[must_use]
    pub const fn with_trace(mut self, trace: Option<&'a TraceScope>) -> Self {
        self.trace = trace;
        self
    }
}
