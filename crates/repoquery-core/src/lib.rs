//! Core runtime for repoquery: method descriptors, prepared queries, the
//! execution-strategy set, result normalization, and the observability hooks
//! used around them.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod obs;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Reserved hint key carrying the effective lock mode of a prepared query.
///
/// Lock mode is applied after every other hint, so a declared hint using this
/// key is always overridden.
pub const LOCK_MODE_HINT: &str = "query.lock_mode";

/// Hint key used for fetch-graph semantics (unlisted attributes are lazy).
pub const FETCH_GRAPH_HINT: &str = "query.fetchgraph";

/// Hint key used for load-graph semantics (unlisted attributes keep defaults).
pub const LOAD_GRAPH_HINT: &str = "query.loadgraph";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No executors, ports, or observability helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::{
            query::{PageRequest, PreparedQuery, QueryKind},
            response::{Page, QueryResult, Row, Slice, Tuple},
        },
        model::{
            EntityGraphRef, GraphKind, LockMode, MethodDescriptor, ParameterModel, QueryHint,
            ResultShape,
        },
        value::{Record, Value, ValueKind},
    };
}
