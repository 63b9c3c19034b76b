use crate::value::Value;
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// QueryHint
///
/// One provider-specific query hint, applied verbatim to a prepared query.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueryHint {
    pub name: String,
    pub value: Value,
}

impl QueryHint {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

///
/// LockMode
///
/// Row lock directive passed through to the engine.
/// This layer never enforces locking itself.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum LockMode {
    #[display("NONE")]
    None,
    #[display("OPTIMISTIC")]
    Optimistic,
    #[display("OPTIMISTIC_FORCE_INCREMENT")]
    OptimisticForceIncrement,
    #[display("PESSIMISTIC_READ")]
    PessimisticRead,
    #[display("PESSIMISTIC_WRITE")]
    PessimisticWrite,
    #[display("PESSIMISTIC_FORCE_INCREMENT")]
    PessimisticForceIncrement,
}

///
/// GraphKind
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum GraphKind {
    #[default]
    Fetch,
    Load,
}

impl GraphKind {
    /// Hint key the graph is published under.
    #[must_use]
    pub const fn hint_key(self) -> &'static str {
        match self {
            Self::Fetch => crate::FETCH_GRAPH_HINT,
            Self::Load => crate::LOAD_GRAPH_HINT,
        }
    }
}

///
/// EntityGraphRef
///
/// Named entity graph declared on a repository method.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct EntityGraphRef {
    pub name: String,
    pub kind: GraphKind,
}

impl EntityGraphRef {
    pub fn fetch(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: GraphKind::Fetch,
        }
    }

    pub fn load(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: GraphKind::Load,
        }
    }
}
