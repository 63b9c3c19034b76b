use crate::{
    db::{binder::BindingError, executor::UnsupportedOperationError, normalize::ProjectionError},
    model::ExecutionFlag,
};
use std::{error::Error as StdError, fmt};
use thiserror::Error as ThisError;

///
/// QueryError
///
/// Failure of one repository-method invocation.
/// Every variant aborts the whole invocation; nothing is retried here.
///

#[derive(Debug, ThisError)]
pub enum QueryError {
    #[error("{0}")]
    Binding(#[from] BindingError),

    #[error("{0}")]
    Configuration(#[from] ConfigurationError),

    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("{0}")]
    Unsupported(#[from] UnsupportedOperationError),
}

impl QueryError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Binding(_) => ErrorClass::Binding,
            Self::Configuration(_) => ErrorClass::Configuration,
            Self::Engine(_) => ErrorClass::Engine,
            Self::Unsupported(_) => ErrorClass::Unsupported,
        }
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::Binding(_) => ErrorOrigin::Binder,
            Self::Configuration(err) => err.origin(),
            Self::Engine(_) => ErrorOrigin::Engine,
            Self::Unsupported(_) => ErrorOrigin::Executor,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {self}", self.origin(), self.class())
    }

    /// Borrow the engine failure, if the invocation failed inside the engine.
    #[must_use]
    pub const fn as_engine(&self) -> Option<&EngineError> {
        match self {
            Self::Engine(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProjectionError> for QueryError {
    fn from(err: ProjectionError) -> Self {
        Self::Configuration(ConfigurationError::Projection(err))
    }
}

///
/// ConfigurationError
///
/// Fatal misconfiguration of a repository method or its collaborators.
/// Surfaced immediately and never retried.
///

#[remain::sorted]
#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum ConfigurationError {
    #[error("query hint on method '{method}' has a blank name")]
    BlankHintName { method: String },

    #[error("method '{method}' declares parameter '{name}' more than once")]
    DuplicateParameter { method: String, name: String },

    #[error("method '{method}' declares more than one {role} parameter")]
    DuplicateSpecialParameter { method: String, role: &'static str },

    #[error("method '{method}' runs as a {flag} query but declares no page-request parameter")]
    MissingPageRequest { method: String, flag: ExecutionFlag },

    #[error("{0}")]
    Projection(ProjectionError),

    #[error("no entity graph '{graph}' is registered for entity '{entity}'")]
    UnknownEntityGraph { entity: String, graph: String },
}

impl ConfigurationError {
    pub(crate) const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::BlankHintName { .. }
            | Self::DuplicateParameter { .. }
            | Self::DuplicateSpecialParameter { .. }
            | Self::MissingPageRequest { .. } => ErrorOrigin::Model,
            Self::Projection(_) => ErrorOrigin::Normalizer,
            Self::UnknownEntityGraph { .. } => ErrorOrigin::Decorator,
        }
    }
}

///
/// EngineError
///
/// Opaque failure raised by the underlying query engine.
/// The source error is carried unchanged so callers can downcast it.
///

#[derive(Debug, ThisError)]
#[error("query engine failure: {source}")]
pub struct EngineError {
    #[source]
    source: Box<dyn StdError + Send + Sync>,
}

impl EngineError {
    pub fn new(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Borrow the engine's own error if it has type `T`.
    #[must_use]
    pub fn downcast_ref<T: StdError + 'static>(&self) -> Option<&T> {
        self.source.downcast_ref::<T>()
    }

    #[must_use]
    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync> {
        self.source
    }
}

///
/// ErrorClass
/// Error taxonomy for runtime classification.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ErrorClass {
    Binding,
    Configuration,
    Engine,
    Unsupported,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Binding => "binding",
            Self::Configuration => "configuration",
            Self::Engine => "engine",
            Self::Unsupported => "unsupported",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Pipeline stage a failure was raised from.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Model,
    Binder,
    Decorator,
    Executor,
    Engine,
    Normalizer,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Model => "model",
            Self::Binder => "binder",
            Self::Decorator => "decorator",
            Self::Executor => "executor",
            Self::Engine => "engine",
            Self::Normalizer => "normalizer",
        };
        write!(f, "{label}")
    }
}
