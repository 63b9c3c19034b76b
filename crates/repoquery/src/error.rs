use derive_more::Display;
use repoquery_core::{
    config::ConfigError,
    db::response::ResponseError,
    error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, QueryError},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        let kind = match err.class() {
            ErrorClass::Binding => ErrorKind::Binding,
            ErrorClass::Configuration => ErrorKind::Configuration,
            ErrorClass::Engine => ErrorKind::Engine,
            ErrorClass::Unsupported => ErrorKind::Unsupported,
        };

        Self::new(kind, err.origin().into(), err.to_string())
    }
}

impl From<ResponseError> for Error {
    fn from(err: ResponseError) -> Self {
        Self::new(ErrorKind::ShapeMismatch, ErrorOrigin::Response, err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Configuration, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for repository callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// Arguments do not match the method's parameters.
    Binding,

    /// The method, its projection, or the executor is misconfigured.
    /// The caller cannot remediate this at runtime.
    Configuration,

    /// The query engine failed; the message carries its error text.
    Engine,

    /// A result was read as a shape it does not have.
    ShapeMismatch,

    /// The method asks for an execution mode that is not supported.
    Unsupported,
}

///
/// ErrorOrigin
/// Public origin taxonomy for repository callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Binder,
    Config,
    Decorator,
    Engine,
    Executor,
    Model,
    Normalizer,
    Response,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Model => Self::Model,
            CoreErrorOrigin::Binder => Self::Binder,
            CoreErrorOrigin::Decorator => Self::Decorator,
            CoreErrorOrigin::Executor => Self::Executor,
            CoreErrorOrigin::Engine => Self::Engine,
            CoreErrorOrigin::Normalizer => Self::Normalizer,
        }
    }
}
