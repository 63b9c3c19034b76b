//! ## Crate layout
//! - `core`: method model, prepared queries, execution strategies, result
//!   normalization, configuration, and observability.
//! - `error`: stable public error type for repository callers.
//!
//! The `prelude` module mirrors the vocabulary a repository layer needs to
//! declare methods and run them; ports and fakes stay under `core`.

pub use repoquery_core as core;

pub mod error;

pub use error::{Error, ErrorKind, ErrorOrigin};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        config::ExecutorConfig,
        db::{
            Argument, ExecutionStrategy, Ports, QueryTemplate,
            ports::{
                EntityGraphResolver, PersistenceContext, ProcedureOutput, QueryEngine, QuerySource,
            },
            source::StatementSource,
        },
        prelude::*,
    };
    pub use crate::error::Error;
}
