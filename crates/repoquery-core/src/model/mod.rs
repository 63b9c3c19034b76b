//! Module: model
//! Responsibility: immutable per-method metadata consumed by the executor.
//! Does not own: annotation parsing or persistence-provider mapping.
//! Boundary: built once at repository bootstrap, shared read-only afterwards.

mod hint;
mod method;
mod parameter;
mod projection;

#[cfg(test)]
mod tests;

pub use hint::{EntityGraphRef, GraphKind, LockMode, QueryHint};
pub use method::{ExecutionFlag, MethodDescriptor, MethodDescriptorBuilder, QueryFlags};
pub use parameter::{ParameterModel, ParameterRole, ParameterType};
pub use projection::ResultShape;
