//! Repository query execution: argument binding, query decoration, strategy
//! dispatch, and result normalization.

pub mod binder;
pub mod decorate;
pub mod executor;
pub mod graph;
pub mod normalize;
pub mod parameter;
pub mod ports;
pub mod query;
pub mod response;
pub mod source;
pub mod template;

// re-exports
pub use executor::ExecutionStrategy;
pub use parameter::{Argument, ParameterAccessor};
pub use ports::Ports;
pub use template::QueryTemplate;
