//! Module: decorate
//! Responsibility: apply declared hints, fetch-graph hints, and lock mode to
//! prepared queries.
//! Does not own: hint semantics (interpreted by the engine) or locking.
//!
//! Order is fixed: declared hints, then graph hints, then lock mode. Lock mode
//! goes last so nothing can override it. Count queries only ever receive the
//! declared hints, and only when the method opts in.


use crate::{
    db::{ports::EntityGraphResolver, query::PreparedQuery},
    error::ConfigurationError,
    model::{MethodDescriptor, QueryHint},
};

///
/// QueryDecorator
///

pub struct QueryDecorator<'a> {
    method: &'a MethodDescriptor,
    graphs: &'a dyn EntityGraphResolver,
}

impl<'a> QueryDecorator<'a> {
    #[must_use]
    pub const fn new(method: &'a MethodDescriptor, graphs: &'a dyn EntityGraphResolver) -> Self {
        Self { method, graphs }
    }

    /// Decorate a main (non-count) query.
    pub fn decorate(&self, mut query: PreparedQuery) -> Result<PreparedQuery, ConfigurationError> {
        self.apply_hints(&mut query);
        self.apply_entity_graph(&mut query)?;
        self.apply_lock_mode(&mut query);

        Ok(query)
    }

    /// Decorate a count query.
    #[must_use]
    pub fn decorate_count(&self, mut query: PreparedQuery) -> PreparedQuery {
        if self.method.apply_hints_to_count_query() {
            self.apply_hints(&mut query);
        }

        query
    }

    fn apply_hints(&self, query: &mut PreparedQuery) {
        for hint in self.method.hints() {
            apply_hint(query, hint);
        }
    }

    fn apply_entity_graph(&self, query: &mut PreparedQuery) -> Result<(), ConfigurationError> {
        let hints = self
            .graphs
            .resolve_fetch_hints(self.method.entity(), self.method.entity_graph())?;

        for hint in &hints {
            if hint.name.trim().is_empty() {
                return Err(ConfigurationError::BlankHintName {
                    method: self.method.name().to_string(),
                });
            }
            apply_hint(query, hint);
        }

        Ok(())
    }

    fn apply_lock_mode(&self, query: &mut PreparedQuery) {
        if let Some(mode) = self.method.lock_mode() {
            query.set_lock_mode(mode);
        }
    }
}

fn apply_hint(query: &mut PreparedQuery, hint: &QueryHint) {
    query.set_hint(hint.name.clone(), hint.value.clone());
}
