use crate::{
    LOCK_MODE_HINT,
    model::{LockMode, QueryHint},
    value::Value,
};
use derive_more::Deref;
use std::collections::BTreeMap;

///
/// QueryKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum QueryKind {
    Select,
    Count,
    Modify,
    Procedure,
}

///
/// HintSet
///
/// Hints in application order. Re-applying a name moves it to the end with
/// the new value, so the last writer of a key always wins.
///

#[derive(Clone, Debug, Default, Deref, PartialEq)]
pub struct HintSet(Vec<QueryHint>);

impl HintSet {
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let hint = QueryHint::new(name, value);
        self.0.retain(|existing| existing.name != hint.name);
        self.0.push(hint);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0
            .iter()
            .find_map(|hint| (hint.name == name).then_some(&hint.value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|hint| hint.name.as_str())
    }
}

///
/// BoundParameters
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundParameters {
    named: BTreeMap<String, Value>,
    positional: BTreeMap<usize, Value>,
}

impl BoundParameters {
    #[must_use]
    pub fn named(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }

    /// Value bound at 1-based `position`.
    #[must_use]
    pub fn positional(&self, position: usize) -> Option<&Value> {
        self.positional.get(&position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.named.len() + self.positional.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.positional.is_empty()
    }
}

///
/// PreparedQuery
///
/// One executable query built for a single invocation. Never shared between
/// invocations.
///

#[derive(Clone, Debug, PartialEq)]
pub struct PreparedQuery {
    kind: QueryKind,
    statement: String,
    hints: HintSet,
    lock_mode: Option<LockMode>,
    parameters: BoundParameters,
    first_result: u64,
    max_results: Option<u64>,
}

impl PreparedQuery {
    pub fn new(kind: QueryKind, statement: impl Into<String>) -> Self {
        Self {
            kind,
            statement: statement.into(),
            hints: HintSet::default(),
            lock_mode: None,
            parameters: BoundParameters::default(),
            first_result: 0,
            max_results: None,
        }
    }

    pub fn select(statement: impl Into<String>) -> Self {
        Self::new(QueryKind::Select, statement)
    }

    pub fn count(statement: impl Into<String>) -> Self {
        Self::new(QueryKind::Count, statement)
    }

    #[must_use]
    pub const fn kind(&self) -> QueryKind {
        self.kind
    }

    #[must_use]
    pub fn statement(&self) -> &str {
        &self.statement
    }

    // ------------------------------------------------------------------
    // Hints / lock mode
    // ------------------------------------------------------------------

    pub fn set_hint(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.hints.set(name, value);
    }

    #[must_use]
    pub const fn hints(&self) -> &HintSet {
        &self.hints
    }

    #[must_use]
    pub fn hint(&self, name: &str) -> Option<&Value> {
        self.hints.get(name)
    }

    /// Set the lock mode and publish it under [`LOCK_MODE_HINT`].
    pub fn set_lock_mode(&mut self, mode: LockMode) {
        self.lock_mode = Some(mode);
        self.hints.set(LOCK_MODE_HINT, mode.to_string());
    }

    #[must_use]
    pub const fn lock_mode(&self) -> Option<LockMode> {
        self.lock_mode
    }

    // ------------------------------------------------------------------
    // Parameters
    // ------------------------------------------------------------------

    pub fn set_named_parameter(&mut self, name: impl Into<String>, value: Value) {
        self.parameters.named.insert(name.into(), value);
    }

    pub fn set_positional_parameter(&mut self, position: usize, value: Value) {
        self.parameters.positional.insert(position, value);
    }

    #[must_use]
    pub const fn parameters(&self) -> &BoundParameters {
        &self.parameters
    }

    // ------------------------------------------------------------------
    // Result window
    // ------------------------------------------------------------------

    pub const fn set_first_result(&mut self, first_result: u64) {
        self.first_result = first_result;
    }

    pub const fn set_max_results(&mut self, max_results: u64) {
        self.max_results = Some(max_results);
    }

    #[must_use]
    pub const fn first_result(&self) -> u64 {
        self.first_result
    }

    #[must_use]
    pub const fn max_results(&self) -> Option<u64> {
        self.max_results
    }
}
