use crate::{
    db::ports::EntityGraphResolver,
    error::ConfigurationError,
    model::{EntityGraphRef, QueryHint},
    value::Value,
};
use std::collections::BTreeMap;

///
/// StaticGraphResolver
///
/// In-memory registry of entity graphs keyed by (entity, graph name).
/// A graph resolves to one hint under its kind's key, carrying the graph's
/// attribute paths.
///

#[derive(Clone, Debug, Default)]
pub struct StaticGraphResolver {
    graphs: BTreeMap<(String, String), Vec<String>>,
}

impl StaticGraphResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `graph` on `entity` with the attribute paths it loads.
    #[must_use]
    pub fn with_graph<I, S>(
        mut self,
        entity: impl Into<String>,
        graph: impl Into<String>,
        attributes: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.graphs.insert(
            (entity.into(), graph.into()),
            attributes.into_iter().map(Into::into).collect(),
        );
        self
    }
}

impl EntityGraphResolver for StaticGraphResolver {
    fn resolve_fetch_hints(
        &self,
        entity: &str,
        graph: Option<&EntityGraphRef>,
    ) -> Result<Vec<QueryHint>, ConfigurationError> {
        let Some(graph) = graph else {
            return Ok(Vec::new());
        };

        let attributes = self
            .graphs
            .get(&(entity.to_string(), graph.name.clone()))
            .ok_or_else(|| ConfigurationError::UnknownEntityGraph {
                entity: entity.to_string(),
                graph: graph.name.clone(),
            })?;

        let value = Value::List(attributes.iter().map(|a| Value::from(a.as_str())).collect());

        Ok(vec![QueryHint::new(graph.kind.hint_key(), value)])
    }
}
