use crate::{
    db::executor::ExecutionStrategy,
    error::ConfigurationError,
    model::{
        EntityGraphRef, LockMode, ParameterModel, ParameterRole, QueryHint, ResultShape,
    },
    value::Value,
};
use derive_more::Display;
use std::{collections::BTreeSet, sync::Arc};

///
/// ExecutionFlag
///
/// One return-shape or modifier flag a repository method can carry.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ExecutionFlag {
    #[display("stream")]
    Stream,
    #[display("procedure")]
    Procedure,
    #[display("collection")]
    Collection,
    #[display("slice")]
    Slice,
    #[display("page")]
    Page,
    #[display("modifying")]
    Modifying,
}

///
/// QueryFlags
///
/// Flags derived from a method's signature and annotations. Several may be
/// set at once; strategy resolution picks one by fixed priority.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[expect(clippy::struct_excessive_bools)]
pub struct QueryFlags {
    stream: bool,
    procedure: bool,
    collection: bool,
    slice: bool,
    page: bool,
    modifying: bool,
}

impl QueryFlags {
    #[must_use]
    pub const fn contains(self, flag: ExecutionFlag) -> bool {
        match flag {
            ExecutionFlag::Stream => self.stream,
            ExecutionFlag::Procedure => self.procedure,
            ExecutionFlag::Collection => self.collection,
            ExecutionFlag::Slice => self.slice,
            ExecutionFlag::Page => self.page,
            ExecutionFlag::Modifying => self.modifying,
        }
    }

    #[must_use]
    pub const fn with(mut self, flag: ExecutionFlag) -> Self {
        match flag {
            ExecutionFlag::Stream => self.stream = true,
            ExecutionFlag::Procedure => self.procedure = true,
            ExecutionFlag::Collection => self.collection = true,
            ExecutionFlag::Slice => self.slice = true,
            ExecutionFlag::Page => self.page = true,
            ExecutionFlag::Modifying => self.modifying = true,
        }
        self
    }
}

///
/// MethodDescriptor
///
/// Immutable metadata for one repository method. Built once and shared
/// read-only across concurrent invocations.
///

#[derive(Clone, Debug)]
pub struct MethodDescriptor {
    name: Arc<str>,
    entity: String,
    flags: QueryFlags,
    parameters: Vec<ParameterModel>,
    hints: Vec<QueryHint>,
    lock_mode: Option<LockMode>,
    entity_graph: Option<EntityGraphRef>,
    clear_automatically: bool,
    apply_hints_to_count_query: bool,
    result_shape: ResultShape,
    procedure_outputs: Vec<String>,
}

impl MethodDescriptor {
    pub fn builder(name: impl Into<String>, entity: impl Into<String>) -> MethodDescriptorBuilder {
        MethodDescriptorBuilder::new(name, entity)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared handle to the method name, used by telemetry events.
    #[must_use]
    pub fn name_arc(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }

    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub const fn flags(&self) -> QueryFlags {
        self.flags
    }

    #[must_use]
    pub const fn is_stream_query(&self) -> bool {
        self.flags.stream
    }

    #[must_use]
    pub const fn is_procedure_query(&self) -> bool {
        self.flags.procedure
    }

    #[must_use]
    pub const fn is_collection_query(&self) -> bool {
        self.flags.collection
    }

    #[must_use]
    pub const fn is_slice_query(&self) -> bool {
        self.flags.slice
    }

    #[must_use]
    pub const fn is_page_query(&self) -> bool {
        self.flags.page
    }

    #[must_use]
    pub const fn is_modifying_query(&self) -> bool {
        self.flags.modifying
    }

    #[must_use]
    pub fn parameters(&self) -> &[ParameterModel] {
        &self.parameters
    }

    #[must_use]
    pub fn hints(&self) -> &[QueryHint] {
        &self.hints
    }

    #[must_use]
    pub const fn lock_mode(&self) -> Option<LockMode> {
        self.lock_mode
    }

    #[must_use]
    pub const fn entity_graph(&self) -> Option<&EntityGraphRef> {
        self.entity_graph.as_ref()
    }

    #[must_use]
    pub const fn clear_automatically(&self) -> bool {
        self.clear_automatically
    }

    #[must_use]
    pub const fn apply_hints_to_count_query(&self) -> bool {
        self.apply_hints_to_count_query
    }

    /// Declared result shape, used when the caller supplies no dynamic projection.
    #[must_use]
    pub const fn result_shape(&self) -> &ResultShape {
        &self.result_shape
    }

    #[must_use]
    pub fn procedure_outputs(&self) -> &[String] {
        &self.procedure_outputs
    }

    #[must_use]
    pub fn has_parameter_role(&self, role: ParameterRole) -> bool {
        self.parameters.iter().any(|param| param.role() == role)
    }
}

///
/// MethodDescriptorBuilder
///

#[derive(Debug)]
pub struct MethodDescriptorBuilder {
    name: String,
    entity: String,
    flags: QueryFlags,
    parameters: Vec<ParameterModel>,
    hints: Vec<QueryHint>,
    lock_mode: Option<LockMode>,
    entity_graph: Option<EntityGraphRef>,
    clear_automatically: bool,
    apply_hints_to_count_query: bool,
    result_shape: ResultShape,
    procedure_outputs: Vec<String>,
}

impl MethodDescriptorBuilder {
    fn new(name: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entity: entity.into(),
            flags: QueryFlags::default(),
            parameters: Vec::new(),
            hints: Vec::new(),
            lock_mode: None,
            entity_graph: None,
            clear_automatically: false,
            apply_hints_to_count_query: false,
            result_shape: ResultShape::Entity,
            procedure_outputs: Vec::new(),
        }
    }

    #[must_use]
    pub const fn flag(mut self, flag: ExecutionFlag) -> Self {
        self.flags = self.flags.with(flag);
        self
    }

    #[must_use]
    pub const fn stream(self) -> Self {
        self.flag(ExecutionFlag::Stream)
    }

    #[must_use]
    pub const fn collection(self) -> Self {
        self.flag(ExecutionFlag::Collection)
    }

    #[must_use]
    pub const fn slice(self) -> Self {
        self.flag(ExecutionFlag::Slice)
    }

    #[must_use]
    pub const fn page(self) -> Self {
        self.flag(ExecutionFlag::Page)
    }

    /// Mark the method as an update/delete statement.
    #[must_use]
    pub const fn modifying(mut self, clear_automatically: bool) -> Self {
        self.clear_automatically = clear_automatically;
        self.flag(ExecutionFlag::Modifying)
    }

    /// Mark the method as a stored-procedure call with the given output names.
    #[must_use]
    pub fn procedure<I, S>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.procedure_outputs = outputs.into_iter().map(Into::into).collect();
        self.flag(ExecutionFlag::Procedure)
    }

    /// Append a parameter; its position follows declaration order.
    #[must_use]
    pub fn param(mut self, param: ParameterModel) -> Self {
        let position = self.parameters.len() + 1;
        self.parameters.push(param.at_position(position));
        self
    }

    #[must_use]
    pub fn hint(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.hints.push(QueryHint::new(name, value));
        self
    }

    #[must_use]
    pub const fn lock_mode(mut self, mode: LockMode) -> Self {
        self.lock_mode = Some(mode);
        self
    }

    #[must_use]
    pub fn entity_graph(mut self, graph: EntityGraphRef) -> Self {
        self.entity_graph = Some(graph);
        self
    }

    #[must_use]
    pub const fn apply_hints_to_count_query(mut self, apply: bool) -> Self {
        self.apply_hints_to_count_query = apply;
        self
    }

    #[must_use]
    pub fn result_shape(mut self, shape: ResultShape) -> Self {
        self.result_shape = shape;
        self
    }

    /// Validate and freeze the descriptor.
    pub fn build(self) -> Result<MethodDescriptor, ConfigurationError> {
        if self.hints.iter().any(|hint| hint.name.trim().is_empty()) {
            return Err(ConfigurationError::BlankHintName { method: self.name });
        }

        let mut names = BTreeSet::new();
        for name in self.parameters.iter().filter_map(ParameterModel::name) {
            if !names.insert(name) {
                return Err(ConfigurationError::DuplicateParameter {
                    method: self.name.clone(),
                    name: name.to_string(),
                });
            }
        }

        for role in [ParameterRole::PageRequest, ParameterRole::DynamicProjection] {
            let declared = self.parameters.iter().filter(|p| p.role() == role).count();
            if declared > 1 {
                return Err(ConfigurationError::DuplicateSpecialParameter {
                    method: self.name,
                    role: role.label(),
                });
            }
        }

        let descriptor = MethodDescriptor {
            name: Arc::from(self.name),
            entity: self.entity,
            flags: self.flags,
            parameters: self.parameters,
            hints: self.hints,
            lock_mode: self.lock_mode,
            entity_graph: self.entity_graph,
            clear_automatically: self.clear_automatically,
            apply_hints_to_count_query: self.apply_hints_to_count_query,
            result_shape: self.result_shape,
            procedure_outputs: self.procedure_outputs,
        };

        // Slice and page execution read their window from a page-request argument.
        let flag = match ExecutionStrategy::resolve(&descriptor) {
            ExecutionStrategy::Sliced => Some(ExecutionFlag::Slice),
            ExecutionStrategy::Paged => Some(ExecutionFlag::Page),
            _ => None,
        };
        if let Some(flag) = flag
            && !descriptor.has_parameter_role(ParameterRole::PageRequest)
        {
            return Err(ConfigurationError::MissingPageRequest {
                method: descriptor.name.to_string(),
                flag,
            });
        }

        Ok(descriptor)
    }
}
