use crate::value::{Value, ValueKind};

///
/// ParameterRole
///
/// Page requests and dynamic projections are consumed by the executor and
/// never bound into the query.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ParameterRole {
    Bindable,
    PageRequest,
    DynamicProjection,
}

impl ParameterRole {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bindable => "bindable",
            Self::PageRequest => "page-request",
            Self::DynamicProjection => "dynamic-projection",
        }
    }
}

///
/// ParameterType
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParameterType {
    Any,
    Kind(ValueKind),
}

impl ParameterType {
    /// `Null` is accepted by every type; required-ness is checked separately.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::Kind(kind) => value.is_null() || value.kind() == kind,
        }
    }
}

impl From<ValueKind> for ParameterType {
    fn from(kind: ValueKind) -> Self {
        Self::Kind(kind)
    }
}

///
/// ParameterModel
///
/// One declared method parameter. `position` is 1-based in declaration order
/// and assigned when the parameter is added to a descriptor.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParameterModel {
    name: Option<String>,
    position: usize,
    ty: ParameterType,
    role: ParameterRole,
    required: bool,
}

impl ParameterModel {
    pub fn named(name: impl Into<String>, ty: impl Into<ParameterType>) -> Self {
        Self {
            name: Some(name.into()),
            position: 0,
            ty: ty.into(),
            role: ParameterRole::Bindable,
            required: true,
        }
    }

    pub fn positional(ty: impl Into<ParameterType>) -> Self {
        Self {
            name: None,
            position: 0,
            ty: ty.into(),
            role: ParameterRole::Bindable,
            required: false,
        }
    }

    #[must_use]
    pub const fn page_request() -> Self {
        Self::special(ParameterRole::PageRequest)
    }

    #[must_use]
    pub const fn dynamic_projection() -> Self {
        Self::special(ParameterRole::DynamicProjection)
    }

    const fn special(role: ParameterRole) -> Self {
        Self {
            name: None,
            position: 0,
            ty: ParameterType::Any,
            role,
            required: false,
        }
    }

    /// Allow `Null` for a named parameter.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub(crate) const fn at_position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub const fn ty(&self) -> ParameterType {
        self.ty
    }

    #[must_use]
    pub const fn role(&self) -> ParameterRole {
        self.role
    }

    #[must_use]
    pub const fn is_bindable(&self) -> bool {
        matches!(self.role, ParameterRole::Bindable)
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }
}
