use crate::{
    db::query::PageRequest,
    model::{ParameterModel, ParameterRole, ResultShape},
    value::Value,
};

///
/// Argument
///
/// One runtime argument passed to a repository method.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Argument {
    Value(Value),
    Page(PageRequest),
    Projection(ResultShape),
}

impl Argument {
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    #[must_use]
    pub const fn null() -> Self {
        Self::Value(Value::Null)
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::Page(_) => "page request",
            Self::Projection(_) => "projection",
        }
    }

    const fn is_null(&self) -> bool {
        matches!(self, Self::Value(Value::Null))
    }
}

impl From<Value> for Argument {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<PageRequest> for Argument {
    fn from(request: PageRequest) -> Self {
        Self::Page(request)
    }
}

impl From<ResultShape> for Argument {
    fn from(shape: ResultShape) -> Self {
        Self::Projection(shape)
    }
}

///
/// ParameterAccessor
///
/// Read-only view pairing a method's parameter schema with one invocation's
/// arguments. Special arguments are looked up by role; a `Null` in a special
/// slot reads as absent.
///

#[derive(Clone, Copy, Debug)]
pub struct ParameterAccessor<'a> {
    parameters: &'a [ParameterModel],
    arguments: &'a [Argument],
}

impl<'a> ParameterAccessor<'a> {
    #[must_use]
    pub const fn new(parameters: &'a [ParameterModel], arguments: &'a [Argument]) -> Self {
        Self {
            parameters,
            arguments,
        }
    }

    #[must_use]
    pub const fn parameters(&self) -> &'a [ParameterModel] {
        self.parameters
    }

    #[must_use]
    pub const fn arguments(&self) -> &'a [Argument] {
        self.arguments
    }

    /// Page request argument, or `Unpaged` when none was supplied.
    #[must_use]
    pub fn page_request(&self) -> PageRequest {
        match self.special(ParameterRole::PageRequest) {
            Some(Argument::Page(request)) => *request,
            _ => PageRequest::Unpaged,
        }
    }

    /// Caller-supplied projection overriding the method's declared shape.
    #[must_use]
    pub fn dynamic_projection(&self) -> Option<&'a ResultShape> {
        match self.special(ParameterRole::DynamicProjection) {
            Some(Argument::Projection(shape)) => Some(shape),
            _ => None,
        }
    }

    /// Bindable parameters with their arguments, in declaration order.
    pub fn bindable(&self) -> impl Iterator<Item = (&'a ParameterModel, &'a Argument)> {
        self.parameters
            .iter()
            .zip(self.arguments)
            .filter(|(param, _)| param.is_bindable())
    }

    fn special(&self, role: ParameterRole) -> Option<&'a Argument> {
        self.parameters
            .iter()
            .zip(self.arguments)
            .find_map(|(param, arg)| (param.role() == role && !arg.is_null()).then_some(arg))
    }
}
