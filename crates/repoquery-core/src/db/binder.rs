//! Module: binder
//! Responsibility: validate runtime arguments against a parameter schema and
//! bind them into a prepared query.
//! Does not own: page windows or projections (consumed by the executor).

#[cfg(test)]
mod tests;

use crate::{
    db::{parameter::Argument, query::PreparedQuery},
    model::{ParameterModel, ParameterRole, ParameterType},
    value::{Value, ValueKind},
};
use thiserror::Error as ThisError;

///
/// BindingError
///

#[remain::sorted]
#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum BindingError {
    #[error("parameter {position} expects a {expected} argument, found {found}")]
    ArgumentMismatch {
        position: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("expected {expected} arguments, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("required parameter '{name}' has no value")]
    MissingNamed { name: String },

    #[error("page size {size} exceeds the configured maximum of {max}")]
    PageSizeExceeded { size: u32, max: u32 },

    #[error("parameter {position} expects {expected}, found {found}")]
    TypeMismatch {
        position: usize,
        expected: ValueKind,
        found: ValueKind,
    },
}

///
/// BindTarget
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum BindTarget<'a> {
    Named(&'a str),
    Position(usize),
}

///
/// ParameterBinder
///
/// Validated set of bindings for one invocation. Named parameters bind by
/// name; unnamed ones bind by 1-based position counted over unnamed bindable
/// parameters only, so neither named nor special parameters take a slot.
///

#[derive(Debug)]
pub struct ParameterBinder<'a> {
    bindings: Vec<(BindTarget<'a>, &'a Value)>,
}

impl<'a> ParameterBinder<'a> {
    /// Validate `arguments` against `parameters`.
    pub fn new(
        parameters: &'a [ParameterModel],
        arguments: &'a [Argument],
    ) -> Result<Self, BindingError> {
        if parameters.len() != arguments.len() {
            return Err(BindingError::ArityMismatch {
                expected: parameters.len(),
                found: arguments.len(),
            });
        }

        let mut bindings = Vec::new();
        let mut position = 0;

        for (index, (param, arg)) in parameters.iter().zip(arguments).enumerate() {
            let declared = index + 1;

            if !param.is_bindable() {
                check_special(param, arg, declared)?;
                continue;
            }
            let Argument::Value(value) = arg else {
                return Err(BindingError::ArgumentMismatch {
                    position: declared,
                    expected: "value",
                    found: arg.label(),
                });
            };

            check_value(param, value, declared)?;

            let target = match param.name() {
                Some(name) => BindTarget::Named(name),
                None => {
                    position += 1;
                    BindTarget::Position(position)
                }
            };
            bindings.push((target, value));
        }

        Ok(Self { bindings })
    }

    /// Apply every binding to `query`.
    pub fn bind(&self, query: &mut PreparedQuery) {
        for (target, value) in &self.bindings {
            match target {
                BindTarget::Named(name) => query.set_named_parameter(*name, (*value).clone()),
                BindTarget::Position(position) => {
                    query.set_positional_parameter(*position, (*value).clone());
                }
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// Special slots accept their own argument variant or Null.
fn check_special(
    param: &ParameterModel,
    arg: &Argument,
    declared: usize,
) -> Result<(), BindingError> {
    let ok = match param.role() {
        ParameterRole::Bindable => return Ok(()),
        ParameterRole::PageRequest => {
            matches!(arg, Argument::Page(_) | Argument::Value(Value::Null))
        }
        ParameterRole::DynamicProjection => {
            matches!(arg, Argument::Projection(_) | Argument::Value(Value::Null))
        }
    };

    if ok {
        Ok(())
    } else {
        Err(BindingError::ArgumentMismatch {
            position: declared,
            expected: match param.role() {
                ParameterRole::PageRequest => "page request",
                _ => "projection",
            },
            found: arg.label(),
        })
    }
}

fn check_value(param: &ParameterModel, value: &Value, declared: usize) -> Result<(), BindingError> {
    if value.is_null() {
        return match param.name() {
            Some(name) if param.is_required() => Err(BindingError::MissingNamed {
                name: name.to_string(),
            }),
            _ => Ok(()),
        };
    }

    match param.ty() {
        ParameterType::Kind(expected) if !param.ty().accepts(value) => {
            Err(BindingError::TypeMismatch {
                position: declared,
                expected,
                found: value.kind(),
            })
        }
        _ => Ok(()),
    }
}
