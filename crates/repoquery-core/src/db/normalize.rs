//! Module: normalize
//! Responsibility: flatten composite rows into records and apply the
//! resolved result shape.
//! Does not own: result cardinality (fixed by the executor).


use crate::{
    db::{
        ports::ResultProcessor,
        response::{QueryResult, Row},
    },
    error::QueryError,
    model::ResultShape,
    value::{Record, Value, ValueKind},
};
use thiserror::Error as ThisError;

///
/// ProjectionError
///
/// Result rows that cannot be given the requested shape. Always a
/// configuration problem of the query or projection, never bad data.
///

#[remain::sorted]
#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum ProjectionError {
    #[error("tuple element {index} has no alias; make sure the query defines aliases")]
    MissingAlias { index: usize },

    #[error("projection field '{field}' is missing from the result row")]
    MissingField { field: String },

    #[error("{shape} projection requires record rows, found {found}")]
    NotARecord {
        shape: &'static str,
        found: ValueKind,
    },

    #[error("tuple alias '{alias}' is numeric; make sure the query defines aliases")]
    NumericAlias { alias: String },
}

/// Converter applied to every raw row before shaping.
pub type TupleConverter = fn(Row) -> Result<Value, ProjectionError>;

/// Flatten a tuple into an alias-keyed record; other rows pass through.
pub fn convert_tuple(row: Row) -> Result<Value, ProjectionError> {
    let tuple = match row {
        Row::Value(value) => return Ok(value),
        Row::Tuple(tuple) => tuple,
    };

    let elements = tuple.into_elements();
    let mut record = Record::with_capacity(elements.len());

    for (index, element) in elements.into_iter().enumerate() {
        let Some(alias) = element.alias else {
            return Err(ProjectionError::MissingAlias { index });
        };
        if is_index_alias(&alias) {
            return Err(ProjectionError::NumericAlias { alias });
        }

        record.insert(alias, element.value);
    }

    Ok(Value::Record(record))
}

// Engines fall back to positional aliases ("0", "1", ...) when none are
// declared; those are rejected as ambiguous.
fn is_index_alias(alias: &str) -> bool {
    alias.parse::<i32>().is_ok()
}

/// Apply `shape` to one converted row.
pub fn apply_shape(shape: &ResultShape, value: Value) -> Result<Value, ProjectionError> {
    match shape {
        ResultShape::Entity => Ok(value),
        ResultShape::RawMap => match value {
            Value::Record(_) => Ok(value),
            other => Err(not_a_record(shape, &other)),
        },
        ResultShape::Interface(fields) => {
            let record = expect_record(shape, value)?;

            Ok(Value::Record(
                fields
                    .iter()
                    .map(|field| (field.as_str(), record.get(field).cloned().unwrap_or_default()))
                    .collect(),
            ))
        }
        ResultShape::Dto(fields) => {
            let record = expect_record(shape, value)?;
            let mut out = Record::with_capacity(fields.len());

            for field in fields {
                let value = record
                    .get(field)
                    .cloned()
                    .ok_or_else(|| ProjectionError::MissingField {
                        field: field.clone(),
                    })?;
                out.insert(field.as_str(), value);
            }

            Ok(Value::Record(out))
        }
    }
}

fn expect_record(shape: &ResultShape, value: Value) -> Result<Record, ProjectionError> {
    match value {
        Value::Record(record) => Ok(record),
        other => Err(not_a_record(shape, &other)),
    }
}

fn not_a_record(shape: &ResultShape, value: &Value) -> ProjectionError {
    ProjectionError::NotARecord {
        shape: shape.label(),
        found: value.kind(),
    }
}

/// Convert and shape every row of a raw result.
pub fn normalize(
    raw: QueryResult<Row>,
    converter: TupleConverter,
    shape: &ResultShape,
) -> Result<QueryResult<Value>, ProjectionError> {
    raw.try_map(|row| apply_shape(shape, converter(row)?))
}

///
/// ShapeProcessor
///
/// Default result processor: tuple conversion followed by `ResultShape`
/// application.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct ShapeProcessor;

impl ResultProcessor for ShapeProcessor {
    fn process(
        &self,
        raw: QueryResult<Row>,
        converter: TupleConverter,
        shape: &ResultShape,
    ) -> Result<QueryResult<Value>, QueryError> {
        Ok(normalize(raw, converter, shape)?)
    }
}
