use crate::value::Value;

///
/// Row
///
/// One engine-native result row: a plain value (entity record or scalar) or
/// a composite tuple with aliased fields.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Row {
    Value(Value),
    Tuple(Tuple),
}

impl Row {
    #[must_use]
    pub const fn is_tuple(&self) -> bool {
        matches!(self, Self::Tuple(_))
    }
}

impl From<Value> for Row {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Tuple> for Row {
    fn from(tuple: Tuple) -> Self {
        Self::Tuple(tuple)
    }
}

///
/// TupleElement
///

#[derive(Clone, Debug, PartialEq)]
pub struct TupleElement {
    pub alias: Option<String>,
    pub value: Value,
}

///
/// Tuple
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tuple {
    elements: Vec<TupleElement>,
}

impl Tuple {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Append an aliased element.
    #[must_use]
    pub fn with(mut self, alias: impl Into<String>, value: impl Into<Value>) -> Self {
        self.elements.push(TupleElement {
            alias: Some(alias.into()),
            value: value.into(),
        });
        self
    }

    /// Append an element the engine returned without an alias.
    #[must_use]
    pub fn with_unaliased(mut self, value: impl Into<Value>) -> Self {
        self.elements.push(TupleElement {
            alias: None,
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn elements(&self) -> &[TupleElement] {
        &self.elements
    }

    #[must_use]
    pub fn into_elements(self) -> Vec<TupleElement> {
        self.elements
    }
}

impl FromIterator<TupleElement> for Tuple {
    fn from_iter<I: IntoIterator<Item = TupleElement>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}
