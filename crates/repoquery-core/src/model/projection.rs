///
/// ResultShape
///
/// Target shape for one invocation's results.
/// Either declared on the method or supplied at call time as a dynamic
/// projection argument; resolved once per call.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ResultShape {
    /// Rows are returned as the engine produced them.
    #[default]
    Entity,

    /// Narrowed read-only view; fields the row lacks read as `Null`.
    Interface(Vec<String>),

    /// Constructor-style projection; every listed field must be present.
    Dto(Vec<String>),

    /// Plain string-keyed record; scalar rows are rejected.
    RawMap,
}

impl ResultShape {
    pub fn interface<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Interface(fields.into_iter().map(Into::into).collect())
    }

    pub fn dto<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Dto(fields.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Interface(_) => "interface",
            Self::Dto(_) => "dto",
            Self::RawMap => "raw_map",
        }
    }
}
