use crate::{
    db::{
        parameter::ParameterAccessor,
        ports::QuerySource,
        query::{PreparedQuery, QueryKind},
    },
    error::QueryError,
    model::MethodDescriptor,
};

///
/// StatementSource
///
/// Query source for a method with a declared statement. The count statement
/// is either declared too or derived by wrapping the main statement in a
/// `count(*)` sub-select; the statement text itself is never parsed.
///

#[derive(Clone, Debug)]
pub struct StatementSource {
    statement: String,
    count_statement: Option<String>,
}

impl StatementSource {
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            count_statement: None,
        }
    }

    #[must_use]
    pub fn with_count(mut self, count_statement: impl Into<String>) -> Self {
        self.count_statement = Some(count_statement.into());
        self
    }

    #[must_use]
    pub fn statement(&self) -> &str {
        &self.statement
    }

    #[must_use]
    pub fn count_statement(&self) -> String {
        self.count_statement
            .clone()
            .unwrap_or_else(|| format!("select count(*) from ({}) __count", self.statement))
    }

    const fn kind_for(method: &MethodDescriptor) -> QueryKind {
        if method.is_procedure_query() {
            QueryKind::Procedure
        } else if method.is_modifying_query() {
            QueryKind::Modify
        } else {
            QueryKind::Select
        }
    }
}

impl QuerySource for StatementSource {
    fn build_query(
        &self,
        method: &MethodDescriptor,
        _args: &ParameterAccessor<'_>,
    ) -> Result<PreparedQuery, QueryError> {
        Ok(PreparedQuery::new(Self::kind_for(method), self.statement.clone()))
    }

    fn build_count_query(
        &self,
        _method: &MethodDescriptor,
        _args: &ParameterAccessor<'_>,
    ) -> Result<PreparedQuery, QueryError> {
        Ok(PreparedQuery::count(self.count_statement()))
    }
}
