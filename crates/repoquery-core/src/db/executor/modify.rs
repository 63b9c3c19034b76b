use crate::{
    db::{
        executor::ExecutionContext,
        response::{QueryResult, Row},
    },
    error::QueryError,
    obs::sink::{self, MetricsEvent},
};

// The context is cleared only once the update has succeeded.
pub(super) fn execute(ctx: &ExecutionContext<'_>) -> Result<QueryResult<Row>, QueryError> {
    let query = ctx.queries.create_query(&ctx.args)?;
    let affected = ctx.ports.engine().execute_update(&query)?;

    if ctx.method.clear_automatically() {
        ctx.ports.persistence().clear_pending_changes();
        sink::record(MetricsEvent::ContextCleared {
            method: ctx.method.name_arc(),
        });
    }

    Ok(QueryResult::Modified(affected))
}
