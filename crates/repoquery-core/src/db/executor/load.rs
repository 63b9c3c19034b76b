//! Read strategies: single entity, collection, slice and page.

use crate::{
    db::{
        executor::{
            ExecutionContext,
            trace::TracePhase,
            window::{compute_page_window, derive_total},
        },
        response::{Page, QueryResult, Row, Slice},
    },
    error::QueryError,
    obs::sink::{self, MetricsEvent},
};

pub(super) fn execute_single(ctx: &ExecutionContext<'_>) -> Result<QueryResult<Row>, QueryError> {
    let query = ctx.queries.create_query(&ctx.args)?;
    let row = ctx.ports.engine().fetch_single(&query)?;

    Ok(QueryResult::Single(row))
}

pub(super) fn execute_collection(
    ctx: &ExecutionContext<'_>,
) -> Result<QueryResult<Row>, QueryError> {
    let query = ctx.queries.create_query(&ctx.args)?;
    let rows = ctx.ports.engine().fetch(&query)?;

    Ok(QueryResult::Collection(rows))
}

// Fetch one row past the page to learn whether another page follows; no
// count query is ever issued.
pub(super) fn execute_sliced(ctx: &ExecutionContext<'_>) -> Result<QueryResult<Row>, QueryError> {
    let request = ctx.args.page_request();
    let mut query = ctx.queries.create_query(&ctx.args)?;

    let Some(window) = compute_page_window(request, true) else {
        let rows = ctx.ports.engine().fetch(&query)?;
        return Ok(QueryResult::Slice(Slice::new(rows, request, false)));
    };

    window.apply(&mut query);
    let mut rows = ctx.ports.engine().fetch(&query)?;
    let has_next = rows.len() > window.keep_count;
    rows.truncate(window.keep_count);

    Ok(QueryResult::Slice(Slice::new(rows, request, has_next)))
}

pub(super) fn execute_paged(ctx: &ExecutionContext<'_>) -> Result<QueryResult<Row>, QueryError> {
    let request = ctx.args.page_request();
    let query = ctx.queries.create_query(&ctx.args)?;
    let rows = ctx.ports.engine().fetch(&query)?;

    let total = if let Some(total) = derive_total(request, rows.len()) {
        sink::record(MetricsEvent::CountQuery {
            method: ctx.method.name_arc(),
            executed: false,
        });
        total
    } else {
        let count_query = ctx.queries.create_count_query(&ctx.args)?;
        let total = ctx.ports.engine().count(&count_query)?;
        sink::record(MetricsEvent::CountQuery {
            method: ctx.method.name_arc(),
            executed: true,
        });
        if let Some(trace) = ctx.trace {
            trace.phase(TracePhase::Count, total);
        }
        total
    };

    Ok(QueryResult::Page(Page::new(rows, request, total)))
}
