use crate::{
    db::{
        executor::ExecutionContext,
        ports::ProcedureOutput,
        response::{QueryResult, Row},
    },
    error::QueryError,
    value::{Record, Value},
};

pub(super) fn execute(ctx: &ExecutionContext<'_>) -> Result<QueryResult<Row>, QueryError> {
    let query = ctx.queries.create_query(&ctx.args)?;
    let output = ctx.ports.engine().call_procedure(&query)?;

    Ok(shape_output(ctx.method.procedure_outputs(), output))
}

/// Shape a procedure's raw output by the number of declared outputs:
/// none yields the result rows, one yields that output's value, several
/// yield a record of all of them.
fn shape_output(declared: &[String], output: ProcedureOutput) -> QueryResult<Row> {
    let ProcedureOutput { mut outputs, rows } = output;

    match declared {
        [] => QueryResult::Collection(rows),
        [name] => QueryResult::Single(outputs.remove(name).map(Row::Value)),
        names => {
            let record: Record = names
                .iter()
                .map(|name| (name.as_str(), outputs.remove(name).unwrap_or_default()))
                .collect();

            QueryResult::Single(Some(Row::Value(Value::Record(record))))
        }
    }
}
