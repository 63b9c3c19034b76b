//! Module: template
//! Responsibility: orchestrate one repository-method invocation.
//! Does not own: query text (query source), execution (strategies), or
//! shaping (result processor).
//!
//! Pipeline: resolve strategy, build, decorate, bind, execute, normalize.
//! Build/decorate/bind run inside the strategy through `QueryFactory`, so a
//! strategy that never needs a query never builds one.


use crate::{
    config::ExecutorConfig,
    db::{
        binder::{BindingError, ParameterBinder},
        decorate::QueryDecorator,
        executor::{
            ExecutionContext, ExecutionStrategy, QueryFactory,
            trace::{QueryTraceSink, TracePhase, TraceScope, start_query_trace},
            window::compute_page_window,
        },
        normalize::convert_tuple,
        parameter::{Argument, ParameterAccessor},
        ports::{Ports, QuerySource},
        query::PreparedQuery,
        response::QueryResult,
    },
    error::QueryError,
    model::{MethodDescriptor, ParameterRole},
    obs::sink::{self, MetricsEvent, Span},
    value::Value,
};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

///
/// QueryTemplate
///
/// Executes one repository method. Holds only shared, read-only state, so a
/// single template serves concurrent invocations.
///

pub struct QueryTemplate<S: QuerySource> {
    method: Arc<MethodDescriptor>,
    strategy: ExecutionStrategy,
    source: S,
    ports: Ports,
    config: ExecutorConfig,
    trace: Option<&'static dyn QueryTraceSink>,
}

impl<S: QuerySource> QueryTemplate<S> {
    #[must_use]
    pub fn new(method: Arc<MethodDescriptor>, source: S, ports: Ports) -> Self {
        let strategy = ExecutionStrategy::resolve(&method);

        Self {
            method,
            strategy,
            source,
            ports,
            config: ExecutorConfig::default(),
            trace: None,
        }
    }

    #[must_use]
    pub const fn with_config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn with_trace(mut self, trace: &'static dyn QueryTraceSink) -> Self {
        self.trace = Some(trace);
        self
    }

    #[must_use]
    pub fn method(&self) -> &MethodDescriptor {
        &self.method
    }

    /// Strategy every invocation of this method runs.
    #[must_use]
    pub const fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    #[must_use]
    pub const fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Run the method with `args` and return the normalized result.
    pub fn execute(&self, args: &[Argument]) -> Result<QueryResult<Value>, QueryError> {
        let started = Instant::now();
        let trace = start_query_trace(self.trace, &self.method, self.strategy);
        let mut span = Span::new(self.strategy, self.method.name_arc());

        let result = self.execute_inner(args, trace.as_ref());

        match &result {
            Ok(out) => {
                let rows = out.row_count();
                span.set_rows(rows);
                if let Some(trace) = trace {
                    trace.finish(rows);
                }
            }
            Err(err) => {
                sink::record(MetricsEvent::ExecError {
                    method: self.method.name_arc(),
                    class: err.class(),
                });
                if let Some(trace) = trace {
                    trace.error(err);
                }
            }
        }
        drop(span);

        self.log_invocation(started.elapsed(), &result);

        result
    }

    fn execute_inner(
        &self,
        args: &[Argument],
        trace: Option<&TraceScope>,
    ) -> Result<QueryResult<Value>, QueryError> {
        self.strategy.ensure_supported(&self.method)?;

        let accessor = ParameterAccessor::new(self.method.parameters(), args);
        self.check_page_size(&accessor)?;

        let ctx = ExecutionContext::new(&self.method, &self.ports, self, accessor).with_trace(trace);
        let raw = self.strategy.run(&ctx)?;
        if let Some(trace) = trace {
            trace.phase(TracePhase::Execute, raw.row_count());
        }

        // A caller-supplied projection wins over the declared shape.
        let shape = accessor
            .dynamic_projection()
            .unwrap_or_else(|| self.method.result_shape());
        let out = self.ports.processor().process(raw, convert_tuple, shape)?;
        if let Some(trace) = trace {
            trace.phase(TracePhase::Normalize, out.row_count());
        }

        Ok(out)
    }

    fn check_page_size(&self, args: &ParameterAccessor<'_>) -> Result<(), BindingError> {
        let Some(max) = self.config.max_page_size else {
            return Ok(());
        };

        match args.page_request().page_size() {
            Some(size) if size > max => Err(BindingError::PageSizeExceeded { size, max }),
            _ => Ok(()),
        }
    }

    fn decorator(&self) -> QueryDecorator<'_> {
        QueryDecorator::new(&self.method, self.ports.graphs())
    }

    fn log_invocation(&self, elapsed: Duration, result: &Result<QueryResult<Value>, QueryError>) {
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

        if self.config.debug {
            match result {
                Ok(out) => tracing::debug!(
                    method = self.method.name(),
                    entity = self.method.entity(),
                    strategy = %self.strategy,
                    result = out.label(),
                    rows = out.row_count(),
                    elapsed_ms,
                    "repository query executed"
                ),
                Err(err) => tracing::debug!(
                    method = self.method.name(),
                    strategy = %self.strategy,
                    error = %err.display_with_class(),
                    elapsed_ms,
                    "repository query failed"
                ),
            }
        }

        if let Some(threshold) = self.config.slow_query_threshold_ms
            && elapsed_ms >= threshold
        {
            tracing::warn!(
                target: "repoquery::slow_query",
                elapsed_ms,
                threshold_ms = threshold,
                method = self.method.name(),
                strategy = %self.strategy,
                "slow repository query"
            );
        }
    }
}

impl<S: QuerySource> QueryFactory for QueryTemplate<S> {
    /// Build, decorate and bind the main query. Paged requests also set the
    /// result window; slice execution widens it by one row afterwards.
    fn create_query(&self, args: &ParameterAccessor<'_>) -> Result<PreparedQuery, QueryError> {
        let query = self.source.build_query(&self.method, args)?;
        let mut query = self.decorator().decorate(query)?;

        let binder = ParameterBinder::new(args.parameters(), args.arguments())?;
        binder.bind(&mut query);

        if self.method.has_parameter_role(ParameterRole::PageRequest)
            && let Some(window) = compute_page_window(args.page_request(), false)
        {
            window.apply(&mut query);
        }

        if self.config.debug {
            let hints: Vec<&str> = query.hints().names().collect();
            tracing::debug!(
                method = self.method.name(),
                ?hints,
                lock_mode = ?query.lock_mode(),
                first_result = query.first_result(),
                max_results = ?query.max_results(),
                "query prepared"
            );
        }

        Ok(query)
    }

    /// Build, decorate and bind the count query. Count queries never carry a
    /// result window or lock mode.
    fn create_count_query(
        &self,
        args: &ParameterAccessor<'_>,
    ) -> Result<PreparedQuery, QueryError> {
        let query = self.source.build_count_query(&self.method, args)?;
        let mut query = self.decorator().decorate_count(query);

        let binder = ParameterBinder::new(args.parameters(), args.arguments())?;
        binder.bind(&mut query);

        Ok(query)
    }
}
