//! Executor query tracing boundary.
//!
//! Tracing is optional, injected by the caller, and must not affect execution semantics.

use crate::{
    db::executor::ExecutionStrategy,
    error::{ErrorClass, ErrorOrigin, QueryError},
    model::MethodDescriptor,
};
use sha2::{Digest, Sha256};
use std::fmt::{self, Write as _};

///
/// QueryTraceSink
///

pub trait QueryTraceSink: Send + Sync {
    fn on_event(&self, event: QueryTraceEvent);
}

///
/// QueryFingerprint
///
/// Stable SHA-256 identity of (method, entity, strategy). Identical across
/// invocations and processes for the same method.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct QueryFingerprint([u8; 32]);

impl QueryFingerprint {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn as_hex(&self) -> String {
        let mut out = String::with_capacity(64);
        for byte in self.0 {
            let _ = write!(out, "{byte:02x}");
        }
        out
    }
}

impl fmt::Display for QueryFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hex())
    }
}

///
/// TracePhase
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TracePhase {
    Execute,
    Count,
    Normalize,
}

///
/// QueryTraceEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QueryTraceEvent {
    Start {
        fingerprint: QueryFingerprint,
        strategy: ExecutionStrategy,
    },
    Phase {
        fingerprint: QueryFingerprint,
        strategy: ExecutionStrategy,
        phase: TracePhase,
        rows: u64,
    },
    Finish {
        fingerprint: QueryFingerprint,
        strategy: ExecutionStrategy,
        rows: u64,
    },
    Error {
        fingerprint: QueryFingerprint,
        strategy: ExecutionStrategy,
        class: ErrorClass,
        origin: ErrorOrigin,
    },
}

///
/// TraceScope
///

pub struct TraceScope {
    sink: &'static dyn QueryTraceSink,
    fingerprint: QueryFingerprint,
    strategy: ExecutionStrategy,
}

impl TraceScope {
    fn new(
        sink: &'static dyn QueryTraceSink,
        fingerprint: QueryFingerprint,
        strategy: ExecutionStrategy,
    ) -> Self {
        sink.on_event(QueryTraceEvent::Start {
            fingerprint,
            strategy,
        });
        Self {
            sink,
            fingerprint,
            strategy,
        }
    }

    #[must_use]
    pub const fn fingerprint(&self) -> QueryFingerprint {
        self.fingerprint
    }

    pub(crate) fn finish(self, rows: u64) {
        self.sink.on_event(QueryTraceEvent::Finish {
            fingerprint: self.fingerprint,
            strategy: self.strategy,
            rows,
        });
    }

    pub(crate) fn phase(&self, phase: TracePhase, rows: u64) {
        self.sink.on_event(QueryTraceEvent::Phase {
            fingerprint: self.fingerprint,
            strategy: self.strategy,
            phase,
            rows,
        });
    }

    pub(crate) fn error(self, err: &QueryError) {
        self.sink.on_event(QueryTraceEvent::Error {
            fingerprint: self.fingerprint,
            strategy: self.strategy,
            class: err.class(),
            origin: err.origin(),
        });
    }
}

pub fn start_query_trace(
    sink: Option<&'static dyn QueryTraceSink>,
    method: &MethodDescriptor,
    strategy: ExecutionStrategy,
) -> Option<TraceScope> {
    let sink = sink?;
    let fingerprint = query_fingerprint(method, strategy);
    Some(TraceScope::new(sink, fingerprint, strategy))
}

#[must_use]
pub fn query_fingerprint(method: &MethodDescriptor, strategy: ExecutionStrategy) -> QueryFingerprint {
    let mut hasher = Sha256::new();
    hasher.update(b"queryfp:v1");
    hasher.update([strategy_tag(strategy)]);
    write_str(&mut hasher, method.name());
    write_str(&mut hasher, method.entity());
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    QueryFingerprint(out)
}

const fn strategy_tag(strategy: ExecutionStrategy) -> u8 {
    match strategy {
        ExecutionStrategy::Stream => 0x01,
        ExecutionStrategy::Procedure => 0x02,
        ExecutionStrategy::Collection => 0x03,
        ExecutionStrategy::Sliced => 0x04,
        ExecutionStrategy::Paged => 0x05,
        ExecutionStrategy::Modifying => 0x06,
        ExecutionStrategy::SingleEntity => 0x07,
    }
}

fn write_str(hasher: &mut Sha256, value: &str) {
    let len = u32::try_from(value.len()).unwrap_or(u32::MAX);
    hasher.update(len.to_be_bytes());
    hasher.update(value.as_bytes());
}
