//! Injectable tracing for the dynamic value codec.
//!
//! The codec itself never logs. Callers that want to see what flows through
//! [`decode::value_with`](crate::decode::value_with) or
//! [`encode::value_with`](crate::encode::value_with) pass a [`TraceHook`] in
//! [`ValueOptions`](crate::ValueOptions).

use std::sync::Arc;

use crate::value::DynamicValue;

/// One step of the dynamic codec.
#[derive(Debug, Clone, Copy)]
pub enum TraceEvent<'a> {
    /// A value has been fully decoded. Containers are reported after their
    /// children. `offset` is where the value started.
    Decoded {
        value: &'a DynamicValue,
        depth: usize,
        offset: usize,
    },
    /// A value is about to be encoded. Containers are reported before their
    /// children.
    Encoding { value: &'a DynamicValue, depth: usize },
}

impl TraceEvent<'_> {
    pub fn value(&self) -> &DynamicValue {
        match self {
            TraceEvent::Decoded { value, .. } | TraceEvent::Encoding { value, .. } => value,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            TraceEvent::Decoded { depth, .. } | TraceEvent::Encoding { depth, .. } => *depth,
        }
    }
}

pub type TraceHook = Arc<dyn Fn(TraceEvent<'_>) + Send + Sync>;

/// A hook that forwards every event to `tracing` at TRACE level.
pub fn tracing_hook() -> TraceHook {
    Arc::new(|event: TraceEvent<'_>| match event {
        TraceEvent::Decoded {
            value,
            depth,
            offset,
        } => {
            tracing::trace!(depth, offset, tag = %value.tag(), ?value, "decoded value");
        }
        TraceEvent::Encoding { value, depth } => {
            tracing::trace!(depth, tag = %value.tag(), ?value, "encoding value");
        }
    })
}
