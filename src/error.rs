//! Error taxonomy for descriptor building, event dispatch and lifecycle
//!
//! Cancellation is deliberately absent from the surfaced errors: a canceled
//! hook is reported as [`HookError::Canceled`] to the controller, which
//! discards it without notifying anyone.

use thiserror::Error;

/// A child value could not be classified while configuring a descriptor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("unsupported content kind `{type_name}`")]
    UnsupportedContentKind { type_name: &'static str },
}

/// Emission aborted. The builder may hold a partial pass.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmitError {
    #[error("unsupported content kind `{type_name}` at sequence {sequence}")]
    UnsupportedContentKind {
        type_name: &'static str,
        sequence: u32,
    },
}

/// A typed handler was invoked with the wrong payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("event `{event}` expected payload `{expected}`")]
    InvalidEventPayload {
        event: String,
        expected: &'static str,
    },
}

/// Outcome of a failed or canceled lifecycle hook
#[derive(Debug, Error)]
pub enum HookError {
    /// Cooperative cancellation, never surfaced
    #[error("hook canceled")]
    Canceled,
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl HookError {
    pub fn is_canceled(&self) -> bool {
        matches!(self, HookError::Canceled)
    }
}

/// Non-cancellation failure raised out of a lifecycle phase
#[derive(Debug, Error)]
pub enum LifecycleFault {
    #[error("initialization of `{component}` failed: {source}")]
    Initialization {
        component: &'static str,
        #[source]
        source: anyhow::Error,
    },
    #[error("parameter update of `{component}` failed: {source}")]
    ParametersSet {
        component: &'static str,
        #[source]
        source: anyhow::Error,
    },
}
