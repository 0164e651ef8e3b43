//! Errors surfaced by the controller and its collaborators.

use crate::pointer::PointerEventKind;
use thiserror::Error;

/// Errors raised while attaching to the environment or writing to the target.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResizeError {
    #[error("Failed to subscribe to {kind} events: {reason}")]
    Subscribe {
        kind: PointerEventKind,
        reason: String,
    },
    #[error("Failed to schedule frame: {0}")]
    Schedule(String),
    #[error("Target element rejected write: {0}")]
    Target(String),
}

/// Result type for controller operations.
pub type ResizeResult<T> = Result<T, ResizeError>;
