//! Global pointer notifications and per-frame scheduling.
//!
//! The environment is single-threaded: callbacks are `Rc`/`Box` closures
//! invoked from the host's event-dispatch thread, never concurrently.

use crate::error::ResizeResult;
use crate::pointer::{PointerEvent, PointerEventKind};
use std::rc::Rc;

/// Handler for one kind of pointer notification.
pub type PointerCallback = Rc<dyn Fn(PointerEvent)>;

/// One-shot callback run on the next display frame.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Registration handle returned by [`Environment::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u32);

/// Pending-frame handle returned by [`Environment::request_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub i32);

/// Host environment the controller attaches to.
///
/// Subscriptions are global (window scope), so a drag keeps tracking the
/// pointer after it leaves the element.
pub trait Environment {
    /// Register `callback` for every notification of `kind`.
    fn subscribe(&self, kind: PointerEventKind, callback: PointerCallback) -> ResizeResult<ListenerId>;

    /// Remove a registration. Unknown ids are ignored.
    fn unsubscribe(&self, id: ListenerId);

    /// Run `callback` once on the next display frame.
    fn request_frame(&self, callback: FrameCallback) -> ResizeResult<FrameId>;

    /// Cancel a pending frame. Already-fired or unknown ids are ignored.
    fn cancel_frame(&self, id: FrameId);
}
