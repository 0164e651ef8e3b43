//! The element being resized.

use crate::error::ResizeResult;
use crate::geometry::{Cursor, GeometryPatch};
use kurbo::Rect;

/// Host-owned rectangle the controller reads and writes.
///
/// Writes may fail (for example on a detached DOM element); the error is
/// surfaced to the host, never retried.
pub trait ResizeTarget {
    /// Live bounding box in viewport coordinates.
    fn bounding_box(&self) -> Rect;

    /// Write the set fields of `patch` as pixel lengths.
    fn apply_geometry(&mut self, patch: &GeometryPatch) -> ResizeResult<()>;

    /// Write the cursor affordance.
    fn set_cursor(&mut self, cursor: Cursor) -> ResizeResult<()>;
}
