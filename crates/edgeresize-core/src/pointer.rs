//! Pointer events and the latest-pointer slot shared with the frame loop.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Snapshot of the pointer position in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub position: Point,
}

impl PointerEvent {
    /// Create a pointer event at the given viewport coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
        }
    }
}

impl From<Point> for PointerEvent {
    fn from(position: Point) -> Self {
        Self { position }
    }
}

/// The three global pointer notifications the controller listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerEventKind {
    Move,
    Down,
    Up,
}

impl PointerEventKind {
    pub const ALL: [PointerEventKind; 3] = [Self::Move, Self::Down, Self::Up];
}

impl fmt::Display for PointerEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Move => "pointer move",
            Self::Down => "pointer down",
            Self::Up => "pointer up",
        };
        f.write_str(name)
    }
}

/// Latest-wins mailbox between the move handler (writer) and the frame loop
/// (reader). Moves arriving between two frames coalesce into the last one.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct PointerSlot {
    latest: Rc<Cell<Option<PointerEvent>>>,
}

impl PointerSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer event, replacing any unread one.
    pub fn record(&self, event: PointerEvent) {
        self.latest.set(Some(event));
    }

    /// The most recent pointer event, if one was ever recorded.
    pub fn latest(&self) -> Option<PointerEvent> {
        self.latest.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_starts_empty() {
        assert_eq!(PointerSlot::new().latest(), None);
    }

    #[test]
    fn test_slot_latest_wins() {
        let slot = PointerSlot::new();
        slot.record(PointerEvent::new(1.0, 2.0));
        slot.record(PointerEvent::new(3.0, 4.0));
        assert_eq!(slot.latest(), Some(PointerEvent::new(3.0, 4.0)));
        // Reading does not consume.
        assert_eq!(slot.latest(), Some(PointerEvent::new(3.0, 4.0)));
    }

    #[test]
    fn test_slot_clones_share_state() {
        let writer = PointerSlot::new();
        let reader = writer.clone();
        writer.record(PointerEvent::new(10.0, 20.0));
        assert_eq!(reader.latest(), Some(PointerEvent::new(10.0, 20.0)));
    }
}
