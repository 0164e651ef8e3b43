//! Drag state and the per-frame resize step.

use crate::config::ResizeConfig;
use crate::error::ResizeResult;
use crate::geometry::{Cursor, GeometryPatch};
use crate::pointer::PointerEvent;
use crate::proximity::ProximityState;
use crate::target::ResizeTarget;

/// What one frame did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// No pointer event has been seen yet.
    Waiting,
    /// Idle frame: proximity refreshed and this cursor written.
    Hover(Cursor),
    /// Drag frame: these geometry writes were applied (possibly none).
    Resize(GeometryPatch),
}

/// Owns the target, the drag flag and the proximity snapshot.
///
/// The latest pointer is not stored here; the frame loop passes it into
/// [`ResizeEngine::step`] explicitly.
#[derive(Debug)]
pub struct ResizeEngine<T> {
    target: T,
    config: ResizeConfig,
    dragging: bool,
    /// Refreshed on idle frames only, frozen for the length of a drag.
    proximity: Option<ProximityState>,
}

impl<T: ResizeTarget> ResizeEngine<T> {
    /// Create an idle engine for `target`.
    pub fn new(target: T, config: ResizeConfig) -> Self {
        Self {
            target,
            config,
            dragging: false,
            proximity: None,
        }
    }

    pub fn config(&self) -> &ResizeConfig {
        &self.config
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Most recent proximity classification.
    pub fn proximity(&self) -> Option<&ProximityState> {
        self.proximity.as_ref()
    }

    /// Start a drag if the last classification allows it. The press position
    /// itself plays no part.
    pub fn on_pointer_down(&mut self, _event: PointerEvent) {
        if self.proximity.is_some_and(|p| p.can_resize) {
            if !self.dragging {
                log::debug!("Edge drag started");
            }
            self.dragging = true;
        }
    }

    /// End any drag.
    pub fn on_pointer_up(&mut self, _event: PointerEvent) {
        if self.dragging {
            log::debug!("Edge drag ended");
        }
        self.dragging = false;
    }

    /// Reclassify `pointer` against the target's live bounding box.
    pub fn refresh_proximity(&mut self, pointer: PointerEvent) -> &ProximityState {
        let bounding_box = self.target.bounding_box();
        self.proximity
            .insert(ProximityState::classify(bounding_box, pointer.position, self.config.margin))
    }

    /// Run one frame with the latest pointer event.
    pub fn step(&mut self, pointer: Option<PointerEvent>) -> ResizeResult<FrameOutcome> {
        let Some(pointer) = pointer else {
            return Ok(FrameOutcome::Waiting);
        };

        if self.dragging {
            if let Some(proximity) = self.proximity {
                let patch = proximity.resize_patch(pointer.position, &self.config);
                if !patch.is_empty() {
                    self.target.apply_geometry(&patch)?;
                }
                return Ok(FrameOutcome::Resize(patch));
            }
        }

        let cursor = self.refresh_proximity(pointer).cursor();
        self.target.set_cursor(cursor)?;
        Ok(FrameOutcome::Hover(cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResizeError;
    use crate::headless::HeadlessElement;

    fn engine() -> (ResizeEngine<HeadlessElement>, HeadlessElement) {
        // left=200 top=100 right=300 bottom=200
        let element = HeadlessElement::new(200.0, 100.0, 100.0, 100.0);
        (ResizeEngine::new(element.clone(), ResizeConfig::default()), element)
    }

    #[test]
    fn test_waits_for_first_pointer() {
        let (mut engine, element) = engine();
        assert_eq!(engine.step(None).unwrap(), FrameOutcome::Waiting);
        assert!(engine.proximity().is_none());
        assert_eq!(element.cursor_writes(), 0);
    }

    #[test]
    fn test_hover_writes_cursor() {
        let (mut engine, element) = engine();
        let outcome = engine.step(Some(PointerEvent::new(300.0, 150.0))).unwrap();
        assert_eq!(outcome, FrameOutcome::Hover(Cursor::EwResize));
        assert_eq!(element.cursor(), Cursor::EwResize);

        engine.step(Some(PointerEvent::new(250.0, 150.0))).unwrap();
        assert_eq!(element.cursor(), Cursor::Default);
    }

    #[test]
    fn test_press_off_edge_does_not_drag() {
        let (mut engine, element) = engine();
        engine.step(Some(PointerEvent::new(250.0, 150.0))).unwrap();
        engine.on_pointer_down(PointerEvent::new(250.0, 150.0));
        assert!(!engine.is_dragging());

        let outcome = engine.step(Some(PointerEvent::new(400.0, 150.0))).unwrap();
        assert!(matches!(outcome, FrameOutcome::Hover(_)));
        assert!((element.width() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_press_before_any_pointer_does_not_drag() {
        let (mut engine, _) = engine();
        engine.on_pointer_down(PointerEvent::new(300.0, 150.0));
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_press_uses_last_classification_not_press_position() {
        let (mut engine, _) = engine();
        engine.step(Some(PointerEvent::new(300.0, 150.0))).unwrap();
        // Press lands inside, but the frame already classified the edge.
        engine.on_pointer_down(PointerEvent::new(250.0, 150.0));
        assert!(engine.is_dragging());
    }

    #[test]
    fn test_right_edge_drag() {
        let (mut engine, element) = engine();
        engine.step(Some(PointerEvent::new(300.0, 150.0))).unwrap();
        engine.on_pointer_down(PointerEvent::new(300.0, 150.0));

        let outcome = engine.step(Some(PointerEvent::new(320.0, 150.0))).unwrap();
        assert_eq!(
            outcome,
            FrameOutcome::Resize(GeometryPatch {
                width: Some(122.5),
                ..GeometryPatch::default()
            })
        );
        assert!((element.width() - 122.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_drag_is_idempotent_for_fixed_pointer() {
        let (mut engine, element) = engine();
        engine.step(Some(PointerEvent::new(300.0, 150.0))).unwrap();
        engine.on_pointer_down(PointerEvent::new(300.0, 150.0));

        for _ in 0..10 {
            engine.step(Some(PointerEvent::new(320.0, 150.0))).unwrap();
        }
        assert!((element.width() - 122.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snapshot_frozen_during_drag() {
        let (mut engine, _) = engine();
        engine.step(Some(PointerEvent::new(300.0, 150.0))).unwrap();
        engine.on_pointer_down(PointerEvent::new(300.0, 150.0));
        let before = *engine.proximity().unwrap();

        engine.step(Some(PointerEvent::new(350.0, 150.0))).unwrap();
        engine.step(Some(PointerEvent::new(250.0, 150.0))).unwrap();
        assert_eq!(*engine.proximity().unwrap(), before);
    }

    #[test]
    fn test_release_always_stops_drag() {
        let (mut engine, _) = engine();
        engine.step(Some(PointerEvent::new(300.0, 150.0))).unwrap();
        engine.on_pointer_down(PointerEvent::new(300.0, 150.0));
        assert!(engine.is_dragging());

        engine.on_pointer_up(PointerEvent::new(900.0, 900.0));
        assert!(!engine.is_dragging());

        engine.on_pointer_up(PointerEvent::new(0.0, 0.0));
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_release_resumes_live_classification() {
        let (mut engine, _) = engine();
        engine.step(Some(PointerEvent::new(300.0, 150.0))).unwrap();
        engine.on_pointer_down(PointerEvent::new(300.0, 150.0));
        engine.step(Some(PointerEvent::new(320.0, 150.0))).unwrap();
        engine.on_pointer_up(PointerEvent::new(320.0, 150.0));

        // Box is now 200..322.5; the pointer at 320 is on the new right edge.
        let outcome = engine.step(Some(PointerEvent::new(320.0, 150.0))).unwrap();
        assert_eq!(outcome, FrameOutcome::Hover(Cursor::EwResize));
        let proximity = engine.proximity().unwrap();
        assert!((proximity.bounding_box.x1 - 322.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_detached_target_surfaces_error() {
        let (mut engine, element) = engine();
        element.detach();
        let err = engine.step(Some(PointerEvent::new(250.0, 150.0))).unwrap_err();
        assert!(matches!(err, ResizeError::Target(_)));
    }
}
