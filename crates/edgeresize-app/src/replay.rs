//! Replay a recorded pointer trace against a headless element.
//!
//! A trace is a JSON document:
//!
//! ```json
//! {
//!   "element": { "left": 200, "top": 100, "width": 100, "height": 100 },
//!   "options": { "margin": 5, "minWidth": 30 },
//!   "steps": [
//!     { "type": "move", "x": 300, "y": 150 },
//!     { "type": "frames", "count": 1 },
//!     { "type": "down", "x": 300, "y": 150 }
//!   ]
//! }
//! ```
//!
//! One [`Snapshot`] is recorded after every step.

use edgeresize_core::{
    Cursor, EdgeResizeController, HeadlessElement, HeadlessEnvironment, ResizeError, ResizeOptions,
    ResizeTarget,
};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read trace {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid trace: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Resize controller failed: {0}")]
    Resize(#[from] ResizeError),
}

/// Initial placement of the element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementPlacement {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementPlacement {
    pub fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.left + self.width, self.top + self.height)
    }
}

/// One recorded input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Step {
    Move { x: f64, y: f64 },
    Down { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    /// Let `count` display frames pass.
    Frames { count: usize },
}

/// A recorded pointer session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub element: ElementPlacement,
    #[serde(default)]
    pub options: ResizeOptions,
    pub steps: Vec<Step>,
}

/// Element state after a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub step: usize,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub cursor: Cursor,
    pub dragging: bool,
}

/// Read and parse a trace file.
pub fn load_trace(path: impl AsRef<Path>) -> Result<Trace, ReplayError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&json)?)
}

/// Hover onto the right edge of a 100x100 box, drag it out by 40px, release.
pub fn sample_trace() -> Trace {
    Trace {
        element: ElementPlacement {
            left: 200.0,
            top: 100.0,
            width: 100.0,
            height: 100.0,
        },
        options: ResizeOptions::default(),
        steps: vec![
            Step::Move { x: 300.0, y: 150.0 },
            Step::Frames { count: 1 },
            Step::Down { x: 300.0, y: 150.0 },
            Step::Move { x: 320.0, y: 150.0 },
            Step::Frames { count: 1 },
            Step::Move { x: 340.0, y: 150.0 },
            Step::Frames { count: 1 },
            Step::Up { x: 340.0, y: 150.0 },
            Step::Frames { count: 1 },
        ],
    }
}

/// Run `trace` through a fresh controller and record a snapshot per step.
pub fn replay(trace: &Trace) -> Result<Vec<Snapshot>, ReplayError> {
    let env = Rc::new(HeadlessEnvironment::new());
    let element = HeadlessElement::from_rect(trace.element.rect());
    let controller = EdgeResizeController::new(element.clone(), Rc::clone(&env), trace.options)?;

    let mut snapshots = Vec::with_capacity(trace.steps.len());
    for (index, step) in trace.steps.iter().enumerate() {
        match *step {
            Step::Move { x, y } => env.pointer_move(x, y),
            Step::Down { x, y } => env.pointer_down(x, y),
            Step::Up { x, y } => env.pointer_up(x, y),
            Step::Frames { count } => env.run_frames(count),
        }

        let bbox = element.bounding_box();
        let snapshot = Snapshot {
            step: index,
            left: bbox.x0,
            top: bbox.y0,
            width: element.width(),
            height: element.height(),
            cursor: element.cursor(),
            dragging: controller.is_dragging(),
        };
        log::debug!("Step {} {:?} -> {:?}", index, step, snapshot);
        snapshots.push(snapshot);
    }

    controller.destroy();
    log::info!("Replayed {} steps over {} frames", trace.steps.len(), env.frames_run());
    Ok(snapshots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_trace() {
        let snapshots = replay(&sample_trace()).unwrap();
        assert_eq!(snapshots.len(), 9);

        // Hover frame picked up the edge.
        assert_eq!(snapshots[1].cursor, Cursor::EwResize);
        assert!(snapshots[2].dragging);

        // 322.5 - 300 = 22.5, then 342.5 - 300 = 42.5, both against the frozen box.
        assert!((snapshots[4].width - 122.5).abs() < f64::EPSILON);
        assert!((snapshots[6].width - 142.5).abs() < f64::EPSILON);

        let last = snapshots.last().unwrap();
        assert!(!last.dragging);
        assert!((last.width - 142.5).abs() < f64::EPSILON);
        assert!((last.left - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_trace() {
        let json = r#"{
            "element": { "left": 0, "top": 0, "width": 100, "height": 80 },
            "options": { "margins": 8 },
            "steps": [
                { "type": "move", "x": 50, "y": 0 },
                { "type": "frames", "count": 2 },
                { "type": "down", "x": 50, "y": 0 },
                { "type": "move", "x": 50, "y": -20 },
                { "type": "frames", "count": 1 }
            ]
        }"#;
        let trace: Trace = serde_json::from_str(json).unwrap();
        assert_eq!(trace.options.margin, Some(8.0));
        assert_eq!(trace.steps[1], Step::Frames { count: 2 });

        let snapshots = replay(&trace).unwrap();
        let last = snapshots.last().unwrap();
        // (-20 + 4) - 0 = -16 -> height 96, top -16
        assert!((last.height - 96.0).abs() < f64::EPSILON);
        assert!((last.top + 16.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_options_default_when_missing() {
        let json = r#"{ "element": { "left": 0, "top": 0, "width": 10, "height": 10 }, "steps": [] }"#;
        let trace: Trace = serde_json::from_str(json).unwrap();
        assert_eq!(trace.options, ResizeOptions::default());
        assert!(replay(&trace).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_trace() {
        let err = serde_json::from_str::<Trace>(r#"{ "steps": [] }"#).unwrap_err();
        assert!(matches!(ReplayError::from(err), ReplayError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_trace("/nonexistent/trace.json").unwrap_err();
        assert!(matches!(err, ReplayError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/trace.json"));
    }
}
