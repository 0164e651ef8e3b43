//! Edges, cursor affordances and geometry writes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of the element's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    /// Order in which a drag frame evaluates active edges.
    pub const RESIZE_ORDER: [Edge; 4] = [Edge::Right, Edge::Left, Edge::Top, Edge::Bottom];

    /// Whether dragging this edge changes the width (otherwise the height).
    pub fn is_horizontal_resize(self) -> bool {
        matches!(self, Edge::Left | Edge::Right)
    }
}

/// Cursor affordance written to the element while idle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cursor {
    #[default]
    Default,
    /// Pointer is on the left or right edge.
    EwResize,
    /// Pointer is on the top or bottom edge.
    NsResize,
}

impl Cursor {
    /// CSS `cursor` value.
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::EwResize => "ew-resize",
            Cursor::NsResize => "ns-resize",
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

/// A set of geometry writes produced by one drag frame.
///
/// Unset fields are left untouched on the target. Setting a field twice keeps
/// the last value, so later edges win over earlier ones within a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryPatch {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub left: Option<f64>,
    pub top: Option<f64>,
}

impl GeometryPatch {
    /// True if the patch writes nothing.
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.left.is_none() && self.top.is_none()
    }

    /// Style properties this patch writes, as `(css property, pixels)`.
    pub fn properties(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("width", self.width),
            ("height", self.height),
            ("left", self.left),
            ("top", self.top),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }
}

/// Format a pixel value the way a CSS length is written (`"122.5px"`, `"120px"`).
pub fn to_css_px(value: f64) -> String {
    format!("{}px", value)
}
