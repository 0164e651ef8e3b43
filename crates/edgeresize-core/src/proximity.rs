//! Edge proximity classification.
//!
//! A [`ProximityState`] is the only input to both the hover cursor and the
//! drag gate. While a drag is in progress the last state is kept frozen and
//! every resize delta is measured against its bounding box snapshot.

use crate::config::ResizeConfig;
use crate::geometry::{Cursor, Edge, GeometryPatch};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Which edges the pointer is on, and how far it is from each.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProximityState {
    pub on_top: bool,
    pub on_left: bool,
    pub on_right: bool,
    pub on_bottom: bool,
    pub distance_top: f64,
    pub distance_left: f64,
    pub distance_right: f64,
    pub distance_bottom: f64,
    /// Bounding box at classification time.
    pub bounding_box: Rect,
    pub can_resize: bool,
}

impl ProximityState {
    /// Classify `pointer` against `bounding_box`.
    ///
    /// Distances are measured to the infinite line through each edge, so a
    /// pointer level with an edge but far outside the box still counts.
    pub fn classify(bounding_box: Rect, pointer: Point, margin: f64) -> Self {
        let distance_left = (pointer.x - bounding_box.x0).abs();
        let distance_top = (pointer.y - bounding_box.y0).abs();
        let distance_right = (pointer.x - bounding_box.x1).abs();
        let distance_bottom = (pointer.y - bounding_box.y1).abs();

        let on_top = distance_top <= margin;
        let on_left = distance_left <= margin;
        let on_right = distance_right <= margin;
        let on_bottom = distance_bottom <= margin;

        Self {
            on_top,
            on_left,
            on_right,
            on_bottom,
            distance_top,
            distance_left,
            distance_right,
            distance_bottom,
            bounding_box,
            can_resize: on_top || on_left || on_right || on_bottom,
        }
    }

    /// Whether the pointer was on `edge`.
    pub fn is_on(&self, edge: Edge) -> bool {
        match edge {
            Edge::Top => self.on_top,
            Edge::Right => self.on_right,
            Edge::Bottom => self.on_bottom,
            Edge::Left => self.on_left,
        }
    }

    /// Active edges in the order a drag frame evaluates them.
    pub fn active_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        Edge::RESIZE_ORDER.into_iter().filter(|&edge| self.is_on(edge))
    }

    /// Hover affordance. Top/bottom is checked after left/right and wins at
    /// corners.
    pub fn cursor(&self) -> Cursor {
        let mut cursor = Cursor::Default;
        if self.on_left || self.on_right {
            cursor = Cursor::EwResize;
        }
        if self.on_top || self.on_bottom {
            cursor = Cursor::NsResize;
        }
        cursor
    }

    /// Geometry writes for a drag frame with the pointer at `pointer`.
    ///
    /// Deltas are relative to the frozen bounding box, not to the previous
    /// frame, so an unchanged pointer always yields the same patch.
    pub fn resize_patch(&self, pointer: Point, config: &ResizeConfig) -> GeometryPatch {
        let mut patch = GeometryPatch::default();
        for edge in self.active_edges() {
            self.apply_edge(edge, pointer, config, &mut patch);
        }
        patch
    }

    fn apply_edge(&self, edge: Edge, pointer: Point, config: &ResizeConfig, patch: &mut GeometryPatch) {
        let bbox = self.bounding_box;
        let half = config.half_margin();

        match edge {
            Edge::Right => {
                let delta = (pointer.x + half) - bbox.x1;
                if delta.abs() > config.margin {
                    let width = bbox.width() + delta;
                    if width >= config.min_width {
                        patch.width = Some(width);
                    }
                }
            }
            Edge::Left => {
                let delta = (pointer.x + half) - bbox.x0;
                if delta.abs() > config.margin {
                    let width = bbox.width() - delta;
                    // Left only moves together with a committed width so the
                    // right edge stays put.
                    if width >= config.min_width {
                        patch.width = Some(width);
                        patch.left = Some(bbox.x0 + delta);
                    }
                }
            }
            Edge::Top => {
                let delta = (pointer.y + half) - bbox.y0;
                if delta.abs() > config.margin {
                    let height = bbox.height() - delta;
                    if height >= config.min_height {
                        patch.height = Some(height);
                        patch.top = Some(bbox.y0 + delta);
                    }
                }
            }
            Edge::Bottom => {
                let delta = (pointer.y + half) - bbox.y1;
                if delta.abs() > config.margin {
                    // NOTE: starts from the bottom coordinate rather than the
                    // height. Kept as-is; see the regression test below.
                    let height = bbox.y1 + delta;
                    if height >= config.min_height {
                        patch.height = Some(height);
                    }
                }
            }
        }
    }
}
