//! In-memory environment and element for testing and native hosts.
//!
//! Nothing here touches a real display: pointer notifications are dispatched
//! by hand and frames only run when [`HeadlessEnvironment::run_frame`] is
//! called.

use crate::environment::{Environment, FrameCallback, FrameId, ListenerId, PointerCallback};
use crate::error::{ResizeError, ResizeResult};
use crate::geometry::{Cursor, GeometryPatch};
use crate::pointer::{PointerEvent, PointerEventKind};
use crate::target::ResizeTarget;
use kurbo::Rect;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

/// Manually driven [`Environment`].
#[derive(Default)]
pub struct HeadlessEnvironment {
    listeners: RefCell<BTreeMap<ListenerId, (PointerEventKind, PointerCallback)>>,
    frames: RefCell<BTreeMap<FrameId, FrameCallback>>,
    next_listener: Cell<u32>,
    next_frame: Cell<i32>,
    frames_run: Cell<u64>,
    refused_kinds: RefCell<HashSet<PointerEventKind>>,
    frames_refused: Cell<bool>,
}

impl HeadlessEnvironment {
    /// Create an environment with no listeners and no pending frames.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a pointer notification to every listener of `kind`.
    pub fn dispatch(&self, kind: PointerEventKind, event: PointerEvent) {
        // Collect first so listeners may (un)subscribe while being called.
        let callbacks: Vec<PointerCallback> = self
            .listeners
            .borrow()
            .values()
            .filter(|(k, _)| *k == kind)
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in callbacks {
            callback(event);
        }
    }

    pub fn pointer_move(&self, x: f64, y: f64) {
        self.dispatch(PointerEventKind::Move, PointerEvent::new(x, y));
    }

    pub fn pointer_down(&self, x: f64, y: f64) {
        self.dispatch(PointerEventKind::Down, PointerEvent::new(x, y));
    }

    pub fn pointer_up(&self, x: f64, y: f64) {
        self.dispatch(PointerEventKind::Up, PointerEvent::new(x, y));
    }

    /// Run every callback requested before this call. Callbacks requested
    /// while running wait for the next frame. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let pending = std::mem::take(&mut *self.frames.borrow_mut());
        let count = pending.len();
        for callback in pending.into_values() {
            callback();
        }
        self.frames_run.set(self.frames_run.get() + 1);
        count
    }

    /// Run `n` frames.
    pub fn run_frames(&self, n: usize) {
        for _ in 0..n {
            self.run_frame();
        }
    }

    /// Number of active pointer registrations.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Number of active registrations for `kind`.
    pub fn listener_count_for(&self, kind: PointerEventKind) -> usize {
        self.listeners.borrow().values().filter(|(k, _)| *k == kind).count()
    }

    /// Number of frame callbacks waiting for the next frame.
    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Number of frames run so far.
    pub fn frames_run(&self) -> u64 {
        self.frames_run.get()
    }

    /// Make future subscriptions for `kind` fail.
    pub fn refuse_subscriptions(&self, kind: PointerEventKind) {
        self.refused_kinds.borrow_mut().insert(kind);
    }

    /// Make future frame requests fail.
    pub fn refuse_frames(&self) {
        self.frames_refused.set(true);
    }
}

impl Environment for HeadlessEnvironment {
    fn subscribe(&self, kind: PointerEventKind, callback: PointerCallback) -> ResizeResult<ListenerId> {
        if self.refused_kinds.borrow().contains(&kind) {
            return Err(ResizeError::Subscribe {
                kind,
                reason: "refused by headless environment".to_string(),
            });
        }
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().insert(id, (kind, callback));
        Ok(id)
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.listeners.borrow_mut().remove(&id);
    }

    fn request_frame(&self, callback: FrameCallback) -> ResizeResult<FrameId> {
        if self.frames_refused.get() {
            return Err(ResizeError::Schedule("refused by headless environment".to_string()));
        }
        let id = FrameId(self.next_frame.get());
        self.next_frame.set(id.0 + 1);
        self.frames.borrow_mut().insert(id, callback);
        Ok(id)
    }

    fn cancel_frame(&self, id: FrameId) {
        // Drop outside the borrow: the callback may own things that call back in.
        let cancelled = self.frames.borrow_mut().remove(&id);
        drop(cancelled);
    }
}

#[derive(Debug)]
struct ElementState {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    cursor: Cursor,
    detached: bool,
    geometry_writes: usize,
    cursor_writes: usize,
}

/// Absolutely positioned element whose bounding box follows its style.
///
/// Clones share the same element, so a test can keep a handle after moving
/// one into a controller.
#[derive(Debug, Clone)]
pub struct HeadlessElement {
    state: Rc<RefCell<ElementState>>,
}

impl HeadlessElement {
    /// Create an element at `(left, top)` with the given size.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(ElementState {
                left,
                top,
                width,
                height,
                cursor: Cursor::Default,
                detached: false,
                geometry_writes: 0,
                cursor_writes: 0,
            })),
        }
    }

    /// Create an element covering `rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }

    pub fn left(&self) -> f64 {
        self.state.borrow().left
    }

    pub fn top(&self) -> f64 {
        self.state.borrow().top
    }

    pub fn width(&self) -> f64 {
        self.state.borrow().width
    }

    pub fn height(&self) -> f64 {
        self.state.borrow().height
    }

    pub fn cursor(&self) -> Cursor {
        self.state.borrow().cursor
    }

    /// Number of non-empty geometry patches applied.
    pub fn geometry_writes(&self) -> usize {
        self.state.borrow().geometry_writes
    }

    /// Number of cursor writes.
    pub fn cursor_writes(&self) -> usize {
        self.state.borrow().cursor_writes
    }

    /// Simulate removal from the document: all further writes fail.
    pub fn detach(&self) {
        self.state.borrow_mut().detached = true;
    }
}

impl ResizeTarget for HeadlessElement {
    fn bounding_box(&self) -> Rect {
        let s = self.state.borrow();
        Rect::new(s.left, s.top, s.left + s.width, s.top + s.height)
    }

    fn apply_geometry(&mut self, patch: &GeometryPatch) -> ResizeResult<()> {
        let mut s = self.state.borrow_mut();
        if s.detached {
            return Err(ResizeError::Target("element is detached".to_string()));
        }
        if let Some(width) = patch.width {
            s.width = width;
        }
        if let Some(height) = patch.height {
            s.height = height;
        }
        if let Some(left) = patch.left {
            s.left = left;
        }
        if let Some(top) = patch.top {
            s.top = top;
        }
        s.geometry_writes += 1;
        Ok(())
    }

    fn set_cursor(&mut self, cursor: Cursor) -> ResizeResult<()> {
        let mut s = self.state.borrow_mut();
        if s.detached {
            return Err(ResizeError::Target("element is detached".to_string()));
        }
        s.cursor = cursor;
        s.cursor_writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_bounding_box_follows_style() {
        let mut element = HeadlessElement::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(element.bounding_box(), Rect::new(10.0, 20.0, 110.0, 70.0));

        element
            .apply_geometry(&GeometryPatch {
                width: Some(80.0),
                left: Some(30.0),
                ..GeometryPatch::default()
            })
            .unwrap();
        assert_eq!(element.bounding_box(), Rect::new(30.0, 20.0, 110.0, 70.0));
        assert_eq!(element.geometry_writes(), 1);
    }

    #[test]
    fn test_element_clones_share_state() {
        let element = HeadlessElement::new(0.0, 0.0, 10.0, 10.0);
        let mut handle = element.clone();
        handle.set_cursor(Cursor::NsResize).unwrap();
        assert_eq!(element.cursor(), Cursor::NsResize);
    }

    #[test]
    fn test_detached_element_rejects_writes() {
        let mut element = HeadlessElement::new(0.0, 0.0, 10.0, 10.0);
        element.detach();
        assert!(element.set_cursor(Cursor::EwResize).is_err());
        assert!(element.apply_geometry(&GeometryPatch::default()).is_err());
        assert_eq!(element.cursor(), Cursor::Default);
    }

    #[test]
    fn test_dispatch_reaches_matching_listeners() {
        let env = HeadlessEnvironment::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        env.subscribe(
            PointerEventKind::Move,
            Rc::new(move |e: PointerEvent| sink.borrow_mut().push(e)),
        )
        .unwrap();
        let ups = Rc::new(Cell::new(0));
        let up_sink = Rc::clone(&ups);
        env.subscribe(
            PointerEventKind::Up,
            Rc::new(move |_: PointerEvent| up_sink.set(up_sink.get() + 1)),
        )
        .unwrap();

        env.pointer_move(1.0, 2.0);
        env.pointer_move(3.0, 4.0);
        assert_eq!(
            *seen.borrow(),
            vec![PointerEvent::new(1.0, 2.0), PointerEvent::new(3.0, 4.0)]
        );
        assert_eq!(ups.get(), 0);
    }

    #[test]
    fn test_unsubscribe() {
        let env = HeadlessEnvironment::new();
        let id = env.subscribe(PointerEventKind::Down, Rc::new(|_: PointerEvent| {})).unwrap();
        assert_eq!(env.listener_count_for(PointerEventKind::Down), 1);
        env.unsubscribe(id);
        assert_eq!(env.listener_count(), 0);
        // Unknown ids are ignored.
        env.unsubscribe(id);
    }

    #[test]
    fn test_frames_requested_during_a_frame_wait() {
        let env = Rc::new(HeadlessEnvironment::new());
        let runs = Rc::new(Cell::new(0));

        let (env2, runs2) = (Rc::clone(&env), Rc::clone(&runs));
        env.request_frame(Box::new(move || {
            runs2.set(runs2.get() + 1);
            env2.request_frame(Box::new(|| {})).unwrap();
        }))
        .unwrap();

        assert_eq!(env.run_frame(), 1);
        assert_eq!(runs.get(), 1);
        assert_eq!(env.pending_frames(), 1);
        assert_eq!(env.frames_run(), 1);
    }

    #[test]
    fn test_cancel_frame() {
        let env = HeadlessEnvironment::new();
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        let id = env.request_frame(Box::new(move || flag.set(true))).unwrap();
        env.cancel_frame(id);
        assert_eq!(env.pending_frames(), 0);
        assert_eq!(env.run_frame(), 0);
        assert!(!ran.get());
    }

    #[test]
    fn test_refusals() {
        let env = HeadlessEnvironment::new();
        env.refuse_subscriptions(PointerEventKind::Up);
        env.refuse_frames();
        assert!(matches!(
            env.subscribe(PointerEventKind::Up, Rc::new(|_: PointerEvent| {})),
            Err(ResizeError::Subscribe { kind: PointerEventKind::Up, .. })
        ));
        assert!(env.subscribe(PointerEventKind::Move, Rc::new(|_: PointerEvent| {})).is_ok());
        assert!(matches!(
            env.request_frame(Box::new(|| {})),
            Err(ResizeError::Schedule(_))
        ));
    }
}
