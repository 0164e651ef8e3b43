//! WebAssembly entry point and browser collaborators.
//!
//! `WindowEnvironment` listens on `window` (not the element) so a drag keeps
//! tracking after the pointer leaves the element, and drives the frame loop
//! with `requestAnimationFrame`.

use edgeresize_core::geometry::to_css_px;
use edgeresize_core::{
    Cursor, EdgeResizeController, Environment, FrameCallback, FrameId, GeometryPatch, ListenerId,
    PointerCallback, PointerEvent, PointerEventKind, ResizeError, ResizeOptions, ResizeResult,
    ResizeTarget,
};
use kurbo::Rect;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent, Window};

/// DOM event name for a pointer notification.
fn dom_event_name(kind: PointerEventKind) -> &'static str {
    match kind {
        PointerEventKind::Move => "mousemove",
        PointerEventKind::Down => "mousedown",
        PointerEventKind::Up => "mouseup",
    }
}

/// Pending frame callback; emptied when the frame fires or is cancelled.
type FrameSlot = Rc<RefCell<Option<FrameCallback>>>;

/// [`Environment`] backed by the browser window.
pub struct WindowEnvironment {
    window: Window,
    // Store closures to keep them alive while registered
    listeners: RefCell<HashMap<ListenerId, (PointerEventKind, Closure<dyn Fn(MouseEvent)>)>>,
    next_listener: Cell<u32>,
    frames: Rc<RefCell<HashMap<i32, FrameSlot>>>,
}

impl WindowEnvironment {
    /// Bind to the global `window`.
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No global window"))?;
        Ok(Self {
            window,
            listeners: RefCell::new(HashMap::new()),
            next_listener: Cell::new(0),
            frames: Rc::new(RefCell::new(HashMap::new())),
        })
    }
}

impl Environment for WindowEnvironment {
    fn subscribe(&self, kind: PointerEventKind, callback: PointerCallback) -> ResizeResult<ListenerId> {
        let closure = Closure::wrap(Box::new(move |e: MouseEvent| {
            callback(PointerEvent::new(f64::from(e.client_x()), f64::from(e.client_y())));
        }) as Box<dyn Fn(MouseEvent)>);

        self.window
            .add_event_listener_with_callback(dom_event_name(kind), closure.as_ref().unchecked_ref())
            .map_err(|e| ResizeError::Subscribe {
                kind,
                reason: format!("{:?}", e),
            })?;

        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().insert(id, (kind, closure));
        Ok(id)
    }

    fn unsubscribe(&self, id: ListenerId) {
        let removed = self.listeners.borrow_mut().remove(&id);
        if let Some((kind, closure)) = removed {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback(dom_event_name(kind), closure.as_ref().unchecked_ref())
            {
                log::warn!("Failed to remove {} listener: {:?}", dom_event_name(kind), e);
            }
        }
    }

    fn request_frame(&self, callback: FrameCallback) -> ResizeResult<FrameId> {
        let slot: FrameSlot = Rc::new(RefCell::new(Some(callback)));
        let fired = Rc::clone(&slot);
        let frames = Rc::downgrade(&self.frames);
        let own_id = Rc::new(Cell::new(None::<i32>));
        let own_id_fired = Rc::clone(&own_id);

        // Frees itself after running; a cancelled frame only leaks the empty
        // JS wrapper since the Rust callback is taken out of the slot.
        let closure = Closure::once_into_js(move || {
            if let (Some(frames), Some(id)) = (frames.upgrade(), own_id_fired.get()) {
                frames.borrow_mut().remove(&id);
            }
            let callback = fired.borrow_mut().take();
            if let Some(callback) = callback {
                callback();
            }
        });

        let id = self
            .window
            .request_animation_frame(closure.unchecked_ref())
            .map_err(|e| ResizeError::Schedule(format!("{:?}", e)))?;
        own_id.set(Some(id));
        self.frames.borrow_mut().insert(id, slot);
        Ok(FrameId(id))
    }

    fn cancel_frame(&self, id: FrameId) {
        if let Err(e) = self.window.cancel_animation_frame(id.0) {
            log::warn!("Failed to cancel animation frame {}: {:?}", id.0, e);
        }
        let slot = self.frames.borrow_mut().remove(&id.0);
        if let Some(slot) = slot {
            let callback = slot.borrow_mut().take();
            drop(callback);
        }
    }
}

/// [`ResizeTarget`] backed by an `HtmlElement`'s inline style.
pub struct ElementTarget {
    element: HtmlElement,
}

impl ElementTarget {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    fn set_style(&self, property: &str, value: &str) -> ResizeResult<()> {
        self.element
            .style()
            .set_property(property, value)
            .map_err(|e| ResizeError::Target(format!("{}: {:?}", property, e)))
    }
}

impl ResizeTarget for ElementTarget {
    fn bounding_box(&self) -> Rect {
        let rect = self.element.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom())
    }

    fn apply_geometry(&mut self, patch: &GeometryPatch) -> ResizeResult<()> {
        for (property, value) in patch.properties() {
            self.set_style(property, &to_css_px(value))?;
        }
        Ok(())
    }

    fn set_cursor(&mut self, cursor: Cursor) -> ResizeResult<()> {
        self.set_style("cursor", cursor.as_css())
    }
}

/// JS-facing resizer: `new EdgeResizer(element, { margin, minWidth, minHeight })`.
#[wasm_bindgen]
pub struct EdgeResizer {
    controller: Option<EdgeResizeController<ElementTarget, WindowEnvironment>>,
}

#[wasm_bindgen]
impl EdgeResizer {
    /// Start resizing `element`. `options` may be omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlElement, options: JsValue) -> Result<EdgeResizer, JsValue> {
        let options: ResizeOptions = if options.is_undefined() || options.is_null() {
            ResizeOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        let env = Rc::new(WindowEnvironment::new()?);
        let controller = EdgeResizeController::new(ElementTarget::new(element), env, options)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            controller: Some(controller),
        })
    }

    /// Remove the window listeners and stop the frame loop.
    pub fn destroy(&mut self) {
        if let Some(controller) = self.controller.take() {
            controller.destroy();
        }
    }

    #[wasm_bindgen(getter, js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.controller.as_ref().is_some_and(|c| c.is_dragging())
    }
}

/// Initialize panic reporting and logging when the module loads.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("Logger already set: {}", e)));
    }
}
