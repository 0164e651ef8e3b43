//! Edge resize controller: wires the engine to an environment.
//!
//! Construction subscribes to global pointer move/down/up and starts a
//! self-rescheduling frame loop. Moves only land in a [`PointerSlot`]; all
//! reading and writing of the target happens once per frame.

use crate::config::{ResizeConfig, ResizeOptions};
use crate::engine::ResizeEngine;
use crate::environment::{Environment, FrameId, ListenerId, PointerCallback};
use crate::error::ResizeResult;
use crate::pointer::{PointerEvent, PointerEventKind, PointerSlot};
use crate::proximity::ProximityState;
use crate::target::ResizeTarget;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Resizes one element by dragging its edges.
///
/// Tearing down (via [`destroy`](Self::destroy) or drop) removes the pointer
/// listeners and cancels the pending frame, so the loop stops with it.
pub struct EdgeResizeController<T: ResizeTarget + 'static, E: Environment + 'static> {
    env: Rc<E>,
    engine: Rc<RefCell<ResizeEngine<T>>>,
    frame_loop: Rc<FrameLoop<T, E>>,
    listeners: Vec<ListenerId>,
}

impl<T: ResizeTarget + 'static, E: Environment + 'static> EdgeResizeController<T, E> {
    /// Attach to `env` and start resizing `target`.
    ///
    /// If any subscription or the first frame request fails, everything
    /// attached so far is removed before the error is returned.
    pub fn new(target: T, env: Rc<E>, options: ResizeOptions) -> ResizeResult<Self> {
        let config = ResizeConfig::from(options);
        let engine = Rc::new(RefCell::new(ResizeEngine::new(target, config)));
        let pointer = PointerSlot::new();
        let frame_loop = Rc::new(FrameLoop {
            env: Rc::clone(&env),
            engine: Rc::clone(&engine),
            pointer: pointer.clone(),
            pending: Cell::new(None),
            running: Cell::new(false),
        });

        let mut controller = Self {
            env,
            engine,
            frame_loop,
            listeners: Vec::with_capacity(PointerEventKind::ALL.len()),
        };
        controller.attach(pointer)?;
        log::debug!("Edge resize controller attached ({:?})", config);
        Ok(controller)
    }

    fn attach(&mut self, pointer: PointerSlot) -> ResizeResult<()> {
        for kind in PointerEventKind::ALL {
            let callback: PointerCallback = match kind {
                PointerEventKind::Move => {
                    let pointer = pointer.clone();
                    Rc::new(move |event: PointerEvent| pointer.record(event))
                }
                PointerEventKind::Down => {
                    let engine = Rc::clone(&self.engine);
                    Rc::new(move |event: PointerEvent| engine.borrow_mut().on_pointer_down(event))
                }
                PointerEventKind::Up => {
                    let engine = Rc::clone(&self.engine);
                    Rc::new(move |event: PointerEvent| engine.borrow_mut().on_pointer_up(event))
                }
            };
            // On error `self` is dropped by the caller, which detaches the rest.
            let id = self.env.subscribe(kind, callback)?;
            self.listeners.push(id);
        }
        FrameLoop::start(&self.frame_loop)
    }

    /// Detach from the environment and stop the frame loop.
    pub fn destroy(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        let was_attached = !self.listeners.is_empty() || self.frame_loop.is_running();
        self.frame_loop.stop();
        for id in self.listeners.drain(..) {
            self.env.unsubscribe(id);
        }
        if was_attached {
            log::debug!("Edge resize controller detached");
        }
    }

    /// The resolved configuration.
    pub fn config(&self) -> ResizeConfig {
        *self.engine.borrow().config()
    }

    /// Whether a resize drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.engine.borrow().is_dragging()
    }

    /// Most recent proximity classification.
    pub fn proximity(&self) -> Option<ProximityState> {
        self.engine.borrow().proximity().copied()
    }

    /// Whether the frame loop is still scheduled.
    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }
}

impl<T: ResizeTarget + 'static, E: Environment + 'static> Drop for EdgeResizeController<T, E> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Self-rescheduling per-frame loop. Each pending frame callback owns an
/// `Rc` to the loop; cancelling the frame releases it.
struct FrameLoop<T: ResizeTarget + 'static, E: Environment + 'static> {
    env: Rc<E>,
    engine: Rc<RefCell<ResizeEngine<T>>>,
    pointer: PointerSlot,
    pending: Cell<Option<FrameId>>,
    running: Cell<bool>,
}

impl<T: ResizeTarget + 'static, E: Environment + 'static> FrameLoop<T, E> {
    fn start(this: &Rc<Self>) -> ResizeResult<()> {
        this.running.set(true);
        if let Err(err) = Self::schedule(this) {
            this.running.set(false);
            return Err(err);
        }
        Ok(())
    }

    fn schedule(this: &Rc<Self>) -> ResizeResult<()> {
        let next = Rc::clone(this);
        let id = this.env.request_frame(Box::new(move || Self::tick(&next)))?;
        this.pending.set(Some(id));
        Ok(())
    }

    fn tick(this: &Rc<Self>) {
        this.pending.set(None);
        if !this.running.get() {
            return;
        }

        // Reschedule first; the step below never blocks the next frame.
        if let Err(err) = Self::schedule(this) {
            log::error!("Resize frame loop stopped: {}", err);
            this.running.set(false);
        }

        let pointer = this.pointer.latest();
        match this.engine.borrow_mut().step(pointer) {
            Ok(outcome) => log::trace!("Resize frame: {:?}", outcome),
            Err(err) => log::error!("Resize frame failed: {}", err),
        }
    }

    fn stop(&self) {
        self.running.set(false);
        if let Some(id) = self.pending.take() {
            self.env.cancel_frame(id);
        }
    }

    fn is_running(&self) -> bool {
        self.running.get()
    }
}
