//! EdgeResize Core Library
//!
//! Platform-agnostic pointer tracking, edge proximity detection and the
//! per-frame resize loop for a single rectangular element. Hosts plug in a
//! [`ResizeTarget`] (the element) and an [`Environment`] (global pointer
//! events plus a per-frame scheduler).

pub mod config;
pub mod controller;
pub mod engine;
pub mod environment;
pub mod error;
pub mod geometry;
pub mod headless;
pub mod pointer;
pub mod proximity;
pub mod target;

pub use config::{ConfigError, ResizeConfig, ResizeOptions};
pub use controller::EdgeResizeController;
pub use engine::{FrameOutcome, ResizeEngine};
pub use environment::{Environment, FrameCallback, FrameId, ListenerId, PointerCallback};
pub use error::{ResizeError, ResizeResult};
pub use geometry::{Cursor, Edge, GeometryPatch};
pub use headless::{HeadlessElement, HeadlessEnvironment};
pub use pointer::{PointerEvent, PointerEventKind, PointerSlot};
pub use proximity::ProximityState;
pub use target::ResizeTarget;
