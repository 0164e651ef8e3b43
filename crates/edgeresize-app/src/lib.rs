//! EdgeResize Application
//!
//! Host shells around `edgeresize-core`: the browser binding (WASM) and a
//! native trace replayer.

pub mod replay;

pub use replay::{load_trace, replay, sample_trace, ElementPlacement, ReplayError, Snapshot, Step, Trace};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{EdgeResizer, ElementTarget, WindowEnvironment};
