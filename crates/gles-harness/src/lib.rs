//! Harness for hand-written OpenGL ES 2.0 test programs.
//!
//! This crate owns the window + context bootstrap and the frame loop, plus the
//! small helpers every test shares: assertion reporting, viewport grids,
//! frame timing and typed wrappers over the GL calls under test. A test
//! implements [`GlTest`] and hands itself to [`run_test`].

pub mod check;
pub mod coords;
pub mod core;
pub mod device;
pub mod gl;
pub mod logging;
pub mod time;
pub mod window;

pub use crate::check::CheckReport;
pub use crate::core::{FrameCtx, GlTest, InitCtx};
pub use crate::device::InitError;
pub use crate::window::{run_test, RuntimeConfig};

/// Re-exported so test crates use the exact `glow` this harness was built with.
pub use glow;
