//! Window + runtime loop.
//!
//! Owns the `winit` event loop and drives a [`GlTest`](crate::core::GlTest)
//! through init, the frame loop and teardown.

mod runtime;

pub use runtime::{run_test, RunSummary, Runtime, RuntimeConfig, MAX_FRAMES_ENV};
