//! Test-facing contracts.
//!
//! This module defines the interface between the runtime (window + frame
//! loop) and the individual test programs.

mod app;
mod ctx;

pub use app::GlTest;
pub use ctx::{FrameCtx, InitCtx};
