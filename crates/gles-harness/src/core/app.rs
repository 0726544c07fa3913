use crate::device::InitError;

use super::ctx::{FrameCtx, InitCtx};

/// Contract implemented by every test program.
///
/// The runtime calls `init` once after the context is current, `draw` once
/// per display refresh, and `cleanup` once after the frame loop ends. GPU
/// objects created through [`InitCtx`] are deleted by the runtime right after
/// `cleanup`, so most tests do not override it.
pub trait GlTest: Sized {
    /// Builds the scene and runs one-time assertions.
    fn init(ctx: &mut InitCtx<'_>) -> Result<Self, InitError>;

    /// Renders one frame. Must not block.
    fn draw(&mut self, ctx: &mut FrameCtx<'_>);

    /// Releases anything not tracked by the resource ledger.
    fn cleanup(&mut self, gl: &glow::Context) {
        let _ = gl;
    }
}
