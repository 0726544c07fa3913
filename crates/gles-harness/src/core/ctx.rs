use winit::dpi::PhysicalSize;

use crate::check::{CheckReport, CheckValue};
use crate::coords::{Grid, Viewport};
use crate::device::InitError;
use crate::gl::buffer::{self, BufferInit, BufferTarget, BufferUsage};
use crate::gl::{shader, texture, GlResources};
use crate::time::FrameTime;

/// Context passed to [`GlTest::init`](super::GlTest::init).
///
/// Objects created through the helpers here are tracked and deleted by the
/// runtime after the frame loop. Objects created directly through `gl` are
/// the test's responsibility.
pub struct InitCtx<'a> {
    pub gl: &'a glow::Context,
    pub size: PhysicalSize<u32>,
    pub report: &'a mut CheckReport,
    resources: &'a mut GlResources,
}

impl<'a> InitCtx<'a> {
    pub fn new(
        gl: &'a glow::Context,
        size: PhysicalSize<u32>,
        report: &'a mut CheckReport,
        resources: &'a mut GlResources,
    ) -> Self {
        Self {
            gl,
            size,
            report,
            resources,
        }
    }

    /// Compiles and links a vertex/fragment pair; the shaders are deleted
    /// once linked.
    pub fn program(
        &mut self,
        vertex: &str,
        fragment: &str,
        bindings: &[(u32, &str)],
    ) -> Result<glow::Program, InitError> {
        let program = shader::build_program(self.gl, vertex, fragment, bindings)?;
        Ok(self.resources.programs.track(program))
    }

    /// Links already compiled shaders; the caller still owns the shaders.
    pub fn link(
        &mut self,
        shaders: &[glow::Shader],
        bindings: &[(u32, &str)],
    ) -> Result<glow::Program, InitError> {
        let program = shader::link_program(self.gl, shaders, bindings)?;
        Ok(self.resources.programs.track(program))
    }

    /// Creates a buffer with an initial store; it is left bound to `target`.
    pub fn buffer(
        &mut self,
        target: BufferTarget,
        init: BufferInit<'_>,
        usage: BufferUsage,
    ) -> Result<glow::Buffer, InitError> {
        let buffer = buffer::create_buffer(self.gl, target, init, usage)?;
        Ok(self.resources.buffers.track(buffer))
    }

    pub fn texture(&mut self) -> Result<glow::Texture, InitError> {
        let texture = texture::create_texture(self.gl)?;
        Ok(self.resources.textures.track(texture))
    }

    /// Records an assertion in the run's report.
    pub fn check<T: CheckValue>(&mut self, actual: T, expected: T, label: &str) -> bool {
        self.report.check(actual, expected, label)
    }
}

/// Per-frame context passed to [`GlTest::draw`](super::GlTest::draw).
pub struct FrameCtx<'a> {
    pub gl: &'a glow::Context,
    pub time: FrameTime,
    /// Drawable size in physical pixels.
    pub size: PhysicalSize<u32>,
    pub report: &'a CheckReport,
}

impl<'a> FrameCtx<'a> {
    /// Tiles the drawable into `cols` x `rows` viewports.
    pub fn grid(&self, cols: u32, rows: u32) -> Grid {
        Grid::new(self.size.width, self.size.height, cols, rows)
    }

    pub fn full_viewport(&self) -> Viewport {
        Viewport::full(self.size.width, self.size.height)
    }
}
