//! `glBufferData` usage hints.
//!
//! Top row draws from array buffers, bottom row from index buffers over one
//! shared quad. Columns, left to right:
//! - `STREAM_DRAW`, respecified once a second
//! - `DYNAMIC_DRAW`, sub-updated every frame
//! - `STATIC_DRAW`, sub-updated every frame anyway (hint misuse)
//! - `STATIC_DRAW`, never touched after init

use glow::HasContext;
use rand::Rng;

use gles_harness::coords::{ColorRgba, Grid};
use gles_harness::gl::attrib::enable_attrib;
use gles_harness::gl::buffer::{self, supports_u32_indices};
use gles_harness::gl::{AttribFormat, BufferInit, BufferTarget, BufferUsage};
use gles_harness::time::Interval;
use gles_harness::{FrameCtx, GlTest, InitCtx, InitError, RuntimeConfig};

pub const TITLE: &str = "glBufferData Test";

const POSITION: u32 = 0;

const VERTEX_SHADER: &str = r#"#version 100
attribute vec3 inPosition;
void main()
{
    gl_Position = vec4(inPosition, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 100
precision mediump float;
uniform vec3 uColor;
void main()
{
    gl_FragColor = vec4(uColor, 1.0);
}
"#;

const TRIANGLE: [f32; 9] = [-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0];
const QUAD: [f32; 12] = [
    -0.5, -0.5, 0.0, //
    0.5, -0.5, 0.0, //
    -0.5, 0.5, 0.0, //
    0.5, 0.5, 0.0,
];

/// Two index triples over [`QUAD`]; the second is used when
/// [`second_phase`] holds.
#[derive(Debug, Copy, Clone)]
struct IndexPattern {
    first: [u32; 3],
    second: [u32; 3],
}

impl IndexPattern {
    const fn new(first: [u32; 3], second: [u32; 3]) -> Self {
        Self { first, second }
    }

    fn at(&self, t: f32) -> [u32; 3] {
        if second_phase(t) {
            self.second
        } else {
            self.first
        }
    }
}

const STREAM_INDICES: IndexPattern = IndexPattern::new([0, 1, 2], [1, 3, 2]);
const DYNAMIC_INDICES: IndexPattern = IndexPattern::new([0, 1, 3], [0, 2, 3]);
const STATIC_MISUSED_INDICES: IndexPattern = IndexPattern::new([0, 2, 1], [2, 1, 3]);
const STATIC_INDICES: [u32; 3] = [0, 1, 2];

const BACKGROUND: ColorRgba = ColorRgba::rgb(0.1, 0.1, 0.15);
const RED: ColorRgba = ColorRgba::rgb(0.9, 0.2, 0.2);
const GREEN: ColorRgba = ColorRgba::rgb(0.2, 0.9, 0.2);
const ORANGE: ColorRgba = ColorRgba::rgb(0.9, 0.5, 0.2);
const WHITE: ColorRgba = ColorRgba::rgb(0.9, 0.9, 0.9);
const BLUE: ColorRgba = ColorRgba::rgb(0.2, 0.2, 0.9);
const CYAN: ColorRgba = ColorRgba::rgb(0.2, 0.9, 0.9);
const MAGENTA: ColorRgba = ColorRgba::rgb(0.9, 0.2, 0.9);
const YELLOW: ColorRgba = ColorRgba::rgb(0.9, 0.9, 0.2);

const STREAM_PERIOD: f32 = 1.0;
const STREAM_JITTER: f32 = 0.2;

pub fn config() -> RuntimeConfig {
    RuntimeConfig::new(TITLE)
}

/// One buffer per usage hint and target.
#[derive(Debug, Copy, Clone)]
struct BufferSet {
    stream: glow::Buffer,
    dynamic: glow::Buffer,
    static_misused: glow::Buffer,
    static_untouched: glow::Buffer,
}

pub struct BufferUsageTest {
    program: glow::Program,
    color: Option<glow::UniformLocation>,
    vertices: BufferSet,
    quad: glow::Buffer,
    indices: BufferSet,
    vertex_refresh: Interval,
    index_refresh: Interval,
}

impl GlTest for BufferUsageTest {
    fn init(ctx: &mut InitCtx<'_>) -> Result<Self, InitError> {
        let program = ctx.program(VERTEX_SHADER, FRAGMENT_SHADER, &[(POSITION, "inPosition")])?;
        let color = unsafe { ctx.gl.get_uniform_location(program, "uColor") };

        if !supports_u32_indices(ctx.gl) {
            log::warn!("GL_OES_element_index_uint missing; index buffer draws may be rejected");
        }

        let vertices = BufferSet {
            stream: ctx.buffer(
                BufferTarget::Array,
                BufferInit::from_slice(&TRIANGLE),
                BufferUsage::Stream,
            )?,
            dynamic: ctx.buffer(
                BufferTarget::Array,
                BufferInit::sized_like(&TRIANGLE),
                BufferUsage::Dynamic,
            )?,
            static_misused: ctx.buffer(
                BufferTarget::Array,
                BufferInit::sized_like(&TRIANGLE),
                BufferUsage::Static,
            )?,
            static_untouched: ctx.buffer(
                BufferTarget::Array,
                BufferInit::from_slice(&TRIANGLE),
                BufferUsage::Static,
            )?,
        };

        let quad = ctx.buffer(
            BufferTarget::Array,
            BufferInit::from_slice(&QUAD),
            BufferUsage::Static,
        )?;

        let initial = STREAM_INDICES.first;
        let indices = BufferSet {
            stream: ctx.buffer(
                BufferTarget::ElementArray,
                BufferInit::from_slice(&initial),
                BufferUsage::Stream,
            )?,
            dynamic: ctx.buffer(
                BufferTarget::ElementArray,
                BufferInit::sized_like(&initial),
                BufferUsage::Dynamic,
            )?,
            static_misused: ctx.buffer(
                BufferTarget::ElementArray,
                BufferInit::sized_like(&initial),
                BufferUsage::Static,
            )?,
            static_untouched: ctx.buffer(
                BufferTarget::ElementArray,
                BufferInit::from_slice(&STATIC_INDICES),
                BufferUsage::Static,
            )?,
        };

        enable_attrib(ctx.gl, POSITION);

        Ok(Self {
            program,
            color,
            vertices,
            quad,
            indices,
            vertex_refresh: Interval::new(STREAM_PERIOD),
            index_refresh: Interval::new(STREAM_PERIOD),
        })
    }

    fn draw(&mut self, ctx: &mut FrameCtx<'_>) {
        let gl = ctx.gl;
        let t = ctx.time.elapsed;
        let grid = ctx.grid(4, 2);

        BACKGROUND.clear(gl);
        unsafe { gl.use_program(Some(self.program)) };

        self.draw_array_row(gl, &grid, t);
        self.draw_index_row(gl, &grid, t);
    }
}

impl BufferUsageTest {
    fn draw_array_row(&mut self, gl: &glow::Context, grid: &Grid, t: f32) {
        let y_offset = wobble(t);

        self.cell(gl, grid, 0, 0, RED);
        if self.vertex_refresh.fire(t) {
            let mut rng = rand::thread_rng();
            let dx: f32 = rng.gen_range(-STREAM_JITTER..=STREAM_JITTER);
            let dy: f32 = rng.gen_range(-STREAM_JITTER..=STREAM_JITTER);
            buffer::respecify(
                gl,
                BufferTarget::Array,
                self.vertices.stream,
                &offset_triangle(dx, dy),
                BufferUsage::Stream,
            );
        }
        draw_triangle(gl, self.vertices.stream);

        self.cell(gl, grid, 1, 0, GREEN);
        buffer::update(
            gl,
            BufferTarget::Array,
            self.vertices.dynamic,
            0,
            &offset_triangle(0.0, -y_offset),
        );
        draw_triangle(gl, self.vertices.dynamic);

        self.cell(gl, grid, 2, 0, ORANGE);
        buffer::update(
            gl,
            BufferTarget::Array,
            self.vertices.static_misused,
            0,
            &offset_triangle(0.0, y_offset),
        );
        draw_triangle(gl, self.vertices.static_misused);

        self.cell(gl, grid, 3, 0, WHITE);
        draw_triangle(gl, self.vertices.static_untouched);
    }

    fn draw_index_row(&mut self, gl: &glow::Context, grid: &Grid, t: f32) {
        buffer::bind_buffer(gl, BufferTarget::Array, self.quad);
        AttribFormat::floats(3).apply(gl, POSITION);

        self.cell(gl, grid, 0, 1, BLUE);
        if self.index_refresh.fire(t) {
            buffer::respecify(
                gl,
                BufferTarget::ElementArray,
                self.indices.stream,
                &STREAM_INDICES.at(t),
                BufferUsage::Stream,
            );
        }
        draw_indexed(gl, self.indices.stream);

        self.cell(gl, grid, 1, 1, CYAN);
        buffer::update(
            gl,
            BufferTarget::ElementArray,
            self.indices.dynamic,
            0,
            &DYNAMIC_INDICES.at(t),
        );
        draw_indexed(gl, self.indices.dynamic);

        self.cell(gl, grid, 2, 1, MAGENTA);
        buffer::update(
            gl,
            BufferTarget::ElementArray,
            self.indices.static_misused,
            0,
            &STATIC_MISUSED_INDICES.at(t),
        );
        draw_indexed(gl, self.indices.static_misused);

        self.cell(gl, grid, 3, 1, YELLOW);
        draw_indexed(gl, self.indices.static_untouched);
    }

    fn cell(&self, gl: &glow::Context, grid: &Grid, col: u32, row: u32, color: ColorRgba) {
        grid.cell(col, row).apply(gl);
        color.set_uniform_rgb(gl, self.color.as_ref());
    }
}

fn draw_triangle(gl: &glow::Context, vbo: glow::Buffer) {
    buffer::bind_buffer(gl, BufferTarget::Array, vbo);
    AttribFormat::floats(3).apply(gl, POSITION);
    unsafe { gl.draw_arrays(glow::TRIANGLES, 0, 3) };
}

fn draw_indexed(gl: &glow::Context, ebo: glow::Buffer) {
    buffer::bind_buffer(gl, BufferTarget::ElementArray, ebo);
    unsafe { gl.draw_elements(glow::TRIANGLES, 3, glow::UNSIGNED_INT, 0) };
}

/// Vertical offset of the per-frame updated triangles.
fn wobble(t: f32) -> f32 {
    (t * 5.0).sin() * 0.2
}

/// Odd seconds of every two-second cycle.
fn second_phase(t: f32) -> bool {
    t.rem_euclid(2.0) > 1.0
}

fn offset_triangle(dx: f32, dy: f32) -> [f32; 9] {
    let mut out = TRIANGLE;
    for vertex in out.chunks_exact_mut(3) {
        vertex[0] += dx;
        vertex[1] += dy;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── phases ─────────────────────────────────────────────────────────────

    #[test]
    fn phase_flips_every_second() {
        assert!(!second_phase(0.0));
        assert!(!second_phase(0.5));
        assert!(!second_phase(1.0));
        assert!(second_phase(1.5));
        assert!(!second_phase(2.25));
        assert!(second_phase(3.75));
    }

    #[test]
    fn index_patterns_follow_phase() {
        assert_eq!(STREAM_INDICES.at(0.2), [0, 1, 2]);
        assert_eq!(STREAM_INDICES.at(1.2), [1, 3, 2]);
        assert_eq!(DYNAMIC_INDICES.at(1.2), [0, 2, 3]);
        assert_eq!(STATIC_MISUSED_INDICES.at(0.2), [0, 2, 1]);
    }

    #[test]
    fn every_index_addresses_the_quad() {
        let vertex_count = (QUAD.len() / 3) as u32;
        let patterns = [STREAM_INDICES, DYNAMIC_INDICES, STATIC_MISUSED_INDICES];
        for pattern in patterns {
            for index in pattern.first.iter().chain(pattern.second.iter()) {
                assert!(*index < vertex_count);
            }
        }
        assert!(STATIC_INDICES.iter().all(|i| *i < vertex_count));
    }

    // ── geometry ───────────────────────────────────────────────────────────

    #[test]
    fn offset_moves_xy_only() {
        let moved = offset_triangle(0.1, -0.2);
        for (a, b) in moved.chunks_exact(3).zip(TRIANGLE.chunks_exact(3)) {
            assert!((a[0] - b[0] - 0.1).abs() < 1e-6);
            assert!((a[1] - b[1] + 0.2).abs() < 1e-6);
            assert_eq!(a[2], b[2]);
        }
    }

    #[test]
    fn wobble_stays_within_amplitude() {
        for i in 0..200 {
            let t = i as f32 * 0.037;
            assert!(wobble(t).abs() <= 0.2 + 1e-6);
        }
        assert_eq!(wobble(0.0), 0.0);
    }
}
