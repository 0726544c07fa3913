//! `glVertexAttribPointer` with integer colour data.
//!
//! A full-screen quad is drawn eight times with its colour attribute read as
//! a different integer type, first raw then normalized. Raw values saturate,
//! so the non-normalized cells look brighter than the normalized ones.
//!
//! The top row binds the colour to slot 0 and the bottom row to the highest
//! slot the driver reports. Position always lives one slot below that.

use glow::HasContext;

use gles_harness::coords::{ColorRgba, Grid};
use gles_harness::gl::attrib::{disable_attrib, enable_attrib};
use gles_harness::gl::buffer::{self, BufferTarget};
use gles_harness::gl::{AttribFormat, BufferInit, BufferUsage, ScalarType};
use gles_harness::{FrameCtx, GlTest, InitCtx, InitError, RuntimeConfig};

pub const TITLE: &str = "glVertexAttribPointer Test";

const VERTEX_SHADER: &str = r#"#version 100
attribute vec4 a_position;
attribute vec3 a_color;
varying vec3 v_color;
void main()
{
    gl_Position = a_position;
    v_color = a_color;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 100
precision mediump float;
varying vec3 v_color;
void main()
{
    gl_FragColor = vec4(v_color, 1.0);
}
"#;

#[rustfmt::skip]
const POSITIONS: [f32; 8] = [
    -1.0, -1.0,
     1.0, -1.0,
    -1.0,  1.0,
     1.0,  1.0,
];

// Red, green, blue and yellow corners at each type's maximum.
const UBYTE_COLORS: [u8; 12] = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 0];
const BYTE_COLORS: [i8; 12] = [127, 0, 0, 0, 127, 0, 0, 0, 127, 127, 127, 0];
const USHORT_COLORS: [u16; 12] = [65535, 0, 0, 0, 65535, 0, 0, 0, 65535, 65535, 65535, 0];
const SHORT_COLORS: [i16; 12] = [32767, 0, 0, 0, 32767, 0, 0, 0, 32767, 32767, 32767, 0];

const BACKGROUND: ColorRgba = ColorRgba::rgb(0.1, 0.1, 0.1);

/// Slot assignment derived from `GL_MAX_VERTEX_ATTRIBS`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Slots {
    first: u32,
    last: u32,
    position: u32,
}

impl Slots {
    fn from_max(max_vertex_attribs: i32) -> Result<Self, InitError> {
        if max_vertex_attribs < 2 {
            return Err(InitError::driver(format!(
                "test needs at least 2 vertex attributes, driver reports {max_vertex_attribs}"
            )));
        }
        let max = max_vertex_attribs as u32;
        Ok(Self {
            first: 0,
            last: max - 1,
            position: max - 2,
        })
    }
}

#[derive(Debug, Copy, Clone)]
struct ColorArray {
    scalar: ScalarType,
    buffer: glow::Buffer,
}

/// One grid row: a program, the slot its colour is bound to and the two
/// colour arrays drawn through it.
#[derive(Debug, Copy, Clone)]
struct Row {
    program: glow::Program,
    color_slot: u32,
    arrays: [ColorArray; 2],
}

pub fn config() -> RuntimeConfig {
    RuntimeConfig::new(TITLE)
}

pub struct VertexAttribTest {
    rows: [Row; 2],
}

impl GlTest for VertexAttribTest {
    fn init(ctx: &mut InitCtx<'_>) -> Result<Self, InitError> {
        let max = unsafe { ctx.gl.get_parameter_i32(glow::MAX_VERTEX_ATTRIBS) };
        let slots = Slots::from_max(max)?;
        log::info!(
            "GL_MAX_VERTEX_ATTRIBS = {max}; colour at {} and {}, position at {}",
            slots.first,
            slots.last,
            slots.position
        );

        let first_program = ctx.program(
            VERTEX_SHADER,
            FRAGMENT_SHADER,
            &[(slots.first, "a_color"), (slots.position, "a_position")],
        )?;
        let last_program = ctx.program(
            VERTEX_SHADER,
            FRAGMENT_SHADER,
            &[(slots.last, "a_color"), (slots.position, "a_position")],
        )?;

        let positions = ctx.buffer(
            BufferTarget::Array,
            BufferInit::from_slice(&POSITIONS),
            BufferUsage::Static,
        )?;
        let ubyte = color_array(
            ctx,
            ScalarType::UnsignedByte,
            BufferInit::from_slice(&UBYTE_COLORS),
        )?;
        let byte = color_array(ctx, ScalarType::Byte, BufferInit::from_slice(&BYTE_COLORS))?;
        let ushort = color_array(
            ctx,
            ScalarType::UnsignedShort,
            BufferInit::from_slice(&USHORT_COLORS),
        )?;
        let short = color_array(
            ctx,
            ScalarType::Short,
            BufferInit::from_slice(&SHORT_COLORS),
        )?;

        buffer::bind_buffer(ctx.gl, BufferTarget::Array, positions);
        AttribFormat::floats(2).apply(ctx.gl, slots.position);
        enable_attrib(ctx.gl, slots.position);

        Ok(Self {
            rows: [
                Row {
                    program: first_program,
                    color_slot: slots.first,
                    arrays: [ubyte, byte],
                },
                Row {
                    program: last_program,
                    color_slot: slots.last,
                    arrays: [ushort, short],
                },
            ],
        })
    }

    fn draw(&mut self, ctx: &mut FrameCtx<'_>) {
        let gl = ctx.gl;
        let grid = ctx.grid(4, 2);

        BACKGROUND.clear(gl);
        for (index, row) in self.rows.iter().enumerate() {
            draw_row(gl, &grid, index as u32, row);
        }
    }
}

fn color_array(
    ctx: &mut InitCtx<'_>,
    scalar: ScalarType,
    data: BufferInit<'_>,
) -> Result<ColorArray, InitError> {
    let buffer = ctx.buffer(BufferTarget::Array, data, BufferUsage::Static)?;
    let format = AttribFormat::new(3, scalar);
    log::debug!(
        "{}: peak channel reads {} raw, {:.3} normalized",
        scalar.name(),
        format.resolve(peak(scalar)),
        format.normalized(true).resolve(peak(scalar)),
    );
    Ok(ColorArray { scalar, buffer })
}

/// Each array fills two neighbouring cells: raw, then normalized.
fn draw_row(gl: &glow::Context, grid: &Grid, index: u32, row: &Row) {
    unsafe { gl.use_program(Some(row.program)) };
    enable_attrib(gl, row.color_slot);

    for (pair, array) in row.arrays.iter().enumerate() {
        buffer::bind_buffer(gl, BufferTarget::Array, array.buffer);
        for (offset, normalized) in [false, true].into_iter().enumerate() {
            grid.cell((pair * 2 + offset) as u32, index).apply(gl);
            AttribFormat::new(3, array.scalar)
                .normalized(normalized)
                .apply(gl, row.color_slot);
            unsafe { gl.draw_arrays(glow::TRIANGLE_STRIP, 0, 4) };
        }
    }

    disable_attrib(gl, row.color_slot);
}

/// Largest channel value stored for `scalar`.
fn peak(scalar: ScalarType) -> f64 {
    match scalar {
        ScalarType::UnsignedByte => f64::from(u8::MAX),
        ScalarType::Byte => f64::from(i8::MAX),
        ScalarType::UnsignedShort => f64::from(u16::MAX),
        ScalarType::Short => f64::from(i16::MAX),
        ScalarType::Float => 1.0,
    }
}
