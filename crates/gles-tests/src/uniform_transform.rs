//! `glUniformMatrix{2,3,4}fv` applied to vertex colours.
//!
//! Rows use a mat2, mat3 and mat4 program. Columns upload, left to right:
//! - the identity
//! - a colour transform
//! - the same transform with `transpose = GL_TRUE`
//! - the transform transposed by hand
//!
//! ES 2.0 requires `transpose` to be `GL_FALSE`, so the third column is
//! expected to raise `GL_INVALID_VALUE` and keep the previous matrix.

use glow::HasContext;

use gles_harness::coords::ColorRgba;
use gles_harness::gl::attrib::enable_attrib;
use gles_harness::gl::shader::compile_shader;
use gles_harness::gl::{AttribFormat, BufferInit, BufferTarget, BufferUsage, ShaderStage};
use gles_harness::{FrameCtx, GlTest, InitCtx, InitError, RuntimeConfig};

pub const TITLE: &str = "Transform Test";

const POSITION: u32 = 0;
const COLOR: u32 = 1;
const BINDINGS: [(u32, &str); 2] = [(POSITION, "inPosition"), (COLOR, "inColor")];

const VERTEX_SHADER_MAT2: &str = r#"#version 100
precision mediump float;
attribute vec3 inPosition;
attribute vec4 inColor;
uniform mat2 transform;
varying vec4 v_color;
void main()
{
    vec2 new_color = transform * vec2(inColor.r, inColor.g);
    v_color = vec4(new_color, inColor.b, inColor.a);
    gl_Position = vec4(inPosition, 1.0);
}
"#;

const VERTEX_SHADER_MAT3: &str = r#"#version 100
precision mediump float;
attribute vec3 inPosition;
attribute vec4 inColor;
uniform mat3 transform;
varying vec4 v_color;
void main()
{
    vec3 new_color = transform * inColor.rgb;
    v_color = vec4(new_color, inColor.a);
    gl_Position = vec4(inPosition, 1.0);
}
"#;

const VERTEX_SHADER_MAT4: &str = r#"#version 100
precision mediump float;
attribute vec3 inPosition;
attribute vec4 inColor;
uniform mat4 transform;
varying vec4 v_color;
void main()
{
    v_color = transform * inColor;
    gl_Position = vec4(inPosition, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 100
precision mediump float;
varying vec4 v_color;
void main()
{
    gl_FragColor = v_color;
}
"#;

const POSITIONS: [f32; 9] = [-0.7, -0.7, 0.0, 0.7, -0.7, 0.0, 0.0, 0.7, 0.0];
#[rustfmt::skip]
const COLORS: [f32; 12] = [
    1.0, 0.0, 0.0, 0.75, // left, red
    0.0, 1.0, 0.0, 0.75, // right, green
    0.0, 0.0, 1.0, 0.75, // top, blue
];

// Column-major, as GL expects with `transpose = GL_FALSE`.
const MAT2_IDENTITY: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
// Green into red.
const MAT2_TRANSFORM: [f32; 4] = [1.0, -0.8, 0.8, 1.0];
const MAT2_TRANSPOSED: [f32; 4] = [1.0, 0.8, -0.8, 1.0];

#[rustfmt::skip]
const MAT3_IDENTITY: [f32; 9] = [
    1.0, 0.0, 0.0,
    0.0, 1.0, 0.0,
    0.0, 0.0, 1.0,
];
// Green and blue into red.
#[rustfmt::skip]
const MAT3_TRANSFORM: [f32; 9] = [
    1.0, -0.8, -0.8,
    0.8,  1.0,  0.0,
    0.8,  0.0,  1.0,
];
#[rustfmt::skip]
const MAT3_TRANSPOSED: [f32; 9] = [
     1.0, 0.8, 0.8,
    -0.8, 1.0, 0.0,
    -0.8, 0.0, 1.0,
];

#[rustfmt::skip]
const MAT4_IDENTITY: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];
// Alpha picks up the colour channels: less see-through.
#[rustfmt::skip]
const MAT4_TRANSFORM: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.5, 0.5, 0.5, 1.0,
];
#[rustfmt::skip]
const MAT4_TRANSPOSED: [f32; 16] = [
    1.0, 0.0, 0.0, 0.5,
    0.0, 1.0, 0.0, 0.5,
    0.0, 0.0, 1.0, 0.5,
    0.0, 0.0, 0.0, 1.0,
];

const BACKGROUND: ColorRgba = ColorRgba::rgb(0.9, 0.9, 0.9);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum MatrixSize {
    Two,
    Three,
    Four,
}

impl MatrixSize {
    const fn dim(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }

    const fn vertex_shader(self) -> &'static str {
        match self {
            Self::Two => VERTEX_SHADER_MAT2,
            Self::Three => VERTEX_SHADER_MAT3,
            Self::Four => VERTEX_SHADER_MAT4,
        }
    }

    fn upload(
        self,
        gl: &glow::Context,
        location: Option<&glow::UniformLocation>,
        transpose: bool,
        m: &[f32],
    ) {
        debug_assert_eq!(m.len(), self.dim() * self.dim());
        unsafe {
            match self {
                Self::Two => gl.uniform_matrix_2_f32_slice(location, transpose, m),
                Self::Three => gl.uniform_matrix_3_f32_slice(location, transpose, m),
                Self::Four => gl.uniform_matrix_4_f32_slice(location, transpose, m),
            }
        }
    }
}

/// One grid row: a matrix size and its three reference matrices.
#[derive(Debug, Copy, Clone)]
struct MatrixSet {
    size: MatrixSize,
    identity: &'static [f32],
    transform: &'static [f32],
    transposed: &'static [f32],
}

const ROWS: [MatrixSet; 3] = [
    MatrixSet {
        size: MatrixSize::Two,
        identity: &MAT2_IDENTITY,
        transform: &MAT2_TRANSFORM,
        transposed: &MAT2_TRANSPOSED,
    },
    MatrixSet {
        size: MatrixSize::Three,
        identity: &MAT3_IDENTITY,
        transform: &MAT3_TRANSFORM,
        transposed: &MAT3_TRANSPOSED,
    },
    MatrixSet {
        size: MatrixSize::Four,
        identity: &MAT4_IDENTITY,
        transform: &MAT4_TRANSFORM,
        transposed: &MAT4_TRANSPOSED,
    },
];

impl MatrixSet {
    /// `(matrix, transpose flag)` for each column, left to right.
    fn columns(&self) -> [(&'static [f32], bool); 4] {
        [
            (self.identity, false),
            (self.transform, false),
            (self.transform, true),
            (self.transposed, false),
        ]
    }
}

pub fn config() -> RuntimeConfig {
    RuntimeConfig::new(TITLE)
}

struct RowProgram {
    set: MatrixSet,
    program: glow::Program,
    transform: Option<glow::UniformLocation>,
}

pub struct UniformTransformTest {
    rows: Vec<RowProgram>,
}

impl GlTest for UniformTransformTest {
    fn init(ctx: &mut InitCtx<'_>) -> Result<Self, InitError> {
        let gl = ctx.gl;
        unsafe {
            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
        }

        let fragment = compile_shader(gl, ShaderStage::Fragment, FRAGMENT_SHADER)?;
        let rows: Result<Vec<_>, _> = ROWS
            .iter()
            .map(|set| link_row(ctx, *set, fragment))
            .collect();
        unsafe { gl.delete_shader(fragment) };
        let rows = rows?;

        ctx.buffer(
            BufferTarget::Array,
            BufferInit::from_slice(&POSITIONS),
            BufferUsage::Static,
        )?;
        AttribFormat::floats(3).apply(gl, POSITION);
        enable_attrib(gl, POSITION);

        ctx.buffer(
            BufferTarget::Array,
            BufferInit::from_slice(&COLORS),
            BufferUsage::Static,
        )?;
        AttribFormat::floats(4).apply(gl, COLOR);
        enable_attrib(gl, COLOR);

        Ok(Self { rows })
    }

    fn draw(&mut self, ctx: &mut FrameCtx<'_>) {
        let gl = ctx.gl;
        let grid = ctx.grid(4, 3);

        BACKGROUND.clear(gl);
        for (row, entry) in self.rows.iter().enumerate() {
            unsafe { gl.use_program(Some(entry.program)) };
            for (col, (matrix, transpose)) in entry.set.columns().into_iter().enumerate() {
                grid.cell(col as u32, row as u32).apply(gl);
                entry.set.size.upload(gl, entry.transform.as_ref(), transpose, matrix);
                unsafe { gl.draw_arrays(glow::TRIANGLES, 0, 3) };
            }
        }
    }
}

/// Links `set`'s vertex shader against the shared fragment shader. The vertex
/// shader is deleted whether or not linking succeeds.
fn link_row(
    ctx: &mut InitCtx<'_>,
    set: MatrixSet,
    fragment: glow::Shader,
) -> Result<RowProgram, InitError> {
    let gl = ctx.gl;
    let vertex = compile_shader(gl, ShaderStage::Vertex, set.size.vertex_shader())?;
    let program = ctx.link(&[vertex, fragment], &BINDINGS);
    unsafe { gl.delete_shader(vertex) };
    let program = program?;

    let transform = unsafe { gl.get_uniform_location(program, "transform") };
    Ok(RowProgram {
        set,
        program,
        transform,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transpose(m: &[f32], n: usize) -> Vec<f32> {
        (0..n * n).map(|i| m[(i % n) * n + i / n]).collect()
    }

    #[test]
    fn matrices_have_square_sizes() {
        for set in ROWS {
            let len = set.size.dim() * set.size.dim();
            assert_eq!(set.identity.len(), len);
            assert_eq!(set.transform.len(), len);
            assert_eq!(set.transposed.len(), len);
        }
    }

    #[test]
    fn manual_transpose_matches_transform() {
        for set in ROWS {
            let n = set.size.dim();
            let manual = transpose(set.transform, n);
            assert_eq!(manual, set.transposed.to_vec(), "mat{n}");
        }
    }

    #[test]
    fn identities_are_identities() {
        for set in ROWS {
            let n = set.size.dim();
            for (i, v) in set.identity.iter().enumerate() {
                let expected = if i % (n + 1) == 0 { 1.0 } else { 0.0 };
                assert_eq!(*v, expected);
            }
        }
    }

    #[test]
    fn only_third_column_sets_transpose() {
        let flags: Vec<bool> = ROWS[0].columns().iter().map(|(_, t)| *t).collect();
        assert_eq!(flags, vec![false, false, true, false]);
    }

    #[test]
    fn bindings_match_shader_attributes() {
        for set in ROWS {
            let source = set.size.vertex_shader();
            for (_, name) in BINDINGS {
                assert!(source.contains(&format!(" {name};")), "{name}");
            }
        }
    }

    #[test]
    fn colors_are_translucent() {
        assert!(COLORS.chunks_exact(4).all(|c| c[3] == 0.75));
        assert_eq!(COLORS.len() / 4, POSITIONS.len() / 3);
    }
}
