//! `glGetTexParameteriv` / `glGetTexParameterfv` read-back.
//!
//! Three 2D textures and three cube maps are created with different wrap and
//! filter settings. Every setting is read back both as integer and as float.
//! When all reads match, the textures are drawn in a 4x2 layout; otherwise the
//! screen stays black.

use bytemuck::{Pod, Zeroable};
use glow::HasContext;

use gles_harness::coords::{ColorRgba, Grid};
use gles_harness::gl::attrib::enable_attrib;
use gles_harness::gl::buffer::supports_u32_indices;
use gles_harness::gl::texture::{self, CUBE_FACES};
use gles_harness::gl::{
    AttribFormat, BufferInit, BufferTarget, BufferUsage, Filter, SamplerParams, TextureTarget, Wrap,
};
use gles_harness::{FrameCtx, GlTest, InitCtx, InitError, RuntimeConfig};

pub const TITLE: &str = "glGetTexParameter Final Test";

const POSITION: u32 = 0;
const TEX_COORD: u32 = 1;

const VERTEX_SHADER: &str = r#"#version 100
attribute vec2 inPosition;
attribute vec2 inTexCoord;
varying vec2 vTexCoord;
void main()
{
    vTexCoord = inTexCoord;
    gl_Position = vec4(inPosition, 0.0, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 100
precision mediump float;
varying vec2 vTexCoord;
uniform sampler2D uTexture;
void main()
{
    gl_FragColor = texture2D(uTexture, vTexCoord);
}
"#;

const CUBE_VERTEX_SHADER: &str = r#"#version 100
attribute vec2 inPosition;
varying vec3 vTexCoord;
void main()
{
    vTexCoord = vec3(inPosition, 1.0);
    gl_Position = vec4(inPosition, 0.0, 1.0);
}
"#;

const CUBE_FRAGMENT_SHADER: &str = r#"#version 100
precision mediump float;
varying vec3 vTexCoord;
uniform samplerCube uCubeTexture;
void main()
{
    gl_FragColor = textureCube(uCubeTexture, normalize(vTexCoord));
}
"#;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Vertex {
    position: [f32; 2],
    tex_coord: [f32; 2],
}

const fn vertex(x: f32, y: f32, u: f32, v: f32) -> Vertex {
    Vertex {
        position: [x, y],
        tex_coord: [u, v],
    }
}

/// Texture coordinates run past [0, 1] so the wrap modes show.
const QUAD: [Vertex; 4] = [
    vertex(-0.8, -0.8, -1.5, -1.5),
    vertex(0.8, -0.8, 2.5, -1.5),
    vertex(0.8, 0.8, 2.5, 2.5),
    vertex(-0.8, 0.8, -1.5, 2.5),
];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

const VERTEX_STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;
const TEX_COORD_OFFSET: i32 = std::mem::offset_of!(Vertex, tex_coord) as i32;

/// The sampler configurations under test, in texture order.
const CASES: [SamplerParams; 3] = [
    SamplerParams::uniform(Wrap::Repeat, Filter::Nearest, Filter::Nearest),
    SamplerParams::uniform(Wrap::MirroredRepeat, Filter::Linear, Filter::Linear),
    SamplerParams::uniform(
        Wrap::ClampToEdge,
        Filter::LinearMipmapLinear,
        Filter::Linear,
    ),
];

/// Grid cell `(col, row)` for each case, 2D textures first.
const LAYOUT_2D: [(u32, u32); 3] = [(0, 0), (0, 1), (1, 0)];
const LAYOUT_CUBE: [(u32, u32); 3] = [(2, 0), (2, 1), (3, 0)];

/// `GL_LUMINANCE`; legacy in desktop core profiles but a base format in ES 2.0.
const LUMINANCE: u32 = 0x1909;

const F_SIZE: i32 = 8;
#[rustfmt::skip]
const F_GLYPH: [u8; 64] = [
    0,   0,   0,   0,   0,   0, 0, 0,
    0, 255, 255, 255, 255, 255, 0, 0,
    0, 255,   0,   0,   0,   0, 0, 0,
    0, 255, 255, 255,   0,   0, 0, 0,
    0, 255,   0,   0,   0,   0, 0, 0,
    0, 255,   0,   0,   0,   0, 0, 0,
    0,   0,   0,   0,   0,   0, 0, 0,
    0,   0,   0,   0,   0,   0, 0, 0,
];

const BACKGROUND: ColorRgba = ColorRgba::rgb(0.1, 0.1, 0.15);

pub fn config() -> RuntimeConfig {
    RuntimeConfig::new(TITLE)
}

pub struct TextureParamsTest {
    program: glow::Program,
    cube_program: glow::Program,
    textures: [glow::Texture; 3],
    cube_maps: [glow::Texture; 3],
}

impl GlTest for TextureParamsTest {
    fn init(ctx: &mut InitCtx<'_>) -> Result<Self, InitError> {
        let program = ctx.program(
            VERTEX_SHADER,
            FRAGMENT_SHADER,
            &[(POSITION, "inPosition"), (TEX_COORD, "inTexCoord")],
        )?;
        let cube_program = ctx.program(
            CUBE_VERTEX_SHADER,
            CUBE_FRAGMENT_SHADER,
            &[(POSITION, "inPosition")],
        )?;

        if !supports_u32_indices(ctx.gl) {
            log::warn!("GL_OES_element_index_uint missing; textured quads may not draw");
        }

        ctx.buffer(
            BufferTarget::Array,
            BufferInit::from_slice(&QUAD),
            BufferUsage::Static,
        )?;
        ctx.buffer(
            BufferTarget::ElementArray,
            BufferInit::from_slice(&QUAD_INDICES),
            BufferUsage::Static,
        )?;

        // Attribute arrays are global state; both programs read slot 0.
        AttribFormat::floats(2)
            .interleaved(VERTEX_STRIDE, 0)
            .apply(ctx.gl, POSITION);
        enable_attrib(ctx.gl, POSITION);
        AttribFormat::floats(2)
            .interleaved(VERTEX_STRIDE, TEX_COORD_OFFSET)
            .apply(ctx.gl, TEX_COORD);
        enable_attrib(ctx.gl, TEX_COORD);

        let textures = create_set(ctx, TextureTarget::Tex2D)?;
        let cube_maps = create_set(ctx, TextureTarget::CubeMap)?;

        println!("\n--- Testing Textures ---");
        for (texture, params) in textures.iter().zip(CASES.iter()) {
            run_checks(ctx, TextureTarget::Tex2D, *texture, params);
        }
        for (texture, params) in cube_maps.iter().zip(CASES.iter()) {
            run_checks(ctx, TextureTarget::CubeMap, *texture, params);
        }

        println!("\n--- Test Run Complete ---");
        if ctx.report.failed() {
            println!("!!! ONE OR MORE TESTS FAILED. DISPLAYING BLACK SCREEN. !!!");
        } else {
            println!("All tests passed.");
        }

        let gl = ctx.gl;
        unsafe {
            gl.use_program(Some(program));
            let sampler = gl.get_uniform_location(program, "uTexture");
            gl.uniform_1_i32(sampler.as_ref(), 0);

            gl.use_program(Some(cube_program));
            let sampler = gl.get_uniform_location(cube_program, "uCubeTexture");
            gl.uniform_1_i32(sampler.as_ref(), 0);
        }

        Ok(Self {
            program,
            cube_program,
            textures,
            cube_maps,
        })
    }

    fn draw(&mut self, ctx: &mut FrameCtx<'_>) {
        let gl = ctx.gl;
        if ctx.report.failed() {
            ColorRgba::black().clear(gl);
            return;
        }

        BACKGROUND.clear(gl);
        let grid = ctx.grid(4, 2);
        unsafe { gl.active_texture(glow::TEXTURE0) };

        unsafe { gl.use_program(Some(self.program)) };
        draw_set(gl, &grid, TextureTarget::Tex2D, &self.textures, &LAYOUT_2D);

        unsafe { gl.use_program(Some(self.cube_program)) };
        draw_set(
            gl,
            &grid,
            TextureTarget::CubeMap,
            &self.cube_maps,
            &LAYOUT_CUBE,
        );
    }
}

fn create_set(
    ctx: &mut InitCtx<'_>,
    target: TextureTarget,
) -> Result<[glow::Texture; 3], InitError> {
    let [a, b, c] = &CASES;
    Ok([
        create_configured(ctx, target, a)?,
        create_configured(ctx, target, b)?,
        create_configured(ctx, target, c)?,
    ])
}

/// Creates a texture with level 0 filled, mipmaps when the min filter
/// samples them, then applies `params`.
fn create_configured(
    ctx: &mut InitCtx<'_>,
    target: TextureTarget,
    params: &SamplerParams,
) -> Result<glow::Texture, InitError> {
    let gl = ctx.gl;
    let handle = ctx.texture()?;
    texture::bind_texture(gl, target, handle);

    match target {
        TextureTarget::Tex2D => {
            texture::upload_level0(gl, glow::TEXTURE_2D, LUMINANCE, F_SIZE, F_SIZE, &F_GLYPH);
        }
        TextureTarget::CubeMap => {
            for (i, face) in CUBE_FACES.iter().enumerate() {
                texture::upload_level0(gl, *face, glow::RGB, 1, 1, &face_color(i));
            }
        }
    }

    if params.min_filter.uses_mipmaps() {
        unsafe { gl.generate_mipmap(target.gl_enum()) };
    }
    params.apply(gl, target);

    log::debug!("created {} texture: {}", target.name(), params.describe());
    Ok(handle)
}

fn run_checks(
    ctx: &mut InitCtx<'_>,
    target: TextureTarget,
    handle: glow::Texture,
    params: &SamplerParams,
) {
    let gl = ctx.gl;
    println!(
        "--- Running checks for {} {} ---",
        target.name(),
        params.describe()
    );
    texture::bind_texture(gl, target, handle);

    for (label, pname, expected) in params.expectations() {
        let as_int = texture::read_param_i32(gl, target, pname);
        ctx.check(as_int, expected, label);

        let as_float = texture::read_param_f32(gl, target, pname);
        ctx.check(as_float, expected as f32, &format!("{label} (as float)"));
    }
}

fn draw_set(
    gl: &glow::Context,
    grid: &Grid,
    target: TextureTarget,
    handles: &[glow::Texture; 3],
    layout: &[(u32, u32); 3],
) {
    for (handle, (col, row)) in handles.iter().zip(layout.iter()) {
        grid.cell(*col, *row).apply(gl);
        texture::bind_texture(gl, target, *handle);
        unsafe {
            gl.draw_elements(
                glow::TRIANGLES,
                QUAD_INDICES.len() as i32,
                glow::UNSIGNED_INT,
                0,
            );
        }
    }
}

/// One primary colour per cube face, in `CUBE_FACES` order.
fn face_color(face: usize) -> [u8; 3] {
    let on = |hit: bool| if hit { 255 } else { 0 };
    [
        on(face == 0 || face == 5),
        on(face == 1 || face == 4),
        on(face == 2 || face == 3),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── data ───────────────────────────────────────────────────────────────

    #[test]
    fn glyph_fills_the_texture() {
        assert_eq!(F_GLYPH.len(), (F_SIZE * F_SIZE) as usize);
        // Stem of the F runs down column 1 for five rows.
        for row in 1..6 {
            assert_eq!(F_GLYPH[row * 8 + 1], 255);
        }
        assert!(F_GLYPH[..8].iter().all(|p| *p == 0));
    }

    #[test]
    fn each_face_gets_exactly_one_channel() {
        for face in 0..CUBE_FACES.len() {
            let color = face_color(face);
            let lit = color.iter().filter(|c| **c == 255).count();
            assert_eq!(lit, 1, "face {face}");
        }
        assert_eq!(face_color(0), [255, 0, 0]);
        assert_eq!(face_color(1), [0, 255, 0]);
        assert_eq!(face_color(2), [0, 0, 255]);
    }

    #[test]
    fn vertex_layout_is_tightly_packed() {
        assert_eq!(VERTEX_STRIDE, 16);
        assert_eq!(TEX_COORD_OFFSET, 8);
        assert!(QUAD_INDICES.iter().all(|i| (*i as usize) < QUAD.len()));
    }

    // ── cases ──────────────────────────────────────────────────────────────

    #[test]
    fn only_last_case_needs_mipmaps() {
        let needs: Vec<bool> = CASES.iter().map(|c| c.min_filter.uses_mipmaps()).collect();
        assert_eq!(needs, vec![false, false, true]);
    }

    #[test]
    fn layouts_do_not_overlap() {
        let mut cells: Vec<(u32, u32)> = LAYOUT_2D
            .iter()
            .chain(LAYOUT_CUBE.iter())
            .copied()
            .collect();
        cells.sort_unstable();
        cells.dedup();
        assert_eq!(cells.len(), 6);
        assert!(cells.iter().all(|(col, row)| *col < 4 && *row < 2));
    }

    #[test]
    fn float_expectations_are_exact_enums() {
        for case in CASES {
            for (_, _, expected) in case.expectations() {
                assert_eq!(expected as f32 as i32, expected);
            }
        }
    }
}
