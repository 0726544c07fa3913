//! `glGetProgramiv` queries against a known program.
//!
//! A program is linked from shaders with a fixed interface and every queried
//! value is asserted. Afterwards a square is drawn green when all
//! checks passed and red otherwise.

use glow::HasContext;

use gles_harness::coords::ColorRgba;
use gles_harness::gl::attrib::enable_attrib;
use gles_harness::gl::shader::{compile_all, delete_shaders, link_program, program_param};
use gles_harness::gl::{AttribFormat, BufferInit, BufferTarget, BufferUsage, ShaderStage};
use gles_harness::{FrameCtx, GlTest, InitCtx, InitError, RuntimeConfig};

pub const TITLE: &str = "glGetProgramiv Test";

const GL_TRUE: i32 = 1;
const GL_FALSE: i32 = 0;

const SUBJECT_VERTEX_SHADER: &str = r#"#version 100
attribute vec3 inPosition;
attribute vec3 inColor;
varying vec3 v_color_unused;
void main()
{
    v_color_unused = inColor;
    gl_Position = vec4(inPosition, 1.0);
}
"#;

const SUBJECT_FRAGMENT_SHADER: &str = r#"#version 100
precision mediump float;
uniform vec3 uSomeUniform;
varying vec3 v_color_unused;
void main()
{
    vec3 ranVal = v_color_unused * uSomeUniform;
    gl_FragColor = vec4(ranVal, 1.0);
}
"#;

const DRAW_VERTEX_SHADER: &str = r#"#version 100
attribute vec2 aPos;
void main() {
    gl_Position = vec4(aPos, 0.0, 1.0);
}
"#;

const DRAW_FRAGMENT_SHADER: &str = r#"#version 100
precision mediump float;
uniform vec4 uDrawColor;
void main() {
    gl_FragColor = uDrawColor;
}
"#;

/// `(pname, expected, label)` for the queries made right after linking.
const LINKED_EXPECTATIONS: [(u32, i32, &str); 5] = [
    (glow::LINK_STATUS, GL_TRUE, "GL_LINK_STATUS"),
    (glow::ACTIVE_ATTRIBUTES, 2, "GL_ACTIVE_ATTRIBUTES"),
    // "inPosition" plus the terminating NUL.
    (glow::ACTIVE_ATTRIBUTE_MAX_LENGTH, 11, "GL_ACTIVE_ATTRIBUTE_MAX_LENGTH"),
    (glow::ACTIVE_UNIFORMS, 1, "GL_ACTIVE_UNIFORMS"),
    (glow::ATTACHED_SHADERS, 2, "GL_ATTACHED_SHADERS"),
];

const SQUARE: [f32; 8] = [
    -0.5, -0.5, // bottom-left
    0.5, -0.5, // bottom-right
    -0.5, 0.5, // top-left
    0.5, 0.5, // top-right
];

const BACKGROUND: ColorRgba = ColorRgba::rgb(0.1, 0.1, 0.1);
const PASS: ColorRgba = ColorRgba::rgb(0.2, 0.8, 0.3);
const FAIL: ColorRgba = ColorRgba::rgb(1.0, 0.0, 0.0);

pub fn config() -> RuntimeConfig {
    RuntimeConfig::new(TITLE)
}

pub struct ProgramIntrospectionTest;

impl GlTest for ProgramIntrospectionTest {
    fn init(ctx: &mut InitCtx<'_>) -> Result<Self, InitError> {
        inspect_subject(ctx)?;

        let program = ctx.program(DRAW_VERTEX_SHADER, DRAW_FRAGMENT_SHADER, &[])?;
        let position = unsafe { ctx.gl.get_attrib_location(program, "aPos") }.ok_or_else(|| {
            InitError::driver("aPos is not an active attribute of the draw program")
        })?;

        ctx.buffer(
            BufferTarget::Array,
            BufferInit::from_slice(&SQUARE),
            BufferUsage::Static,
        )?;
        AttribFormat::floats(2).apply(ctx.gl, position);
        enable_attrib(ctx.gl, position);

        let gl = ctx.gl;
        unsafe { gl.use_program(Some(program)) };
        let color = unsafe { gl.get_uniform_location(program, "uDrawColor") };
        if ctx.report.failed() {
            FAIL.set_uniform_rgba(gl, color.as_ref());
            println!("\nOne or more tests FAILED. Drawing square in RED.");
        } else {
            PASS.set_uniform_rgba(gl, color.as_ref());
            println!("\nAll tests PASSED. Drawing square in GREEN.");
        }

        Ok(Self)
    }

    fn draw(&mut self, ctx: &mut FrameCtx<'_>) {
        let gl = ctx.gl;
        ctx.full_viewport().apply(gl);
        BACKGROUND.clear(gl);
        unsafe { gl.draw_arrays(glow::TRIANGLE_STRIP, 0, 4) };
    }
}

/// Links the subject program, runs every query on it and deletes it again.
///
/// The subject is not tracked: its deletion while current is one of the
/// things being checked.
fn inspect_subject(ctx: &mut InitCtx<'_>) -> Result<(), InitError> {
    let gl = ctx.gl;
    let shaders = compile_all(
        gl,
        &[
            (ShaderStage::Vertex, SUBJECT_VERTEX_SHADER),
            (ShaderStage::Fragment, SUBJECT_FRAGMENT_SHADER),
        ],
    )?;
    let subject = link_program(gl, &shaders, &[])
        .inspect_err(|_| delete_shaders(gl, &shaders))?;

    println!("--- Running OpenGL Assertions ---");
    for (pname, expected, label) in LINKED_EXPECTATIONS {
        ctx.check(program_param(gl, subject, pname), expected, label);
    }

    unsafe { gl.use_program(Some(subject)) };
    ctx.check(
        program_param(gl, subject, glow::DELETE_STATUS),
        GL_FALSE,
        "GL_DELETE_STATUS (before deletion)",
    );

    // Only flagged: the program stays alive while it is current.
    unsafe { gl.delete_program(subject) };
    ctx.check(
        program_param(gl, subject, glow::DELETE_STATUS),
        GL_TRUE,
        "GL_DELETE_STATUS (after deletion)",
    );
    println!("---------------------------------");

    unsafe { gl.use_program(None) };
    delete_shaders(gl, &shaders);
    log::debug!("subject program released");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared(source: &str, qualifier: &str) -> Vec<String> {
        source
            .lines()
            .filter_map(|line| line.trim().strip_prefix(qualifier))
            .filter_map(|rest| rest.trim().trim_end_matches(';').split_whitespace().last())
            .map(str::to_owned)
            .collect()
    }

    fn expected(pname: u32) -> i32 {
        LINKED_EXPECTATIONS
            .iter()
            .find(|(p, _, _)| *p == pname)
            .map(|(_, value, _)| *value)
            .unwrap_or(i32::MIN)
    }

    #[test]
    fn attribute_expectations_match_vertex_source() {
        let attributes = declared(SUBJECT_VERTEX_SHADER, "attribute ");
        assert_eq!(attributes, vec!["inPosition", "inColor"]);
        assert_eq!(expected(glow::ACTIVE_ATTRIBUTES), attributes.len() as i32);

        let longest = attributes.iter().map(String::len).max().unwrap_or(0);
        assert_eq!(
            expected(glow::ACTIVE_ATTRIBUTE_MAX_LENGTH),
            longest as i32 + 1
        );
    }

    #[test]
    fn uniform_expectation_matches_fragment_source() {
        let uniforms = declared(SUBJECT_FRAGMENT_SHADER, "uniform ");
        assert_eq!(uniforms, vec!["uSomeUniform"]);
        assert_eq!(expected(glow::ACTIVE_UNIFORMS), 1);
    }

    #[test]
    fn subject_links_two_shaders() {
        assert_eq!(expected(glow::ATTACHED_SHADERS), 2);
        assert_eq!(expected(glow::LINK_STATUS), GL_TRUE);
    }

    #[test]
    fn square_is_a_four_vertex_strip() {
        assert_eq!(SQUARE.len(), 4 * 2);
    }
}
