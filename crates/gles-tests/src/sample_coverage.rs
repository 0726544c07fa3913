//! `glSampleCoverage` on a multisampled surface.
//!
//! The same blue triangle is drawn in each quadrant of a red background with a
//! different coverage setting. Without multisampling every quadrant looks the
//! same.

use glow::HasContext;

use gles_harness::coords::ColorRgba;
use gles_harness::gl::attrib::enable_attrib;
use gles_harness::gl::{AttribFormat, BufferInit, BufferTarget, BufferUsage};
use gles_harness::{FrameCtx, GlTest, InitCtx, InitError, RuntimeConfig};

pub const TITLE: &str = "glSampleCoverage Test";
pub const SAMPLES: u8 = 4;

const POSITION: u32 = 0;

const VERTEX_SHADER: &str = r#"#version 100
attribute vec3 inPosition;
void main()
{
    gl_Position = vec4(inPosition, 1.0);
}
"#;

// Solid alpha so only the coverage mask affects the result.
const FRAGMENT_SHADER: &str = r#"#version 100
precision mediump float;
void main()
{
    gl_FragColor = vec4(0.0, 0.4, 0.8, 1.0);
}
"#;

const TRIANGLE: [f32; 9] = [-0.8, -0.8, 0.0, 0.8, -0.8, 0.0, 0.0, 0.8, 0.0];

const BACKGROUND: ColorRgba = ColorRgba::rgb(0.8, 0.0, 0.0);

/// Coverage value and invert flag; `None` leaves `GL_SAMPLE_COVERAGE` off.
type Coverage = Option<(f32, bool)>;

/// `(col, row, coverage)` per quadrant, rows from the top.
const QUADRANTS: [(u32, u32, Coverage); 4] = [
    (0, 0, None),
    (1, 0, Some((0.5, false))),
    // Inverted full coverage masks every sample: nothing shows.
    (0, 1, Some((1.0, true))),
    (1, 1, Some((0.5, true))),
];

pub fn config() -> RuntimeConfig {
    RuntimeConfig::new(TITLE).with_samples(SAMPLES)
}

pub struct SampleCoverageTest {
    program: glow::Program,
}

impl GlTest for SampleCoverageTest {
    fn init(ctx: &mut InitCtx<'_>) -> Result<Self, InitError> {
        let program = ctx.program(VERTEX_SHADER, FRAGMENT_SHADER, &[(POSITION, "inPosition")])?;

        ctx.buffer(
            BufferTarget::Array,
            BufferInit::from_slice(&TRIANGLE),
            BufferUsage::Static,
        )?;
        AttribFormat::floats(3).apply(ctx.gl, POSITION);
        enable_attrib(ctx.gl, POSITION);

        let samples = unsafe { ctx.gl.get_parameter_i32(glow::SAMPLES) };
        if samples < 2 {
            log::warn!("surface has {samples} sample(s); coverage masking will not be visible");
        } else {
            log::info!("surface has {samples} samples");
        }

        Ok(Self { program })
    }

    fn draw(&mut self, ctx: &mut FrameCtx<'_>) {
        let gl = ctx.gl;
        let grid = ctx.grid(2, 2);

        BACKGROUND.clear(gl);
        unsafe { gl.use_program(Some(self.program)) };

        for (col, row, coverage) in QUADRANTS {
            grid.cell(col, row).apply(gl);
            unsafe {
                if let Some((value, invert)) = coverage {
                    gl.enable(glow::SAMPLE_COVERAGE);
                    gl.sample_coverage(value, invert);
                }
                gl.draw_arrays(glow::TRIANGLES, 0, 3);
                gl.disable(glow::SAMPLE_COVERAGE);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrants_cover_the_grid_once() {
        let mut cells: Vec<(u32, u32)> = QUADRANTS.iter().map(|(c, r, _)| (*c, *r)).collect();
        cells.sort_unstable();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn only_the_first_quadrant_skips_coverage() {
        let off: Vec<_> = QUADRANTS.iter().filter(|(_, _, c)| c.is_none()).collect();
        assert_eq!(off.len(), 1);
        assert_eq!((off[0].0, off[0].1), (0, 0));
    }

    #[test]
    fn coverage_values_are_in_range() {
        for (_, _, coverage) in QUADRANTS {
            if let Some((value, _)) = coverage {
                assert!((0.0..=1.0).contains(&value));
            }
        }
    }

    #[test]
    fn config_requests_multisampling() {
        let config = config();
        assert_eq!(config.context.samples, Some(SAMPLES));
    }
}
