use glow::HasContext;

/// Linear RGBA color.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline]
    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Clears the color buffer of the bound framebuffer to this color.
    pub fn clear(self, gl: &glow::Context) {
        unsafe {
            gl.clear_color(self.r, self.g, self.b, self.a);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    /// Uploads `rgb` to a `vec3` uniform.
    pub fn set_uniform_rgb(self, gl: &glow::Context, location: Option<&glow::UniformLocation>) {
        unsafe { gl.uniform_3_f32(location, self.r, self.g, self.b) };
    }

    /// Uploads `rgba` to a `vec4` uniform.
    pub fn set_uniform_rgba(self, gl: &glow::Context, location: Option<&glow::UniformLocation>) {
        unsafe { gl.uniform_4_f32(location, self.r, self.g, self.b, self.a) };
    }
}
