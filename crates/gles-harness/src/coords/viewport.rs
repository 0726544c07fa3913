use glow::HasContext;

/// Sub-rectangle of the default framebuffer in GL window coordinates.
///
/// Origin is bottom-left, units are physical pixels, matching `glViewport`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Viewport covering a whole `width` x `height` surface.
    #[inline]
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    /// Sets this rectangle as the current GL viewport.
    pub fn apply(self, gl: &glow::Context) {
        unsafe { gl.viewport(self.x, self.y, self.width, self.height) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_covers_surface() {
        let v = Viewport::full(1920, 1080);
        assert_eq!(v, Viewport::new(0, 0, 1920, 1080));
    }

}
