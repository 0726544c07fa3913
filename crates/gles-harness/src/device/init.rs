use winit::dpi::PhysicalSize;

/// Window and context parameters.
///
/// Defaults match the layout every test is drawn for: a 1920x1080 window
/// with a GLES 2.0 context and no multisampling.
#[derive(Debug, Clone)]
pub struct ContextConfig {
    pub title: String,

    /// Initial drawable size in physical pixels.
    pub size: PhysicalSize<u32>,

    /// Requested GLES version as `(major, minor)`.
    pub gles_version: (u8, u8),

    /// Sample count for the default framebuffer. `None` prefers a
    /// single-sampled config.
    pub samples: Option<u8>,

    /// Wait for vblank on swap.
    pub vsync: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            title: "gles-harness".to_string(),
            size: PhysicalSize::new(1920, 1080),
            gles_version: (2, 0),
            samples: None,
            vsync: true,
        }
    }
}
