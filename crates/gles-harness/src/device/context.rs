use std::ffi::CStr;
use std::num::NonZeroU32;

use anyhow::{Context, Result};
use glow::HasContext;
use glutin::config::{Api, Config, ConfigTemplateBuilder};
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::{Display, DisplayApiPreference};
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawWindowHandle};
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use super::{ContextConfig, InitError};

/// Entry points every test program relies on. A driver that cannot resolve
/// one of these is rejected before any test code runs.
const REQUIRED_ENTRY_POINTS: &[&CStr] = &[
    c"glCreateShader",
    c"glCreateProgram",
    c"glLinkProgram",
    c"glGetProgramiv",
    c"glGenBuffers",
    c"glBufferData",
    c"glBufferSubData",
    c"glGenTextures",
    c"glTexImage2D",
    c"glGetTexParameteriv",
    c"glGetTexParameterfv",
    c"glVertexAttribPointer",
    c"glUniformMatrix4fv",
    c"glSampleCoverage",
    c"glDrawArrays",
    c"glDrawElements",
];

/// Window + current GLES context + loaded entry points.
///
/// This type is the low-level rendering context:
/// - creates the window and a GL display for it
/// - picks a framebuffer config and creates a GLES context on a window surface
/// - loads the GL entry points through `glow`
///
/// The context stays current on the creating thread for the whole run.
pub struct GlContext {
    gl: glow::Context,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
    size: PhysicalSize<u32>,
}

impl GlContext {
    /// Creates the window and brings up a current GLES context for it.
    pub fn create(event_loop: &ActiveEventLoop, config: &ContextConfig) -> Result<Self, InitError> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let raw_window = window
            .window_handle()
            .context("window has no native handle")?
            .as_raw();
        let raw_display = window
            .display_handle()
            .context("window has no display handle")?
            .as_raw();

        let display = unsafe { Display::new(raw_display, display_preference(raw_window)) }
            .context("failed to create GL display")?;

        let gl_config = choose_config(&display, raw_window, config)?;
        log::debug!(
            "picked GL config: samples={} alpha={} depth={} stencil={}",
            gl_config.num_samples(),
            gl_config.alpha_size(),
            gl_config.depth_size(),
            gl_config.stencil_size()
        );

        let (major, minor) = config.gles_version;
        let context_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(Some(Version::new(major, minor))))
            .build(Some(raw_window));

        let not_current = unsafe { display.create_context(&gl_config, &context_attrs) }
            .with_context(|| format!("failed to create a GLES {major}.{minor} context"))?;

        let size = window.inner_size();
        let width = NonZeroU32::new(size.width).context("window has zero width")?;
        let height = NonZeroU32::new(size.height).context("window has zero height")?;
        let surface_attrs =
            SurfaceAttributesBuilder::<WindowSurface>::new().build(raw_window, width, height);

        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attrs) }
            .context("failed to create window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(err) = surface.set_swap_interval(&context, interval) {
            log::warn!("failed to set swap interval: {err}");
        }

        let missing: Vec<String> = REQUIRED_ENTRY_POINTS
            .iter()
            .filter(|name| display.get_proc_address(name).is_null())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        if !missing.is_empty() {
            return Err(InitError::Driver(format!(
                "missing entry points: {}",
                missing.join(", ")
            )));
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name))
        };
        log_driver_info(&gl);

        Ok(Self {
            gl,
            surface,
            context,
            window,
            size,
        })
    }

    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Current drawable size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Resizes the window surface. Zero sizes (minimized windows) only update
    /// the stored size; the surface keeps its last valid extent.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        let (Some(w), Some(h)) = (NonZeroU32::new(new_size.width), NonZeroU32::new(new_size.height))
        else {
            log::debug!("ignoring resize to {}x{}", new_size.width, new_size.height);
            return;
        };
        self.surface.resize(&self.context, w, h);
    }

    /// Presents the back buffer.
    pub fn present(&self) -> Result<()> {
        self.window.pre_present_notify();
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap buffers")
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

#[cfg(target_os = "windows")]
fn display_preference(window: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::EglThenWgl(Some(window))
}

#[cfg(target_os = "macos")]
fn display_preference(_window: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Cgl
}

#[cfg(all(unix, not(target_os = "macos")))]
fn display_preference(_window: RawWindowHandle) -> DisplayApiPreference {
    DisplayApiPreference::Egl
}

fn choose_config(
    display: &Display,
    raw_window: RawWindowHandle,
    config: &ContextConfig,
) -> Result<Config> {
    let mut template = ConfigTemplateBuilder::new()
        .with_api(Api::GLES2)
        .with_alpha_size(8)
        .compatible_with_native_window(raw_window);
    if let Some(samples) = config.samples {
        template = template.with_multisampling(samples);
    }

    let mut configs: Vec<Config> = unsafe { display.find_configs(template.build()) }
        .context("failed to enumerate GL configs")?
        .collect();

    let samples: Vec<u8> = configs.iter().map(|c| c.num_samples()).collect();
    let index = pick_config(&samples, config.samples)
        .context("no GL config supports GLES 2.0 on this window")?;

    if let Some(requested) = config.samples {
        if samples[index] < requested {
            log::warn!(
                "requested {requested}x multisampling, best available is {}x",
                samples[index]
            );
        }
    }

    Ok(configs.swap_remove(index))
}

/// Picks a config index by sample count.
///
/// With a request, the smallest count at or above it wins, falling back to
/// the largest available. Without one, the smallest count wins.
fn pick_config(available: &[u8], requested: Option<u8>) -> Option<usize> {
    let indexed = || available.iter().copied().enumerate();

    match requested {
        Some(want) => indexed()
            .filter(|&(_, s)| s >= want)
            .min_by_key(|&(_, s)| s)
            .or_else(|| indexed().max_by_key(|&(_, s)| s))
            .map(|(i, _)| i),
        None => indexed().min_by_key(|&(_, s)| s).map(|(i, _)| i),
    }
}

fn log_driver_info(gl: &glow::Context) {
    let (vendor, renderer, version, glsl) = unsafe {
        (
            gl.get_parameter_string(glow::VENDOR),
            gl.get_parameter_string(glow::RENDERER),
            gl.get_parameter_string(glow::VERSION),
            gl.get_parameter_string(glow::SHADING_LANGUAGE_VERSION),
        )
    };
    log::info!("GL vendor: {vendor}");
    log::info!("GL renderer: {renderer}");
    log::info!("GL version: {version}");
    log::info!("GLSL version: {glsl}");

    if !version.starts_with("OpenGL ES") {
        log::warn!("context does not report an OpenGL ES version string");
    }
}
