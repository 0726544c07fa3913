use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::check::{CheckReport, EXIT_FAILURE};
use crate::core::{FrameCtx, GlTest, InitCtx};
use crate::device::{ContextConfig, GlContext, InitError};
use crate::gl::{GlResources, ReleaseCounts};
use crate::time::FrameClock;

/// Environment variable that closes the window after N presented frames.
pub const MAX_FRAMES_ENV: &str = "GLES_TEST_MAX_FRAMES";

/// Window/runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub context: ContextConfig,

    /// Stop after this many frames instead of waiting for the window to be
    /// closed. Intended for unattended runs.
    pub max_frames: Option<u64>,
}

impl RuntimeConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            context: ContextConfig {
                title: title.into(),
                ..ContextConfig::default()
            },
            max_frames: None,
        }
    }

    pub fn with_samples(mut self, samples: u8) -> Self {
        self.context.samples = Some(samples);
        self
    }

    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        let value = std::env::var(MAX_FRAMES_ENV).ok();
        self.apply_max_frames_override(value.as_deref())
    }

    fn apply_max_frames_override(self, value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return self;
        };
        match raw.trim().parse::<u64>() {
            Ok(0) | Err(_) => {
                log::warn!("ignoring {MAX_FRAMES_ENV}={raw:?}: expected a positive integer");
                self
            }
            Ok(n) => {
                log::debug!("{MAX_FRAMES_ENV}: stopping after {n} frames");
                self.with_max_frames(n)
            }
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub frames: u64,
    pub report: CheckReport,
    pub released: ReleaseCounts,
}

impl RunSummary {
    pub fn exit_code(&self) -> i32 {
        self.report.exit_code()
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs `T` to completion: context bootstrap, `init`, frame loop,
    /// `cleanup`, then release of every tracked GPU object.
    pub fn run<T: GlTest>(config: RuntimeConfig) -> Result<RunSummary, InitError> {
        let event_loop = EventLoop::new().map_err(InitError::context)?;
        let mut state = AppState::<T>::new(config);

        event_loop.run_app(&mut state).map_err(InitError::context)?;

        state.finish()
    }
}

/// Runs `T` and maps the outcome to a process exit status.
///
/// `0` when the window closed normally and every check passed, `-1` on an
/// initialization error or any failed check.
pub fn run_test<T: GlTest>(config: RuntimeConfig) -> i32 {
    match Runtime::run::<T>(config) {
        Ok(summary) => {
            log::info!(
                "finished after {} frames, released {} objects",
                summary.frames,
                summary.released.total()
            );
            summary.exit_code()
        }
        Err(err) => {
            log::error!("{err}");
            EXIT_FAILURE
        }
    }
}

struct Live<T> {
    context: GlContext,
    test: T,
    clock: FrameClock,
}

struct AppState<T: GlTest> {
    config: RuntimeConfig,
    live: Option<Live<T>>,
    // Kept apart from `live` so an init failure can still release what was
    // created before it.
    context: Option<GlContext>,
    report: CheckReport,
    resources: GlResources,
    error: Option<InitError>,
    frames: u64,
    exit_requested: bool,
}

impl<T: GlTest> AppState<T> {
    fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            live: None,
            context: None,
            report: CheckReport::new(),
            resources: GlResources::default(),
            error: None,
            frames: 0,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: InitError) {
        log::error!("initialization failed: {err}");
        self.error = Some(err);
        self.request_exit(event_loop);
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), InitError> {
        let context = GlContext::create(event_loop, &self.config.context)?;
        log::info!(
            "{}: {}x{} drawable",
            self.config.context.title,
            context.size().width,
            context.size().height
        );

        let test = {
            let mut ctx = InitCtx::new(
                context.gl(),
                context.size(),
                &mut self.report,
                &mut self.resources,
            );
            T::init(&mut ctx)
        };

        let test = match test {
            Ok(test) => test,
            Err(err) => {
                self.context = Some(context);
                return Err(err);
            }
        };

        context.request_redraw();
        self.live = Some(Live {
            context,
            test,
            clock: FrameClock::new(),
        });
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(live) = self.live.as_mut() else {
            return;
        };

        let mut ctx = FrameCtx {
            gl: live.context.gl(),
            time: live.clock.tick(),
            size: live.context.size(),
            report: &self.report,
        };
        live.test.draw(&mut ctx);

        if let Err(err) = live.context.present() {
            log::error!("{err:#}");
        }
        self.frames += 1;

        if self.config.max_frames.is_some_and(|max| self.frames >= max) {
            log::info!("reached {} frames, closing", self.frames);
            self.request_exit(event_loop);
        }
    }

    /// Runs teardown after the event loop has returned.
    fn finish(mut self) -> Result<RunSummary, InitError> {
        let mut released = ReleaseCounts::default();

        if let Some(mut live) = self.live.take() {
            let gl = live.context.gl();
            live.test.cleanup(gl);
            released = self.resources.release(gl);
        } else if let Some(context) = self.context.take() {
            released = self.resources.release(context.gl());
        }

        if let Some(err) = self.error.take() {
            return Err(err);
        }

        self.report.print_summary();

        Ok(RunSummary {
            frames: self.frames,
            report: self.report,
            released,
        })
    }
}

impl<T: GlTest> ApplicationHandler for AppState<T> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.live.is_some() || self.error.is_some() {
            return;
        }

        if let Err(err) = self.start(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; every test either animates or is meant to be
        // watched live.
        if let Some(live) = self.live.as_ref() {
            live.context.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::debug!("close requested");
                self.request_exit(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                if let Some(live) = self.live.as_mut() {
                    live.context.resize(new_size);
                    live.context.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;

    #[test]
    fn new_config_uses_test_title_and_defaults() {
        let c = RuntimeConfig::new("glGetProgramiv Test");
        assert_eq!(c.context.title, "glGetProgramiv Test");
        assert_eq!(c.context.size, PhysicalSize::new(1920, 1080));
        assert_eq!(c.context.gles_version, (2, 0));
        assert_eq!(c.context.samples, None);
        assert_eq!(c.max_frames, None);
    }

    #[test]
    fn builder_methods_compose() {
        let c = RuntimeConfig::new("t").with_samples(4).with_max_frames(3);
        assert_eq!(c.context.samples, Some(4));
        assert!(c.context.vsync);
        assert_eq!(c.max_frames, Some(3));
    }

    // ── env override ──────────────────────────────────────────────────────

    #[test]
    fn max_frames_override_parses_positive_integers() {
        let c = RuntimeConfig::new("t").apply_max_frames_override(Some(" 120 "));
        assert_eq!(c.max_frames, Some(120));
    }

    #[test]
    fn max_frames_override_ignores_garbage_and_zero() {
        let base = RuntimeConfig::new("t").with_max_frames(5);
        let garbage = base.clone().apply_max_frames_override(Some("abc"));
        assert_eq!(garbage.max_frames, Some(5));
        let zero = base.clone().apply_max_frames_override(Some("0"));
        assert_eq!(zero.max_frames, Some(5));
        assert_eq!(base.apply_max_frames_override(None).max_frames, Some(5));
    }

    #[test]
    fn summary_exit_code_follows_report() {
        let mut report = CheckReport::new();
        report.check(1, 2, "mismatch");
        let s = RunSummary {
            frames: 0,
            report,
            released: ReleaseCounts::default(),
        };
        assert_eq!(s.exit_code(), EXIT_FAILURE);
    }
}
