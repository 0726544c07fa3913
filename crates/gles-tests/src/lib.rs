//! OpenGL ES 2.0 test programs.
//!
//! Each module is one self-contained test. The binaries in `src/bin` only pick
//! a module and hand its test type to [`run`].

pub mod buffer_usage;
pub mod program_introspection;
pub mod sample_coverage;
pub mod texture_params;
pub mod uniform_transform;
pub mod vertex_attrib;

use gles_harness::logging::{init_logging, LoggingConfig};
use gles_harness::{run_test, GlTest, RuntimeConfig};

/// Shared `main` body: logging, environment overrides, run, exit.
pub fn run<T: GlTest>(config: RuntimeConfig) -> ! {
    init_logging(LoggingConfig::with_default_filter("info,winit=warn"));
    let code = run_test::<T>(config.with_env_overrides());
    std::process::exit(code)
}
