//! Window + GLES context management.
//!
//! This module is responsible for:
//! - creating the window and the GL display/config/context/surface
//! - loading and verifying GL entry points
//! - presenting frames and tracking the drawable size

mod context;
mod error;
mod init;

pub use context::GlContext;
pub use error::InitError;
pub use init::ContextConfig;
