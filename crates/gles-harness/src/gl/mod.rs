//! Thin typed layer over the GLES 2.0 calls the tests exercise.
//!
//! Helpers bind what they touch and leave it bound; they never restore
//! previous GL state.

pub mod attrib;
pub mod buffer;
pub mod resources;
pub mod shader;
pub mod texture;

pub use attrib::{AttribFormat, ScalarType};
pub use buffer::{BufferInit, BufferTarget, BufferUsage};
pub use resources::{GlResources, Ledger, ReleaseCounts};
pub use shader::ShaderStage;
pub use texture::{Filter, SamplerParams, TextureTarget, Wrap};
