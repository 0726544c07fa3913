use bytemuck::Pod;
use glow::HasContext;

use crate::device::InitError;

/// Access-pattern hint passed to `glBufferData`.
///
/// The hint only steers driver placement; a buffer behaves the same whatever
/// hint it was given.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BufferUsage {
    /// Respecified wholesale, drawn a few times.
    Stream,
    /// Partially updated often, drawn many times.
    Dynamic,
    /// Written once, drawn many times.
    Static,
}

impl BufferUsage {
    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::Stream => glow::STREAM_DRAW,
            Self::Dynamic => glow::DYNAMIC_DRAW,
            Self::Static => glow::STATIC_DRAW,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BufferTarget {
    Array,
    ElementArray,
}

impl BufferTarget {
    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::Array => glow::ARRAY_BUFFER,
            Self::ElementArray => glow::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// Initial contents of a new buffer store.
#[derive(Debug, Copy, Clone)]
pub enum BufferInit<'a> {
    Data(&'a [u8]),
    /// Allocate `len` bytes with undefined contents.
    Uninitialized(usize),
}

impl<'a> BufferInit<'a> {
    pub fn from_slice<T: Pod>(data: &'a [T]) -> Self {
        Self::Data(bytemuck::cast_slice(data))
    }

    /// Same size as `data`, contents left undefined.
    pub fn sized_like<T: Pod>(data: &[T]) -> Self {
        Self::Uninitialized(std::mem::size_of_val(data))
    }
}

/// Creates a buffer, binds it to `target` and allocates its store.
///
/// The buffer is left bound.
pub fn create_buffer(
    gl: &glow::Context,
    target: BufferTarget,
    init: BufferInit<'_>,
    usage: BufferUsage,
) -> Result<glow::Buffer, InitError> {
    unsafe {
        let buffer = gl.create_buffer().map_err(InitError::driver)?;
        gl.bind_buffer(target.gl_enum(), Some(buffer));
        match init {
            BufferInit::Data(bytes) => {
                gl.buffer_data_u8_slice(target.gl_enum(), bytes, usage.gl_enum());
            }
            BufferInit::Uninitialized(len) => {
                let len = i32::try_from(len).map_err(InitError::driver)?;
                gl.buffer_data_size(target.gl_enum(), len, usage.gl_enum());
            }
        }
        Ok(buffer)
    }
}

pub fn bind_buffer(gl: &glow::Context, target: BufferTarget, buffer: glow::Buffer) {
    unsafe { gl.bind_buffer(target.gl_enum(), Some(buffer)) };
}

/// Replaces the whole data store (`glBufferData`), orphaning the old one.
pub fn respecify<T: Pod>(
    gl: &glow::Context,
    target: BufferTarget,
    buffer: glow::Buffer,
    data: &[T],
    usage: BufferUsage,
) {
    unsafe {
        gl.bind_buffer(target.gl_enum(), Some(buffer));
        gl.buffer_data_u8_slice(
            target.gl_enum(),
            bytemuck::cast_slice(data),
            usage.gl_enum(),
        );
    }
}

/// Overwrites part of the existing store (`glBufferSubData`).
pub fn update<T: Pod>(
    gl: &glow::Context,
    target: BufferTarget,
    buffer: glow::Buffer,
    offset: i32,
    data: &[T],
) {
    unsafe {
        gl.bind_buffer(target.gl_enum(), Some(buffer));
        gl.buffer_sub_data_u8_slice(target.gl_enum(), offset, bytemuck::cast_slice(data));
    }
}

/// Whether `GL_UNSIGNED_INT` indices are usable. Core ES 2.0 only guarantees
/// byte and short indices; 32-bit ones need `OES_element_index_uint`.
pub fn supports_u32_indices(gl: &glow::Context) -> bool {
    gl.supported_extensions().contains("GL_OES_element_index_uint")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_hints_map_to_gl() {
        assert_eq!(BufferUsage::Stream.gl_enum(), 0x88E0);
        assert_eq!(BufferUsage::Static.gl_enum(), 0x88E4);
        assert_eq!(BufferUsage::Dynamic.gl_enum(), 0x88E8);
    }

    #[test]
    fn init_lengths_are_in_bytes() {
        let tri = [0.0f32; 9];
        let BufferInit::Data(bytes) = BufferInit::from_slice(&tri) else {
            panic!("from_slice must carry data");
        };
        assert_eq!(bytes.len(), 36);
        assert!(matches!(BufferInit::sized_like(&tri), BufferInit::Uninitialized(36)));

        let idx = [0u32, 1, 2];
        let BufferInit::Data(bytes) = BufferInit::from_slice(&idx) else {
            panic!("from_slice must carry data");
        };
        assert_eq!(bytes.len(), 12);
    }
}
