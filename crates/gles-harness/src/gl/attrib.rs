use glow::HasContext;

/// Component type read by `glVertexAttribPointer`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScalarType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Float,
}

impl ScalarType {
    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::Byte => glow::BYTE,
            Self::UnsignedByte => glow::UNSIGNED_BYTE,
            Self::Short => glow::SHORT,
            Self::UnsignedShort => glow::UNSIGNED_SHORT,
            Self::Float => glow::FLOAT,
        }
    }

    pub const fn is_signed(self) -> bool {
        matches!(self, Self::Byte | Self::Short | Self::Float)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Byte => "GL_BYTE",
            Self::UnsignedByte => "GL_UNSIGNED_BYTE",
            Self::Short => "GL_SHORT",
            Self::UnsignedShort => "GL_UNSIGNED_SHORT",
            Self::Float => "GL_FLOAT",
        }
    }

    /// Fixed-point to float conversion for normalized integer attributes.
    ///
    /// ES 2.0 maps unsigned `c` to `c / (2^b - 1)` and signed `c` to
    /// `(2c + 1) / (2^b - 1)`. Floats pass through.
    pub fn normalize(self, raw: f64) -> f32 {
        let max = match self {
            Self::Float => return raw as f32,
            Self::Byte | Self::UnsignedByte => f64::from(u8::MAX),
            Self::Short | Self::UnsignedShort => f64::from(u16::MAX),
        };
        if self.is_signed() {
            ((2.0 * raw + 1.0) / max) as f32
        } else {
            (raw / max) as f32
        }
    }
}

/// How one attribute slot reads components out of the bound array buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AttribFormat {
    pub components: i32,
    pub scalar: ScalarType,
    pub normalized: bool,
    /// Byte distance between consecutive vertices; 0 means tightly packed.
    pub stride: i32,
    /// Byte offset of the first component.
    pub offset: i32,
}

impl AttribFormat {
    /// Tightly packed, not normalized, starting at offset 0.
    pub const fn new(components: i32, scalar: ScalarType) -> Self {
        Self {
            components,
            scalar,
            normalized: false,
            stride: 0,
            offset: 0,
        }
    }

    pub const fn floats(components: i32) -> Self {
        Self::new(components, ScalarType::Float)
    }

    pub const fn normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    pub const fn interleaved(mut self, stride: i32, offset: i32) -> Self {
        self.stride = stride;
        self.offset = offset;
        self
    }

    /// The value a shader receives for a stored component `raw`.
    pub fn resolve(&self, raw: f64) -> f32 {
        if self.normalized {
            self.scalar.normalize(raw)
        } else {
            raw as f32
        }
    }

    /// Points slot `index` at the currently bound array buffer.
    pub fn apply(&self, gl: &glow::Context, index: u32) {
        unsafe {
            gl.vertex_attrib_pointer_f32(
                index,
                self.components,
                self.scalar.gl_enum(),
                self.normalized,
                self.stride,
                self.offset,
            );
        }
    }
}

pub fn enable_attrib(gl: &glow::Context, index: u32) {
    unsafe { gl.enable_vertex_attrib_array(index) };
}

pub fn disable_attrib(gl: &glow::Context, index: u32) {
    unsafe { gl.disable_vertex_attrib_array(index) };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    // ── normalization ─────────────────────────────────────────────────────

    #[test]
    fn unsigned_extremes_map_to_unit_range() {
        assert!(close(ScalarType::UnsignedByte.normalize(255.0), 1.0));
        assert!(close(ScalarType::UnsignedByte.normalize(0.0), 0.0));
        assert!(close(ScalarType::UnsignedShort.normalize(65535.0), 1.0));
    }

    #[test]
    fn signed_max_maps_to_one() {
        assert!(close(ScalarType::Byte.normalize(127.0), 1.0));
        assert!(close(ScalarType::Short.normalize(32767.0), 1.0));
        assert!(close(ScalarType::Byte.normalize(-128.0), -1.0));
    }

    #[test]
    fn signed_zero_is_slightly_positive() {
        assert!(close(ScalarType::Byte.normalize(0.0), 1.0 / 255.0));
    }

    #[test]
    fn unnormalized_values_pass_through() {
        let f = AttribFormat::new(3, ScalarType::UnsignedByte);
        assert_eq!(f.resolve(255.0), 255.0);
        assert!(close(f.normalized(true).resolve(255.0), 1.0));
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn new_formats_are_packed_and_raw() {
        let f = AttribFormat::new(3, ScalarType::Short);
        assert_eq!((f.stride, f.offset), (0, 0));
        assert!(!f.normalized);
    }

    #[test]
    fn floats_pass_through_normalization() {
        let f = AttribFormat::floats(2).normalized(true);
        assert_eq!(f.scalar.gl_enum(), glow::FLOAT);
        assert_eq!(f.resolve(0.25), 0.25);
    }

    #[test]
    fn interleaved_sets_stride_and_offset() {
        let f = AttribFormat::floats(2).interleaved(16, 8);
        assert_eq!((f.stride, f.offset), (16, 8));
    }
}
