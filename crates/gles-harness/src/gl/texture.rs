use glow::{HasContext, PixelUnpackData};

use crate::device::InitError;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureTarget {
    Tex2D,
    CubeMap,
}

impl TextureTarget {
    pub const fn gl_enum(self) -> u32 {
        match self {
            Self::Tex2D => glow::TEXTURE_2D,
            Self::CubeMap => glow::TEXTURE_CUBE_MAP,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Tex2D => "TEXTURE_2D",
            Self::CubeMap => "TEXTURE_CUBE_MAP",
        }
    }
}

/// Cube map face targets in `GL_TEXTURE_CUBE_MAP_POSITIVE_X + i` order.
pub const CUBE_FACES: [u32; 6] = [
    glow::TEXTURE_CUBE_MAP_POSITIVE_X,
    glow::TEXTURE_CUBE_MAP_NEGATIVE_X,
    glow::TEXTURE_CUBE_MAP_POSITIVE_Y,
    glow::TEXTURE_CUBE_MAP_NEGATIVE_Y,
    glow::TEXTURE_CUBE_MAP_POSITIVE_Z,
    glow::TEXTURE_CUBE_MAP_NEGATIVE_Z,
];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Wrap {
    Repeat,
    MirroredRepeat,
    ClampToEdge,
}

impl Wrap {
    pub const fn gl_enum(self) -> i32 {
        (match self {
            Self::Repeat => glow::REPEAT,
            Self::MirroredRepeat => glow::MIRRORED_REPEAT,
            Self::ClampToEdge => glow::CLAMP_TO_EDGE,
        }) as i32
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Repeat => "REPEAT",
            Self::MirroredRepeat => "MIRRORED_REPEAT",
            Self::ClampToEdge => "CLAMP_TO_EDGE",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Filter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

impl Filter {
    pub const fn gl_enum(self) -> i32 {
        (match self {
            Self::Nearest => glow::NEAREST,
            Self::Linear => glow::LINEAR,
            Self::NearestMipmapNearest => glow::NEAREST_MIPMAP_NEAREST,
            Self::LinearMipmapNearest => glow::LINEAR_MIPMAP_NEAREST,
            Self::NearestMipmapLinear => glow::NEAREST_MIPMAP_LINEAR,
            Self::LinearMipmapLinear => glow::LINEAR_MIPMAP_LINEAR,
        }) as i32
    }

    /// Whether sampling with this filter reads lower mip levels, i.e. the
    /// texture is incomplete without a mip chain.
    pub const fn uses_mipmaps(self) -> bool {
        !matches!(self, Self::Nearest | Self::Linear)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Nearest => "NEAREST",
            Self::Linear => "LINEAR",
            Self::NearestMipmapNearest => "NEAREST_MIPMAP_NEAREST",
            Self::LinearMipmapNearest => "LINEAR_MIPMAP_NEAREST",
            Self::NearestMipmapLinear => "NEAREST_MIPMAP_LINEAR",
            Self::LinearMipmapLinear => "LINEAR_MIPMAP_LINEAR",
        }
    }
}

/// The four per-texture sampling parameters of ES 2.0.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SamplerParams {
    pub wrap_s: Wrap,
    pub wrap_t: Wrap,
    pub min_filter: Filter,
    pub mag_filter: Filter,
}

/// One parameter as it should read back: `(label, pname, value)`.
pub type ParamExpectation = (&'static str, u32, i32);

impl SamplerParams {
    /// Same wrap mode on both axes.
    pub const fn uniform(wrap: Wrap, min_filter: Filter, mag_filter: Filter) -> Self {
        Self {
            wrap_s: wrap,
            wrap_t: wrap,
            min_filter,
            mag_filter,
        }
    }

    /// Sets all four parameters on the texture bound to `target`.
    pub fn apply(&self, gl: &glow::Context, target: TextureTarget) {
        for (_, pname, value) in self.expectations() {
            unsafe { gl.tex_parameter_i32(target.gl_enum(), pname, value) };
        }
    }

    pub fn expectations(&self) -> [ParamExpectation; 4] {
        [
            ("WRAP_S", glow::TEXTURE_WRAP_S, self.wrap_s.gl_enum()),
            ("WRAP_T", glow::TEXTURE_WRAP_T, self.wrap_t.gl_enum()),
            ("MIN_FILTER", glow::TEXTURE_MIN_FILTER, self.min_filter.gl_enum()),
            ("MAG_FILTER", glow::TEXTURE_MAG_FILTER, self.mag_filter.gl_enum()),
        ]
    }

    pub fn describe(&self) -> String {
        format!(
            "{}/{} {}/{}",
            self.wrap_s.name(),
            self.wrap_t.name(),
            self.min_filter.name(),
            self.mag_filter.name()
        )
    }
}

pub fn create_texture(gl: &glow::Context) -> Result<glow::Texture, InitError> {
    unsafe { gl.create_texture() }.map_err(InitError::driver)
}

pub fn bind_texture(gl: &glow::Context, target: TextureTarget, texture: glow::Texture) {
    unsafe { gl.bind_texture(target.gl_enum(), Some(texture)) };
}

/// Uploads level 0 of `image_target` with a tightly packed unsigned-byte image.
pub fn upload_level0(
    gl: &glow::Context,
    image_target: u32,
    format: u32,
    width: i32,
    height: i32,
    pixels: &[u8],
) {
    unsafe {
        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
        gl.tex_image_2d(
            image_target,
            0,
            format as i32,
            width,
            height,
            0,
            format,
            glow::UNSIGNED_BYTE,
            PixelUnpackData::Slice(Some(pixels)),
        );
    }
}

/// `glGetTexParameteriv` on the texture bound to `target`.
pub fn read_param_i32(gl: &glow::Context, target: TextureTarget, pname: u32) -> i32 {
    unsafe { gl.get_tex_parameter_i32(target.gl_enum(), pname) }
}

/// `glGetTexParameterfv` on the texture bound to `target`.
pub fn read_param_f32(gl: &glow::Context, target: TextureTarget, pname: u32) -> f32 {
    unsafe { gl.get_tex_parameter_f32(target.gl_enum(), pname) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_mipmap_filters_need_mipmaps() {
        assert!(!Filter::Nearest.uses_mipmaps());
        assert!(!Filter::Linear.uses_mipmaps());
        assert!(Filter::NearestMipmapNearest.uses_mipmaps());
        assert!(Filter::LinearMipmapLinear.uses_mipmaps());
    }

    #[test]
    fn mipmap_filters_sort_above_plain_ones() {
        // GL numbers mipmapped min filters from 0x2700 upwards.
        for f in [
            Filter::NearestMipmapNearest,
            Filter::LinearMipmapNearest,
            Filter::NearestMipmapLinear,
            Filter::LinearMipmapLinear,
        ] {
            assert!(f.gl_enum() >= glow::NEAREST_MIPMAP_NEAREST as i32);
        }
    }

    #[test]
    fn expectations_follow_params() {
        let p = SamplerParams::uniform(
            Wrap::ClampToEdge,
            Filter::LinearMipmapLinear,
            Filter::Linear,
        );
        let e = p.expectations();
        assert_eq!(e[0], ("WRAP_S", glow::TEXTURE_WRAP_S, 0x812F));
        assert_eq!(e[1], ("WRAP_T", glow::TEXTURE_WRAP_T, 0x812F));
        assert_eq!(e[2], ("MIN_FILTER", glow::TEXTURE_MIN_FILTER, 0x2703));
        assert_eq!(e[3], ("MAG_FILTER", glow::TEXTURE_MAG_FILTER, 0x2601));
    }

    #[test]
    fn enums_are_exact_as_floats() {
        // Parameters are also read back through the float query.
        for w in [Wrap::Repeat, Wrap::MirroredRepeat, Wrap::ClampToEdge] {
            let v = w.gl_enum();
            assert_eq!(v as f32 as i32, v);
        }
    }

    #[test]
    fn cube_faces_are_consecutive() {
        for (i, face) in CUBE_FACES.iter().enumerate() {
            assert_eq!(*face, glow::TEXTURE_CUBE_MAP_POSITIVE_X + i as u32);
        }
    }
}
