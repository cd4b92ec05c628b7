//! Pixel formats
//!
//! A [`PixelFormat`] is a plain-old-data pixel type together with the GL enums
//! needed to upload a slice of it into a texture.

/// 8-bit RGBA pixel.
pub type Rgba8 = [u8; 4];

/// 32-bit float RGBA pixel.
pub type RgbaF32 = [f32; 4];

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Rgba8 {}
    impl Sealed for super::RgbaF32 {}
}

/// A pixel type the framebuffer can map, paint and upload.
///
/// Sealed: implementors must be valid for every bit pattern because the
/// painter receives a slice over raw mapped GPU memory.
pub trait PixelFormat: sealed::Sealed + Copy + Default + 'static {
    /// Client pixel format (`glTexSubImage2D` `format`).
    const GL_FORMAT: u32;
    /// Client component type (`glTexSubImage2D` `type`).
    const GL_TYPE: u32;
    /// Sized texture storage format.
    const INTERNAL_FORMAT: u32;

    /// Bytes needed to hold `count` pixels, or `None` on overflow.
    fn byte_len(count: usize) -> Option<usize> {
        count.checked_mul(std::mem::size_of::<Self>())
    }
}

impl PixelFormat for Rgba8 {
    const GL_FORMAT: u32 = glow::RGBA;
    const GL_TYPE: u32 = glow::UNSIGNED_BYTE;
    const INTERNAL_FORMAT: u32 = glow::RGBA8;
}

impl PixelFormat for RgbaF32 {
    const GL_FORMAT: u32 = glow::RGBA;
    const GL_TYPE: u32 = glow::FLOAT;
    const INTERNAL_FORMAT: u32 = glow::RGBA32F;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_upload_enums() {
        assert_eq!(<Rgba8 as PixelFormat>::GL_FORMAT, glow::RGBA);
        assert_eq!(<Rgba8 as PixelFormat>::GL_TYPE, glow::UNSIGNED_BYTE);
        assert_eq!(<Rgba8 as PixelFormat>::INTERNAL_FORMAT, glow::RGBA8);
    }

    #[test]
    fn test_rgba_f32_upload_enums() {
        assert_eq!(<RgbaF32 as PixelFormat>::GL_TYPE, glow::FLOAT);
        assert_eq!(<RgbaF32 as PixelFormat>::INTERNAL_FORMAT, glow::RGBA32F);
    }

    #[test]
    fn test_byte_len() {
        assert_eq!(Rgba8::byte_len(640 * 480), Some(640 * 480 * 4));
        assert_eq!(RgbaF32::byte_len(10), Some(160));
        assert_eq!(Rgba8::byte_len(usize::MAX), None);
    }
}
