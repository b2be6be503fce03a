// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Pixel encodings understood by the software device.
//!
//! Every texture carries exactly one [`ColorFormat`] for its whole lifetime. The format
//! determines how many bytes a pixel occupies and, for the few encodings the blit and
//! conversion engines understand, how those bytes are laid out.
//!
//! # Available Formats
//!
//! ## Single Channel
//! - [`ColorFormat::A8`] - 8-bit alpha
//! - [`ColorFormat::R8`] - 8-bit red; used as the luma (Y) plane of planar YUV output
//! - [`ColorFormat::R16`], [`ColorFormat::R16F`], [`ColorFormat::R32F`]
//!
//! ## Multi-Channel
//! - [`ColorFormat::R8G8`] - two 8-bit channels; used as the interleaved chroma (UV) plane
//! - [`ColorFormat::RGBA`] - bytes `R,G,B,A`
//! - [`ColorFormat::BGRX`] - bytes `B,G,R,X` where `X` is padding
//! - [`ColorFormat::BGRA`] - bytes `B,G,R,A`
//! - wide formats ([`ColorFormat::RGBA16`], [`ColorFormat::RGBA16F`], [`ColorFormat::RGBA32F`], ...)
//!
//! ## Block-compressed
//! - [`ColorFormat::DXT1`], [`ColorFormat::DXT3`], [`ColorFormat::DXT5`] have no whole-byte
//!   pixel size and cannot back a software texture.
//!
//! # Examples
//!
//! ```
//! use cpu_gs::pixel_formats::ColorFormat;
//!
//! assert_eq!(ColorFormat::RGBA.bytes_per_pixel(), Some(4));
//! assert_eq!(ColorFormat::R8.bytes_per_pixel(), Some(1));
//! assert_eq!(ColorFormat::DXT1.bytes_per_pixel(), None);
//! ```

/*
Quick note on type design.  The sibling GPU crates model formats as zero-sized types so that
`write(x, y, value)` can be typechecked.  That does not work here: the format of a texture
arrives at runtime from whoever allocates it, and the engines pick their per-pixel operation
from a (source, destination) table at call time.  So the format is a plain enum and the typed
views below ([Unorm4], [Bgrx4]) are only used inside the per-pixel operations.
 */
pub(crate) mod png_support;

use std::fmt::Display;

/// The pixel encoding of a texture.
///
/// The discriminants have no meaning outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ColorFormat {
    /// 8-bit alpha only.
    A8,
    /// 8-bit single channel.  This is the luma-only encoding.
    R8,
    /// Two 8-bit channels.
    R8G8,
    /// 16-bit unsigned normalized single channel.
    R16,
    /// 16-bit float single channel.
    R16F,
    /// 32-bit float single channel.
    R32F,
    /// Two 16-bit float channels.
    RG16F,
    /// Two 32-bit float channels.
    RG32F,
    /// 4 bytes, `R,G,B,A`.
    RGBA,
    /// 4 bytes, `B,G,R,X`.  The padding byte carries no meaning.
    BGRX,
    /// 4 bytes, `B,G,R,A`.
    BGRA,
    /// 10 bits per color channel, 2 bits alpha, packed in 32 bits.
    R10G10B10A2,
    /// Four 16-bit unsigned normalized channels.
    RGBA16,
    /// Four 16-bit float channels.
    RGBA16F,
    /// Four 32-bit float channels.
    RGBA32F,
    /// BC1 block compression.
    DXT1,
    /// BC2 block compression.
    DXT3,
    /// BC3 block compression.
    DXT5,
}

impl ColorFormat {
    /// Size of one pixel in bits.
    ///
    /// Block-compressed formats report their average bits per pixel.
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            ColorFormat::A8 | ColorFormat::R8 => 8,
            ColorFormat::R8G8 | ColorFormat::R16 | ColorFormat::R16F => 16,
            ColorFormat::R32F
            | ColorFormat::RG16F
            | ColorFormat::RGBA
            | ColorFormat::BGRX
            | ColorFormat::BGRA
            | ColorFormat::R10G10B10A2 => 32,
            ColorFormat::RG32F | ColorFormat::RGBA16 | ColorFormat::RGBA16F => 64,
            ColorFormat::RGBA32F => 128,
            ColorFormat::DXT1 => 4,
            ColorFormat::DXT3 | ColorFormat::DXT5 => 8,
        }
    }

    /// Size of one pixel in whole bytes, or `None` for block-compressed formats.
    pub const fn bytes_per_pixel(self) -> Option<usize> {
        if self.is_compressed() {
            None
        } else {
            Some((self.bits_per_pixel() / 8) as usize)
        }
    }

    /// Whether the format is block-compressed.
    pub const fn is_compressed(self) -> bool {
        matches!(self, ColorFormat::DXT1 | ColorFormat::DXT3 | ColorFormat::DXT5)
    }

    /// Whether the format holds a single byte of luma per pixel.
    pub const fn is_luma(self) -> bool {
        matches!(self, ColorFormat::R8)
    }

    /// Byte offsets of the red, green and blue channels, for 4-byte color encodings.
    ///
    /// Returns `None` for any format that is not an 8-bit-per-channel RGB family encoding.
    pub(crate) const fn rgb_offsets(self) -> Option<[usize; 3]> {
        match self {
            ColorFormat::RGBA => Some([0, 1, 2]),
            ColorFormat::BGRA | ColorFormat::BGRX => Some([2, 1, 0]),
            _ => None,
        }
    }
}

impl Display for ColorFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// An `R,G,B,A` pixel with 8-bit channels.
///
/// This is the pixel type of [`ColorFormat::RGBA`].
///
/// # Examples
///
/// ```
/// use cpu_gs::pixel_formats::Unorm4;
///
/// let opaque_red = Unorm4 { r: 255, g: 0, b: 0, a: 255 };
/// assert_eq!(opaque_red.to_bytes(), [255, 0, 0, 255]);
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Unorm4 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Unorm4 {
    /// Reads a pixel from 4 bytes in `R,G,B,A` order.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Unorm4 {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
            a: bytes[3],
        }
    }

    /// The pixel in `R,G,B,A` byte order.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Convert from normalized float values (0.0-1.0) to 8-bit values (0-255).
    ///
    /// Values are clamped to the valid range and rounded to nearest integer.
    pub fn from_floats(r: f32, g: f32, b: f32, a: f32) -> Self {
        fn unorm(v: f32) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        Unorm4 {
            r: unorm(r),
            g: unorm(g),
            b: unorm(b),
            a: unorm(a),
        }
    }
}

/// A `B,G,R,X` pixel with 8-bit channels and one padding byte.
///
/// This is the pixel type of [`ColorFormat::BGRX`].
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bgrx4 {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub x: u8,
}

impl Bgrx4 {
    /// Reads a pixel from 4 bytes in `B,G,R,X` order.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Bgrx4 {
            b: bytes[0],
            g: bytes[1],
            r: bytes[2],
            x: bytes[3],
        }
    }
}

impl From<Bgrx4> for Unorm4 {
    /// Reorders the color channels and forces the result fully opaque.
    ///
    /// The padding byte is never interpreted as alpha.
    #[inline]
    fn from(p: Bgrx4) -> Self {
        Unorm4 {
            r: p.r,
            g: p.g,
            b: p.b,
            a: 0xff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_per_pixel_matches_bits() {
        assert_eq!(ColorFormat::RGBA32F.bytes_per_pixel(), Some(16));
        assert_eq!(ColorFormat::R8G8.bytes_per_pixel(), Some(2));
        assert_eq!(ColorFormat::R10G10B10A2.bytes_per_pixel(), Some(4));
        assert_eq!(ColorFormat::DXT5.bytes_per_pixel(), None);
    }

    #[test]
    fn bgrx_to_unorm_ignores_padding() {
        let p = Bgrx4::from_bytes([1, 2, 3, 0]);
        assert_eq!(Unorm4::from(p), Unorm4 { r: 3, g: 2, b: 1, a: 255 });
    }

    #[test]
    fn rgb_offsets_only_for_byte_color() {
        assert_eq!(ColorFormat::RGBA.rgb_offsets(), Some([0, 1, 2]));
        assert_eq!(ColorFormat::BGRX.rgb_offsets(), Some([2, 1, 0]));
        assert_eq!(ColorFormat::R8.rgb_offsets(), None);
    }
}
