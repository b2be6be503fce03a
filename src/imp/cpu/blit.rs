// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! The pixel blit engine.

[`blit`] copies a rectangle of one texture into a rectangle of another, resampling with
nearest-neighbor scaling when the rectangles differ in size.

# Algorithm

For every destination pixel at offset `(x, y)` inside the destination rectangle:

1. The absolute destination coordinate is `dst_rect origin + (x, y)`.  Coordinates outside
   the destination texture are clipped (skipped).
2. The source coordinate is `src_rect origin + floor(offset * src_extent / dst_extent)` per
   axis, clamped into `[0, extent - 1]` of the source texture.
3. A per-pixel operation chosen once per call from [(source, destination) format pairs](pixel_op)
   writes the destination bytes.

There is no filtering and no blending.

# Examples

```
use cpu_gs::blit::{blit, BlitRect, BlitRequest};
use cpu_gs::bindings::software::texture::{Texture, Texel};
use cpu_gs::pixel_formats::ColorFormat;

// 2x2 BGRX source, scaled up onto a 4x4 RGBA destination
let src = Texture::new_with(2, 2, ColorFormat::BGRX, |t| vec![t.x as u8, t.y as u8, 9, 0]).unwrap();
let mut dst = Texture::new_with(4, 4, ColorFormat::RGBA, |_| vec![0; 4]).unwrap();
blit(BlitRequest {
    src_rect: BlitRect::covering(&src),
    dst_rect: BlitRect::covering(&dst),
    src: &src,
    dst: &mut dst,
}).unwrap();
assert_eq!(dst[Texel { x: 3, y: 2 }], [9, 1, 1, 255]);
```
*/

use crate::bindings::software::texture::Texture;
use crate::imp::Error;
use crate::pixel_formats::{Bgrx4, ColorFormat, Unorm4};

/// A rectangle in pixel space.
///
/// Origins may be negative and extents may run past the texture; the engine clips the
/// destination and clamps the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlitRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl BlitRect {
    pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self { x, y, width, height }
    }

    /// The rectangle covering all of level 0 of `texture`.
    pub fn covering(texture: &Texture) -> Self {
        Self::new(0, 0, texture.width() as i64, texture.height() as i64)
    }

    /// Whether the rectangle has no area to write.
    ///
    /// Negative extents also count: the engine iterates offsets from 0 up to the extent.
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// One blit.
///
/// Constructed per call and consumed by [`blit`].
#[derive(Debug)]
pub struct BlitRequest<'a> {
    pub src: &'a Texture,
    pub dst: &'a mut Texture,
    pub src_rect: BlitRect,
    pub dst_rect: BlitRect,
}

/// Writes one destination pixel from one source pixel.
///
/// The first slice is the destination pixel, the second the source pixel, each exactly
/// one pixel of its format long.
pub type PixelOp = fn(&mut [u8], &[u8]);

fn copy_4(dst: &mut [u8], src: &[u8]) {
    dst[..4].copy_from_slice(&src[..4]);
}

fn bgrx_to_rgba(dst: &mut [u8], src: &[u8]) {
    let pixel = Bgrx4::from_bytes([src[0], src[1], src[2], src[3]]);
    dst[..4].copy_from_slice(&Unorm4::from(pixel).to_bytes());
}

/// The closed set of supported (source, destination) pairs.
const PIXEL_OPS: &[(ColorFormat, ColorFormat, PixelOp)] = &[
    (ColorFormat::RGBA, ColorFormat::RGBA, copy_4),
    (ColorFormat::BGRX, ColorFormat::RGBA, bgrx_to_rgba),
];

/// Looks up the per-pixel operation for a format pair.
///
/// # Errors
///
/// [`Error::UnsupportedFormatPair`] for every pair not in the table.  The engine never guesses
/// at byte layouts.
pub fn pixel_op(src: ColorFormat, dst: ColorFormat) -> Result<PixelOp, Error> {
    PIXEL_OPS
        .iter()
        .find(|(s, d, _)| *s == src && *d == dst)
        .map(|(_, _, op)| *op)
        .ok_or(Error::UnsupportedFormatPair { src, dst })
}

/// Whether the request copies one whole texture onto an identical one.
fn is_whole_copy(request: &BlitRequest<'_>) -> bool {
    request.src.format() == request.dst.format()
        && request.src.same_size(request.dst)
        && request.src_rect == BlitRect::covering(request.src)
        && request.dst_rect == BlitRect::covering(request.dst)
}

/// Maps a destination offset along one axis to a source coordinate.
///
/// Computes `src_offset + floor(offset * src_extent / dst_extent)` clamped into
/// `[0, src_size - 1]`.  `dst_extent` must be positive and `src_size` nonzero.
#[inline]
pub(crate) fn scale_axis(offset: i64, src_offset: i64, src_extent: i64, dst_extent: i64, src_size: u32) -> u32 {
    let scaled = (offset as i128 * src_extent as i128).div_euclid(dst_extent as i128);
    let coordinate = src_offset as i128 + scaled;
    coordinate.clamp(0, src_size as i128 - 1) as u32
}

/// The destination offsets along one axis that land inside `[0, size)`.
///
/// Empty ranges are always `0..0`.
#[inline]
fn visible_offsets(origin: i64, extent: i64, size: u32) -> std::ops::Range<i64> {
    let origin = origin as i128;
    let start = (-origin).max(0);
    let end = (extent as i128).min(size as i128 - origin);
    if start >= end {
        return 0..0;
    }
    // start < end <= extent, so both fit
    start as i64..end as i64
}

/// Copies a (possibly scaled) rectangle from one texture into another.
///
/// When both rectangles cover two same-size textures of the same format, level 0 is copied
/// in one bulk copy.  Otherwise every destination pixel is resampled; see the module docs.
///
/// # Errors
///
/// [`Error::UnsupportedFormatPair`] if the formats have no per-pixel operation.  The
/// destination is untouched in that case.
///
/// A destination rectangle with zero (or negative) width or height is not an error: the blit
/// completes without writing.
pub fn blit(request: BlitRequest<'_>) -> Result<(), Error> {
    if is_whole_copy(&request) {
        request.dst.level0_mut().copy_from_slice(request.src.level0());
        return Ok(());
    }

    let op = pixel_op(request.src.format(), request.dst.format())?;
    let BlitRequest {
        src,
        dst,
        src_rect,
        dst_rect,
    } = request;
    if dst_rect.is_empty() || src.width() == 0 || src.height() == 0 {
        return Ok(());
    }

    logwise::trace_sync!(
        "blit {src_rect} -> {dst_rect}",
        src_rect = logwise::privacy::LogIt(&src_rect),
        dst_rect = logwise::privacy::LogIt(&dst_rect)
    );
    let src_bpp = src.bytes_per_pixel();
    let dst_bpp = dst.bytes_per_pixel();
    let src_line = src.line_size();
    let dst_line = dst.line_size();
    let src_data = src.level0();
    let xs = visible_offsets(dst_rect.x, dst_rect.width, dst.width());
    let ys = visible_offsets(dst_rect.y, dst_rect.height, dst.height());
    let dst_data = dst.level0_mut();

    for y in ys {
        let dy = (dst_rect.y + y) as usize;
        let sy = scale_axis(y, src_rect.y, src_rect.height, dst_rect.height, src.height()) as usize;
        for x in xs.clone() {
            let dx = (dst_rect.x + x) as usize;
            let sx = scale_axis(x, src_rect.x, src_rect.width, dst_rect.width, src.width()) as usize;
            let d = dy * dst_line + dx * dst_bpp;
            let s = sy * src_line + sx * src_bpp;
            op(&mut dst_data[d..d + dst_bpp], &src_data[s..s + src_bpp]);
        }
    }
    Ok(())
}
