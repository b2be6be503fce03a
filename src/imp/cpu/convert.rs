// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! The format conversion engine.

Transcodes a packed color texture into one plane of a planar YUV-family texture.

The color space is supplied as a 4-component color vector: components 0-2 are the channel
weights, component 3 is an additive offset.  For a BT.601 full-range luma plane that is
`(0.299, 0.587, 0.114, 0.0)`.

Luma bytes are truncated, not rounded, after a tolerance of `1e-5` is added to the scaled
value.  A result within that tolerance below an integer therefore lands on the integer.

Only the luma (Y) plane is implemented.  Chroma (UV) planes are recognized by the draw
dispatcher and reported as unimplemented.

# Examples

```
use cpu_gs::convert::convert_to_luma;
use cpu_gs::bindings::software::texture::Texture;
use cpu_gs::images::projection::Vec4;
use cpu_gs::pixel_formats::ColorFormat;

let white = Texture::new_with(1, 1, ColorFormat::RGBA, |_| vec![255, 255, 255, 255]).unwrap();
let mut y = Texture::new_with(1, 1, ColorFormat::R8, |_| vec![0]).unwrap();
convert_to_luma(&white, &mut y, Vec4::new(0.299, 0.587, 0.114, 0.0)).unwrap();
assert_eq!(y.data(), &[255]);
```
*/

use crate::bindings::software::texture::Texture;
use crate::images::projection::Vec4;
use crate::imp::Error;

/// Slack added before truncating a normalized value to a byte.
///
/// Coefficient sets such as BT.709 sum to 1.0 only up to float error; without this a white
/// pixel would truncate to 254.
const UNORM_EPSILON: f64 = 1.0e-5;

/// Converts a normalized value to a byte by scaling by 255 and truncating.
///
/// The truncation is not exact: scaled values within [`UNORM_EPSILON`] below an integer
/// land on that integer.
#[inline]
fn unorm_truncate(v: f64) -> u8 {
    (v * 255.0 + UNORM_EPSILON).clamp(0.0, 255.0) as u8
}

/// Runs `op` once per destination pixel, reading the source at `divisor` times the
/// destination coordinate.
///
/// `op` receives the destination pixel bytes, then the source pixel bytes.  The caller has
/// checked that the source covers `divisor` times the destination in both axes.
fn convert_plane<F: Fn(&mut [u8], &[u8])>(src: &Texture, dst: &mut Texture, divisor: u32, op: F) {
    let src_bpp = src.bytes_per_pixel();
    let dst_bpp = dst.bytes_per_pixel();
    let src_line = src.line_size();
    let dst_line = dst.line_size();
    let (width, height) = (dst.width() as usize, dst.height() as usize);
    let divisor = divisor as usize;
    let src_data = src.level0();
    let dst_data = dst.level0_mut();
    for y in 0..height {
        let sy = y * divisor;
        for x in 0..width {
            let sx = x * divisor;
            let d = y * dst_line + x * dst_bpp;
            let s = sy * src_line + sx * src_bpp;
            op(&mut dst_data[d..d + dst_bpp], &src_data[s..s + src_bpp]);
        }
    }
}

/// Computes the luma plane of `dst` from the color pixels of `src`.
///
/// For every pixel, `dot(rgb / 255, color_vec.xyz) + color_vec.w` is scaled by 255 and
/// truncated into the single destination byte.
///
/// # Errors
///
/// Nothing is written when any of these hold:
/// - [`Error::ResolutionMismatch`]: the textures differ in width or height
/// - [`Error::UnsupportedLumaFormat`]: `dst` is not a single-byte luma format
/// - [`Error::UnsupportedFormatPair`]: `src` is not an 8-bit RGB family format
pub fn convert_to_luma(src: &Texture, dst: &mut Texture, color_vec: Vec4) -> Result<(), Error> {
    if !src.same_size(dst) {
        return Err(Error::ResolutionMismatch {
            src: (src.width(), src.height()),
            dst: (dst.width(), dst.height()),
        });
    }
    if !dst.format().is_luma() {
        return Err(Error::UnsupportedLumaFormat(dst.format()));
    }
    let [r, g, b] = src.format().rgb_offsets().ok_or(Error::UnsupportedFormatPair {
        src: src.format(),
        dst: dst.format(),
    })?;

    let weights = [color_vec.x as f64, color_vec.y as f64, color_vec.z as f64];
    let offset = color_vec.w as f64;
    convert_plane(src, dst, 1, |d, s| {
        let rgb = [s[r] as f64 / 255.0, s[g] as f64 / 255.0, s[b] as f64 / 255.0];
        let luma = rgb[0] * weights[0] + rgb[1] * weights[1] + rgb[2] * weights[2] + offset;
        d[0] = unorm_truncate(luma);
    });
    Ok(())
}
