// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! PNG import and export of textures.
//!
//! Export writes level 0 of 8-bit color and luma textures, for inspecting render targets.
//! Import decodes any 8- or 16-bit PNG into an RGBA texture.

use std::io::{Cursor, Write};

use png::{BitDepth, ColorType, Transformations};

use crate::bindings::software::texture::Texture;
use crate::bindings::visible_to::TextureConfig;
use crate::imp::Error;
use crate::pixel_formats::ColorFormat;

/// The PNG color type a texture exports as, and its pixels in that layout.
fn png_pixels(texture: &Texture) -> Result<(ColorType, Vec<u8>), Error> {
    let level0 = texture.level0();
    match texture.format() {
        ColorFormat::RGBA => Ok((ColorType::Rgba, level0.to_vec())),
        ColorFormat::BGRA => Ok((
            ColorType::Rgba,
            level0.chunks_exact(4).flat_map(|p| [p[2], p[1], p[0], p[3]]).collect(),
        )),
        ColorFormat::BGRX => Ok((
            ColorType::Rgba,
            level0.chunks_exact(4).flat_map(|p| [p[2], p[1], p[0], 0xff]).collect(),
        )),
        ColorFormat::R8 | ColorFormat::A8 => Ok((ColorType::Grayscale, level0.to_vec())),
        other => Err(Error::UnsupportedFormat(other)),
    }
}

impl Texture {
    /// Encodes level 0 as a PNG image.
    ///
    /// BGR-ordered textures are written as RGBA; single-byte textures as grayscale.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFormat`] for formats without an 8-bit PNG equivalent, or
    /// [`Error::PngEncode`] if writing fails.
    pub fn write_png<W: Write>(&self, w: W) -> Result<(), Error> {
        let (color_type, pixels) = png_pixels(self)?;
        let mut encoder = png::Encoder::new(w, self.width(), self.height());
        encoder.set_color(color_type);
        encoder.set_depth(BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&pixels)?;
        writer.finish()?;
        Ok(())
    }

    /// Decodes a PNG image into a single-level RGBA texture.
    ///
    /// Palette and low-bit-depth images are expanded and 16-bit channels are truncated to 8
    /// bits.  Images without alpha become fully opaque.
    pub fn from_png_bytes(bytes: &[u8], debug_name: &str) -> Result<Texture, Error> {
        let mut decoder = png::Decoder::new(Cursor::new(bytes));
        decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
        let mut reader = decoder.read_info()?;
        let (color_type, depth) = reader.output_color_type();
        if depth != BitDepth::Eight {
            return Err(Error::UnsupportedPng(format!("bit depth {depth:?} after expansion")));
        }
        let (width, height) = (reader.info().width, reader.info().height);
        let samples = color_type.samples();
        let mut buffer = vec![0; width as usize * height as usize * samples];
        let frame = reader.next_frame(&mut buffer)?;

        let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
        for row in buffer.chunks_exact(frame.line_size).take(height as usize) {
            for p in row[..width as usize * samples].chunks_exact(samples) {
                let pixel = match color_type {
                    ColorType::Grayscale => [p[0], p[0], p[0], 0xff],
                    ColorType::GrayscaleAlpha => [p[0], p[0], p[0], p[1]],
                    ColorType::Rgb => [p[0], p[1], p[2], 0xff],
                    ColorType::Rgba => [p[0], p[1], p[2], p[3]],
                    ColorType::Indexed => {
                        return Err(Error::UnsupportedPng("palette was not expanded".to_string()));
                    }
                };
                rgba.extend_from_slice(&pixel);
            }
        }
        let config = TextureConfig::new(width, height, ColorFormat::RGBA).with_debug_name(debug_name);
        Texture::new(config, Some(&rgba))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::software::texture::Texel;

    #[test]
    fn bgrx_survives_export_and_import() {
        let texture = Texture::new_with(3, 2, ColorFormat::BGRX, |t| vec![t.x as u8, t.y as u8, 200, 0]).unwrap();
        let mut encoded = Vec::new();
        texture.write_png(&mut encoded).unwrap();

        let decoded = Texture::from_png_bytes(&encoded, "decoded").unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 2));
        assert_eq!(decoded.format(), ColorFormat::RGBA);
        assert_eq!(decoded[Texel { x: 2, y: 1 }], [200, 1, 2, 255]);
        assert_eq!(decoded.debug_name(), "decoded");
    }

    #[test]
    fn luma_imports_as_gray() {
        let texture = Texture::new_with(2, 1, ColorFormat::R8, |t| vec![(t.x * 100) as u8]).unwrap();
        let mut encoded = Vec::new();
        texture.write_png(&mut encoded).unwrap();
        let decoded = Texture::from_png_bytes(&encoded, "").unwrap();
        assert_eq!(decoded.data(), &[0, 0, 0, 255, 100, 100, 100, 255]);
    }

    #[test]
    fn float_textures_are_not_exported() {
        let texture = Texture::new(TextureConfig::new(1, 1, ColorFormat::RGBA32F), None).unwrap();
        assert!(matches!(
            texture.write_png(Vec::new()),
            Err(Error::UnsupportedFormat(ColorFormat::RGBA32F))
        ));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(matches!(Texture::from_png_bytes(b"not a png", ""), Err(Error::PngDecode(_))));
    }
}
