// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Software textures.

A [`Texture`] is the device's surface: an owned, contiguous byte buffer holding every mip
level of a 2D image in one fixed [`ColorFormat`].  The blit and conversion engines borrow
textures for the duration of one call and write level 0 in place; nothing ever reallocates
the buffer.

# Coordinate Systems

- Origin (0, 0) is at the top-left
- X increases to the right
- Y increases downward
- Rows are stored top to bottom, pixels within a row left to right, with no padding

# Example

```
use cpu_gs::bindings::software::texture::{Texture, Texel};
use cpu_gs::bindings::visible_to::TextureConfig;
use cpu_gs::pixel_formats::ColorFormat;

let mut texture = Texture::new(TextureConfig::new(4, 4, ColorFormat::RGBA), None).unwrap();
texture[Texel { x: 1, y: 2 }].copy_from_slice(&[255, 0, 0, 255]);
assert_eq!(&texture[Texel { x: 1, y: 2 }], &[255, 0, 0, 255]);
assert_eq!(texture.data().len(), 4 * 4 * 4);
```
*/

use std::cell::{Ref, RefCell, RefMut};
use std::fmt::Debug;
use std::ops::{Index, IndexMut};
use std::rc::Rc;

use crate::bindings::visible_to::{TextureConfig, TextureUsage};
use crate::imp::Error;
use crate::pixel_formats::ColorFormat;

/// Integer texture coordinates of one pixel in level 0.
///
/// # Examples
///
/// ```
/// use cpu_gs::bindings::software::texture::Texel;
///
/// let origin = Texel::ZERO;
/// assert_eq!(origin.x, 0);
/// assert_eq!(origin.y, 0);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Texel {
    /// X coordinate (horizontal position)
    pub x: u32,
    /// Y coordinate (vertical position)
    pub y: u32,
}
impl Texel {
    /// The origin texel at coordinates (0, 0).
    pub const ZERO: Texel = Texel { x: 0, y: 0 };

    /// Index of this texel's first pixel in a tightly packed row-major buffer.
    #[inline]
    pub(crate) const fn vec_offset(&self, width: u32) -> usize {
        width as usize * self.y as usize + self.x as usize
    }
}

/// Total buffer size for a texture: `bytes_per_pixel * width * height * levels`.
///
/// Block-compressed formats have no such size and are rejected, as are sizes that don't fit
/// in memory addresses.
pub fn data_size(format: ColorFormat, width: u32, height: u32, levels: u32) -> Result<usize, Error> {
    let bpp = format.bytes_per_pixel().ok_or(Error::UnsupportedFormat(format))?;
    let levels = levels.max(1);
    bpp.checked_mul(width as usize)
        .and_then(|row| row.checked_mul(height as usize))
        .and_then(|level| level.checked_mul(levels as usize))
        .ok_or(Error::TextureTooLarge { width, height, levels })
}

/// A software texture.
///
/// # Invariants
///
/// - `data.len()` always equals [`data_size`] of the creation parameters
/// - the format never changes
/// - only level 0 is addressed by blits, conversions and draws
#[derive(Clone)]
pub struct Texture {
    width: u32,
    height: u32,
    levels: u32,
    format: ColorFormat,
    usage: TextureUsage,
    debug_name: String,
    data: Vec<u8>,
}

impl Texture {
    /// Creates a texture, optionally copying in initial pixel data.
    ///
    /// When `data` is given it must cover the whole buffer, every level included.  Without
    /// it the buffer is zeroed.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedFormat`] for block-compressed formats
    /// - [`Error::InvalidInitialData`] if `data` has the wrong length
    pub fn new(config: TextureConfig<'_>, data: Option<&[u8]>) -> Result<Self, Error> {
        let levels = config.levels.max(1);
        let size = data_size(config.format, config.width, config.height, levels)?;
        let data = match data {
            Some(initial) if initial.len() != size => {
                return Err(Error::InvalidInitialData {
                    expected: size,
                    actual: initial.len(),
                });
            }
            Some(initial) => initial.to_vec(),
            None => vec![0; size],
        };
        Ok(Self {
            width: config.width,
            height: config.height,
            levels,
            format: config.format,
            usage: config.usage,
            debug_name: config.debug_name.to_string(),
            data,
        })
    }

    /// Creates a single-level texture whose pixels are computed by a function.
    ///
    /// `initialize_with` receives each texel and returns its bytes; it must return exactly
    /// `bytes_per_pixel` bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use cpu_gs::bindings::software::texture::{Texture, Texel};
    /// use cpu_gs::pixel_formats::ColorFormat;
    ///
    /// // A checkerboard in luma
    /// let texture = Texture::new_with(8, 8, ColorFormat::R8, |texel| {
    ///     if (texel.x + texel.y) % 2 == 0 { vec![255] } else { vec![0] }
    /// }).unwrap();
    /// assert_eq!(texture[Texel { x: 1, y: 0 }], [0]);
    /// ```
    pub fn new_with<F: Fn(Texel) -> Vec<u8>>(
        width: u32,
        height: u32,
        format: ColorFormat,
        initialize_with: F,
    ) -> Result<Self, Error> {
        let size = data_size(format, width, height, 1)?;
        let mut vec = Vec::with_capacity(size);
        for y in 0..height {
            for x in 0..width {
                vec.extend_from_slice(&initialize_with(Texel { x, y }));
            }
        }
        Texture::new(TextureConfig::new(width, height, format), Some(&vec))
    }

    /// Returns the width of level 0 in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }
    /// Returns the height of level 0 in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }
    #[inline]
    pub fn levels(&self) -> u32 {
        self.levels
    }
    #[inline]
    pub fn format(&self) -> ColorFormat {
        self.format
    }
    #[inline]
    pub fn usage(&self) -> TextureUsage {
        self.usage
    }
    #[inline]
    pub fn debug_name(&self) -> &str {
        &self.debug_name
    }

    /// Bytes per pixel of this texture's format.
    ///
    /// Always available: textures can't be created in formats without one.
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel().unwrap_or(0)
    }

    /// Bytes in one row of level 0.
    #[inline]
    pub fn line_size(&self) -> usize {
        self.bytes_per_pixel() * self.width as usize
    }

    /// The whole buffer, every level included.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Level 0 of the buffer.
    #[inline]
    pub fn level0(&self) -> &[u8] {
        &self.data[..self.line_size() * self.height as usize]
    }

    /// Level 0 of the buffer, writable.
    #[inline]
    pub fn level0_mut(&mut self) -> &mut [u8] {
        let len = self.line_size() * self.height as usize;
        &mut self.data[..len]
    }

    /// Whether `texel` lies inside level 0.
    #[inline]
    pub fn contains(&self, texel: Texel) -> bool {
        texel.x < self.width && texel.y < self.height
    }

    /// Whether two textures share width and height.
    #[inline]
    pub(crate) fn same_size(&self, other: &Texture) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Overwrites every pixel of level 0 with `pixel`.
    ///
    /// `pixel` must be exactly [`Self::bytes_per_pixel`] long; other lengths are ignored.
    pub(crate) fn fill(&mut self, pixel: &[u8]) {
        if pixel.len() != self.bytes_per_pixel() || pixel.is_empty() {
            return;
        }
        for chunk in self.level0_mut().chunks_exact_mut(pixel.len()) {
            chunk.copy_from_slice(pixel);
        }
    }

    #[inline]
    fn byte_range(&self, texel: Texel) -> std::ops::Range<usize> {
        let bpp = self.bytes_per_pixel();
        let start = texel.vec_offset(self.width) * bpp;
        start..start + bpp
    }
}

impl Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("debug_name", &self.debug_name)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("levels", &self.levels)
            .field("format", &self.format)
            .field("usage", &self.usage)
            .finish_non_exhaustive()
    }
}

impl Index<Texel> for Texture {
    type Output = [u8];

    fn index(&self, index: Texel) -> &Self::Output {
        assert!(self.contains(index));
        let range = self.byte_range(index);
        &self.data[range]
    }
}
impl IndexMut<Texel> for Texture {
    fn index_mut(&mut self, index: Texel) -> &mut Self::Output {
        assert!(self.contains(index));
        let range = self.byte_range(index);
        &mut self.data[range]
    }
}

/// A texture handle the device can hold in its bindings.
///
/// Devices are single-threaded, so this is a plain `Rc<RefCell<_>>`.  Cloning the handle
/// does not copy pixels.
#[derive(Clone)]
pub struct SharedTexture(Rc<RefCell<Texture>>);

impl SharedTexture {
    pub fn new(texture: Texture) -> Self {
        Self(Rc::new(RefCell::new(texture)))
    }

    /// Borrows the texture for reading.
    ///
    /// # Panics
    ///
    /// Panics if the texture is currently borrowed for writing.
    pub fn borrow(&self) -> Ref<'_, Texture> {
        self.0.borrow()
    }

    /// Borrows the texture for writing.
    ///
    /// # Panics
    ///
    /// Panics if the texture is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, Texture> {
        self.0.borrow_mut()
    }

    /// Whether two handles refer to the same texture.
    pub fn ptr_eq(&self, other: &SharedTexture) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn width(&self) -> u32 {
        self.0.borrow().width()
    }
    pub fn height(&self) -> u32 {
        self.0.borrow().height()
    }
    pub fn format(&self) -> ColorFormat {
        self.0.borrow().format()
    }
}

impl Debug for SharedTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.try_borrow() {
            Ok(texture) => Debug::fmt(&*texture, f),
            Err(_) => f.write_str("SharedTexture(<borrowed>)"),
        }
    }
}

/// A CPU-readable texture that other textures are staged into.
///
/// # Examples
///
/// ```
/// use cpu_gs::bindings::software::texture::StageSurface;
/// use cpu_gs::pixel_formats::ColorFormat;
///
/// let stage = StageSurface::new(16, 2, ColorFormat::BGRA).unwrap();
/// assert_eq!(stage.line_size(), 64);
/// assert_eq!(stage.data().len(), 128);
/// ```
#[derive(Debug, Clone)]
pub struct StageSurface {
    texture: Texture,
}

impl StageSurface {
    pub fn new(width: u32, height: u32, format: ColorFormat) -> Result<Self, Error> {
        Ok(Self {
            texture: Texture::new(TextureConfig::new(width, height, format), None)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.texture.width()
    }
    pub fn height(&self) -> u32 {
        self.texture.height()
    }
    pub fn format(&self) -> ColorFormat {
        self.texture.format()
    }
    /// Bytes in one row of [`Self::data`].
    pub fn line_size(&self) -> usize {
        self.texture.line_size()
    }
    /// The most recently staged pixels.
    pub fn data(&self) -> &[u8] {
        self.texture.level0()
    }

    pub(crate) fn texture_mut(&mut self) -> &mut Texture {
        &mut self.texture
    }
}
