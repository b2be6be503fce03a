// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Presentation.

Draws that have no render target bound go to the output surface of the loaded swapchain.
The device talks to it through the [`Present`] trait, so a platform window, a video encoder
or a test harness can sit behind it.

[`FramebufferView`] is the in-memory implementation: an RGBA texture the size of the output,
written with the same blit engine texture-to-texture draws use.
*/

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use crate::bindings::software::texture::Texture;
use crate::bindings::visible_to::{TextureConfig, TextureUsage};
use crate::imp::Error;
use crate::imp::blit::{BlitRect, BlitRequest, blit};
use crate::pixel_formats::ColorFormat;

/// An output surface.
pub trait Present {
    /// Copies `src_rect` of `src` into `dst_rect` of the output surface.
    fn blit_to_output(&mut self, src: &Texture, src_rect: BlitRect, dst_rect: BlitRect) -> Result<(), Error>;
    /// Shows everything drawn since the last present.
    fn present(&mut self) -> Result<(), Error>;
    fn resize(&mut self, width: u32, height: u32) -> Result<(), Error>;
    fn size(&self) -> (u32, u32);
}

/// A shared presenter.
///
/// Lets the caller keep a handle to a presenter it has loaded into a device.
impl<P: Present> Present for Rc<RefCell<P>> {
    fn blit_to_output(&mut self, src: &Texture, src_rect: BlitRect, dst_rect: BlitRect) -> Result<(), Error> {
        self.borrow_mut().blit_to_output(src, src_rect, dst_rect)
    }
    fn present(&mut self) -> Result<(), Error> {
        self.borrow_mut().present()
    }
    fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        self.borrow_mut().resize(width, height)
    }
    fn size(&self) -> (u32, u32) {
        self.borrow().size()
    }
}

/// A presentable surface backed by an RGBA texture in memory.
///
/// # Examples
///
/// ```
/// use cpu_gs::images::view::{FramebufferView, Present};
///
/// let mut view = FramebufferView::new(320, 240).unwrap();
/// view.present().unwrap();
/// assert_eq!(view.frames_presented(), 1);
/// assert_eq!(view.size(), (320, 240));
/// ```
#[derive(Debug)]
pub struct FramebufferView {
    output: Texture,
    frames_presented: u64,
}

fn output_texture(width: u32, height: u32) -> Result<Texture, Error> {
    let config = TextureConfig::new(width, height, ColorFormat::RGBA)
        .with_usage(TextureUsage::RenderTarget)
        .with_debug_name("FramebufferView output");
    Texture::new(config, None)
}

impl FramebufferView {
    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        Ok(Self {
            output: output_texture(width, height)?,
            frames_presented: 0,
        })
    }

    /// The output pixels.
    pub fn output(&self) -> &Texture {
        &self.output
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Writes the output as a PNG image.
    pub fn write_png<W: Write>(&self, w: W) -> Result<(), Error> {
        self.output.write_png(w)
    }
}

impl Present for FramebufferView {
    fn blit_to_output(&mut self, src: &Texture, src_rect: BlitRect, dst_rect: BlitRect) -> Result<(), Error> {
        blit(BlitRequest {
            src,
            dst: &mut self.output,
            src_rect,
            dst_rect,
        })
    }

    fn present(&mut self) -> Result<(), Error> {
        self.frames_presented += 1;
        logwise::trace_sync!(
            "presented frame {frame}",
            frame = self.frames_presented
        );
        Ok(())
    }

    /// Resizing discards the current output.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        self.output = output_texture(width, height)?;
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        (self.output.width(), self.output.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::software::texture::Texel;

    #[test]
    fn blits_land_in_output() {
        let mut view = FramebufferView::new(4, 4).unwrap();
        let src = Texture::new_with(1, 1, ColorFormat::BGRX, |_| vec![3, 2, 1, 0]).unwrap();
        view.blit_to_output(&src, BlitRect::covering(&src), BlitRect::new(2, 2, 2, 2))
            .unwrap();
        assert_eq!(view.output()[Texel { x: 3, y: 3 }], [1, 2, 3, 255]);
        assert_eq!(view.output()[Texel { x: 1, y: 1 }], [0, 0, 0, 0]);
    }

    #[test]
    fn resize_replaces_output() {
        let mut view = FramebufferView::new(4, 4).unwrap();
        view.resize(8, 2).unwrap();
        assert_eq!(view.size(), (8, 2));
        assert_eq!(view.output().data().len(), 8 * 2 * 4);
    }
}
