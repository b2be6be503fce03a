// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Texture creation configuration.
//!
//! A software texture has no memory placement to optimize, but callers still declare what a
//! texture is for.  The declaration travels with the texture for diagnostics.
//!
//! # Examples
//!
//! ```
//! use cpu_gs::bindings::visible_to::{TextureConfig, TextureUsage};
//! use cpu_gs::pixel_formats::ColorFormat;
//!
//! let config = TextureConfig::new(1920, 1080, ColorFormat::R8)
//!     .with_usage(TextureUsage::RenderTarget)
//!     .with_debug_name("nv12_y");
//! assert_eq!(config.levels, 1);
//! ```

use crate::pixel_formats::ColorFormat;

/// Describes how a texture will be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureUsage {
    /// Written once at creation, then only read.
    #[default]
    Static,
    /// Rewritten from the CPU between draws.
    Dynamic,
    /// Bound as a render target and written by draws.
    RenderTarget,
}

/// Configuration for creating a texture.
#[derive(Debug, Clone)]
pub struct TextureConfig<'a> {
    /// Width of level 0, in pixels.
    pub width: u32,
    /// Height of level 0, in pixels.
    pub height: u32,
    /// The pixel encoding.  Never changes after creation.
    pub format: ColorFormat,
    /// Number of mip levels the buffer is sized for.  0 is treated as 1.
    pub levels: u32,
    pub usage: TextureUsage,
    pub debug_name: &'a str,
}

impl<'a> TextureConfig<'a> {
    /// A single-level static texture with no name.
    pub const fn new(width: u32, height: u32, format: ColorFormat) -> Self {
        Self {
            width,
            height,
            format,
            levels: 1,
            usage: TextureUsage::Static,
            debug_name: "",
        }
    }

    pub const fn with_levels(mut self, levels: u32) -> Self {
        self.levels = levels;
        self
    }

    pub const fn with_usage(mut self, usage: TextureUsage) -> Self {
        self.usage = usage;
        self
    }

    pub const fn with_debug_name(mut self, debug_name: &'a str) -> Self {
        self.debug_name = debug_name;
        self
    }
}
