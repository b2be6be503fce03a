// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
use crate::pixel_formats::ColorFormat;

/// Everything that can make the software device abandon a call.
///
/// None of these are fatal.  The device logs the error once and the call that produced it
/// leaves every pixel buffer untouched.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Can't blit between {src} and {dst}")]
    UnsupportedFormatPair { src: ColorFormat, dst: ColorFormat },
    #[error("Source is {}x{} but destination is {}x{}", .src.0, .src.1, .dst.0, .dst.1)]
    ResolutionMismatch { src: (u32, u32), dst: (u32, u32) },
    #[error("Can't convert to luma: destination format {0} is not a single-byte luma format")]
    UnsupportedLumaFormat(ColorFormat),
    #[error("Format {0} can't back a software texture")]
    UnsupportedFormat(ColorFormat),
    #[error("A {width}x{height} texture with {levels} levels is too large to address")]
    TextureTooLarge { width: u32, height: u32, levels: u32 },
    #[error("Initial data is {actual} bytes, expected {expected}")]
    InvalidInitialData { expected: usize, actual: usize },
    #[error("Textures differ in size: {}x{} vs {}x{}", .a.0, .a.1, .b.0, .b.1)]
    SizeMismatch { a: (u32, u32), b: (u32, u32) },
    #[error("No render target is bound")]
    NoRenderTarget,
    #[error("No source image is bound")]
    NoSourceImage,
    #[error("No vertex buffer is bound")]
    NoVertexBuffer,
    #[error("Vertex and pixel shaders must both be bound")]
    MissingShaders,
    #[error("Unknown shader pair: vertex shader {vertex}, pixel shader {fragment}")]
    UnknownShader { vertex: String, fragment: String },
    #[error("Draw call doesn't look like a blit: {0}")]
    NotABlit(String),
    #[error("Trying to draw on swapchain without current swapchain")]
    NoSwapchain,
    #[error("Source image and render target are the same texture")]
    TextureAliasing,
    #[error("Projection stack is empty")]
    ProjectionStackEmpty,
    #[error("{0} is unimplemented.")]
    Unimplemented(String),
    #[error("Drawing with vertex shader {vertex} and pixel shader {fragment} is unimplemented.")]
    UnhandledShaderPair { vertex: String, fragment: String },
    #[error("PNG encoding failed: {0}")]
    PngEncode(#[from] png::EncodingError),
    #[error("PNG decoding failed: {0}")]
    PngDecode(#[from] png::DecodingError),
    #[error("Unsupported PNG: {0}")]
    UnsupportedPng(String),
}

/// Coarse classification of an [`Error`].
///
/// `Unimplemented` and `Unknown` are deliberately separate: the first is a path this device
/// recognizes but has not built, the second is input it has never seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad formats, sizes or missing bindings.
    Configuration,
    /// The bound geometry is not the shape the recognized program expects.
    ShapeMismatch,
    /// Recognized, but not built.
    Unimplemented,
    /// Not recognized at all.
    Unknown,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotABlit(_) => ErrorKind::ShapeMismatch,
            Error::Unimplemented(_) | Error::UnhandledShaderPair { .. } => ErrorKind::Unimplemented,
            Error::UnknownShader { .. } => ErrorKind::Unknown,
            _ => ErrorKind::Configuration,
        }
    }

    pub(crate) fn unimplemented(operation: &str) -> Self {
        Error::Unimplemented(operation.to_string())
    }
}
