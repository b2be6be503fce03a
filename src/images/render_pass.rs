// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Draw modes and the fixed-function render state.
//!
//! The device records blend, depth and cull state so callers can read it back, but none of
//! it affects pixels: the software paths neither blend nor depth-test.

/// Primitive topology of a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawMode {
    Points,
    Lines,
    LineStrip,
    Tris,
    TriStrip,
}

/// A blend factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendType {
    Zero,
    One,
    SrcColor,
    InvSrcColor,
    SrcAlpha,
    InvSrcAlpha,
    DstColor,
    InvDstColor,
    DstAlpha,
    InvDstAlpha,
    SrcAlphaSat,
}

/// Blend factors for color and alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendState {
    pub src_color: BlendType,
    pub dst_color: BlendType,
    pub src_alpha: BlendType,
    pub dst_alpha: BlendType,
}

impl Default for BlendState {
    ///Straight-alpha "over": `src * srcAlpha + dst * (1 - srcAlpha)`.
    fn default() -> Self {
        Self {
            src_color: BlendType::SrcAlpha,
            dst_color: BlendType::InvSrcAlpha,
            src_alpha: BlendType::One,
            dst_alpha: BlendType::InvSrcAlpha,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullMode {
    #[default]
    Back,
    Front,
    Neither,
}

/// Which buffers a clear touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClearFlags {
    pub color: bool,
    pub depth: bool,
    pub stencil: bool,
}

impl ClearFlags {
    pub const COLOR: ClearFlags = ClearFlags {
        color: true,
        depth: false,
        stencil: false,
    };
    pub const ALL: ClearFlags = ClearFlags {
        color: true,
        depth: true,
        stencil: true,
    };
}

/// A depth or stencil comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthTest {
    Never,
    Less,
    LessEqual,
    Equal,
    GreaterEqual,
    Greater,
    NotEqual,
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StencilSide {
    Front,
    Back,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StencilOp {
    Keep,
    Zero,
    Replace,
    Incr,
    Decr,
    Invert,
}

/// Depth-stencil buffer encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZStencilFormat {
    Z16,
    Z24S8,
    Z32F,
    Z32FS8X24,
}
