// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! The per-device draw state.
//!
//! Everything earlier device calls have set, and a draw reads.  Fields are grouped by
//! concern so that each group can be saved, swapped or shared on its own.

use std::fmt::Debug;

use crate::bindings::bind_style::ParamSlots;
use crate::bindings::software::texture::SharedTexture;
use crate::images::projection::{Mat4, Viewport};
use crate::images::render_pass::{BlendState, CullMode};
use crate::images::shader::Shader;
use crate::images::vertex_buffer::{IndexBuffer, VertexBuffer};
use crate::images::view::Present;

/// What is bound for the next draw.
#[derive(Debug, Default)]
pub(crate) struct Bindings {
    pub(crate) vertex_shader: Option<Shader>,
    pub(crate) fragment_shader: Option<Shader>,
    pub(crate) vertex_buffer: Option<VertexBuffer>,
    pub(crate) index_buffer: Option<IndexBuffer>,
    /// `None` draws to the swapchain.
    pub(crate) render_target: Option<SharedTexture>,
}

/// Projection, model-view and viewport.
#[derive(Debug, Default)]
pub(crate) struct Transforms {
    pub(crate) projection: Mat4,
    pub(crate) projection_stack: Vec<Mat4>,
    pub(crate) model_view: Mat4,
    pub(crate) viewport: Viewport,
}

impl Transforms {
    /// The transform a vertex position goes through before the viewport.
    pub(crate) fn combined(&self) -> Mat4 {
        self.projection * self.model_view
    }
}

/// Recorded fixed-function state.  None of it changes pixels.
#[derive(Debug, Default)]
pub(crate) struct RenderState {
    pub(crate) blend: BlendState,
    pub(crate) blending_enabled: bool,
    pub(crate) depth_test: bool,
    pub(crate) cull_mode: CullMode,
}

#[derive(Default)]
pub(crate) struct DrawContext {
    pub(crate) bindings: Bindings,
    pub(crate) params: ParamSlots,
    pub(crate) transforms: Transforms,
    pub(crate) render_state: RenderState,
    pub(crate) swapchain: Option<Box<dyn Present>>,
}

impl Debug for DrawContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawContext")
            .field("bindings", &self.bindings)
            .field("params", &self.params)
            .field("transforms", &self.transforms)
            .field("render_state", &self.render_state)
            .field("swapchain", &self.swapchain.as_ref().map(|s| s.size()))
            .finish()
    }
}
