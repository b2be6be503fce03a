// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! The software graphics device.
//!
//! [`Device`] is the surface the rest of a graphics stack talks to: it creates resources,
//! records bindings and fixed-function state, and runs draws through the dispatcher.
//!
//! Every call runs to completion on the caller's thread.  A call that fails logs its error
//! once, at error level, returns it, and leaves every pixel untouched.  Nothing is fatal.
//!
//! # Example
//!
//! ```
//! use cpu_gs::Device;
//! use cpu_gs::bindings::visible_to::TextureConfig;
//! use cpu_gs::images::device::DeviceConfig;
//! use cpu_gs::images::projection::Vec4;
//! use cpu_gs::images::render_pass::DrawMode;
//! use cpu_gs::pixel_formats::ColorFormat;
//!
//! let mut device = Device::new(DeviceConfig::default());
//! let rgba = device.texture_create(TextureConfig::new(4, 4, ColorFormat::RGBA), Some(&[255; 64])).unwrap();
//! let y = device.texture_create(TextureConfig::new(4, 4, ColorFormat::R8), None).unwrap();
//!
//! let vs = device.vertex_shader_create("", "format_conversion.effect:NV12_Y");
//! let ps = device.pixel_shader_create("", "format_conversion.effect:NV12_Y");
//! device.load_vertex_shader(Some(&vs));
//! device.load_pixel_shader(Some(&ps));
//! device.set_texture(&ps.param_by_name("image"), Some(&rgba));
//! device.set_vec4(&ps.param_by_name("color_vec0"), Vec4::new(0.299, 0.587, 0.114, 0.0));
//! device.set_render_target(Some(&y));
//! device.draw(DrawMode::TriStrip, 0, 0).unwrap();
//!
//! assert!(y.borrow().data().iter().all(|&luma| luma == 255));
//! ```

use crate::bindings::bind_style::{ParamValue, ShaderParam};
use crate::bindings::sampler::{SamplerInfo, SamplerState};
use crate::bindings::software::texture::{SharedTexture, StageSurface, Texture};
use crate::bindings::visible_to::TextureConfig;
use crate::images::projection::{Mat4, Vec4, Viewport, frustum, ortho};
use crate::images::render_pass::{
    BlendState, BlendType, ClearFlags, CullMode, DepthTest, DrawMode, StencilOp, StencilSide, ZStencilFormat,
};
use crate::images::shader::{Shader, ShaderStage};
use crate::images::vertex_buffer::{IndexBuffer, VertexBuffer, VertexData};
use crate::images::view::Present;
use crate::imp::Error;
use crate::imp::blit::{BlitRect, BlitRequest, blit};
use crate::imp::context::DrawContext;
use crate::imp::draw;
use crate::pixel_formats::{ColorFormat, Unorm4};

/// The kind of graphics device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DeviceType {
    OpenGl,
    Direct3D11,
    Cpu,
}

/// Configuration for creating a [`Device`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Index of the adapter asked for.  The CPU is the only adapter; the value is recorded.
    pub adapter: u32,
    pub debug_name: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            adapter: 0,
            debug_name: "cpu_gs".to_string(),
        }
    }
}

/// Logs a failed call's error, then hands the result back.
fn reported<T>(result: Result<T, Error>) -> Result<T, Error> {
    if let Err(err) = &result {
        logwise::error_sync!("{err}", err = logwise::privacy::LogIt(err));
    }
    result
}

fn unimplemented<T>(operation: &str) -> Result<T, Error> {
    reported(Err(Error::unimplemented(operation)))
}

/// Encodes a normalized color as one pixel of `format`.
fn clear_pixel(format: ColorFormat, color: Vec4) -> Result<Vec<u8>, Error> {
    let Unorm4 { r, g, b, a } = Unorm4::from_floats(color.x, color.y, color.z, color.w);
    match format {
        ColorFormat::RGBA => Ok(vec![r, g, b, a]),
        ColorFormat::BGRA => Ok(vec![b, g, r, a]),
        ColorFormat::BGRX => Ok(vec![b, g, r, 0xff]),
        ColorFormat::R8 => Ok(vec![r]),
        ColorFormat::A8 => Ok(vec![a]),
        ColorFormat::R8G8 => Ok(vec![r, g]),
        other => Err(Error::UnsupportedFormat(other)),
    }
}

/// Resolves a 0 extent to "up to the source edge".
fn region_extent(extent: u32, origin: u32, size: u32) -> u32 {
    if extent == 0 { size.saturating_sub(origin) } else { extent }
}

/// A software graphics device.
#[derive(Debug)]
pub struct Device {
    config: DeviceConfig,
    ctx: DrawContext,
}

impl Device {
    pub fn new(config: DeviceConfig) -> Self {
        logwise::info_sync!("---------------------------------");
        logwise::info_sync!("Initializing CPU Renderer...");
        let device = Device {
            config,
            ctx: DrawContext::default(),
        };
        logwise::info_sync!("CPU Renderer loaded.");
        device
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn name(&self) -> &'static str {
        "CPU"
    }

    pub fn device_type(&self) -> DeviceType {
        DeviceType::Cpu
    }

    /// The macro shader sources can test for this backend.
    pub fn preprocessor_name(&self) -> &'static str {
        "_CPU"
    }

    pub fn enter_context(&mut self) {}
    pub fn leave_context(&mut self) {}
    pub fn begin_frame(&mut self) {}
    pub fn begin_scene(&mut self) {}
    pub fn end_scene(&mut self) {}
    pub fn flush(&mut self) {}

    // resources

    /// Creates a texture, copying in `data` if given.
    ///
    /// # Errors
    ///
    /// See [`Texture::new`].
    pub fn texture_create(&mut self, config: TextureConfig<'_>, data: Option<&[u8]>) -> Result<SharedTexture, Error> {
        reported(Texture::new(config, data)).map(SharedTexture::new)
    }

    /// Creates an RGBA texture from an encoded PNG image.
    pub fn texture_create_from_png(&mut self, png: &[u8], debug_name: &str) -> Result<SharedTexture, Error> {
        reported(Texture::from_png_bytes(png, debug_name)).map(SharedTexture::new)
    }

    pub fn stage_surface_create(&mut self, width: u32, height: u32, format: ColorFormat) -> Result<StageSurface, Error> {
        reported(StageSurface::new(width, height, format))
    }

    /// Creates a vertex buffer.  `dynamic` buffers can be refilled with [`VertexBuffer::flush`].
    pub fn vertex_buffer_create(&mut self, data: VertexData, dynamic: bool) -> VertexBuffer {
        VertexBuffer::new(data, dynamic)
    }

    pub fn index_buffer_create(&mut self, indices: Vec<u32>) -> IndexBuffer {
        IndexBuffer::new(indices)
    }

    /// Creates a vertex shader.
    ///
    /// `source` is not compiled.  The shader's identity comes from `descriptor`, see
    /// [`crate::images::shader`].
    pub fn vertex_shader_create(&mut self, _source: &str, descriptor: &str) -> Shader {
        Shader::new(ShaderStage::Vertex, descriptor)
    }

    /// Creates a pixel shader.  As [`Self::vertex_shader_create`].
    pub fn pixel_shader_create(&mut self, _source: &str, descriptor: &str) -> Shader {
        Shader::new(ShaderStage::Fragment, descriptor)
    }

    pub fn sampler_state_create(&mut self, info: SamplerInfo) -> SamplerState {
        SamplerState::new(info)
    }

    /// Cube textures are not supported.
    pub fn cube_texture_create(&mut self, _size: u32, _format: ColorFormat, _levels: u32) -> Result<SharedTexture, Error> {
        unimplemented("cube_texture_create")
    }

    /// Volume textures are not supported.
    pub fn volume_texture_create(
        &mut self,
        _width: u32,
        _height: u32,
        _depth: u32,
        _format: ColorFormat,
        _levels: u32,
    ) -> Result<SharedTexture, Error> {
        unimplemented("volume_texture_create")
    }

    /// Depth-stencil buffers are not modeled.
    pub fn zstencil_create(&mut self, _width: u32, _height: u32, _format: ZStencilFormat) -> Result<SharedTexture, Error> {
        unimplemented("zstencil_create")
    }

    // bindings

    pub fn load_vertex_buffer(&mut self, buffer: Option<&VertexBuffer>) {
        self.ctx.bindings.vertex_buffer = buffer.cloned();
    }

    /// The bound vertex buffer, for refilling in place.
    pub fn vertex_buffer_mut(&mut self) -> Option<&mut VertexBuffer> {
        self.ctx.bindings.vertex_buffer.as_mut()
    }

    pub fn load_index_buffer(&mut self, buffer: Option<&IndexBuffer>) {
        self.ctx.bindings.index_buffer = buffer.cloned();
    }

    pub fn load_vertex_shader(&mut self, shader: Option<&Shader>) {
        self.ctx.bindings.vertex_shader = shader.cloned();
    }

    pub fn load_pixel_shader(&mut self, shader: Option<&Shader>) {
        self.ctx.bindings.fragment_shader = shader.cloned();
    }

    pub fn vertex_shader(&self) -> Option<&Shader> {
        self.ctx.bindings.vertex_shader.as_ref()
    }

    pub fn pixel_shader(&self) -> Option<&Shader> {
        self.ctx.bindings.fragment_shader.as_ref()
    }

    /// Sets an image parameter.  `None` unbinds it.
    pub fn set_texture(&mut self, param: &ShaderParam, texture: Option<&SharedTexture>) {
        self.ctx.params.set(param, ParamValue::Texture(texture.cloned()));
    }

    /// Sets a color vector parameter.
    pub fn set_vec4(&mut self, param: &ShaderParam, value: Vec4) {
        self.ctx.params.set(param, ParamValue::Vec4(value));
    }

    /// Binds the render target.  `None` draws to the swapchain.
    pub fn set_render_target(&mut self, texture: Option<&SharedTexture>) {
        self.ctx.bindings.render_target = texture.cloned();
    }

    pub fn render_target(&self) -> Option<&SharedTexture> {
        self.ctx.bindings.render_target.as_ref()
    }

    /// Loads the presenter draws go to when no render target is bound.
    ///
    /// Returns the previously loaded presenter.
    pub fn load_swapchain(&mut self, swapchain: Option<Box<dyn Present>>) -> Option<Box<dyn Present>> {
        std::mem::replace(&mut self.ctx.swapchain, swapchain)
    }

    // render state

    pub fn enable_blending(&mut self, enable: bool) {
        self.ctx.render_state.blending_enabled = enable;
    }

    pub fn blending_enabled(&self) -> bool {
        self.ctx.render_state.blending_enabled
    }

    /// Sets the same factors for color and alpha.
    pub fn blend_function(&mut self, src: BlendType, dst: BlendType) {
        self.blend_function_separate(src, dst, src, dst);
    }

    pub fn blend_function_separate(&mut self, src_color: BlendType, dst_color: BlendType, src_alpha: BlendType, dst_alpha: BlendType) {
        self.ctx.render_state.blend = BlendState {
            src_color,
            dst_color,
            src_alpha,
            dst_alpha,
        };
    }

    pub fn blend_state(&self) -> BlendState {
        self.ctx.render_state.blend
    }

    pub fn enable_depth_test(&mut self, enable: bool) {
        self.ctx.render_state.depth_test = enable;
    }

    pub fn depth_test_enabled(&self) -> bool {
        self.ctx.render_state.depth_test
    }

    pub fn set_cull_mode(&mut self, mode: CullMode) {
        self.ctx.render_state.cull_mode = mode;
    }

    pub fn cull_mode(&self) -> CullMode {
        self.ctx.render_state.cull_mode
    }

    pub fn enable_stencil_test(&mut self, _enable: bool) -> Result<(), Error> {
        unimplemented("enable_stencil_test")
    }

    pub fn enable_stencil_write(&mut self, _enable: bool) -> Result<(), Error> {
        unimplemented("enable_stencil_write")
    }

    pub fn stencil_function(&mut self, _side: StencilSide, _test: DepthTest) -> Result<(), Error> {
        unimplemented("stencil_function")
    }

    pub fn stencil_op(&mut self, _side: StencilSide, _fail: StencilOp, _zfail: StencilOp, _zpass: StencilOp) -> Result<(), Error> {
        unimplemented("stencil_op")
    }

    pub fn depth_function(&mut self, _test: DepthTest) -> Result<(), Error> {
        unimplemented("depth_function")
    }

    pub fn set_scissor_rect(&mut self, _rect: Option<Viewport>) -> Result<(), Error> {
        unimplemented("set_scissor_rect")
    }

    pub fn enable_color(&mut self, _red: bool, _green: bool, _blue: bool, _alpha: bool) -> Result<(), Error> {
        unimplemented("enable_color")
    }

    pub fn debug_marker_begin(&mut self, _name: &str, _color: [f32; 4]) -> Result<(), Error> {
        unimplemented("debug_marker_begin")
    }

    pub fn debug_marker_end(&mut self) -> Result<(), Error> {
        unimplemented("debug_marker_end")
    }

    // transforms

    /// Replaces the projection with an orthographic one.  See [`ortho`].
    pub fn ortho(&mut self, left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) {
        self.ctx.transforms.projection = ortho(left, right, top, bottom, near, far);
    }

    /// Replaces the projection with a perspective one.  See [`frustum`].
    pub fn frustum(&mut self, left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) {
        self.ctx.transforms.projection = frustum(left, right, top, bottom, near, far);
    }

    pub fn projection(&self) -> Mat4 {
        self.ctx.transforms.projection
    }

    /// Saves the current projection.
    pub fn projection_push(&mut self) {
        let projection = self.ctx.transforms.projection;
        self.ctx.transforms.projection_stack.push(projection);
    }

    /// Restores the most recently pushed projection.
    ///
    /// # Errors
    ///
    /// [`Error::ProjectionStackEmpty`] if nothing was pushed.  The projection is unchanged.
    pub fn projection_pop(&mut self) -> Result<(), Error> {
        let projection = reported(self.ctx.transforms.projection_stack.pop().ok_or(Error::ProjectionStackEmpty))?;
        self.ctx.transforms.projection = projection;
        Ok(())
    }

    /// Sets the model-view transform vertices pass through before the projection.
    pub fn set_transform(&mut self, model_view: Mat4) {
        self.ctx.transforms.model_view = model_view;
    }

    pub fn transform(&self) -> Mat4 {
        self.ctx.transforms.model_view
    }

    pub fn set_viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.ctx.transforms.viewport = Viewport::new(x, y, width, height);
    }

    pub fn viewport(&self) -> Viewport {
        self.ctx.transforms.viewport
    }

    // pixel operations

    /// Clears the bound render target.
    ///
    /// Only color clears have an effect; there are no depth or stencil buffers.  Without a
    /// render target this does nothing.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFormat`] if the render target's format can't be filled with a
    /// color.
    pub fn clear(&mut self, flags: ClearFlags, color: Vec4, _depth: f32, _stencil: u8) -> Result<(), Error> {
        let Some(target) = &self.ctx.bindings.render_target else {
            return Ok(());
        };
        if flags.color {
            let mut target = target.borrow_mut();
            let pixel = reported(clear_pixel(target.format(), color))?;
            target.fill(&pixel);
        }
        Ok(())
    }

    /// Copies all of `src` into `dst`.
    ///
    /// # Errors
    ///
    /// - [`Error::TextureAliasing`] if both are the same texture
    /// - [`Error::SizeMismatch`] if they differ in size
    /// - [`Error::UnsupportedFormatPair`] if they differ in format
    pub fn copy_texture(&mut self, dst: &SharedTexture, src: &SharedTexture) -> Result<(), Error> {
        reported(copy_texture(dst, src))
    }

    /// Copies a region of `src` to `(dst_x, dst_y)` in `dst`, unscaled.
    ///
    /// A `src_width` or `src_height` of 0 extends the region to the edge of `src`.
    /// Pixels that would land outside `dst` are clipped.
    #[allow(clippy::too_many_arguments)]
    pub fn copy_texture_region(
        &mut self,
        dst: &SharedTexture,
        dst_x: u32,
        dst_y: u32,
        src: &SharedTexture,
        src_x: u32,
        src_y: u32,
        src_width: u32,
        src_height: u32,
    ) -> Result<(), Error> {
        reported(copy_texture_region(dst, (dst_x, dst_y), src, (src_x, src_y, src_width, src_height)))
    }

    /// Copies level 0 of `src` into `stage` for reading on the CPU.
    ///
    /// # Errors
    ///
    /// [`Error::SizeMismatch`] or [`Error::UnsupportedFormatPair`] unless `stage` matches
    /// `src` in size and format.
    pub fn stage_texture(&mut self, stage: &mut StageSurface, src: &SharedTexture) -> Result<(), Error> {
        reported(stage_texture(stage, src))
    }

    /// Emulates a draw call with the bound shaders, buffers and render target.
    ///
    /// A `count` of 0 draws the whole vertex buffer.
    pub fn draw(&mut self, mode: DrawMode, start: u32, count: u32) -> Result<(), Error> {
        reported(draw::draw(&mut self.ctx, mode, start, count))
    }

    // presentation

    pub fn present(&mut self) -> Result<(), Error> {
        reported(self.swapchain_mut().and_then(|s| s.present()))
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        reported(self.swapchain_mut().and_then(|s| s.resize(width, height)))
    }

    /// Size of the swapchain's output surface.
    pub fn size(&self) -> Result<(u32, u32), Error> {
        reported(self.ctx.swapchain.as_ref().map(|s| s.size()).ok_or(Error::NoSwapchain))
    }

    fn swapchain_mut(&mut self) -> Result<&mut Box<dyn Present>, Error> {
        self.ctx.swapchain.as_mut().ok_or(Error::NoSwapchain)
    }
}

fn copy_texture(dst: &SharedTexture, src: &SharedTexture) -> Result<(), Error> {
    if dst.ptr_eq(src) {
        return Err(Error::TextureAliasing);
    }
    let src = src.borrow();
    let mut dst = dst.borrow_mut();
    if !src.same_size(&dst) {
        return Err(Error::SizeMismatch {
            a: (src.width(), src.height()),
            b: (dst.width(), dst.height()),
        });
    }
    if src.format() != dst.format() {
        return Err(Error::UnsupportedFormatPair {
            src: src.format(),
            dst: dst.format(),
        });
    }
    blit(BlitRequest {
        src_rect: BlitRect::covering(&src),
        dst_rect: BlitRect::covering(&dst),
        src: &src,
        dst: &mut dst,
    })
}

fn copy_texture_region(
    dst: &SharedTexture,
    (dst_x, dst_y): (u32, u32),
    src: &SharedTexture,
    (src_x, src_y, src_width, src_height): (u32, u32, u32, u32),
) -> Result<(), Error> {
    if dst.ptr_eq(src) {
        return Err(Error::TextureAliasing);
    }
    let src = src.borrow();
    let mut dst = dst.borrow_mut();
    let width = region_extent(src_width, src_x, src.width()) as i64;
    let height = region_extent(src_height, src_y, src.height()) as i64;
    blit(BlitRequest {
        src_rect: BlitRect::new(src_x as i64, src_y as i64, width, height),
        dst_rect: BlitRect::new(dst_x as i64, dst_y as i64, width, height),
        src: &src,
        dst: &mut dst,
    })
}

fn stage_texture(stage: &mut StageSurface, src: &SharedTexture) -> Result<(), Error> {
    let src = src.borrow();
    if (src.width(), src.height()) != (stage.width(), stage.height()) {
        return Err(Error::SizeMismatch {
            a: (src.width(), src.height()),
            b: (stage.width(), stage.height()),
        });
    }
    if src.format() != stage.format() {
        return Err(Error::UnsupportedFormatPair {
            src: src.format(),
            dst: stage.format(),
        });
    }
    let dst = stage.texture_mut();
    blit(BlitRequest {
        src_rect: BlitRect::covering(&src),
        dst_rect: BlitRect::covering(dst),
        src: &src,
        dst,
    })
}
