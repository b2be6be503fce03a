// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! The draw dispatcher.

No shader code runs on the software device.  A draw instead looks at which pair of shader
identities is bound and emulates the one program that pair stands for:

| vertex / fragment | emulation |
|---|---|
| either unknown | error naming both shader files |
| default draw | textured blit to the render target, or to the swapchain when none is bound |
| NV12 luma | luma conversion of the bound image into the render target |
| NV12 chroma | reported as unimplemented |
| any other known pair | reported as unimplemented |

Nothing is remembered between draws; each call derives its behavior from the current
bindings.
*/

use crate::bindings::software::texture::SharedTexture;
use crate::images::projection::{ScreenCoord, project};
use crate::images::render_pass::DrawMode;
use crate::images::shader::{Shader, ShaderKind, ShaderProgram};
use crate::imp::Error;
use crate::imp::blit::{BlitRect, BlitRequest, blit};
use crate::imp::context::DrawContext;
use crate::imp::convert::convert_to_luma;

/// Which emulation a shader pair selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Route {
    TexturedBlit,
    Luma,
    Chroma,
}

fn program_name(shader: &Shader) -> String {
    match shader.kind() {
        ShaderKind::Known { program, .. } => format!("{program:?}"),
        ShaderKind::Unknown => shader.file().to_string(),
    }
}

/// Picks the emulation for the bound shader pair.
pub(crate) fn route(ctx: &DrawContext) -> Result<Route, Error> {
    let (Some(vertex), Some(fragment)) = (&ctx.bindings.vertex_shader, &ctx.bindings.fragment_shader) else {
        return Err(Error::MissingShaders);
    };
    match (vertex.kind().program(), fragment.kind().program()) {
        (None, _) | (_, None) => Err(Error::UnknownShader {
            vertex: vertex.file().to_string(),
            fragment: fragment.file().to_string(),
        }),
        (Some(ShaderProgram::DefaultDraw), Some(ShaderProgram::DefaultDraw)) => Ok(Route::TexturedBlit),
        (Some(ShaderProgram::Nv12Y), Some(ShaderProgram::Nv12Y)) => Ok(Route::Luma),
        (Some(ShaderProgram::Nv12Uv), Some(ShaderProgram::Nv12Uv)) => Ok(Route::Chroma),
        _ => Err(Error::UnhandledShaderPair {
            vertex: program_name(vertex),
            fragment: program_name(fragment),
        }),
    }
}

fn not_a_blit(reason: String) -> Error {
    Error::NotABlit(reason)
}

#[inline]
fn rounded(v: f32) -> i64 {
    v.round() as i64
}

/// Rounds both corners along one axis and returns the first corner and the extent.
fn span(from: f32, to: f32, what: &str) -> Result<(i64, i64), Error> {
    let (from, to) = (rounded(from), rounded(to));
    let extent = to
        .checked_sub(from)
        .ok_or_else(|| not_a_blit(format!("{what} from {from} to {to} does not fit in a rectangle")))?;
    Ok((from, extent))
}

/// Source and destination rectangles of a textured quad.
///
/// The quad must be exactly 4 points in triangle-strip order with one 2-wide texture
/// coordinate channel.  Vertex 0 and vertex 3 are opposite corners: their projected
/// positions give the destination rectangle, their texture coordinates (in source pixels)
/// give the source rectangle.
pub(crate) fn blit_geometry(ctx: &DrawContext, mode: DrawMode, start: u32, count: u32) -> Result<(BlitRect, BlitRect), Error> {
    let buffer = ctx.bindings.vertex_buffer.as_ref().ok_or(Error::NoVertexBuffer)?;
    let data = buffer.data();
    if data.points.len() != 4 {
        return Err(not_a_blit(format!("expected 4 points, found {}", data.points.len())));
    }
    let [channel] = data.tex_coords.as_slice() else {
        return Err(not_a_blit(format!(
            "expected 1 texture coordinate channel, found {}",
            data.tex_coords.len()
        )));
    };
    if channel.width != 2 {
        return Err(not_a_blit(format!("expected texture coordinates of width 2, found {}", channel.width)));
    }
    if mode != DrawMode::TriStrip {
        return Err(not_a_blit(format!("expected a triangle strip, found {mode:?}")));
    }
    if start != 0 || !(count == 0 || count == 4) {
        return Err(not_a_blit(format!("expected to draw vertices 0..4, found {start}..{}", start.saturating_add(count))));
    }
    let (Some(uv0), Some(uv3)) = (channel.get(0), channel.get(3)) else {
        return Err(not_a_blit(format!("expected 4 texture coordinates, found {}", channel.len())));
    };

    let transform = ctx.transforms.combined();
    let viewport = ctx.transforms.viewport;
    let corner = |index: usize| -> Result<ScreenCoord, Error> {
        project(&transform, viewport, data.points[index])
            .ok_or_else(|| not_a_blit(format!("vertex {index} does not project onto the screen")))
    };
    let (p0, p3) = (corner(0)?, corner(3)?);

    let (dst_x, dst_width) = span(p0.x, p3.x, "destination width")?;
    let (dst_y, dst_height) = span(p0.y, p3.y, "destination height")?;
    let (src_x, src_width) = span(uv0[0], uv3[0], "source width")?;
    let (src_y, src_height) = span(uv0[1], uv3[1], "source height")?;
    let dst = BlitRect::new(dst_x, dst_y, dst_width, dst_height);
    let src = BlitRect::new(src_x, src_y, src_width, src_height);
    Ok((src, dst))
}

fn bound_image(ctx: &DrawContext) -> Result<SharedTexture, Error> {
    ctx.params.image().cloned().ok_or(Error::NoSourceImage)
}

fn textured_blit(ctx: &mut DrawContext, mode: DrawMode, start: u32, count: u32) -> Result<(), Error> {
    let (src_rect, dst_rect) = blit_geometry(ctx, mode, start, count)?;
    let image = bound_image(ctx)?;
    match &ctx.bindings.render_target {
        Some(target) => {
            if target.ptr_eq(&image) {
                return Err(Error::TextureAliasing);
            }
            let src = image.borrow();
            let mut dst = target.borrow_mut();
            blit(BlitRequest {
                src: &src,
                dst: &mut dst,
                src_rect,
                dst_rect,
            })
        }
        None => {
            let swapchain = ctx.swapchain.as_mut().ok_or(Error::NoSwapchain)?;
            swapchain.blit_to_output(&image.borrow(), src_rect, dst_rect)
        }
    }
}

fn luma(ctx: &DrawContext) -> Result<(), Error> {
    let target = ctx.bindings.render_target.as_ref().ok_or(Error::NoRenderTarget)?;
    let image = bound_image(ctx)?;
    if target.ptr_eq(&image) {
        return Err(Error::TextureAliasing);
    }
    let src = image.borrow();
    let mut dst = target.borrow_mut();
    convert_to_luma(&src, &mut dst, ctx.params.color_vec(0))
}

/// Emulates one draw call.
///
/// `start` and `count` select vertices; a `count` of 0 draws the whole buffer.
pub(crate) fn draw(ctx: &mut DrawContext, mode: DrawMode, start: u32, count: u32) -> Result<(), Error> {
    let route = route(ctx)?;
    logwise::trace_sync!("draw {route}", route = logwise::privacy::LogIt(&route));
    match route {
        Route::TexturedBlit => textured_blit(ctx, mode, start, count),
        Route::Luma => luma(ctx),
        Route::Chroma => {
            if ctx.bindings.render_target.is_none() {
                return Err(Error::NoRenderTarget);
            }
            Err(Error::unimplemented("NV12 chroma plane conversion"))
        }
    }
}
