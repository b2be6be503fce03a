// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Vectors, matrices and the projection from vertex space to screen pixels.

Vector and matrix types are `glam`'s.  Matrices follow its column-vector convention: a point
is transformed as `M * v`, so "first A, then B" composes as `B * A`.

[`ortho`] and [`frustum`] build the projections graphics layers written for row-vector
matrices expect.  Their rows there are the columns here.

# Examples

```
use cpu_gs::images::projection::{Vec3, Viewport, ortho, project};

// A 640x480 pixel-space ortho projection, y down
let ortho = ortho(0.0, 640.0, 0.0, 480.0, -100.0, 100.0);
let viewport = Viewport::new(0, 0, 640, 480);
let corner = project(&ortho, viewport, Vec3::new(640.0, 480.0, 0.0)).unwrap();
assert_eq!((corner.x.round(), corner.y.round()), (640.0, 480.0));
```
*/

pub use glam::{Mat4, Vec3, Vec4};

/// Orthographic projection of the box `[left, right] x [top, bottom] x [near, far]`.
///
/// `top` maps to the top of the viewport, so `ortho(0, w, 0, h, ..)` addresses pixels
/// with y growing downward.
pub fn ortho(left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) -> Mat4 {
    let rml = right - left;
    let bmt = bottom - top;
    let fmn = far - near;
    Mat4::from_cols(
        Vec4::new(2.0 / rml, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 / -bmt, 0.0, 0.0),
        Vec4::new(0.0, 0.0, -2.0 / fmn, 0.0),
        Vec4::new((left + right) / -rml, (bottom + top) / bmt, (far + near) / -fmn, 1.0),
    )
}

/// Perspective projection of the frustum with the given near-plane edges.
pub fn frustum(left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) -> Mat4 {
    let rml = right - left;
    let tmb = top - bottom;
    let fmn = far - near;
    Mat4::from_cols(
        Vec4::new(2.0 * near / rml, 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * near / tmb, 0.0, 0.0),
        Vec4::new((left + right) / rml, (top + bottom) / tmb, -(far + near) / fmn, -1.0),
        Vec4::new(0.0, 0.0, -(2.0 * far * near) / fmn, 0.0),
    )
}

/// The rectangle of the render target that normalized device coordinates map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}
impl Viewport {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

/// A position in render target pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenCoord {
    pub x: f32,
    pub y: f32,
}

/// Projects a vertex through `transform` and `viewport` into screen pixels.
///
/// Divides by w, maps [-1, 1] to [0, 1], flips y so that +y is down, then scales by the
/// viewport extent and offsets by its origin.
///
/// Returns `None` when the vertex does not land at a finite position (for example `w == 0`).
pub fn project(transform: &Mat4, viewport: Viewport, vertex: Vec3) -> Option<ScreenCoord> {
    let clip = *transform * vertex.extend(1.0);
    if !clip.is_finite() || clip.w == 0.0 {
        return None;
    }
    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;
    let coord = ScreenCoord {
        x: (ndc_x + 1.0) / 2.0 * viewport.width as f32 + viewport.x as f32,
        y: (1.0 - (ndc_y + 1.0) / 2.0) * viewport.height as f32 + viewport.y as f32,
    };
    (coord.x.is_finite() && coord.y.is_finite()).then_some(coord)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1.0e-4
    }

    #[test]
    fn ortho_maps_corners() {
        let m = ortho(0.0, 10.0, 0.0, 20.0, -1.0, 1.0);
        let top_left = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let bottom_right = m * Vec4::new(10.0, 20.0, 0.0, 1.0);
        assert!(close(top_left.x, -1.0) && close(top_left.y, 1.0));
        assert!(close(bottom_right.x, 1.0) && close(bottom_right.y, -1.0));
    }

    #[test]
    fn ortho_depth_range() {
        let m = ortho(0.0, 1.0, 0.0, 1.0, 0.0, 10.0);
        assert!(close((m * Vec4::new(0.0, 0.0, 0.0, 1.0)).z, -1.0));
        assert!(close((m * Vec4::new(0.0, 0.0, 10.0, 1.0)).z, -3.0));
    }

    #[test]
    fn frustum_divides_by_depth() {
        let m = frustum(-1.0, 1.0, 1.0, -1.0, 1.0, 10.0);
        let clip = m * Vec4::new(2.0, 0.0, -2.0, 1.0);
        assert!(close(clip.w, 2.0));
        assert!(close(clip.x / clip.w, 1.0));
    }

    #[test]
    fn project_honors_viewport_origin() {
        let m = ortho(0.0, 100.0, 0.0, 100.0, -1.0, 1.0);
        let p = project(&m, Viewport::new(10, 20, 100, 100), Vec3::new(50.0, 25.0, 0.0)).unwrap();
        assert!(close(p.x, 60.0) && close(p.y, 45.0));
    }

    #[test]
    fn project_follows_model_view_then_projection() {
        let model_view = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0));
        let m = ortho(0.0, 100.0, 0.0, 100.0, -1.0, 1.0) * model_view;
        let p = project(&m, Viewport::new(0, 0, 100, 100), Vec3::new(10.0, 10.0, 0.0)).unwrap();
        assert!(close(p.x, 15.0) && close(p.y, 10.0));
    }

    #[test]
    fn project_rejects_points_at_infinity() {
        let mut m = Mat4::IDENTITY;
        m.w_axis.w = 0.0;
        assert_eq!(project(&m, Viewport::new(0, 0, 4, 4), Vec3::new(1.0, 1.0, 0.0)), None);
    }
}
