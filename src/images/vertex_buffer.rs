// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Vertex and index buffers.
//!
//! The software device keeps vertex data on the CPU as plain vectors.  Only positions and
//! texture coordinates matter to the draw dispatcher; other attributes are not modeled.

use crate::images::projection::Vec3;

/// One texture-coordinate channel.
///
/// `width` is the number of components per vertex (2 for UV), and `values` holds them
/// flattened, `width` per vertex.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TexCoordChannel {
    pub width: usize,
    pub values: Vec<f32>,
}

impl TexCoordChannel {
    /// A 2-wide channel from UV pairs.
    pub fn uv(pairs: &[[f32; 2]]) -> Self {
        Self {
            width: 2,
            values: pairs.iter().flatten().copied().collect(),
        }
    }

    /// The coordinates of vertex `index`, if present.
    pub fn get(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.width)?;
        self.values.get(start..start.checked_add(self.width)?)
    }

    /// Number of vertices this channel covers.
    pub fn len(&self) -> usize {
        match self.width {
            0 => 0,
            w => self.values.len() / w,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The data a vertex buffer is created from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VertexData {
    pub points: Vec<Vec3>,
    pub tex_coords: Vec<TexCoordChannel>,
}

impl VertexData {
    /// A textured quad in triangle-strip order: top-left, top-right, bottom-left,
    /// bottom-right.
    ///
    /// `uv` is given in source pixels, the way the draw dispatcher reads it.
    ///
    /// ```
    /// use cpu_gs::images::vertex_buffer::VertexData;
    ///
    /// let quad = VertexData::quad((0.0, 0.0, 64.0, 32.0), (0.0, 0.0, 64.0, 32.0));
    /// assert_eq!(quad.points.len(), 4);
    /// assert_eq!(quad.tex_coords[0].get(3), Some(&[64.0, 32.0][..]));
    /// ```
    pub fn quad(position: (f32, f32, f32, f32), uv: (f32, f32, f32, f32)) -> Self {
        let (x, y, w, h) = position;
        let (u, v, uw, vh) = uv;
        Self {
            points: vec![
                Vec3::new(x, y, 0.0),
                Vec3::new(x + w, y, 0.0),
                Vec3::new(x, y + h, 0.0),
                Vec3::new(x + w, y + h, 0.0),
            ],
            tex_coords: vec![TexCoordChannel::uv(&[
                [u, v],
                [u + uw, v],
                [u, v + vh],
                [u + uw, v + vh],
            ])],
        }
    }
}

/// A created vertex buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBuffer {
    data: VertexData,
    dynamic: bool,
}

impl VertexBuffer {
    pub fn new(data: VertexData, dynamic: bool) -> Self {
        Self { data, dynamic }
    }

    pub fn data(&self) -> &VertexData {
        &self.data
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    pub fn len(&self) -> usize {
        self.data.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.points.is_empty()
    }

    /// Replaces the contents of a dynamic buffer.
    ///
    /// Static buffers are left unchanged and `false` is returned.
    pub fn flush(&mut self, data: VertexData) -> bool {
        if !self.dynamic {
            return false;
        }
        self.data = data;
        true
    }
}

/// A created index buffer.
///
/// Indices are recorded so the device can bind them; the draw paths the device emulates
/// never read them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexBuffer {
    indices: Vec<u32>,
}

impl IndexBuffer {
    pub fn new(indices: Vec<u32>) -> Self {
        Self { indices }
    }
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }
    pub fn len(&self) -> usize {
        self.indices.len()
    }
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
