// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Defines the way shader parameters are bound for a draw.
//!
//! The software device has a small, fixed set of parameter slots: one source image and up to
//! three color vectors.  Callers look up a [`ShaderParam`] by name on a shader, then set a
//! value through the device.  The draw dispatcher reads the slots by kind.
//!
//! # Key Concepts
//!
//! - **Param kinds**: a parameter's name decides which slot it writes
//! - **Ignored writes**: names with no slot, and values of the wrong kind, are logged and
//!   dropped rather than reported as errors
//!
//! # Example
//!
//! ```
//! use cpu_gs::bindings::bind_style::{ParamKind, ParamSlots, ParamValue, ShaderParam};
//! use cpu_gs::images::projection::Vec4;
//!
//! let mut slots = ParamSlots::new();
//! let param = ShaderParam::new(ParamKind::from_name("color_vec0"), "color_vec0");
//! slots.set(&param, ParamValue::Vec4(Vec4::new(0.299, 0.587, 0.114, 0.0)));
//! assert_eq!(slots.color_vec(0).x, 0.299);
//! ```

use crate::bindings::software::texture::SharedTexture;
use crate::images::projection::Vec4;

/// Which slot a parameter writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// The source texture.
    Image,
    ColorVec0,
    ColorVec1,
    ColorVec2,
    /// A parameter the device has no slot for.
    Unknown,
}

impl ParamKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "image" => ParamKind::Image,
            "color_vec0" => ParamKind::ColorVec0,
            "color_vec1" => ParamKind::ColorVec1,
            "color_vec2" => ParamKind::ColorVec2,
            _ => ParamKind::Unknown,
        }
    }

    fn color_index(self) -> Option<usize> {
        match self {
            ParamKind::ColorVec0 => Some(0),
            ParamKind::ColorVec1 => Some(1),
            ParamKind::ColorVec2 => Some(2),
            ParamKind::Image | ParamKind::Unknown => None,
        }
    }
}

/// A named parameter handle returned by [`crate::images::shader::Shader::param_by_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderParam {
    kind: ParamKind,
    name: String,
}

impl ShaderParam {
    pub fn new(kind: ParamKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
    pub fn kind(&self) -> ParamKind {
        self.kind
    }
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A value written into a parameter slot.
#[derive(Debug, Clone)]
pub enum ParamValue {
    /// `None` unbinds the image.
    Texture(Option<SharedTexture>),
    Vec4(Vec4),
}

fn wrong_value(param: &ShaderParam) {
    logwise::warn_sync!(
        "Ignoring value of the wrong type for parameter {name}",
        name = logwise::privacy::LogIt(param.name())
    );
}

/// The device's parameter slots.
#[derive(Debug, Clone, Default)]
pub struct ParamSlots {
    image: Option<SharedTexture>,
    color_vecs: [Vec4; 3],
}

impl ParamSlots {
    /// Empty slots: no image, zero color vectors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `value` into the slot `param` names.
    ///
    /// Writes to unknown parameters, and writes whose value doesn't fit the slot, are
    /// logged at warn level and ignored.
    pub fn set(&mut self, param: &ShaderParam, value: ParamValue) {
        match (param.kind, value) {
            (ParamKind::Unknown, _) => {
                logwise::warn_sync!(
                    "Ignoring unknown shader parameter {name}",
                    name = logwise::privacy::LogIt(param.name())
                );
            }
            (ParamKind::Image, ParamValue::Texture(texture)) => self.image = texture,
            (kind, ParamValue::Vec4(v)) => match kind.color_index() {
                Some(index) => self.color_vecs[index] = v,
                None => wrong_value(param),
            },
            (_, ParamValue::Texture(_)) => wrong_value(param),
        }
    }

    /// The bound source image.
    pub fn image(&self) -> Option<&SharedTexture> {
        self.image.as_ref()
    }

    /// Color vector `index` (0 to 2).  Out-of-range indices read as zero.
    pub fn color_vec(&self, index: usize) -> Vec4 {
        self.color_vecs.get(index).copied().unwrap_or(Vec4::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::software::texture::Texture;
    use crate::bindings::visible_to::TextureConfig;
    use crate::pixel_formats::ColorFormat;

    #[test]
    fn names_map_to_kinds() {
        assert_eq!(ParamKind::from_name("image"), ParamKind::Image);
        assert_eq!(ParamKind::from_name("color_vec2"), ParamKind::ColorVec2);
        assert_eq!(ParamKind::from_name("ViewProj"), ParamKind::Unknown);
    }

    #[test]
    fn mismatched_values_are_ignored() {
        let mut slots = ParamSlots::new();
        let image = ShaderParam::new(ParamKind::Image, "image");
        slots.set(&image, ParamValue::Vec4(Vec4::new(1.0, 1.0, 1.0, 1.0)));
        assert!(slots.image().is_none());

        let color = ShaderParam::new(ParamKind::ColorVec1, "color_vec1");
        slots.set(&color, ParamValue::Texture(None));
        assert_eq!(slots.color_vec(1), Vec4::ZERO);

        let unknown = ShaderParam::new(ParamKind::Unknown, "width");
        slots.set(&unknown, ParamValue::Vec4(Vec4::new(1.0, 0.0, 0.0, 0.0)));
        assert_eq!(slots.color_vec(0), Vec4::ZERO);
    }

    #[test]
    fn image_can_be_unbound() {
        let mut slots = ParamSlots::new();
        let image = ShaderParam::new(ParamKind::Image, "image");
        let texture = SharedTexture::new(Texture::new(TextureConfig::new(1, 1, ColorFormat::RGBA), None).unwrap());
        slots.set(&image, ParamValue::Texture(Some(texture)));
        assert!(slots.image().is_some());
        slots.set(&image, ParamValue::Texture(None));
        assert!(slots.image().is_none());
    }
}
