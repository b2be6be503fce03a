// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Shader identities.

The software device never executes shader code.  Each shader is instead resolved, once, at
creation, to a [`ShaderKind`]: one of a fixed catalog of programs the draw dispatcher knows
how to emulate, or [`ShaderKind::Unknown`].  Draws only ever compare kinds.

A shader is described by `"<path>/<effect>.effect:<technique>"`.  The directory part is
ignored; the effect file name and technique select the program.

```
use cpu_gs::images::shader::{Shader, ShaderKind, ShaderProgram, ShaderStage};

let shader = Shader::new(ShaderStage::Vertex, "/usr/share/obs/libobs/default.effect:Draw");
assert_eq!(shader.kind(), ShaderKind::Known { program: ShaderProgram::DefaultDraw, stage: ShaderStage::Vertex });
assert_eq!(shader.file(), "default.effect");
```
*/

use crate::bindings::bind_style::{ParamKind, ShaderParam};

/// Which half of a program a shader is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

/// The programs the draw dispatcher recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ShaderProgram {
    /// Textured quad; emulated as a blit.
    DefaultDraw,
    DefaultDrawAlphaDivide,
    Opaque,
    Solid,
    SolidColored,
    SolidRandom,
    /// NV12 luma plane; emulated by the luma conversion.
    Nv12Y,
    /// NV12 chroma plane.
    Nv12Uv,
}

/// (effect file, technique, program)
const CATALOG: &[(&str, &str, ShaderProgram)] = &[
    ("default.effect", "Draw", ShaderProgram::DefaultDraw),
    ("default.effect", "DrawAlphaDivide", ShaderProgram::DefaultDrawAlphaDivide),
    ("opaque.effect", "Draw", ShaderProgram::Opaque),
    ("solid.effect", "Solid", ShaderProgram::Solid),
    ("solid.effect", "SolidColored", ShaderProgram::SolidColored),
    ("solid.effect", "Random", ShaderProgram::SolidRandom),
    ("format_conversion.effect", "NV12_Y", ShaderProgram::Nv12Y),
    ("format_conversion.effect", "NV12_UV", ShaderProgram::Nv12Uv),
];

/// The identity of a shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Unknown,
    Known { program: ShaderProgram, stage: ShaderStage },
}

impl ShaderKind {
    /// The program, if known.
    pub fn program(&self) -> Option<ShaderProgram> {
        match self {
            ShaderKind::Unknown => None,
            ShaderKind::Known { program, .. } => Some(*program),
        }
    }
}

/// Splits a descriptor into its effect file name and technique.
///
/// Both `/` and `\` separate directories.  A descriptor without `:` has an empty technique.
fn split_descriptor(descriptor: &str) -> (&str, &str) {
    let (path, technique) = descriptor.rsplit_once(':').unwrap_or((descriptor, ""));
    let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
    (file, technique)
}

/// Resolves a descriptor to a shader kind.
pub fn resolve(stage: ShaderStage, descriptor: &str) -> ShaderKind {
    let (file, technique) = split_descriptor(descriptor);
    CATALOG
        .iter()
        .find(|(f, t, _)| *f == file && *t == technique)
        .map_or(ShaderKind::Unknown, |(_, _, program)| ShaderKind::Known {
            program: *program,
            stage,
        })
}

/// A created shader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shader {
    kind: ShaderKind,
    stage: ShaderStage,
    file: String,
    descriptor: String,
}

impl Shader {
    pub fn new(stage: ShaderStage, descriptor: &str) -> Self {
        let kind = resolve(stage, descriptor);
        if kind == ShaderKind::Unknown {
            logwise::warn_sync!(
                "Unknown shader {descriptor}",
                descriptor = logwise::privacy::LogIt(descriptor)
            );
        }
        Self {
            kind,
            stage,
            file: split_descriptor(descriptor).0.to_string(),
            descriptor: descriptor.to_string(),
        }
    }

    pub fn kind(&self) -> ShaderKind {
        self.kind
    }
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
    /// The effect file name, without directories.
    pub fn file(&self) -> &str {
        &self.file
    }
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Looks up a parameter by name.
    ///
    /// Every name yields a parameter; names the device has no slot for yield one of kind
    /// [`ParamKind::Unknown`], and setting it is ignored.
    pub fn param_by_name(&self, name: &str) -> ShaderParam {
        ShaderParam::new(ParamKind::from_name(name), name)
    }
}
