// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Sampler state.
//!
//! Every software path samples nearest-neighbor, so a sampler is accepted, remembered for
//! diagnostics and otherwise ignored.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleFilter {
    #[default]
    Point,
    Linear,
    Anisotropic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddressMode {
    #[default]
    Clamp,
    Wrap,
    Mirror,
    Border,
}

/// How a sampler would filter and address a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SamplerInfo {
    pub filter: SampleFilter,
    pub address_u: AddressMode,
    pub address_v: AddressMode,
    pub address_w: AddressMode,
    pub max_anisotropy: u32,
    ///Packed 0xAARRGGBB.
    pub border_color: u32,
}

/// A created sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerState {
    info: SamplerInfo,
}

impl SamplerState {
    pub(crate) fn new(info: SamplerInfo) -> Self {
        if info.filter != SampleFilter::Point {
            logwise::info_sync!(
                "Sampler filter {filter} requested; sampling stays nearest-neighbor",
                filter = logwise::privacy::LogIt(&info.filter)
            );
        }
        Self { info }
    }

    pub fn info(&self) -> &SamplerInfo {
        &self.info
    }
}
