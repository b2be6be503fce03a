// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Defines binding types */

pub mod bind_style;
pub mod sampler;
pub mod software;
pub mod visible_to;
