// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! The device-facing half of cpu_gs: the device, its state types and presentation. */

pub mod device;
pub mod projection;
pub mod render_pass;
pub mod shader;
pub mod vertex_buffer;
pub mod view;

pub use device::Device;
