// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! The CPU backend.
//!
//! Everything a GPU would do lives here: the blit engine, the format conversion engine,
//! the draw dispatcher and the per-device draw state they read.

mod error;
pub mod blit;
pub mod convert;
pub(crate) mod context;
pub(crate) mod draw;

pub use error::{Error, ErrorKind};
