// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//the CPU backend is the only backend

mod cpu;

pub use cpu::*;
