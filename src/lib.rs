// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! cpu_gs is a software graphics device: it presents the API of a GPU device, but every
texture lives in main memory and every draw runs on the CPU.

It exists so that a graphics layer written against a device API keeps working on machines
with no usable GPU.

# What runs on the CPU

| Component | Does | Module |
|-----------|------|--------|
| Blit engine | rectangle-to-rectangle copies with clipping and nearest-neighbor scaling | [blit] |
| Format conversion engine | RGB to planar luma | [convert] |
| Draw dispatcher | infers the intended operation from the bound shader pair | [Device::draw] |

There is no shader execution.  Shaders are resolved, when created, to one of a small catalog
of programs ([images::shader]); a draw looks up the bound pair and runs the hand-written
kernel that stands in for it.  Anything outside the catalog is reported, never guessed at.

# Supported format pairs

Blits between differing rectangles go pixel by pixel and support:

| Source | Destination | Per pixel |
|--------|-------------|-----------|
| RGBA | RGBA | copy |
| BGRX | RGBA | reorder, alpha forced to 0xFF |

Whole-texture copies between identical formats take a bulk copy regardless of format.

# Errors

Every fallible operation returns [`Error`].  [`Error::kind`] separates bad input
([`ErrorKind::Configuration`], [`ErrorKind::ShapeMismatch`]) from paths that are recognized
but not built ([`ErrorKind::Unimplemented`]) and input never seen before
([`ErrorKind::Unknown`]).  [`Device`] methods also log each error once through `logwise`.

# Threading

A device and its textures are single-threaded (`!Send`).  Every call runs to completion on
the caller's thread.
*/

pub mod bindings;
pub mod images;
mod imp;
pub mod pixel_formats;

pub use images::Device;
pub use imp::{Error, ErrorKind, blit, convert};
