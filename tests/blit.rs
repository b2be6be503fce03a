// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Tests for the pixel blit engine.
//!
//! Covers the bulk-copy fast path, clipping against the destination, nearest-neighbor
//! scaling, the BGRX to RGBA transcoding and the guarantees for bad input: unsupported
//! format pairs write nothing, and degenerate rectangles are no-ops.

use cpu_gs::Error;
use cpu_gs::bindings::software::texture::{Texel, Texture};
use cpu_gs::blit::{BlitRect, BlitRequest, blit};
use cpu_gs::pixel_formats::ColorFormat;

/// A texture whose every pixel records its own coordinates: `[x, y, 0x55, 0xaa]`.
fn coordinates(width: u32, height: u32, format: ColorFormat) -> Texture {
    Texture::new_with(width, height, format, |t| vec![t.x as u8, t.y as u8, 0x55, 0xaa]).unwrap()
}

fn filled(width: u32, height: u32, format: ColorFormat, pixel: [u8; 4]) -> Texture {
    Texture::new_with(width, height, format, |_| pixel.to_vec()).unwrap()
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn identity_blit_copies_every_byte() {
    let src = coordinates(7, 5, ColorFormat::RGBA);
    let mut dst = filled(7, 5, ColorFormat::RGBA, [9, 9, 9, 9]);
    blit(BlitRequest {
        src_rect: BlitRect::new(0, 0, 7, 5),
        dst_rect: BlitRect::new(0, 0, 7, 5),
        src: &src,
        dst: &mut dst,
    })
    .unwrap();
    assert_eq!(dst.data(), src.data());
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn identity_blit_of_unlisted_format_is_bulk_copied() {
    // BGRA -> BGRA has no per-pixel operation, but a whole-texture copy never needs one
    let src = coordinates(3, 3, ColorFormat::BGRA);
    let mut dst = filled(3, 3, ColorFormat::BGRA, [0; 4]);
    blit(BlitRequest {
        src_rect: BlitRect::covering(&src),
        dst_rect: BlitRect::covering(&dst),
        src: &src,
        dst: &mut dst,
    })
    .unwrap();
    assert_eq!(dst.data(), src.data());
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn destination_is_clipped() {
    let src = filled(4, 4, ColorFormat::RGBA, [1, 2, 3, 4]);
    let mut dst = filled(4, 4, ColorFormat::RGBA, [0; 4]);
    blit(BlitRequest {
        src_rect: BlitRect::new(0, 0, 4, 4),
        dst_rect: BlitRect::new(2, -1, 4, 4),
        src: &src,
        dst: &mut dst,
    })
    .unwrap();
    for y in 0..4 {
        for x in 0..4 {
            let expected: &[u8] = if x >= 2 && y <= 2 { &[1, 2, 3, 4] } else { &[0; 4] };
            assert_eq!(&dst[Texel { x, y }], expected, "pixel ({x}, {y})");
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn rectangle_entirely_outside_writes_nothing() {
    let src = filled(2, 2, ColorFormat::RGBA, [1, 1, 1, 1]);
    let mut dst = filled(4, 4, ColorFormat::RGBA, [0; 4]);
    for dst_rect in [BlitRect::new(4, 0, 2, 2), BlitRect::new(-2, 0, 2, 2), BlitRect::new(0, 100, 2, 2)] {
        blit(BlitRequest {
            src_rect: BlitRect::covering(&src),
            dst_rect,
            src: &src,
            dst: &mut dst,
        })
        .unwrap();
    }
    assert!(dst.data().iter().all(|&b| b == 0));
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn nearest_neighbor_upscale() {
    let src = coordinates(2, 2, ColorFormat::RGBA);
    let mut dst = filled(4, 4, ColorFormat::RGBA, [0; 4]);
    blit(BlitRequest {
        src_rect: BlitRect::covering(&src),
        dst_rect: BlitRect::covering(&dst),
        src: &src,
        dst: &mut dst,
    })
    .unwrap();
    for y in 0..4u32 {
        for x in 0..4u32 {
            let (sx, sy) = ((x * 2 / 4).min(1), (y * 2 / 4).min(1));
            assert_eq!(dst[Texel { x, y }], [sx as u8, sy as u8, 0x55, 0xaa], "pixel ({x}, {y})");
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn nearest_neighbor_downscale_picks_floor() {
    let src = coordinates(6, 3, ColorFormat::RGBA);
    let mut dst = filled(2, 1, ColorFormat::RGBA, [0; 4]);
    blit(BlitRequest {
        src_rect: BlitRect::covering(&src),
        dst_rect: BlitRect::covering(&dst),
        src: &src,
        dst: &mut dst,
    })
    .unwrap();
    assert_eq!(dst[Texel { x: 0, y: 0 }], [0, 0, 0x55, 0xaa]);
    assert_eq!(dst[Texel { x: 1, y: 0 }], [3, 0, 0x55, 0xaa]);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn source_sub_rectangle() {
    let src = coordinates(8, 8, ColorFormat::RGBA);
    let mut dst = filled(2, 2, ColorFormat::RGBA, [0; 4]);
    blit(BlitRequest {
        src_rect: BlitRect::new(5, 6, 2, 2),
        dst_rect: BlitRect::covering(&dst),
        src: &src,
        dst: &mut dst,
    })
    .unwrap();
    assert_eq!(dst[Texel { x: 0, y: 0 }], [5, 6, 0x55, 0xaa]);
    assert_eq!(dst[Texel { x: 1, y: 1 }], [6, 7, 0x55, 0xaa]);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn out_of_range_source_is_clamped() {
    let src = coordinates(3, 3, ColorFormat::RGBA);
    let mut dst = filled(3, 1, ColorFormat::RGBA, [0; 4]);
    blit(BlitRequest {
        src_rect: BlitRect::new(-1, 5, 3, 1),
        dst_rect: BlitRect::covering(&dst),
        src: &src,
        dst: &mut dst,
    })
    .unwrap();
    // x: -1, 0, 1 clamps to 0, 0, 1; y: 5 clamps to 2
    assert_eq!(dst[Texel { x: 0, y: 0 }], [0, 2, 0x55, 0xaa]);
    assert_eq!(dst[Texel { x: 1, y: 0 }], [0, 2, 0x55, 0xaa]);
    assert_eq!(dst[Texel { x: 2, y: 0 }], [1, 2, 0x55, 0xaa]);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn bgrx_to_rgba_reorders_and_forces_alpha() {
    let src = Texture::new_with(4, 1, ColorFormat::BGRX, |t| vec![10 + t.x as u8, 20, 30, (t.x * 60) as u8]).unwrap();
    let mut dst = filled(4, 1, ColorFormat::RGBA, [0; 4]);
    blit(BlitRequest {
        src_rect: BlitRect::covering(&src),
        dst_rect: BlitRect::covering(&dst),
        src: &src,
        dst: &mut dst,
    })
    .unwrap();
    for x in 0..4u32 {
        assert_eq!(dst[Texel { x, y: 0 }], [30, 20, 10 + x as u8, 0xff]);
    }
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn unsupported_pair_writes_nothing() {
    let src = filled(2, 2, ColorFormat::RGBA, [1, 2, 3, 4]);
    let mut dst = filled(4, 4, ColorFormat::BGRX, [7; 4]);
    let err = blit(BlitRequest {
        src_rect: BlitRect::covering(&src),
        dst_rect: BlitRect::covering(&dst),
        src: &src,
        dst: &mut dst,
    })
    .unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedFormatPair {
            src: ColorFormat::RGBA,
            dst: ColorFormat::BGRX
        }
    ));
    assert!(dst.data().iter().all(|&b| b == 7));
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn same_size_different_format_is_not_bulk_copied() {
    let src = filled(2, 2, ColorFormat::RGBA, [1, 2, 3, 4]);
    let mut dst = Texture::new_with(2, 2, ColorFormat::R8, |_| vec![0]).unwrap();
    let err = blit(BlitRequest {
        src_rect: BlitRect::covering(&src),
        dst_rect: BlitRect::covering(&dst),
        src: &src,
        dst: &mut dst,
    })
    .unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormatPair { .. }));
    assert_eq!(dst.data(), &[0; 4]);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn zero_extent_is_a_no_op() {
    let src = filled(2, 2, ColorFormat::RGBA, [1, 2, 3, 4]);
    let mut dst = filled(2, 2, ColorFormat::RGBA, [0; 4]);
    for dst_rect in [
        BlitRect::new(0, 0, 0, 2),
        BlitRect::new(0, 0, 2, 0),
        BlitRect::new(0, 0, 0, 0),
        BlitRect::new(1, 1, -3, 2),
    ] {
        blit(BlitRequest {
            src_rect: BlitRect::covering(&src),
            dst_rect,
            src: &src,
            dst: &mut dst,
        })
        .unwrap();
    }
    assert_eq!(dst.data(), &[0; 16]);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn empty_source_is_a_no_op() {
    let src = Texture::new_with(0, 0, ColorFormat::RGBA, |_| vec![0; 4]).unwrap();
    let mut dst = filled(2, 2, ColorFormat::RGBA, [5; 4]);
    blit(BlitRequest {
        src_rect: BlitRect::new(0, 0, 1, 1),
        dst_rect: BlitRect::covering(&dst),
        src: &src,
        dst: &mut dst,
    })
    .unwrap();
    assert!(dst.data().iter().all(|&b| b == 5));
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn huge_rectangles_do_not_overflow() {
    let src = coordinates(2, 2, ColorFormat::RGBA);
    let mut dst = filled(2, 2, ColorFormat::RGBA, [0; 4]);
    blit(BlitRequest {
        src_rect: BlitRect::new(0, 0, i64::MAX, i64::MAX),
        dst_rect: BlitRect::new(i64::MIN / 2, i64::MIN / 2, i64::MAX, i64::MAX),
        src: &src,
        dst: &mut dst,
    })
    .unwrap();
    // every visible pixel samples past the source edge and clamps to the last texel
    assert!(dst.data().chunks_exact(4).all(|p| p == [1, 1, 0x55, 0xaa]));
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn extreme_origins_are_clipped_away() {
    let src = coordinates(2, 2, ColorFormat::RGBA);
    let mut dst = filled(2, 2, ColorFormat::RGBA, [0; 4]);
    let origins = [
        (i64::MIN, 0),
        (0, i64::MIN),
        (i64::MAX, 0),
        (0, i64::MAX),
        (i64::MIN, i64::MAX),
    ];
    for (x, y) in origins {
        for extent in [4, i64::MAX] {
            blit(BlitRequest {
                src_rect: BlitRect::new(0, 0, 2, 2),
                dst_rect: BlitRect::new(x, y, extent, extent),
                src: &src,
                dst: &mut dst,
            })
            .unwrap();
        }
    }
    assert!(dst.data().iter().all(|&b| b == 0));
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn extreme_source_origin_clamps() {
    let src = coordinates(2, 2, ColorFormat::RGBA);
    let mut dst = filled(2, 2, ColorFormat::RGBA, [0; 4]);
    blit(BlitRequest {
        src_rect: BlitRect::new(i64::MIN, i64::MAX, 2, 2),
        dst_rect: BlitRect::new(0, 0, 1, 1),
        src: &src,
        dst: &mut dst,
    })
    .unwrap();
    assert_eq!(dst[Texel { x: 0, y: 0 }], src[Texel { x: 0, y: 1 }]);
}
