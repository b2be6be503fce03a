// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Tests for RGB to luma plane conversion.

use cpu_gs::bindings::software::texture::{Texel, Texture};
use cpu_gs::convert::convert_to_luma;
use cpu_gs::images::projection::Vec4;
use cpu_gs::pixel_formats::ColorFormat;
use cpu_gs::{Error, ErrorKind};

const BT601: Vec4 = Vec4::new(0.299, 0.587, 0.114, 0.0);

fn rgba(pixel: [u8; 4]) -> Texture {
    Texture::new_with(1, 1, ColorFormat::RGBA, |_| pixel.to_vec()).unwrap()
}

fn luma_plane(width: u32, height: u32) -> Texture {
    Texture::new_with(width, height, ColorFormat::R8, |_| vec![0x42]).unwrap()
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn white_and_black_hit_the_ends() {
    let mut y = luma_plane(1, 1);
    convert_to_luma(&rgba([255, 255, 255, 255]), &mut y, BT601).unwrap();
    assert_eq!(y.data(), &[255]);

    convert_to_luma(&rgba([0, 0, 0, 255]), &mut y, BT601).unwrap();
    assert_eq!(y.data(), &[0]);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn primaries_follow_weights() {
    let mut y = luma_plane(1, 1);
    // 0.299 * 255 = 76.245
    convert_to_luma(&rgba([255, 0, 0, 255]), &mut y, BT601).unwrap();
    assert_eq!(y.data(), &[76]);
    // 0.587 * 255 = 149.685
    convert_to_luma(&rgba([0, 255, 0, 255]), &mut y, BT601).unwrap();
    assert_eq!(y.data(), &[149]);
    // 0.114 * 255 = 29.07
    convert_to_luma(&rgba([0, 0, 255, 255]), &mut y, BT601).unwrap();
    assert_eq!(y.data(), &[29]);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn alpha_is_ignored() {
    let mut opaque = luma_plane(1, 1);
    let mut clear = luma_plane(1, 1);
    convert_to_luma(&rgba([100, 150, 200, 255]), &mut opaque, BT601).unwrap();
    convert_to_luma(&rgba([100, 150, 200, 0]), &mut clear, BT601).unwrap();
    assert_eq!(opaque.data(), clear.data());
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn every_pixel_is_converted_in_place() {
    let src = Texture::new_with(5, 3, ColorFormat::BGRA, |t| {
        let v = (t.y * 5 + t.x) as u8 * 10;
        vec![v, v, v, 255]
    })
    .unwrap();
    let mut y = luma_plane(5, 3);
    convert_to_luma(&src, &mut y, BT601).unwrap();
    for ty in 0..3u32 {
        for tx in 0..5u32 {
            let v = ((ty * 5 + tx) * 10) as u8;
            assert_eq!(y[Texel { x: tx, y: ty }], [v], "pixel ({tx}, {ty})");
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn negative_results_clamp_to_zero() {
    let mut y = luma_plane(1, 1);
    convert_to_luma(&rgba([10, 10, 10, 255]), &mut y, Vec4::new(1.0, 0.0, 0.0, -0.5)).unwrap();
    assert_eq!(y.data(), &[0]);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn resolution_mismatch_writes_nothing() {
    let src = Texture::new_with(4, 4, ColorFormat::RGBA, |_| vec![255; 4]).unwrap();
    let mut y = luma_plane(2, 2);
    let err = convert_to_luma(&src, &mut y, BT601).unwrap_err();
    assert!(matches!(err, Error::ResolutionMismatch { src: (4, 4), dst: (2, 2) }));
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(y.data().iter().all(|&b| b == 0x42));
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn destination_must_be_luma() {
    let src = rgba([255; 4]);
    let mut dst = rgba([1, 2, 3, 4]);
    let err = convert_to_luma(&src, &mut dst, BT601).unwrap_err();
    assert!(matches!(err, Error::UnsupportedLumaFormat(ColorFormat::RGBA)));
    assert_eq!(dst.data(), &[1, 2, 3, 4]);
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn resolution_is_checked_before_format() {
    let src = Texture::new_with(2, 1, ColorFormat::RGBA, |_| vec![0; 4]).unwrap();
    let mut dst = rgba([0; 4]);
    let err = convert_to_luma(&src, &mut dst, BT601).unwrap_err();
    assert!(matches!(err, Error::ResolutionMismatch { .. }));
}

#[cfg_attr(not(target_arch = "wasm32"), test)]
#[cfg_attr(target_arch = "wasm32", wasm_bindgen_test::wasm_bindgen_test)]
fn source_must_be_rgb() {
    let src = Texture::new_with(1, 1, ColorFormat::R8, |_| vec![200]).unwrap();
    let mut y = luma_plane(1, 1);
    let err = convert_to_luma(&src, &mut y, BT601).unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedFormatPair {
            src: ColorFormat::R8,
            dst: ColorFormat::R8
        }
    ));
    assert_eq!(y.data(), &[0x42]);
}
