#![cfg(feature = "image")]

use fingerprint::detect::{
    analyze_singular_points, detect_from_gray_u8, detect_singular_points, gray_view, load_gray,
    DetectError,
};
use fingerprint::singular::{PixelCoords, SingularKind, SingularPointParams};
use fingerprint::PatternClass;
use image::{GrayImage, Luma};

fn planted_core(size: u32, center: f32) -> GrayImage {
    GrayImage::from_fn(size, size, |x, y| {
        let (dx, dy) = (x as f32 - center, center - y as f32);
        let r = (dx * dx + dy * dy).sqrt();
        let v = 128.0 + 100.0 * (5.5 * (r - dx).max(0.0).sqrt()).cos();
        Luma([v.round().clamp(0.0, 255.0) as u8])
    })
}

#[test]
fn detects_planted_core_from_image() {
    let img = planted_core(113, 56.0);
    let res = detect_singular_points(&img, SingularPointParams::default()).expect("detect");
    assert_eq!(res.points.len(), 1);
    assert_eq!(res.points[0].kind(), SingularKind::Core);
    assert_eq!(res.points[0].coords(), PixelCoords::new(56, 56));
    assert_eq!(res.class, PatternClass::TentedArch);
}

#[test]
fn raw_buffer_and_image_paths_agree() {
    let img = planted_core(113, 56.0);
    let from_img = detect_singular_points(&img, SingularPointParams::default()).expect("image");
    let from_raw = detect_from_gray_u8(113, 113, img.as_raw(), SingularPointParams::default())
        .expect("raw");
    assert_eq!(from_img, from_raw);

    let analysis = analyze_singular_points(&img, SingularPointParams::default()).expect("analyze");
    assert_eq!(analysis.result, from_img);
    assert_eq!(analysis.field.dims(), (gray_view(&img).width, gray_view(&img).height));
}

#[test]
fn raw_buffer_length_is_checked() {
    let err = detect_from_gray_u8(10, 10, &[0u8; 99], SingularPointParams::default())
        .expect_err("short buffer");
    assert!(matches!(
        err,
        DetectError::InvalidGrayBuffer {
            expected: 100,
            got: 99
        }
    ));
}

#[test]
fn load_gray_round_trips_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("core.png");
    let img = planted_core(64, 30.0);
    img.save(&path).expect("save png");

    let loaded = load_gray(&path).expect("load");
    assert_eq!(loaded.dimensions(), (64, 64));
    assert_eq!(loaded.as_raw(), img.as_raw());

    assert!(matches!(
        load_gray(dir.path().join("missing.png")),
        Err(DetectError::Image(_))
    ));
}
