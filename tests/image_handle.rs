//! Integration tests for lazily decoded images and crop extraction.

use std::io::Write;

use inselect::model::{Normalized, Pixel, Rect};
use inselect::{ImageHandle, InselectError};

mod common;

fn scanned(dir: &std::path::Path) -> ImageHandle {
    let path = dir.join("test_segment.png");
    common::write_scanned(&path);
    ImageHandle::open(path).expect("open scanned image")
}

#[test]
fn array_has_image_shape() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let image = scanned(temp.path());

    assert_eq!(image.dimensions().expect("dims"), (common::WIDTH, common::HEIGHT));
    assert!(image.is_loaded());
}

#[test]
fn from_normalised_worked_example() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let image = scanned(temp.path());

    let boxes: [Rect<Normalized>; 2] = [
        Rect::new(0.0, 0.0, 1.0, 1.0),
        Rect::new(0.0, 0.2, 0.1, 0.8),
    ];
    let pixels: Vec<Rect<Pixel>> = image.from_normalised(&boxes).expect("convert").collect();

    assert_eq!(
        pixels,
        vec![
            Rect::new(0.0, 0.0, 459.0, 437.0),
            Rect::new(0.0, 87.0, 45.0, 349.0)
        ]
    );
}

#[test]
fn from_normalised_is_restartable() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let image = scanned(temp.path());

    let boxes: [Rect<Normalized>; 1] = [Rect::new(0.1, 0.2, 0.4, 0.3)];
    let iter = image.from_normalised(&boxes).expect("convert");
    let first: Vec<_> = iter.clone().collect();
    let second: Vec<_> = iter.collect();
    assert_eq!(first, second);
}

#[test]
fn to_normalised_divides_by_extent() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let image = scanned(temp.path());

    let boxes: [Rect<Pixel>; 2] = [
        Rect::new(0.0, 0.0, 459.0, 437.0),
        Rect::new(0.0, 0.0, 153.0, 23.0),
    ];
    let normalised: Vec<Rect<Normalized>> =
        image.to_normalised(&boxes).expect("convert").collect();

    assert_eq!(
        normalised,
        vec![
            Rect::new(0.0, 0.0, 1.0, 1.0),
            Rect::new(0.0, 0.0, 1.0 / 3.0, 1.0 / 19.0)
        ]
    );
}

#[test]
fn validate_in_bounds_rejects_each_edge() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let image = scanned(temp.path());

    assert!(image
        .validate_in_bounds(&[Rect::new(0.0, 0.0, 459.0, 437.0)])
        .is_ok());

    for rect in [
        Rect::new(-1.0, 0.0, 459.0, 437.0),
        Rect::new(0.0, -1.0, 459.0, 437.0),
        Rect::new(0.0, 0.0, 460.0, 437.0),
        Rect::new(0.0, 0.0, 459.0, 438.0),
    ] {
        assert!(matches!(
            image.validate_in_bounds(&[rect]),
            Err(InselectError::OutOfBounds { .. })
        ));
    }
}

#[test]
fn save_crops_whole_image() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let image = scanned(temp.path());

    let out = temp.path().join("whole.png");
    image
        .save_crops(&[Rect::new(0.0, 0.0, 1.0, 1.0)], &[&out])
        .expect("save crop");

    let crop = ImageHandle::open(&out).expect("open crop");
    assert_eq!(
        crop.array().expect("decode crop").to_rgb8(),
        image.array().expect("decode").to_rgb8()
    );
}

#[test]
fn save_crops_partial_matches_slice() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let image = scanned(temp.path());

    let out = temp.path().join("partial.png");
    image
        .save_crops(&[Rect::new(0.1, 0.2, 0.4, 0.3)], &[&out])
        .expect("save crop");

    // Rows 87..218, columns 45..228.
    let expected = image
        .array()
        .expect("decode")
        .crop_imm(45, 87, 183, 131)
        .to_rgb8();
    let actual = ImageHandle::open(&out).expect("open crop");
    assert_eq!(actual.array().expect("decode crop").to_rgb8(), expected);
}

#[test]
fn save_crops_format_follows_extension() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let image = scanned(temp.path());

    let out = temp.path().join("crop.tiff");
    image
        .save_crops(&[Rect::new(0.5, 0.5, 0.25, 0.25)], &[&out])
        .expect("save crop");

    let bytes = std::fs::read(&out).expect("read crop");
    assert!(bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*"));
}

#[test]
fn save_crops_unwritable_path() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let image = scanned(temp.path());

    let out = temp.path().join("no such dir").join("crop.png");
    assert!(matches!(
        image.save_crops(&[Rect::new(0.0, 0.0, 0.5, 0.5)], &[&out]),
        Err(InselectError::CropWrite { .. })
    ));
}

#[test]
fn not_an_image_fails_on_first_access() {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(b"definitely not pixels").expect("write");

    let image = ImageHandle::open(file.path()).expect("construction only checks existence");
    assert!(matches!(image.array(), Err(InselectError::ImageLoad { .. })));
    assert!(image.to_string().ends_with("[Unloaded]"));
}

#[test]
fn display_reports_load_state() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let image = scanned(temp.path());
    let path = temp.path().join("test_segment.png");
    image.array().expect("decode");

    assert_eq!(
        image.to_string(),
        format!("ImageHandle ['{}'] [Loaded]", path.display())
    );

    let fresh = ImageHandle::open(&path).expect("open");
    assert_eq!(
        fresh.to_string(),
        format!("ImageHandle ['{}'] [Unloaded]", path.display())
    );
}

#[test]
fn large_scan_is_not_rejected_by_allocation_limits() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let path = temp.path().join("big.png");
    // 14000 x 14000 RGB8 needs about 588 MB, over the image crate's default cap.
    std::fs::write(&path, common::truncated_png_bytes(14_000, 14_000)).expect("write png");

    let image = ImageHandle::open(&path).expect("open");
    match image.array() {
        Err(InselectError::ImageLoad { source, .. }) => {
            assert!(
                !matches!(source, image::ImageError::Limits(_)),
                "expected a decode failure on the truncated data, got {source}"
            );
        }
        other => panic!("expected ImageLoad, got {other:?}"),
    }
}

#[test]
fn sub_pixel_rect_fails_to_write() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let image = scanned(temp.path());

    // 0.001 * 459 floors to a zero-pixel width.
    let out = temp.path().join("sliver.tiff");
    assert!(matches!(
        image.save_crops(&[Rect::new(0.5, 0.5, 0.001, 0.5)], &[&out]),
        Err(InselectError::CropWrite { .. })
    ));
}
