#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

/// Width of the generated scanned image.
pub const WIDTH: u32 = 459;
/// Height of the generated scanned image.
pub const HEIGHT: u32 = 437;

pub const FIXTURE: &str = "tests/fixtures/test_segment.inselect";

/// An image whose every pixel is distinct along both axes, so any
/// misplaced crop shows up as a content mismatch.
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x / 256) * 16 + (y / 256)) as u8])
    })
}

pub fn write_scanned(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    gradient(WIDTH, HEIGHT).save(path).expect("write scanned image");
}

/// Copies the fixture document into `dir` next to a decodable scanned image.
pub fn document_with_image(dir: &Path) -> PathBuf {
    fs::create_dir_all(dir).expect("create document dir");
    let path = dir.join("test_segment.inselect");
    fs::copy(FIXTURE, &path).expect("copy fixture");
    write_scanned(&dir.join("test_segment.png"));
    path
}

/// Copies the fixture document into `dir` with no companion files.
pub fn bare_document(dir: &Path) -> PathBuf {
    fs::create_dir_all(dir).expect("create document dir");
    let path = dir.join("test_segment.inselect");
    fs::copy(FIXTURE, &path).expect("copy fixture");
    path
}

/// Creates an empty file; enough for anything that only checks existence.
pub fn touch(path: &Path) {
    fs::write(path, b"").expect("touch file");
}

fn crc32(bytes: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in bytes {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}

fn png_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    let start = out.len();
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    let crc = crc32(&out[start..]);
    out.extend_from_slice(&crc.to_be_bytes());
}

/// A well-formed RGB8 PNG header declaring `width` x `height`, followed by
/// an IDAT holding a single byte of pixel data.
pub fn truncated_png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, 2, 0, 0, 0]);
    png_chunk(&mut bytes, b"IHDR", &ihdr);

    // zlib stream with one stored block holding a single zero byte.
    let idat = [0x78, 0x01, 0x01, 0x01, 0x00, 0xFE, 0xFF, 0x00, 0x00, 0x01, 0x00, 0x01];
    png_chunk(&mut bytes, b"IDAT", &idat);
    png_chunk(&mut bytes, b"IEND", &[]);
    bytes
}
