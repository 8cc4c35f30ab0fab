#![allow(dead_code)]

use cff::PixelFormat;
use capture_frame_formats as cff;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const RGB_FORMATS: &[PixelFormat; 12] = &[
    PixelFormat::Rgb332,
    PixelFormat::Argb444,
    PixelFormat::Xrgb444,
    PixelFormat::Argb555,
    PixelFormat::Xrgb555,
    PixelFormat::Rgb565,
    PixelFormat::Bgr24,
    PixelFormat::Rgb24,
    PixelFormat::Abgr32,
    PixelFormat::Xbgr32,
    PixelFormat::Argb32,
    PixelFormat::Xrgb32,
];

pub const YUV_FORMATS: &[PixelFormat; 12] = &[
    PixelFormat::Uyvy,
    PixelFormat::Vyuy,
    PixelFormat::Yuyv,
    PixelFormat::Yvyu,
    PixelFormat::Nv12m,
    PixelFormat::Nv21m,
    PixelFormat::Nv16m,
    PixelFormat::Nv61m,
    PixelFormat::Yuv420m,
    PixelFormat::Yvu420m,
    PixelFormat::Yuv422m,
    PixelFormat::Yvu422m,
];

pub fn is_rgb(format: PixelFormat) -> bool {
    RGB_FORMATS.contains(&format)
}

/// Bytes per pixel of the source image a format converts from
pub fn source_depth(format: PixelFormat) -> usize {
    if is_rgb(format) {
        3
    } else {
        2
    }
}

/// Deterministic noise, so that failures can be reproduced
pub fn random_bytes(seed: u64, size: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bytes = vec![0_u8; size];
    rng.fill(&mut bytes[..]);

    bytes
}

pub fn random_source(seed: u64, width: u32, height: u32, format: PixelFormat) -> Vec<u8> {
    random_bytes(
        seed,
        source_depth(format) * (width as usize) * (height as usize),
    )
}

/// Packed `(U, Y0, V, Y1)` image where each byte is `16 * row + column`
pub fn ramp_source(width: usize, height: usize) -> Vec<u8> {
    let stride = 2 * width;
    let mut image = Vec::with_capacity(stride * height);
    for row in 0..height {
        image.extend((0..stride).map(|column| (16 * row + column) as u8));
    }

    image
}
