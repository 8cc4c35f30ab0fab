#![warn(unused)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

mod common;

use cff::{convert_image, get_buffer_size, FormatDescriptor, PixelFormat};
use common::{ramp_source, random_source, RGB_FORMATS, YUV_FORMATS};

use capture_frame_formats as cff;
use itertools::iproduct;

const SIZES: &[(u32, u32); 5] = &[(0, 0), (2, 2), (34, 6), (640, 480), (100, 20)];

fn to_u32(bytes: &[u8]) -> u32 {
    let mut value = [0_u8; 4];
    value[..bytes.len()].copy_from_slice(bytes);
    u32::from_le_bytes(value)
}

fn rgb_ok(pixel_format: PixelFormat, alpha: u8) {
    const WIDTH: u32 = 33;
    const HEIGHT: u32 = 3;

    let FormatDescriptor::Rgb(layout) = *pixel_format.descriptor() else {
        panic!("{pixel_format} is not an rgb format");
    };

    let src = random_source(u64::from(alpha), WIDTH, HEIGHT, pixel_format);
    let dst = convert_image(WIDTH, HEIGHT, pixel_format.descriptor(), alpha, &src).unwrap();

    let depth = layout.bytes_per_pixel();
    assert_eq!(dst.len(), depth * (WIDTH as usize) * (HEIGHT as usize));

    for (rgb, pixel) in src.chunks_exact(3).zip(dst.chunks_exact(depth)) {
        let pixel = to_u32(pixel);
        let fields = [layout.red(), layout.green(), layout.blue()];
        for (sample, field) in rgb.iter().zip(fields) {
            assert_eq!(field.extract(pixel), sample >> (8 - field.width));
        }

        if let Some(field) = layout.alpha() {
            assert_eq!(field.extract(pixel), alpha >> (8 - field.width));
        }
    }
}

fn rgb_white(pixel_format: PixelFormat) {
    let src = [u8::MAX; 3 * 8 * 8];
    let dst = convert_image(8, 8, pixel_format.descriptor(), u8::MAX, &src).unwrap();

    assert!(dst.iter().all(|&byte| byte == u8::MAX));
}

fn rgb_pixel(pixel_format: PixelFormat, alpha: u8, rgb: [u8; 3], expected: &[u8]) {
    let dst = convert_image(1, 1, pixel_format.descriptor(), alpha, &rgb).unwrap();
    assert_eq!(dst, expected, "{pixel_format}");
}

fn packed_ok(pixel_format: PixelFormat, expected: [u8; 4]) {
    let FormatDescriptor::YuvPacked(order) = *pixel_format.descriptor() else {
        panic!("{pixel_format} is not a packed format");
    };

    let src = [10, 20, 30, 40, 10, 20, 30, 40];
    let dst = convert_image(2, 2, pixel_format.descriptor(), 0, &src).unwrap();
    assert_eq!(dst[..4], expected);
    assert_eq!(dst[4..], expected);

    let src = random_source(7, 64, 8, pixel_format);
    let dst = convert_image(64, 8, pixel_format.descriptor(), 0, &src).unwrap();
    let restored: Vec<u8> = dst
        .chunks_exact(4)
        .flat_map(|group| order.inverse().apply([group[0], group[1], group[2], group[3]]))
        .collect();

    assert_eq!(restored, src);
}

fn planes_ok(pixel_format: PixelFormat, expected_chroma: &[u8]) {
    const WIDTH: usize = 4;
    const HEIGHT: usize = 4;

    let src = ramp_source(WIDTH, HEIGHT);
    let dst = convert_image(
        WIDTH as u32,
        HEIGHT as u32,
        pixel_format.descriptor(),
        0,
        &src,
    )
    .unwrap();

    let (luma, chroma) = dst.split_at(WIDTH * HEIGHT);
    let expected_luma: Vec<u8> = (0..HEIGHT)
        .flat_map(|row| (0..WIDTH).map(move |column| (16 * row + 2 * column + 1) as u8))
        .collect();

    assert_eq!(luma, expected_luma);
    assert_eq!(chroma, expected_chroma, "{pixel_format}");
}

fn uniform_yuv(pixel_format: PixelFormat) {
    let src = [128_u8; 2 * 8 * 4];
    let dst = convert_image(8, 4, pixel_format.descriptor(), 0, &src).unwrap();

    assert!(dst.iter().all(|&byte| byte == 128));
}

#[cfg(test)]
mod conversions {
    use super::*;

    #[test]
    fn rgb_fields() {
        for (pixel_format, alpha) in iproduct!(RGB_FORMATS, [0, 0x80, u8::MAX]) {
            let descriptor = pixel_format.descriptor();
            let one_bit = matches!(descriptor, FormatDescriptor::Rgb(layout) if layout.alpha_bits() == 1);
            if one_bit && alpha == 0x80 {
                continue;
            }

            rgb_ok(*pixel_format, alpha);
        }
    }

    #[test]
    fn rgb_white_is_saturated() {
        for pixel_format in RGB_FORMATS {
            rgb_white(*pixel_format);
        }
    }

    #[test]
    fn rgb_pixels() {
        rgb_pixel(PixelFormat::Rgb332, 0, [0xFF, 0x00, 0xFF], &[0xE3]);
        rgb_pixel(PixelFormat::Rgb565, 0, [0xFF, 0x00, 0x00], &[0x00, 0xF8]);
        rgb_pixel(PixelFormat::Rgb565, 0, [0x00, 0xFF, 0x00], &[0xE0, 0x07]);
        rgb_pixel(PixelFormat::Argb555, 0xFF, [0xFF, 0x00, 0x00], &[0x00, 0xFC]);
        rgb_pixel(PixelFormat::Argb555, 0x00, [0xFF, 0x00, 0x00], &[0x00, 0x7C]);
        rgb_pixel(PixelFormat::Xrgb444, 0xF0, [0x10, 0x20, 0x30], &[0x23, 0xF1]);
        rgb_pixel(PixelFormat::Argb444, 0x00, [0x10, 0x20, 0x30], &[0x23, 0x01]);
        rgb_pixel(PixelFormat::Rgb24, 0, [1, 2, 3], &[1, 2, 3]);
        rgb_pixel(PixelFormat::Bgr24, 0, [1, 2, 3], &[3, 2, 1]);
        rgb_pixel(PixelFormat::Argb32, 4, [1, 2, 3], &[4, 1, 2, 3]);
        rgb_pixel(PixelFormat::Xrgb32, 4, [1, 2, 3], &[4, 1, 2, 3]);
        rgb_pixel(PixelFormat::Abgr32, 4, [1, 2, 3], &[3, 2, 1, 4]);
        rgb_pixel(PixelFormat::Xbgr32, 4, [1, 2, 3], &[3, 2, 1, 4]);
    }

    #[test]
    fn packed_orders() {
        packed_ok(PixelFormat::Uyvy, [10, 20, 30, 40]);
        packed_ok(PixelFormat::Vyuy, [30, 20, 10, 40]);
        packed_ok(PixelFormat::Yuyv, [20, 10, 40, 30]);
        packed_ok(PixelFormat::Yvyu, [20, 30, 40, 10]);
    }

    #[test]
    fn semi_planar() {
        planes_ok(PixelFormat::Nv12m, &[0, 2, 4, 6, 32, 34, 36, 38]);
        planes_ok(PixelFormat::Nv21m, &[2, 0, 6, 4, 34, 32, 38, 36]);
        planes_ok(
            PixelFormat::Nv16m,
            &[0, 2, 4, 6, 16, 18, 20, 22, 32, 34, 36, 38, 48, 50, 52, 54],
        );
        planes_ok(
            PixelFormat::Nv61m,
            &[2, 0, 6, 4, 18, 16, 22, 20, 34, 32, 38, 36, 50, 48, 54, 52],
        );
    }

    #[test]
    fn planar() {
        planes_ok(PixelFormat::Yuv420m, &[0, 4, 32, 36, 2, 6, 34, 38]);
        planes_ok(PixelFormat::Yvu420m, &[2, 6, 34, 38, 0, 4, 32, 36]);
        planes_ok(
            PixelFormat::Yuv422m,
            &[0, 4, 16, 20, 32, 36, 48, 52, 2, 6, 18, 22, 34, 38, 50, 54],
        );
        planes_ok(
            PixelFormat::Yvu422m,
            &[2, 6, 18, 22, 34, 38, 50, 54, 0, 4, 16, 20, 32, 36, 48, 52],
        );
    }

    #[test]
    fn uniform_yuv_is_preserved() {
        for pixel_format in YUV_FORMATS {
            uniform_yuv(*pixel_format);
        }
    }

    #[test]
    fn output_size() {
        for (pixel_format, &(width, height)) in iproduct!(RGB_FORMATS.iter().chain(YUV_FORMATS), SIZES)
        {
            let src = random_source(1, width, height, *pixel_format);
            let dst = convert_image(width, height, pixel_format.descriptor(), 0, &src).unwrap();

            assert_eq!(
                Ok(dst.len()),
                get_buffer_size(width, height, pixel_format.descriptor())
            );
        }
    }

    #[test]
    fn extra_source_bytes_are_ignored() {
        let mut src = random_source(3, 8, 2, PixelFormat::Yuyv);
        let expected = convert_image(8, 2, PixelFormat::Yuyv.descriptor(), 0, &src).unwrap();

        src.extend_from_slice(&[0xAA; 5]);
        let dst = convert_image(8, 2, PixelFormat::Yuyv.descriptor(), 0, &src).unwrap();
        assert_eq!(dst, expected);
    }
}
