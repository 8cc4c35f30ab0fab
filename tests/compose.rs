#![warn(unused)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

mod common;

use cff::{compose_image, PixelFormat, COMPOSE_STEP};
use common::{random_source, source_depth, RGB_FORMATS, YUV_FORMATS};

use capture_frame_formats as cff;
use itertools::iproduct;

/// Reference composition, pixel by pixel
fn expected_pixel(
    src: &[u8],
    num_inputs: usize,
    width: usize,
    height: usize,
    depth: usize,
    row: usize,
    column: usize,
) -> Vec<u8> {
    let num_inputs = num_inputs.min(width.min(height) / COMPOSE_STEP + 1);
    let layer = (1..=num_inputs)
        .rev()
        .map(|k| k * COMPOSE_STEP)
        .find(|&offset| offset < width && offset < height && row >= offset && column >= offset);

    match layer {
        Some(offset) => {
            let index = depth * ((row - offset) * width + column - offset);
            src[index..index + depth].to_vec()
        }
        None => vec![0; depth],
    }
}

fn compose_ok(pixel_format: PixelFormat, num_inputs: u32, width: u32, height: u32) {
    let src = random_source(19, width, height, pixel_format);
    let dst = compose_image(num_inputs, width, height, pixel_format.descriptor(), &src).unwrap();

    let depth = source_depth(pixel_format);
    let width = width as usize;
    let height = height as usize;
    assert_eq!(dst.len(), src.len());

    for (row, column) in iproduct!(0..height, 0..width) {
        let index = depth * (row * width + column);
        assert_eq!(
            dst[index..index + depth],
            expected_pixel(&src, num_inputs as usize, width, height, depth, row, column),
            "{pixel_format} {num_inputs} layers at ({row}, {column})"
        );
    }
}

#[cfg(test)]
mod compose {
    use super::*;

    #[test]
    fn rgb() {
        for (pixel_format, num_inputs) in iproduct!(&RGB_FORMATS[..2], 0..4) {
            compose_ok(*pixel_format, num_inputs, 164, 120);
        }
    }

    #[test]
    fn yuv() {
        for (pixel_format, num_inputs) in iproduct!(&YUV_FORMATS[..2], 0..4) {
            compose_ok(*pixel_format, num_inputs, 164, 120);
        }
    }

    #[test]
    fn no_layers_is_black() {
        let src = random_source(23, 64, 64, PixelFormat::Rgb24);
        let dst = compose_image(0, 64, 64, PixelFormat::Rgb24.descriptor(), &src).unwrap();

        assert_eq!(dst.len(), src.len());
        assert!(dst.iter().all(|&byte| byte == 0));
    }

    #[test]
    fn small_images_are_black() {
        let src = random_source(29, 50, 400, PixelFormat::Nv12m);
        let dst = compose_image(5, 50, 400, PixelFormat::Nv12m.descriptor(), &src).unwrap();

        assert!(dst.iter().all(|&byte| byte == 0));
    }

    #[test]
    fn first_layer_origin() {
        const WIDTH: usize = 104;
        const HEIGHT: usize = 60;

        let src = random_source(31, WIDTH as u32, HEIGHT as u32, PixelFormat::Uyvy);
        let dst = compose_image(
            1,
            WIDTH as u32,
            HEIGHT as u32,
            PixelFormat::Uyvy.descriptor(),
            &src,
        )
        .unwrap();

        let stride = 2 * WIDTH;
        let start = COMPOSE_STEP * stride + 2 * COMPOSE_STEP;
        assert_eq!(dst[start..start + stride - 2 * COMPOSE_STEP], src[..stride - 2 * COMPOSE_STEP]);
        assert!(dst[..start].iter().all(|&byte| byte == 0));
    }

    #[test]
    fn many_layers() {
        compose_ok(PixelFormat::Rgb565, u32::MAX, 120, 102);
    }
}
