// Copyright 2019 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

// Permission is hereby granted, free of charge, to any person obtaining a copy of this
// software and associated documentation files (the "Software"), to deal in the Software
// without restriction, including without limitation the rights to use, copy, modify,
// merge, publish, distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED,
// INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A
// PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT
// HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE
// SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
use crate::codec::common::compose_layers;
use crate::format_descriptor::RgbLayout;
use crate::histogram::Histogram;
use paste::paste;

const RGB_DEPTH: usize = 3;

// Generates one packing loop per output pixel size, so that the chunk size is
// a constant inside the loop.
macro_rules! pack_rgb {
    ($bytes:literal) => {
        paste! {
            fn [<pack_ $bytes>](layout: &RgbLayout, alpha: u32, src: &[u8], dst: &mut [u8]) {
                let red = layout.red();
                let green = layout.green();
                let blue = layout.blue();

                for (rgb, pixel) in src.chunks_exact(RGB_DEPTH).zip(dst.chunks_exact_mut($bytes)) {
                    let value = red.pack(rgb[0]) | green.pack(rgb[1]) | blue.pack(rgb[2]) | alpha;
                    pixel.copy_from_slice(&value.to_le_bytes()[..$bytes]);
                }
            }
        }
    };
}

pack_rgb!(1);
pack_rgb!(2);
pack_rgb!(3);
pack_rgb!(4);

pub fn convert(layout: &RgbLayout, width: usize, height: usize, src: &[u8], alpha: u8) -> Vec<u8> {
    let pixels = width * height;
    let depth = layout.bytes_per_pixel();
    let alpha = layout.alpha().map_or(0, |field| field.pack(alpha));

    let src = &src[..RGB_DEPTH * pixels];
    let mut dst = vec![0_u8; depth * pixels];
    match depth {
        1 => pack_1(layout, alpha, src, &mut dst),
        2 => pack_2(layout, alpha, src, &mut dst),
        3 => pack_3(layout, alpha, src, &mut dst),
        _ => pack_4(layout, alpha, src, &mut dst),
    }

    dst
}

pub fn histogram(width: usize, height: usize, src: &[u8]) -> Histogram {
    let mut histogram = Histogram::new();
    for rgb in src[..RGB_DEPTH * width * height].chunks_exact(RGB_DEPTH) {
        histogram.accumulate([rgb[0], rgb[1], rgb[2]]);
    }

    histogram
}

pub fn compose(num_inputs: usize, width: usize, height: usize, src: &[u8]) -> Vec<u8> {
    compose_layers(num_inputs, width, height, RGB_DEPTH, src)
}
