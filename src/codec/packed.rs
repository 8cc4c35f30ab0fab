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
use crate::format_descriptor::PackedOrder;
use crate::histogram::Histogram;

const GROUP_SIZE: usize = 4;
const YUV_DEPTH: usize = 2;

pub fn convert(order: PackedOrder, width: usize, height: usize, src: &[u8]) -> Vec<u8> {
    let size = YUV_DEPTH * width * height;
    let mut dst = vec![0_u8; size];

    for (dst_group, src_group) in dst
        .chunks_exact_mut(GROUP_SIZE)
        .zip(src[..size].chunks_exact(GROUP_SIZE))
    {
        dst_group.copy_from_slice(&order.apply([
            src_group[0],
            src_group[1],
            src_group[2],
            src_group[3],
        ]));
    }

    dst
}

fn average(x: u8, y: u8) -> u8 {
    ((u16::from(x) + u16::from(y)) / 2) as u8
}

/// Accumulates two samples per macropixel, in V, Y, U order.
///
/// The second sample of a macropixel gets the average of its own chroma and the
/// chroma of the next macropixel. The last macropixel of a row has no successor
/// and reuses its own chroma.
pub fn histogram(width: usize, height: usize, src: &[u8]) -> Histogram {
    let mut histogram = Histogram::new();
    if width == 0 {
        return histogram;
    }

    for row in src[..YUV_DEPTH * width * height].chunks_exact(YUV_DEPTH * width) {
        let mut groups = row.chunks_exact(GROUP_SIZE).peekable();
        while let Some(group) = groups.next() {
            let (u0, y0, v0, y1) = (group[0], group[1], group[2], group[3]);
            let (u1, v1) = match groups.peek() {
                Some(next) => (average(u0, next[0]), average(v0, next[2])),
                None => (u0, v0),
            };

            histogram.accumulate([v0, y0, u0]);
            histogram.accumulate([v1, y1, u1]);
        }
    }

    histogram
}

pub fn compose(num_inputs: usize, width: usize, height: usize, src: &[u8]) -> Vec<u8> {
    compose_layers(num_inputs, width, height, YUV_DEPTH, src)
}
