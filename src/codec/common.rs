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
/// Distance, in pixels, between the origins of two consecutive composed layers
pub const COMPOSE_STEP: usize = 50;

/// Keeps the `width` most significant bits of an 8-bit sample.
///
/// `width` must be in range `1..=8`.
pub const fn truncate(sample: u8, width: u8) -> u8 {
    sample >> (8 - width)
}

/// Origins of the layers that fit in a `width` x `height` image
pub fn layer_offsets(
    num_inputs: usize,
    width: usize,
    height: usize,
) -> impl Iterator<Item = usize> {
    (1..=num_inputs)
        .map(|layer| layer.saturating_mul(COMPOSE_STEP))
        .take_while(move |&offset| offset < width && offset < height)
}

/// Overlays progressively inset copies of `src` on a zeroed canvas.
///
/// Layer `k` (starting from 1) is placed at row and column `k * COMPOSE_STEP`
/// and clipped at the right and bottom image borders. Later layers overwrite
/// earlier ones.
pub fn compose_layers(
    num_inputs: usize,
    width: usize,
    height: usize,
    depth: usize,
    src: &[u8],
) -> Vec<u8> {
    let stride = depth * width;
    let mut dst = vec![0_u8; stride * height];

    for offset in layer_offsets(num_inputs, width, height) {
        let length = depth * (width - offset);
        let dst_rows = dst[offset * stride..].chunks_exact_mut(stride);
        let src_rows = src.chunks_exact(stride).take(height - offset);

        for (dst_row, src_row) in dst_rows.zip(src_rows) {
            dst_row[depth * offset..].copy_from_slice(&src_row[..length]);
        }
    }

    dst
}

/// Extracts the luma plane out of a packed `(U, Y0, V, Y1)` image
pub fn extract_luma(dst: &mut Vec<u8>, src: &[u8]) {
    dst.extend(src.iter().skip(1).step_by(2));
}

/// Packed source rows that carry chroma for a plane subsampled by `vsub`
pub fn chroma_rows(
    src: &[u8],
    width: usize,
    height: usize,
    vsub: usize,
) -> impl Iterator<Item = &[u8]> {
    src.chunks_exact(2 * width)
        .step_by(vsub)
        .take(height / vsub)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_top_bits() {
        assert_eq!(truncate(0xFF, 3), 0x07);
        assert_eq!(truncate(0xFF, 8), 0xFF);
        assert_eq!(truncate(0x80, 1), 1);
        assert_eq!(truncate(0x7F, 1), 0);
        assert_eq!(truncate(0b1011_0110, 5), 0b1_0110);
    }

    #[test]
    fn truncate_is_idempotent() {
        for width in 1..=8 {
            for sample in 0..=255_u8 {
                let once = truncate(sample, width) << (8 - width);
                assert_eq!(truncate(once, width), truncate(sample, width));
            }
        }
    }

    #[test]
    fn layer_offsets_are_clipped() {
        assert_eq!(layer_offsets(0, 400, 400).count(), 0);
        assert_eq!(layer_offsets(3, 400, 400).collect::<Vec<_>>(), [50, 100, 150]);
        assert_eq!(layer_offsets(5, 400, 120).collect::<Vec<_>>(), [50, 100]);
        assert_eq!(layer_offsets(usize::MAX, 50, 400).count(), 0);
    }
}
