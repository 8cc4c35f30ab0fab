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
use crate::codec::common::{chroma_rows, extract_luma};
use crate::format_descriptor::PlaneLayout;

pub fn convert(layout: PlaneLayout, width: usize, height: usize, src: &[u8]) -> Vec<u8> {
    let vsub = usize::from(layout.vsub());
    let src = &src[..2 * width * height];
    let mut dst = Vec::with_capacity(width * height + 2 * (width / 2) * (height / vsub));

    extract_luma(&mut dst, src);
    if width == 0 {
        return dst;
    }

    // One full plane per chroma component, in the order of the layout
    for offset in layout.order().offsets() {
        for row in chroma_rows(src, width, height, vsub) {
            dst.extend(row.chunks_exact(4).map(|group| group[offset]));
        }
    }

    dst
}
