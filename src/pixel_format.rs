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
use crate::format_descriptor::{
    AlphaKind, Bitfield, ChromaOrder, FormatDescriptor, PackedOrder, PlaneLayout, RgbLayout,
};
use crate::static_assert;
use crate::ErrorKind;
use core::fmt;
use core::str::FromStr;

/// An enumeration of the device pixel formats reference frames are generated for.
///
/// RGB formats are converted from RGB24 sources, YUV formats from packed
/// `(U, Y0, V, Y1)` 4:2:2 sources.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(C)]
pub enum PixelFormat {
    /// RGB packed into a byte, 3 bits of red and green, 2 bits of blue.
    ///
    /// 8 bits per pixel
    Rgb332,
    /// RGB with 4 bits per channel and 4 bits of alpha in the top nibble.
    ///
    /// 16 bits per pixel
    Argb444,
    /// Same as `Argb444`, with the alpha bits unused.
    ///
    /// 16 bits per pixel
    Xrgb444,
    /// RGB with 5 bits per channel and 1 bit of alpha in the top bit.
    ///
    /// 16 bits per pixel
    Argb555,
    /// Same as `Argb555`, with the alpha bit unused.
    ///
    /// 16 bits per pixel
    Xrgb555,
    /// RGB with 5 bits of red and blue, 6 bits of green.
    ///
    /// 16 bits per pixel
    Rgb565,
    /// Blue, green, red byte order.
    ///
    /// 24 bits per pixel
    Bgr24,
    /// Red, green, blue byte order.
    ///
    /// 24 bits per pixel
    Rgb24,
    /// Blue, green, red, alpha byte order.
    ///
    /// 32 bits per pixel
    Abgr32,
    /// Same as `Abgr32`, with the alpha byte unused.
    ///
    /// 32 bits per pixel
    Xbgr32,
    /// Alpha, red, green, blue byte order.
    ///
    /// 32 bits per pixel
    Argb32,
    /// Same as `Argb32`, with the alpha byte unused.
    ///
    /// 32 bits per pixel
    Xrgb32,
    /// Packed YUV 4:2:2, `U Y0 V Y1`.
    ///
    /// 16 bits per pixel
    Uyvy,
    /// Packed YUV 4:2:2, `V Y0 U Y1`.
    ///
    /// 16 bits per pixel
    Vyuy,
    /// Packed YUV 4:2:2, `Y0 U Y1 V`.
    ///
    /// 16 bits per pixel
    Yuyv,
    /// Packed YUV 4:2:2, `Y0 V Y1 U`.
    ///
    /// 16 bits per pixel
    Yvyu,
    /// YUV with one luma plane Y then one plane with U and V values interleaved.
    /// Chroma is subsampled in both the horizontal and vertical dimensions by a factor of 2.
    ///
    /// 12 bits per pixel
    Nv12m,
    /// Same as `Nv12m`, with V before U.
    ///
    /// 12 bits per pixel
    Nv21m,
    /// YUV with one luma plane Y then one plane with U and V values interleaved.
    /// Chroma is subsampled in the horizontal dimension by a factor of 2.
    ///
    /// 16 bits per pixel
    Nv16m,
    /// Same as `Nv16m`, with V before U.
    ///
    /// 16 bits per pixel
    Nv61m,
    /// YUV with one luma plane Y then U chroma plane and last the V chroma plane.
    /// The two chroma planes are subsampled in both the horizontal and vertical dimensions by a factor of 2.
    ///
    /// 12 bits per pixel
    Yuv420m,
    /// Same as `Yuv420m`, with the V plane before the U plane.
    ///
    /// 12 bits per pixel
    Yvu420m,
    /// YUV with one luma plane Y then U chroma plane and last the V chroma plane.
    /// The two chroma planes are subsampled in the horizontal dimension by a factor of 2.
    ///
    /// 16 bits per pixel
    Yuv422m,
    /// Same as `Yuv422m`, with the V plane before the U plane.
    ///
    /// 16 bits per pixel
    Yvu422m,
}

const fn rgb(
    red: (u8, u8),
    green: (u8, u8),
    blue: (u8, u8),
    alpha: Option<(AlphaKind, u8, u8)>,
) -> FormatDescriptor {
    let alpha = match alpha {
        Some((kind, offset, width)) => Some((kind, Bitfield::new(offset, width))),
        None => None,
    };

    match RgbLayout::new(
        Bitfield::new(red.0, red.1),
        Bitfield::new(green.0, green.1),
        Bitfield::new(blue.0, blue.1),
        alpha,
    ) {
        Ok(layout) => FormatDescriptor::Rgb(layout),
        Err(_) => panic!("illegal rgb layout"),
    }
}

const fn packed(order: [u8; 4]) -> FormatDescriptor {
    match PackedOrder::new(order) {
        Ok(order) => FormatDescriptor::YuvPacked(order),
        Err(_) => panic!("illegal packed order"),
    }
}

const fn planes(count: u32, hsub: u8, vsub: u8, order: ChromaOrder) -> FormatDescriptor {
    match PlaneLayout::new(hsub, vsub, order) {
        Ok(layout) if count == 2 => FormatDescriptor::YuvSemiPlanar(layout),
        Ok(layout) => FormatDescriptor::YuvPlanar(layout),
        Err(_) => panic!("illegal plane layout"),
    }
}

const A: AlphaKind = AlphaKind::Alpha;
const X: AlphaKind = AlphaKind::Unused;

// Indexed by PixelFormat
static CATALOG: [FormatDescriptor; 24] = [
    rgb((5, 3), (2, 3), (0, 2), None),
    rgb((8, 4), (4, 4), (0, 4), Some((A, 12, 4))),
    rgb((8, 4), (4, 4), (0, 4), Some((X, 12, 4))),
    rgb((10, 5), (5, 5), (0, 5), Some((A, 15, 1))),
    rgb((10, 5), (5, 5), (0, 5), Some((X, 15, 1))),
    rgb((11, 5), (5, 6), (0, 5), None),
    rgb((16, 8), (8, 8), (0, 8), None),
    rgb((0, 8), (8, 8), (16, 8), None),
    rgb((16, 8), (8, 8), (0, 8), Some((A, 24, 8))),
    rgb((16, 8), (8, 8), (0, 8), Some((X, 24, 8))),
    rgb((8, 8), (16, 8), (24, 8), Some((A, 0, 8))),
    rgb((8, 8), (16, 8), (24, 8), Some((X, 0, 8))),
    packed([0, 1, 2, 3]),
    packed([2, 1, 0, 3]),
    packed([1, 0, 3, 2]),
    packed([1, 2, 3, 0]),
    planes(2, 2, 2, ChromaOrder::CbCr),
    planes(2, 2, 2, ChromaOrder::CrCb),
    planes(2, 2, 1, ChromaOrder::CbCr),
    planes(2, 2, 1, ChromaOrder::CrCb),
    planes(3, 2, 2, ChromaOrder::CbCr),
    planes(3, 2, 2, ChromaOrder::CrCb),
    planes(3, 2, 1, ChromaOrder::CbCr),
    planes(3, 2, 1, ChromaOrder::CrCb),
];

static_assert!(PixelFormat::Yvu422m as usize + 1 == PixelFormat::ALL.len());

impl PixelFormat {
    /// All formats, in declaration order
    pub const ALL: [PixelFormat; 24] = [
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

    /// Memory layout of the format
    pub fn descriptor(self) -> &'static FormatDescriptor {
        &CATALOG[self as usize]
    }

    /// Lowercase name of the format
    pub const fn name(self) -> &'static str {
        match self {
            PixelFormat::Rgb332 => "rgb332",
            PixelFormat::Argb444 => "argb444",
            PixelFormat::Xrgb444 => "xrgb444",
            PixelFormat::Argb555 => "argb555",
            PixelFormat::Xrgb555 => "xrgb555",
            PixelFormat::Rgb565 => "rgb565",
            PixelFormat::Bgr24 => "bgr24",
            PixelFormat::Rgb24 => "rgb24",
            PixelFormat::Abgr32 => "abgr32",
            PixelFormat::Xbgr32 => "xbgr32",
            PixelFormat::Argb32 => "argb32",
            PixelFormat::Xrgb32 => "xrgb32",
            PixelFormat::Uyvy => "uyvy",
            PixelFormat::Vyuy => "vyuy",
            PixelFormat::Yuyv => "yuyv",
            PixelFormat::Yvyu => "yvyu",
            PixelFormat::Nv12m => "nv12m",
            PixelFormat::Nv21m => "nv21m",
            PixelFormat::Nv16m => "nv16m",
            PixelFormat::Nv61m => "nv61m",
            PixelFormat::Yuv420m => "yuv420m",
            PixelFormat::Yvu420m => "yvu420m",
            PixelFormat::Yuv422m => "yuv422m",
            PixelFormat::Yvu422m => "yvu422m",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelFormat {
    type Err = ErrorKind;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        PixelFormat::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(name))
            .ok_or(ErrorKind::InvalidValue)
    }
}

impl TryFrom<i32> for PixelFormat {
    type Error = ErrorKind;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|index| PixelFormat::ALL.get(index).copied())
            .ok_or(ErrorKind::InvalidValue)
    }
}
