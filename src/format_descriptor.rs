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
use crate::codec::common::truncate;
use crate::ErrorKind;
use std::fmt;

/// Role of the extra bitfield of an RGB layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AlphaKind {
    /// The field carries the alpha level given to the conversion.
    Alpha,
    /// The field is present but its content is don't-care (the `X` of `XRGB`).
    ///
    /// It is filled with the alpha level as well, so that the produced
    /// bytes are deterministic.
    Unused,
}

/// Position of one channel inside an integer pixel.
///
/// Fields are only validated when they become part of an [`RgbLayout`]. On a
/// standalone field, widths above 8 behave as 8, a zero width holds nothing
/// and bits shifted past the 32-bit pixel are dropped.
///
/// [`RgbLayout`]: ./struct.RgbLayout.html
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bitfield {
    /// Bit offset of the least significant bit of the field
    pub offset: u8,
    /// Number of bits of the field, `1..=8` in a valid layout
    pub width: u8,
}

impl Bitfield {
    /// Creates a new field description.
    pub const fn new(offset: u8, width: u8) -> Self {
        Self { offset, width }
    }

    /// Truncates an 8-bit sample to the field width and moves it to the field
    /// position.
    pub const fn pack(self, sample: u8) -> u32 {
        let width = self.sample_width();
        if width == 0 {
            return 0;
        }

        match (truncate(sample, width) as u32).checked_shl(self.offset as u32) {
            Some(value) => value,
            None => 0,
        }
    }

    /// Extracts the (truncated) sample stored in the field of `pixel`.
    pub const fn extract(self, pixel: u32) -> u8 {
        match pixel.checked_shr(self.offset as u32) {
            Some(value) => (value & self.low_mask()) as u8,
            None => 0,
        }
    }

    const fn sample_width(self) -> u8 {
        if self.width > 8 {
            8
        } else {
            self.width
        }
    }

    const fn low_mask(self) -> u32 {
        (1 << self.sample_width()) - 1
    }

    const fn end(self) -> u32 {
        self.offset as u32 + self.width as u32
    }

    const fn mask(self) -> u32 {
        match self.low_mask().checked_shl(self.offset as u32) {
            Some(mask) => mask,
            None => 0,
        }
    }
}

/// Channel-to-bitfield mapping of a packed RGB format.
///
/// # Note
/// A layout is always valid once constructed:
/// * every field is between 1 and 8 bits wide
/// * the field widths sum up to 8, 16, 24 or 32 bits
/// * fields do not overlap and do not exceed the pixel depth
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RgbLayout {
    red: Bitfield,
    green: Bitfield,
    blue: Bitfield,
    alpha: Option<(AlphaKind, Bitfield)>,
    depth: u8,
}

impl RgbLayout {
    /// Validates and creates a new layout.
    ///
    /// # Errors
    ///
    /// * [`InvalidFormat`] if the fields do not describe a legal pixel
    ///
    /// [`InvalidFormat`]: ./enum.ErrorKind.html#variant.InvalidFormat
    pub const fn new(
        red: Bitfield,
        green: Bitfield,
        blue: Bitfield,
        alpha: Option<(AlphaKind, Bitfield)>,
    ) -> Result<Self, ErrorKind> {
        let mut fields = [red, green, blue, Bitfield::new(0, 0)];
        let count = if let Some((_, field)) = alpha {
            fields[3] = field;
            4
        } else {
            3
        };

        let mut depth = 0;
        let mut i = 0;
        while i < count {
            let width = fields[i].width;
            if width == 0 || width > 8 {
                return Err(ErrorKind::InvalidFormat);
            }

            depth += width;
            i += 1;
        }

        if !matches!(depth, 8 | 16 | 24 | 32) {
            return Err(ErrorKind::InvalidFormat);
        }

        let mut used = 0;
        i = 0;
        while i < count {
            let field = fields[i];
            if field.end() > depth as u32 || (used & field.mask()) != 0 {
                return Err(ErrorKind::InvalidFormat);
            }

            used |= field.mask();
            i += 1;
        }

        Ok(Self {
            red,
            green,
            blue,
            alpha,
            depth,
        })
    }

    /// Red channel field
    pub const fn red(&self) -> Bitfield {
        self.red
    }

    /// Green channel field
    pub const fn green(&self) -> Bitfield {
        self.green
    }

    /// Blue channel field
    pub const fn blue(&self) -> Bitfield {
        self.blue
    }

    /// Alpha (or unused) field, if the layout has one
    pub const fn alpha(&self) -> Option<Bitfield> {
        match self.alpha {
            Some((_, field)) => Some(field),
            None => None,
        }
    }

    /// Role of the alpha field, if the layout has one
    pub const fn alpha_kind(&self) -> Option<AlphaKind> {
        match self.alpha {
            Some((kind, _)) => Some(kind),
            None => None,
        }
    }

    /// Width of the alpha (or unused) field, 0 when there is none
    pub const fn alpha_bits(&self) -> u8 {
        match self.alpha {
            Some((_, field)) => field.width,
            None => 0,
        }
    }

    /// Total number of bits per pixel
    pub const fn depth(&self) -> u8 {
        self.depth
    }

    /// Number of bytes used to store a pixel
    pub const fn bytes_per_pixel(&self) -> usize {
        (self.depth / 8) as usize
    }
}

/// Byte order of a packed 4:2:2 macropixel.
///
/// The source macropixel is `(U, Y0, V, Y1)`; byte `j` of the destination
/// macropixel is source byte `order[j]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PackedOrder([u8; 4]);

impl PackedOrder {
    /// Validates and creates a new order.
    ///
    /// # Errors
    ///
    /// * [`InvalidFormat`] if `order` is not a permutation of `0..4`
    ///
    /// [`InvalidFormat`]: ./enum.ErrorKind.html#variant.InvalidFormat
    pub const fn new(order: [u8; 4]) -> Result<Self, ErrorKind> {
        let mut seen = 0_u8;
        let mut i = 0;
        while i < 4 {
            if order[i] >= 4 || (seen & (1 << order[i])) != 0 {
                return Err(ErrorKind::InvalidFormat);
            }

            seen |= 1 << order[i];
            i += 1;
        }

        Ok(Self(order))
    }

    /// Source byte index for each destination byte
    pub const fn order(self) -> [u8; 4] {
        self.0
    }

    /// Order that undoes this one
    pub const fn inverse(self) -> Self {
        let mut inverse = [0_u8; 4];
        let mut i = 0;
        while i < 4 {
            inverse[self.0[i] as usize] = i as u8;
            i += 1;
        }

        Self(inverse)
    }

    /// Reorders a single macropixel
    pub fn apply(self, group: [u8; 4]) -> [u8; 4] {
        self.0.map(|index| group[usize::from(index)])
    }
}

/// Order of the two chroma components in planar formats.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChromaOrder {
    /// U (Cb) comes before V (Cr)
    CbCr,
    /// V (Cr) comes before U (Cb)
    CrCb,
}

impl ChromaOrder {
    /// Offsets, inside a `(U, Y0, V, Y1)` macropixel, of the first and second
    /// chroma component
    pub(crate) const fn offsets(self) -> [usize; 2] {
        match self {
            ChromaOrder::CbCr => [0, 2],
            ChromaOrder::CrCb => [2, 0],
        }
    }
}

/// Subsampling and chroma order of semi-planar and fully planar formats.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlaneLayout {
    hsub: u8,
    vsub: u8,
    order: ChromaOrder,
}

impl PlaneLayout {
    /// Validates and creates a new plane layout.
    ///
    /// # Errors
    ///
    /// * [`InvalidFormat`] if a subsampling factor is zero
    ///
    /// [`InvalidFormat`]: ./enum.ErrorKind.html#variant.InvalidFormat
    pub const fn new(hsub: u8, vsub: u8, order: ChromaOrder) -> Result<Self, ErrorKind> {
        if hsub == 0 || vsub == 0 {
            return Err(ErrorKind::InvalidFormat);
        }

        Ok(Self { hsub, vsub, order })
    }

    /// Horizontal subsampling factor.
    ///
    /// Chroma is always sampled once per macropixel, since that is the
    /// horizontal resolution of the 4:2:2 source.
    pub const fn hsub(self) -> u8 {
        self.hsub
    }

    /// Vertical subsampling factor
    pub const fn vsub(self) -> u8 {
        self.vsub
    }

    /// Chroma component order
    pub const fn order(self) -> ChromaOrder {
        self.order
    }
}

/// Input kind a format converts from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// 3 bytes per pixel, `(R, G, B)`
    Rgb24,
    /// 4 bytes per 2 pixels, `(U, Y0, V, Y1)`
    Yuv422,
}

/// Describes how a target format lays out pixels in memory.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FormatDescriptor {
    /// Packed RGB, one little-endian integer per pixel
    Rgb(RgbLayout),
    /// Packed YUV 4:2:2 with reordered components
    YuvPacked(PackedOrder),
    /// Luma plane followed by one interleaved chroma plane
    YuvSemiPlanar(PlaneLayout),
    /// Luma plane followed by two chroma planes
    YuvPlanar(PlaneLayout),
}

impl FormatDescriptor {
    /// Input kind expected by the format
    pub const fn source_kind(&self) -> SourceKind {
        match self {
            FormatDescriptor::Rgb(_) => SourceKind::Rgb24,
            _ => SourceKind::Yuv422,
        }
    }

    /// Number of bytes of a `width` x `height` source image, `None` on overflow
    pub fn source_size(&self, width: usize, height: usize) -> Option<usize> {
        let depth = match self.source_kind() {
            SourceKind::Rgb24 => 3,
            SourceKind::Yuv422 => 2,
        };

        width.checked_mul(height)?.checked_mul(depth)
    }

    /// Number of bytes of a `width` x `height` destination image,
    /// `None` on overflow
    pub fn buffer_size(&self, width: usize, height: usize) -> Option<usize> {
        let pixels = width.checked_mul(height)?;
        match self {
            FormatDescriptor::Rgb(layout) => pixels.checked_mul(layout.bytes_per_pixel()),
            FormatDescriptor::YuvPacked(_) => pixels.checked_mul(2),
            FormatDescriptor::YuvSemiPlanar(layout) => {
                let chroma = width.checked_mul(height / usize::from(layout.vsub()))?;
                pixels.checked_add(chroma)
            }
            FormatDescriptor::YuvPlanar(layout) => {
                let chroma = (width / 2).checked_mul(height / usize::from(layout.vsub()))?;
                pixels.checked_add(chroma.checked_mul(2)?)
            }
        }
    }

    /// Vertical chroma subsampling of the destination, 1 for non planar formats
    pub(crate) const fn vsub(&self) -> u8 {
        match self {
            FormatDescriptor::YuvSemiPlanar(layout) | FormatDescriptor::YuvPlanar(layout) => {
                layout.vsub
            }
            _ => 1,
        }
    }
}

const CHANNEL_NAMES: [char; 4] = ['r', 'g', 'b', 'a'];

impl fmt::Display for FormatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormatDescriptor::Rgb(layout) => {
                write!(f, "rgb{}", layout.depth())?;
                let fields = [
                    Some(layout.red()),
                    Some(layout.green()),
                    Some(layout.blue()),
                    layout.alpha(),
                ];

                for (name, field) in CHANNEL_NAMES.into_iter().zip(fields) {
                    if let Some(field) = field {
                        let name = match (name, layout.alpha_kind()) {
                            ('a', Some(AlphaKind::Unused)) => 'x',
                            _ => name,
                        };

                        write!(f, " {}:{}/{}", name, field.offset, field.width)?;
                    }
                }

                Ok(())
            }
            FormatDescriptor::YuvPacked(order) => {
                const NAMES: [&str; 4] = ["u", "y0", "v", "y1"];
                let [a, b, c, d] = order.order().map(|i| NAMES[usize::from(i)]);
                write!(f, "packed {a} {b} {c} {d}")
            }
            FormatDescriptor::YuvSemiPlanar(layout) | FormatDescriptor::YuvPlanar(layout) => {
                let planes = if let FormatDescriptor::YuvSemiPlanar(_) = self {
                    2
                } else {
                    3
                };

                let order = match layout.order() {
                    ChromaOrder::CbCr => "cbcr",
                    ChromaOrder::CrCb => "crcb",
                };

                write!(
                    f,
                    "planar{} {}x{} {}",
                    planes, layout.hsub, layout.vsub, order
                )
            }
        }
    }
}
