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
pub(crate) mod common;
mod packed;
mod planar;
mod rgb;
mod semi_planar;

use crate::format_descriptor::{FormatDescriptor, SourceKind};
use crate::histogram::Histogram;
use crate::ErrorKind;

/// Operations every target format supports.
///
/// All operations are pure: they read `src` and return a newly allocated
/// result. `src` may be longer than required, extra bytes are ignored.
pub trait Codec {
    /// Converts a source image to the format.
    ///
    /// `alpha` is only used by RGB layouts that have an alpha (or unused) field.
    ///
    /// # Errors
    ///
    /// * [`InvalidValue`] if `width` or `height` are not legal for the format
    /// * [`InvalidValue`] if the format has a 1-bit alpha field and `alpha` is
    ///   neither 0 nor 255
    /// * [`NotEnoughData`] if `src` is too small
    ///
    /// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
    /// [`NotEnoughData`]: ./enum.ErrorKind.html#variant.NotEnoughData
    fn convert(&self, width: u32, height: u32, src: &[u8], alpha: u8) -> Result<Vec<u8>, ErrorKind>;

    /// Computes the per-channel statistics of a source image.
    ///
    /// # Errors
    ///
    /// * [`InvalidValue`] if `width` or `height` are not legal for the format
    /// * [`NotEnoughData`] if `src` is too small
    ///
    /// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
    /// [`NotEnoughData`]: ./enum.ErrorKind.html#variant.NotEnoughData
    fn histogram(&self, width: u32, height: u32, src: &[u8]) -> Result<Histogram, ErrorKind>;

    /// Composes `num_inputs` inset copies of a source image.
    ///
    /// The result has the same format and size of the source.
    ///
    /// # Errors
    ///
    /// * [`InvalidValue`] if `width` or `height` are not legal for the format
    /// * [`NotEnoughData`] if `src` is too small
    ///
    /// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
    /// [`NotEnoughData`]: ./enum.ErrorKind.html#variant.NotEnoughData
    fn compose(
        &self,
        num_inputs: u32,
        width: u32,
        height: u32,
        src: &[u8],
    ) -> Result<Vec<u8>, ErrorKind>;
}

impl FormatDescriptor {
    /// Checks the image size against the format constraints
    pub(crate) fn check_size(&self, width: u32, height: u32) -> Result<(usize, usize), ErrorKind> {
        let width = width as usize;
        let height = height as usize;

        if self.source_kind() == SourceKind::Yuv422 {
            let vsub = usize::from(self.vsub());
            if (width & 1) == 1 || (height & 1) == 1 || height % vsub != 0 {
                return Err(ErrorKind::InvalidValue);
            }
        }

        Ok((width, height))
    }

    fn check_source(&self, width: u32, height: u32, src: &[u8]) -> Result<(usize, usize), ErrorKind> {
        let (width, height) = self.check_size(width, height)?;
        match self.source_size(width, height) {
            Some(size) if size <= src.len() => Ok((width, height)),
            _ => Err(ErrorKind::NotEnoughData),
        }
    }
}

impl Codec for FormatDescriptor {
    fn convert(&self, width: u32, height: u32, src: &[u8], alpha: u8) -> Result<Vec<u8>, ErrorKind> {
        let (width, height) = self.check_source(width, height, src)?;
        if self.buffer_size(width, height).is_none() {
            return Err(ErrorKind::NotEnoughData);
        }

        Ok(match self {
            FormatDescriptor::Rgb(layout) => {
                if layout.alpha_bits() == 1 && alpha != 0 && alpha != u8::MAX {
                    return Err(ErrorKind::InvalidValue);
                }

                rgb::convert(layout, width, height, src, alpha)
            }
            FormatDescriptor::YuvPacked(order) => packed::convert(*order, width, height, src),
            FormatDescriptor::YuvSemiPlanar(layout) => {
                semi_planar::convert(*layout, width, height, src)
            }
            FormatDescriptor::YuvPlanar(layout) => planar::convert(*layout, width, height, src),
        })
    }

    fn histogram(&self, width: u32, height: u32, src: &[u8]) -> Result<Histogram, ErrorKind> {
        let (width, height) = self.check_source(width, height, src)?;

        Ok(match self.source_kind() {
            SourceKind::Rgb24 => rgb::histogram(width, height, src),
            SourceKind::Yuv422 => packed::histogram(width, height, src),
        })
    }

    fn compose(
        &self,
        num_inputs: u32,
        width: u32,
        height: u32,
        src: &[u8],
    ) -> Result<Vec<u8>, ErrorKind> {
        let (width, height) = self.check_source(width, height, src)?;
        let num_inputs = num_inputs as usize;

        Ok(match self.source_kind() {
            SourceKind::Rgb24 => rgb::compose(num_inputs, width, height, src),
            SourceKind::Yuv422 => packed::compose(num_inputs, width, height, src),
        })
    }
}
