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
#![warn(missing_docs)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
#![deny(unstable_features)]
#![deny(unused_import_braces)]
#![deny(
    clippy::complexity,
    clippy::correctness,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]
#![allow(
    clippy::too_many_arguments, // API design
    clippy::missing_safety_doc, // Until we add them...
    clippy::similar_names, // This requires effort to ensure
    // Casts are range checked by the format constraints
    clippy::cast_possible_truncation,
    clippy::module_name_repetitions,
    // Yield false positives
    clippy::must_use_candidate,
)]

//! Capture frame formats is a library to generate the reference frames used to
//! validate a video capture pipeline.
//!
//! Starting from an uncompressed source image, it produces the raw bytes a
//! capture device is expected to write for each of its pixel formats:
//!
//! | Source               | Destination pixel formats                               |
//! | -------------------- | ------------------------------------------------------- |
//! | RGB24                | RGB332, (A/X)RGB444, (A/X)RGB555, RGB565, BGR24, RGB24, |
//! |                      | (A/X)BGR32, (A/X)RGB32                                  |
//! | YUV 4:2:2 (UYVY)     | UYVY, VYUY, YUYV, YVYU, NV12M, NV21M, NV16M, NV61M,     |
//! |                      | YUV420M, YVU420M, YUV422M, YVU422M                      |
//!
//! No color model conversion takes place: RGB formats keep the most significant
//! bits of each channel, YUV formats reorder and subsample the source components.
//!
//! Besides conversion, the library computes the per-channel histogram of a source
//! image and composes test images made of inset copies of a source image.
//!
//! # Examples
//!
//! Convert an image from rgb24 to rgb565:
//! ```
//! use capture_frame_formats as cff;
//! use cff::{convert_image, PixelFormat};
//!
//! const WIDTH: u32 = 640;
//! const HEIGHT: u32 = 480;
//!
//! let src_data = vec![0u8; 3 * (WIDTH as usize) * (HEIGHT as usize)];
//! let dst_data = convert_image(
//!     WIDTH,
//!     HEIGHT,
//!     PixelFormat::Rgb565.descriptor(),
//!     0,
//!     &src_data,
//! )
//! .unwrap();
//!
//! assert_eq!(dst_data.len(), 2 * (WIDTH as usize) * (HEIGHT as usize));
//! ```
//!
//! Handle conversion errors:
//! ```
//! use capture_frame_formats as cff;
//! use cff::{convert_image, PixelFormat};
//! use std::error;
//!
//! fn convert() -> Result<(), Box<dyn error::Error>> {
//!     const WIDTH: u32 = 640;
//!     const HEIGHT: u32 = 480;
//!
//!     let src_data = vec![0u8; 2 * (WIDTH as usize) * (HEIGHT as usize)];
//!     let nv12 = convert_image(WIDTH, HEIGHT, PixelFormat::Nv12m.descriptor(), 0, &src_data)?;
//!
//!     // Do something with nv12
//!     // --snip--
//!
//!     Ok(())
//! }
//! ```
//!
//! Compute the histogram of an image and serialize it:
//! ```
//! use capture_frame_formats as cff;
//! use cff::{compute_histogram, PixelFormat, HISTOGRAM_SIZE};
//!
//! let src_data = vec![0u8; 3 * 8 * 8];
//! let histogram = compute_histogram(8, 8, PixelFormat::Rgb24.descriptor(), &src_data).unwrap();
//!
//! assert_eq!(histogram.channels[0].buckets[0], 64);
//! assert_eq!(histogram.to_bytes().len(), HISTOGRAM_SIZE);
//! ```
//!
//! Describe a custom format:
//! ```
//! use capture_frame_formats as cff;
//! use cff::{get_buffer_size, Bitfield, FormatDescriptor, RgbLayout};
//!
//! let bgr565 = RgbLayout::new(
//!     Bitfield::new(0, 5),
//!     Bitfield::new(5, 6),
//!     Bitfield::new(11, 5),
//!     None,
//! )
//! .unwrap();
//!
//! let format = FormatDescriptor::Rgb(bgr565);
//! assert_eq!(get_buffer_size(640, 480, &format), Ok(2 * 640 * 480));
//! ```
mod codec;
mod format_descriptor;
mod histogram;
mod pixel_format;
mod static_assert;

use codec::common::layer_offsets;
pub use codec::common::COMPOSE_STEP;
use std::error;
use std::fmt;
use std::sync::OnceLock;

pub use codec::Codec;
pub use format_descriptor::{
    AlphaKind, Bitfield, ChromaOrder, FormatDescriptor, PackedOrder, PlaneLayout, RgbLayout,
    SourceKind,
};
pub use histogram::{
    ChannelStats, Histogram, HISTOGRAM_BUCKETS, HISTOGRAM_CHANNELS, HISTOGRAM_SIZE,
};
pub use pixel_format::PixelFormat;

/// An enumeration of errors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C)]
pub enum ErrorKind {
    /// One or more parameters have invalid values for the called function
    InvalidValue,
    /// The combination of parameters is unsupported for the called function
    InvalidOperation,
    /// Not enough data was provided to the called function. Typically, provided
    /// arrays are not correctly sized
    NotEnoughData,
    /// A format description does not describe a legal pixel layout
    InvalidFormat,
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ErrorKind::InvalidValue => write!(
                f,
                "One or more parameters have not legal values for the command"
            ),
            ErrorKind::InvalidOperation => write!(
                f,
                "The combination of parameters is not legal for the command"
            ),
            ErrorKind::NotEnoughData => write!(f, "Not enough data provided"),
            ErrorKind::InvalidFormat => write!(f, "The format description is not legal"),
        }
    }
}

#[cfg(not(tarpaulin_include))]
impl error::Error for ErrorKind {
    fn cause(&self) -> Option<&dyn error::Error> {
        None
    }
}

/// Returns a description of the formats known to the library, one per line
///
/// # Examples
/// ```
/// use capture_frame_formats as cff;
/// println!("{}", cff::describe_formats());
/// // => rgb332: rgb8 r:5/3 g:2/3 b:0/2
/// //    ...
/// ```
pub fn describe_formats() -> String {
    static DESCRIPTION: OnceLock<String> = OnceLock::new();

    DESCRIPTION
        .get_or_init(|| {
            PixelFormat::ALL
                .iter()
                .map(|format| format!("{}: {}\n", format, format.descriptor()))
                .collect()
        })
        .clone()
}

/// Compute number of bytes of a source image of the given format and dimensions
///
/// Sources of RGB formats are RGB24 images, sources of YUV formats are packed
/// `(U, Y0, V, Y1)` 4:2:2 images.
///
/// # Errors
///
/// * [`InvalidValue`] if `width` or `height` violate the [`size constraints`]
///   imposed by the format
///
/// * [`NotEnoughData`] if the size cannot be represented
///
/// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
/// [`NotEnoughData`]: ./enum.ErrorKind.html#variant.NotEnoughData
/// [`size constraints`]: ./fn.get_buffer_size.html#note
pub fn get_source_size(
    width: u32,
    height: u32,
    format: &FormatDescriptor,
) -> Result<usize, ErrorKind> {
    let (width, height) = format.check_size(width, height)?;
    format
        .source_size(width, height)
        .ok_or(ErrorKind::NotEnoughData)
}

/// Compute number of bytes required to store an image given its format and dimensions
///
/// # Note
/// YUV formats require `width` and `height` to be even. Formats with vertical
/// chroma subsampling also require `height` to be a multiple of the
/// subsampling factor.
///
/// format        | bytes
/// --------------|-----------------------------------
/// RGB           | `w * h * depth / 8`
/// packed YUV    | `w * h * 2`
/// semi-planar   | `w * h + w * (h / vsub)`
/// planar        | `w * h + 2 * (w / 2) * (h / vsub)`
///
/// # Errors
///
/// * [`InvalidValue`] if `width` or `height` violate the size constraints
///   imposed by the format
///
/// * [`NotEnoughData`] if the size cannot be represented
///
/// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
/// [`NotEnoughData`]: ./enum.ErrorKind.html#variant.NotEnoughData
pub fn get_buffer_size(
    width: u32,
    height: u32,
    format: &FormatDescriptor,
) -> Result<usize, ErrorKind> {
    let (width, height) = format.check_size(width, height)?;
    format
        .buffer_size(width, height)
        .ok_or(ErrorKind::NotEnoughData)
}

/// Converts a source image to the given format.
///
/// # Arguments
/// * `width` - Width of the image to convert in pixels
/// * `height` - Height of the image to convert in pixels
/// * `format` - Destination format
/// * `alpha` - Value written in the alpha (or unused) bits of RGB formats
/// * `src` - Source image, see [`get_source_size`]
///
/// # Errors
///
/// * [`InvalidValue`] if `width` or `height` violate the [`size constraints`]
///   imposed by the format
///
/// * [`InvalidValue`] if the format has a single alpha bit and `alpha` is
///   neither 0 nor 255
///
/// * [`NotEnoughData`] if `src` is smaller than the source image size
///
/// # Algorithm
/// RGB formats: each channel keeps its `width` most significant bits and is
/// shifted to its bit offset; the pixel is stored little endian on
/// `depth / 8` bytes.
///
/// Packed YUV formats: the bytes of each `(U, Y0, V, Y1)` macropixel are reordered.
///
/// Semi-planar and planar formats: the luma samples are followed by the chroma
/// samples of every `vsub`-th row, one pair per macropixel.
///
/// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
/// [`NotEnoughData`]: ./enum.ErrorKind.html#variant.NotEnoughData
/// [`size constraints`]: ./fn.get_buffer_size.html#note
/// [`get_source_size`]: ./fn.get_source_size.html
pub fn convert_image(
    width: u32,
    height: u32,
    format: &FormatDescriptor,
    alpha: u8,
    src: &[u8],
) -> Result<Vec<u8>, ErrorKind> {
    log::debug!("convert {width}x{height} to {format} (alpha {alpha})");
    format.convert(width, height, src, alpha)
}

/// Computes the per-channel histogram of a source image.
///
/// Channels are R, G, B for RGB formats and V, Y, U for YUV formats. The result
/// only depends on the source kind of `format`.
///
/// For YUV sources each macropixel contributes two samples. The chroma of the
/// second one is the average of the macropixel chroma and the chroma of the next
/// macropixel, except at the end of a row where the macropixel chroma is used
/// as is.
///
/// # Errors
///
/// * [`InvalidValue`] if `width` or `height` violate the [`size constraints`]
///   imposed by the format
///
/// * [`NotEnoughData`] if `src` is smaller than the source image size
///
/// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
/// [`NotEnoughData`]: ./enum.ErrorKind.html#variant.NotEnoughData
/// [`size constraints`]: ./fn.get_buffer_size.html#note
pub fn compute_histogram(
    width: u32,
    height: u32,
    format: &FormatDescriptor,
    src: &[u8],
) -> Result<Histogram, ErrorKind> {
    log::debug!("histogram {width}x{height} of {:?} source", format.source_kind());
    format.histogram(width, height, src)
}

/// Composes `num_inputs` inset copies of a source image.
///
/// Starting from a black canvas, copy `k` (from 1) is placed at row and column
/// `50 * k`, clipped to the image borders. Copies that would start outside the
/// image are skipped.
///
/// The result is a source image of the same kind and size as `src`.
///
/// # Errors
///
/// * [`InvalidValue`] if `width` or `height` violate the [`size constraints`]
///   imposed by the format
///
/// * [`NotEnoughData`] if `src` is smaller than the source image size
///
/// [`InvalidValue`]: ./enum.ErrorKind.html#variant.InvalidValue
/// [`NotEnoughData`]: ./enum.ErrorKind.html#variant.NotEnoughData
/// [`size constraints`]: ./fn.get_buffer_size.html#note
pub fn compose_image(
    num_inputs: u32,
    width: u32,
    height: u32,
    format: &FormatDescriptor,
    src: &[u8],
) -> Result<Vec<u8>, ErrorKind> {
    log::debug!(
        "compose {num_inputs} layers {width}x{height} of {:?} source",
        format.source_kind()
    );

    let layers = layer_offsets(num_inputs as usize, width as usize, height as usize).count();
    if layers < num_inputs as usize {
        log::warn!(
            "{} of {num_inputs} layers do not fit in {width}x{height}",
            num_inputs as usize - layers
        );
    }

    format.compose(num_inputs, width, height, src)
}

#[doc(hidden)]
#[cfg(not(tarpaulin_include))]
pub mod c_api {
    #![allow(clippy::wildcard_imports)]
    use super::*; // We are importing everything
    use std::ffi::CString;
    use std::os::raw::c_char;
    use std::ptr;
    use std::slice;

    #[repr(C)]
    pub enum Result {
        Ok,
        Err,
    }

    unsafe fn set_error(error: *mut ErrorKind, value: ErrorKind) -> self::Result {
        if !error.is_null() {
            *error = value;
        }

        self::Result::Err
    }

    unsafe fn write_output(dst: *mut u8, dst_len: usize, data: &[u8]) -> Option<ErrorKind> {
        if data.len() > dst_len {
            return Some(ErrorKind::NotEnoughData);
        }

        slice::from_raw_parts_mut(dst, data.len()).copy_from_slice(data);
        None
    }

    #[no_mangle]
    pub extern "C" fn cff_describe_formats() -> *mut c_char {
        match CString::new(describe_formats()) {
            Ok(s) => s.into_raw(),
            Err(_) => ptr::null_mut(),
        }
    }

    #[no_mangle]
    pub unsafe extern "C" fn cff_unref_string(string: *mut c_char) {
        if !string.is_null() {
            let _unused = CString::from_raw(string);
        }
    }

    #[no_mangle]
    pub unsafe extern "C" fn cff_get_buffer_size(
        width: u32,
        height: u32,
        pixel_format: i32,
        buffer_size: *mut usize,
        error: *mut ErrorKind,
    ) -> self::Result {
        // Protect from C null pointers
        if buffer_size.is_null() {
            return set_error(error, ErrorKind::InvalidValue);
        }

        // C enums are untrusted in the sense you can cast any value to an enum type
        let format = match PixelFormat::try_from(pixel_format) {
            Ok(format) => format,
            Err(error_kind) => return set_error(error, error_kind),
        };

        match get_buffer_size(width, height, format.descriptor()) {
            Ok(size) => {
                *buffer_size = size;
                self::Result::Ok
            }
            Err(error_kind) => set_error(error, error_kind),
        }
    }

    #[no_mangle]
    pub unsafe extern "C" fn cff_convert_image(
        width: u32,
        height: u32,
        pixel_format: i32,
        alpha: u8,
        src_buffer: *const u8,
        src_size: usize,
        dst_buffer: *mut u8,
        dst_size: usize,
        error: *mut ErrorKind,
    ) -> self::Result {
        if src_buffer.is_null() || dst_buffer.is_null() {
            return set_error(error, ErrorKind::InvalidValue);
        }

        let format = match PixelFormat::try_from(pixel_format) {
            Ok(format) => format,
            Err(error_kind) => return set_error(error, error_kind),
        };

        let src = slice::from_raw_parts(src_buffer, src_size);
        match convert_image(width, height, format.descriptor(), alpha, src) {
            Ok(dst) => match write_output(dst_buffer, dst_size, &dst) {
                None => self::Result::Ok,
                Some(error_kind) => set_error(error, error_kind),
            },
            Err(error_kind) => set_error(error, error_kind),
        }
    }

    /// `histogram` must point to at least `HISTOGRAM_SIZE` bytes
    #[no_mangle]
    pub unsafe extern "C" fn cff_compute_histogram(
        width: u32,
        height: u32,
        pixel_format: i32,
        src_buffer: *const u8,
        src_size: usize,
        histogram: *mut u8,
        error: *mut ErrorKind,
    ) -> self::Result {
        if src_buffer.is_null() || histogram.is_null() {
            return set_error(error, ErrorKind::InvalidValue);
        }

        let format = match PixelFormat::try_from(pixel_format) {
            Ok(format) => format,
            Err(error_kind) => return set_error(error, error_kind),
        };

        let src = slice::from_raw_parts(src_buffer, src_size);
        match compute_histogram(width, height, format.descriptor(), src) {
            Ok(report) => match write_output(histogram, HISTOGRAM_SIZE, &report.to_bytes()) {
                None => self::Result::Ok,
                Some(error_kind) => set_error(error, error_kind),
            },
            Err(error_kind) => set_error(error, error_kind),
        }
    }

    #[no_mangle]
    pub unsafe extern "C" fn cff_compose_image(
        num_inputs: u32,
        width: u32,
        height: u32,
        pixel_format: i32,
        src_buffer: *const u8,
        src_size: usize,
        dst_buffer: *mut u8,
        dst_size: usize,
        error: *mut ErrorKind,
    ) -> self::Result {
        if src_buffer.is_null() || dst_buffer.is_null() {
            return set_error(error, ErrorKind::InvalidValue);
        }

        let format = match PixelFormat::try_from(pixel_format) {
            Ok(format) => format,
            Err(error_kind) => return set_error(error, error_kind),
        };

        let src = slice::from_raw_parts(src_buffer, src_size);
        match compose_image(num_inputs, width, height, format.descriptor(), src) {
            Ok(dst) => match write_output(dst_buffer, dst_size, &dst) {
                None => self::Result::Ok,
                Some(error_kind) => set_error(error, error_kind),
            },
            Err(error_kind) => set_error(error, error_kind),
        }
    }
}
