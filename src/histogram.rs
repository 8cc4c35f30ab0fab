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
use crate::static_assert;
use crate::ErrorKind;

/// Number of channels of a histogram report
pub const HISTOGRAM_CHANNELS: usize = 3;

/// Number of buckets per channel; each bucket covers 4 consecutive 8-bit values
pub const HISTOGRAM_BUCKETS: usize = 64;

/// Size in bytes of a serialized histogram report
pub const HISTOGRAM_SIZE: usize = 792;

const RANGE_SIZE: usize = 4 * HISTOGRAM_CHANNELS;
const SUMS_SIZE: usize = 4 * HISTOGRAM_CHANNELS;
const BUCKETS_SIZE: usize = 4 * HISTOGRAM_BUCKETS;

static_assert!(RANGE_SIZE + SUMS_SIZE + HISTOGRAM_CHANNELS * BUCKETS_SIZE == HISTOGRAM_SIZE);
static_assert!(HISTOGRAM_BUCKETS << 2 == 256);

/// Statistics of a single channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelStats {
    /// Smallest sample value
    pub min: u8,
    /// Largest sample value
    pub max: u8,
    /// Sum of all sample values, modulo 2^32
    pub sum: u32,
    /// Sample count for each group of 4 consecutive values
    pub buckets: [u32; HISTOGRAM_BUCKETS],
}

impl ChannelStats {
    const fn new() -> Self {
        Self {
            min: u8::MAX,
            max: u8::MIN,
            sum: 0,
            buckets: [0; HISTOGRAM_BUCKETS],
        }
    }

    fn add(&mut self, value: u8) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum = self.sum.wrapping_add(u32::from(value));
        self.buckets[usize::from(value >> 2)] += 1;
    }

    /// Number of samples accumulated in the channel
    pub fn count(&self) -> u64 {
        self.buckets.iter().map(|&count| u64::from(count)).sum()
    }
}

/// Per-channel statistics of an image.
///
/// Channels are stored in R, G, B order for RGB sources and in V, Y, U order
/// for YUV sources.
///
/// A report that has not seen any sample has `min = 255` and `max = 0` in all
/// channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    /// Channel statistics
    pub channels: [ChannelStats; HISTOGRAM_CHANNELS],
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    /// Creates an empty report
    pub const fn new() -> Self {
        Self {
            channels: [ChannelStats::new(), ChannelStats::new(), ChannelStats::new()],
        }
    }

    pub(crate) fn accumulate(&mut self, sample: [u8; HISTOGRAM_CHANNELS]) {
        for (channel, value) in self.channels.iter_mut().zip(sample) {
            channel.add(value);
        }
    }

    /// Serializes the report.
    ///
    /// The layout is little-endian:
    ///
    /// offset | size    | content
    /// -------|---------|---------------------------------------
    /// 0      | 3 x 4   | `min`, 0, `max`, 0 for each channel
    /// 12     | 3 x 4   | `sum` for each channel
    /// 24     | 3 x 256 | 64 bucket counts for each channel
    pub fn to_bytes(&self) -> [u8; HISTOGRAM_SIZE] {
        let mut bytes = [0_u8; HISTOGRAM_SIZE];
        let (range, rest) = bytes.split_at_mut(RANGE_SIZE);
        let (sums, buckets) = rest.split_at_mut(SUMS_SIZE);

        for (i, channel) in self.channels.iter().enumerate() {
            range[4 * i] = channel.min;
            range[4 * i + 2] = channel.max;
            sums[4 * i..4 * (i + 1)].copy_from_slice(&channel.sum.to_le_bytes());

            let channel_buckets = &mut buckets[i * BUCKETS_SIZE..(i + 1) * BUCKETS_SIZE];
            for (dst, count) in channel_buckets.chunks_exact_mut(4).zip(&channel.buckets) {
                dst.copy_from_slice(&count.to_le_bytes());
            }
        }

        bytes
    }

    /// Parses a report produced by [`to_bytes`].
    ///
    /// # Errors
    ///
    /// * [`InvalidOperation`] if `bytes` is not exactly [`HISTOGRAM_SIZE`] bytes
    ///   long or if a padding byte is not zero
    ///
    /// [`to_bytes`]: #method.to_bytes
    /// [`InvalidOperation`]: ./enum.ErrorKind.html#variant.InvalidOperation
    /// [`HISTOGRAM_SIZE`]: ./constant.HISTOGRAM_SIZE.html
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ErrorKind> {
        if bytes.len() != HISTOGRAM_SIZE {
            return Err(ErrorKind::InvalidOperation);
        }

        let (range, rest) = bytes.split_at(RANGE_SIZE);
        let (sums, buckets) = rest.split_at(SUMS_SIZE);
        let mut histogram = Histogram::new();

        for (i, channel) in histogram.channels.iter_mut().enumerate() {
            let record = &range[4 * i..4 * (i + 1)];
            if record[1] != 0 || record[3] != 0 {
                return Err(ErrorKind::InvalidOperation);
            }

            channel.min = record[0];
            channel.max = record[2];
            channel.sum = read_u32(&sums[4 * i..4 * (i + 1)]);

            let channel_buckets = &buckets[i * BUCKETS_SIZE..(i + 1) * BUCKETS_SIZE];
            for (count, src) in channel.buckets.iter_mut().zip(channel_buckets.chunks_exact(4)) {
                *count = read_u32(src);
            }
        }

        Ok(histogram)
    }
}

fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
