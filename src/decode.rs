/*
 * Copyright (C) 2026 taylor.fish <contact@taylor.fish>
 *
 * This file is part of sixbit.
 *
 * sixbit is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * sixbit is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with sixbit. If not, see <https://www.gnu.org/licenses/>.
 */

//! Functions and types for decoding base64 data.

use super::alphabet::{Sextet, PAD};
use super::bits::{get_bit, set_bit};
use super::BufferTooSmall;
use super::{BITS_PER_BYTE, BITS_PER_SYMBOL, BYTES_PER_CHUNK, GROUP_OFFSET};
use super::SYMBOLS_PER_CHUNK;

use core::fmt::{self, Display, Formatter};
use core::iter::FusedIterator;
use core::slice;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// An error encountered while decoding.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// A byte that is neither in [`ALPHABET`](crate::ALPHABET) nor part
    /// of the trailing padding.
    InvalidSymbol {
        /// The offending byte.
        symbol: u8,
        /// Its position in the input.
        index: usize,
    },
    /// The padding is not what encoding would have produced: a `=` appears
    /// before the last symbol, or the number of trailing `=` characters
    /// doesn't match the number of symbols.
    MalformedPadding,
}

use DecodeError as Error;

/// Alias of <code>[Result]\<T, [DecodeError]></code>.
pub type DecodeResult<T> = Result<T, DecodeError>;

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidSymbol {
                symbol,
                index,
            } if symbol.is_ascii_graphic() => write!(
                f,
                "invalid symbol {:?} at index {}",
                char::from(symbol),
                index,
            ),
            Self::InvalidSymbol {
                symbol,
                index,
            } => write!(f, "invalid byte 0x{:02x} at index {}", symbol, index),
            Self::MalformedPadding => write!(f, "malformed padding"),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for DecodeError {}

/// An error encountered by [`decode_to_slice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeSliceError {
    /// The input was not valid base64.
    DecodeError(DecodeError),
    /// The input was valid, but the output buffer was too small.
    BufferTooSmall(BufferTooSmall),
}

impl From<DecodeError> for DecodeSliceError {
    fn from(e: DecodeError) -> Self {
        Self::DecodeError(e)
    }
}

impl From<BufferTooSmall> for DecodeSliceError {
    fn from(e: BufferTooSmall) -> Self {
        Self::BufferTooSmall(e)
    }
}

impl Display for DecodeSliceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::DecodeError(e) => write!(f, "{}", e),
            Self::BufferTooSmall(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for DecodeSliceError {}

/// Used by the `decode_*_with` functions to configure the decoding process.
#[non_exhaustive]
#[derive(Clone, Copy, Debug)]
pub struct DecodeConfig {
    /// Whether the trailing `=` characters must be present. If false, input
    /// with the padding omitted entirely is also accepted; padding that is
    /// present must still be correct. [default: true]
    pub require_padding: bool,
}

impl DecodeConfig {
    /// Returns the default configuration.
    pub const fn new() -> Self {
        Self {
            require_padding: true,
        }
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The number of bytes represented by `symbols` unpadded symbols.
///
/// Bits left over after the last full byte carry no data and are dropped.
pub fn decoded_len(symbols: usize) -> usize {
    let chunks = symbols / SYMBOLS_PER_CHUNK;
    let rest = symbols % SYMBOLS_PER_CHUNK;
    chunks * BYTES_PER_CHUNK + rest * BITS_PER_SYMBOL / BITS_PER_BYTE
}

fn padding_for(symbols: usize) -> Option<usize> {
    match symbols % SYMBOLS_PER_CHUNK {
        0 => Some(0),
        2 => Some(2),
        3 => Some(1),
        _ => None,
    }
}

/// Checks every symbol and the padding, returning the input with the
/// padding removed.
fn validate(input: &[u8], config: DecodeConfig) -> DecodeResult<&[u8]> {
    let len = input.iter().rposition(|c| *c != PAD).map_or(0, |i| i + 1);
    let (symbols, padding) = input.split_at(len);
    let invalid = symbols
        .iter()
        .position(|&c| c != PAD && Sextet::from_symbol(c).is_none());
    if let Some(index) = invalid {
        return Err(Error::InvalidSymbol {
            symbol: symbols[index],
            index,
        });
    }
    if symbols.contains(&PAD) {
        return Err(Error::MalformedPadding);
    }

    match padding_for(symbols.len()) {
        Some(n) if padding.len() == n => Ok(symbols),
        Some(_) if padding.is_empty() && !config.require_padding => {
            Ok(symbols)
        }
        _ => Err(Error::MalformedPadding),
    }
}

fn unmap(c: u8) -> Sextet {
    if let Some(s) = Sextet::from_symbol(c) {
        s
    } else {
        panic!("symbol escaped validation: {:?}", char::from(c));
    }
}

/// Iterator returned by [`decode_bytes`] and [`decode_str`].
///
/// The input has already been validated, so this yields plain bytes.
#[derive(Clone, Debug)]
pub struct Decoder<'a> {
    /// Validated symbols, padding removed.
    symbols: &'a [u8],
    /// Index of the next bit in the stream formed by the 6 value bits of
    /// every symbol, in order.
    bit: usize,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(
        input: &'a [u8],
        config: DecodeConfig,
    ) -> DecodeResult<Self> {
        Ok(Self {
            symbols: validate(input, config)?,
            bit: 0,
        })
    }

    fn stream_len(&self) -> usize {
        self.symbols.len() * BITS_PER_SYMBOL
    }

    /// Bit `index` of the stream lives at bit `GROUP_OFFSET + index % 6` of
    /// the 6-bit value of symbol `index / 6`; the value's two high bits are
    /// skipped.
    fn stream_bit(&self, index: usize) -> bool {
        let value = unmap(self.symbols[index / BITS_PER_SYMBOL]);
        let offset = index % BITS_PER_SYMBOL;
        get_bit(&[u8::from(value)], GROUP_OFFSET + offset)
    }
}

impl Iterator for Decoder<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stream_len() - self.bit < BITS_PER_BYTE {
            return None;
        }
        let mut byte = 0_u8;
        for i in 0..BITS_PER_BYTE {
            let value = self.stream_bit(self.bit);
            set_bit(slice::from_mut(&mut byte), i, value);
            self.bit += 1;
        }
        Some(byte)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = (self.stream_len() - self.bit) / BITS_PER_BYTE;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Decoder<'_> {}

impl FusedIterator for Decoder<'_> {}

/// Decodes base64 data given as bytes.
///
/// The whole input is validated before any byte is produced.
pub fn decode_bytes(input: &[u8]) -> DecodeResult<Decoder<'_>> {
    decode_bytes_with(input, DecodeConfig::new())
}

/// Decodes a base64 `str`.
pub fn decode_str(input: &str) -> DecodeResult<Decoder<'_>> {
    decode_str_with(input, DecodeConfig::new())
}

/// Decodes base64 data given as bytes with the given config.
///
/// This function is like [`decode_bytes`], but takes a configuration object.
pub fn decode_bytes_with(
    input: &[u8],
    config: DecodeConfig,
) -> DecodeResult<Decoder<'_>> {
    Decoder::new(input, config)
}

/// Decodes a base64 `str` with the given config.
///
/// This function is like [`decode_str`], but takes a configuration object.
pub fn decode_str_with(
    input: &str,
    config: DecodeConfig,
) -> DecodeResult<Decoder<'_>> {
    decode_bytes_with(input.as_bytes(), config)
}

/// Decodes `input` into `output`, returning the number of bytes written.
///
/// Nothing is written if the input is invalid or `output` is too short.
pub fn decode_to_slice(
    input: &[u8],
    output: &mut [u8],
) -> Result<usize, DecodeSliceError> {
    decode_to_slice_with(input, output, DecodeConfig::new())
}

/// Decodes `input` into `output` with the given config.
///
/// This function is like [`decode_to_slice`], but takes a configuration
/// object.
pub fn decode_to_slice_with(
    input: &[u8],
    output: &mut [u8],
    config: DecodeConfig,
) -> Result<usize, DecodeSliceError> {
    let decoder = decode_bytes_with(input, config)?;
    let len = decoder.len();
    BufferTooSmall::check(len, output.len())?;
    output.iter_mut().zip(decoder).for_each(|(out, b)| *out = b);
    Ok(len)
}

/// Decodes `input` and stores the result in a [`Vec`].
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_to_vec(input: &[u8]) -> DecodeResult<Vec<u8>> {
    decode_to_vec_with(input, DecodeConfig::new())
}

/// Decodes `input` with the given config and stores the result in a
/// [`Vec`].
///
/// This function is like [`decode_to_vec`], but takes a configuration
/// object.
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn decode_to_vec_with(
    input: &[u8],
    config: DecodeConfig,
) -> DecodeResult<Vec<u8>> {
    decode_bytes_with(input, config).map(Iterator::collect)
}
