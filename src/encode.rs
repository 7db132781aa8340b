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

//! Functions and types for encoding base64 data.

use super::alphabet::{Sextet, PAD};
use super::bits::{bit_len, get_bit, set_bit};
use super::BufferTooSmall;
use super::{BITS_PER_SYMBOL, BYTES_PER_CHUNK, GROUP_OFFSET};
use super::SYMBOLS_PER_CHUNK;

use core::iter::FusedIterator;
use core::slice;

#[cfg(feature = "alloc")]
use alloc::{string::String, vec::Vec};

/// The length of the encoded form of `len` bytes, padding included.
pub fn encoded_len(len: usize) -> usize {
    let chunks =
        len / BYTES_PER_CHUNK + (len % BYTES_PER_CHUNK != 0) as usize;
    chunks * SYMBOLS_PER_CHUNK
}

/// Iterator returned by [`encode_to_bytes`].
///
/// Yields the ASCII bytes of the encoded text, followed by any `=`
/// padding.
#[derive(Clone, Debug)]
pub struct Encoder<'a> {
    input: &'a [u8],
    /// Index of the next input bit to consume.
    bit: usize,
    /// Number of symbols and pad characters yielded so far.
    emitted: usize,
}

impl<'a> Encoder<'a> {
    pub(crate) fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            bit: 0,
            emitted: 0,
        }
    }

    fn next_group(&mut self) -> Sextet {
        let end = bit_len(self.input);
        let mut group = 0_u8;
        let mut held = 0;
        while held < BITS_PER_SYMBOL && self.bit < end {
            let value = get_bit(self.input, self.bit);
            set_bit(slice::from_mut(&mut group), GROUP_OFFSET + held, value);
            self.bit += 1;
            held += 1;
        }
        // A trailing partial group keeps its unfilled low bits zeroed.
        Sextet::from_low_bits(group)
    }
}

impl Iterator for Encoder<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let c = if self.bit < bit_len(self.input) {
            self.next_group().symbol()
        } else if self.emitted % SYMBOLS_PER_CHUNK != 0 {
            PAD
        } else {
            return None;
        };
        self.emitted += 1;
        Some(c)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = encoded_len(self.input.len()) - self.emitted;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Encoder<'_> {}

impl FusedIterator for Encoder<'_> {}

/// Encodes `input`, yielding the encoded text as ASCII bytes.
pub fn encode_to_bytes(input: &[u8]) -> Encoder<'_> {
    Encoder::new(input)
}

/// Encodes `input` into `output`, returning the number of bytes written.
///
/// `output` must be at least <code>[encoded_len]\(input.len())</code>
/// bytes long; otherwise, nothing is written and an error is returned.
pub fn encode_to_slice(
    input: &[u8],
    output: &mut [u8],
) -> Result<usize, BufferTooSmall> {
    let encoder = encode_to_bytes(input);
    let len = encoder.len();
    BufferTooSmall::check(len, output.len())?;
    output.iter_mut().zip(encoder).for_each(|(out, c)| *out = c);
    Ok(len)
}

/// Encodes `input` and stores the encoded text as bytes in a [`Vec`].
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_to_vec(input: &[u8]) -> Vec<u8> {
    encode_to_bytes(input).collect()
}

/// Encodes `input` into a [`String`].
#[cfg(feature = "alloc")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "alloc")))]
pub fn encode_to_string(input: &[u8]) -> String {
    // Every symbol and pad character is ASCII.
    encode_to_bytes(input).map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(input: &[u8]) -> ([u8; 64], usize) {
        let mut out = [0; 64];
        let len = encode_to_slice(input, &mut out).unwrap();
        (out, len)
    }

    macro_rules! assert_encodes {
        ($input:expr, $expected:expr) => {{
            let (out, len) = encode($input);
            assert_eq!(&out[..len], &$expected[..]);
        }};
    }

    #[test]
    fn scenarios() {
        assert_encodes!(b"", b"");
        assert_encodes!(b"A", b"QQ==");
        assert_encodes!(b"AB", b"QUI=");
        assert_encodes!(b"ABC", b"QUJD");
        assert_encodes!(b"Sample Text", b"U2FtcGxlIFRleHQ=");
        assert_encodes!(&[0x00, 0x00, 0x00], b"AAAA");
        assert_encodes!(&[0xff, 0xff, 0xff], b"////");
        assert_encodes!(&[0xfb, 0xff], b"+/8=");
    }

    #[test]
    fn lengths() {
        assert_eq!(encoded_len(0), 0);
        assert_eq!(encoded_len(1), 4);
        assert_eq!(encoded_len(2), 4);
        assert_eq!(encoded_len(3), 4);
        assert_eq!(encoded_len(4), 8);
        assert_eq!(encoded_len(11), 16);
    }

    #[test]
    fn exact_size_hint() {
        let mut encoder = encode_to_bytes(b"Sample");
        for remaining in (0..=8).rev() {
            assert_eq!(encoder.len(), remaining);
            assert_eq!(encoder.size_hint(), (remaining, Some(remaining)));
            encoder.next();
        }
        assert_eq!(encoder.next(), None);

        let mut encoder = encode_to_bytes(b"Samp");
        assert_eq!(encoder.len(), 8);
        assert_eq!(encoder.by_ref().take(6).count(), 6);
        assert_eq!(encoder.len(), 2);
        assert_eq!(encoder.next(), Some(PAD));
        assert_eq!(encoder.next(), Some(PAD));
        assert_eq!(encoder.next(), None);
        assert_eq!(encoder.next(), None);
    }

    #[test]
    fn slice_too_small() {
        let mut out = [b'#'; 15];
        let err = encode_to_slice(b"Sample Text", &mut out).unwrap_err();
        assert_eq!(err.needed(), 16);
        assert_eq!(err.available(), 15);
        assert_eq!(out, [b'#'; 15]);

        let mut out = [b'#'; 17];
        assert_eq!(encode_to_slice(b"Sample Text", &mut out), Ok(16));
        assert_eq!(&out[..16], b"U2FtcGxlIFRleHQ=");
        assert_eq!(out[16], b'#');
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn allocating() {
        assert_eq!(encode_to_string(b"Sample Text"), "U2FtcGxlIFRleHQ=");
        assert_eq!(encode_to_vec(b"AB"), b"QUI=");
        assert!(encode_to_string(b"").is_empty());
    }
}
