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

//! Standard base64, computed one bit at a time.
//!
//! Encoding reads the input through a bit-addressable view ([`bits`]),
//! gathers 6-bit groups and maps each one to a symbol in [`ALPHABET`],
//! padding the result with `=` to a multiple of four symbols. Decoding
//! strips the padding, maps symbols back to 6-bit values and regroups the
//! resulting bit stream into bytes.
//!
//! ```
//! let encoded = sixbit::encode_to_string(b"Sample Text");
//! assert_eq!(encoded, "U2FtcGxlIFRleHQ=");
//! let decoded = sixbit::decode_to_vec(encoded.as_bytes()).unwrap();
//! assert_eq!(decoded, b"Sample Text");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

pub mod alphabet;
pub mod bits;
pub mod decode;
pub mod encode;

#[cfg(feature = "alloc")]
extern crate alloc;

use core::fmt::{self, Display, Formatter};

const BITS_PER_BYTE: usize = 8;
const BITS_PER_SYMBOL: usize = 6;
const BYTES_PER_CHUNK: usize = 3;
const SYMBOLS_PER_CHUNK: usize = 4;

/// Position of the first value bit when a 6-bit group is held in a byte.
/// The two bits above it are always zero.
const GROUP_OFFSET: usize = BITS_PER_BYTE - BITS_PER_SYMBOL;

/// Returned by the `*_to_slice` functions when the output buffer cannot
/// hold the result. Nothing is written in that case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferTooSmall {
    needed: usize,
    available: usize,
}

impl BufferTooSmall {
    pub(crate) fn check(needed: usize, available: usize) -> Result<(), Self> {
        if needed > available {
            Err(Self {
                needed,
                available,
            })
        } else {
            Ok(())
        }
    }

    /// The number of bytes the output needed.
    pub fn needed(&self) -> usize {
        self.needed
    }

    /// The length of the buffer that was provided.
    pub fn available(&self) -> usize {
        self.available
    }
}

impl Display for BufferTooSmall {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "output buffer too small (need {}, have {})",
            self.needed, self.available,
        )
    }
}

#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for BufferTooSmall {}

pub use alphabet::{ALPHABET, PAD};

pub use decode::decode_bytes;
pub use decode::decode_str;
pub use decode::decode_to_slice;
#[cfg(feature = "alloc")]
pub use decode::decode_to_vec;
pub use decode::{DecodeError, DecodeResult};

pub use encode::encode_to_bytes;
pub use encode::encode_to_slice;
#[cfg(feature = "alloc")]
pub use encode::{encode_to_string, encode_to_vec};
