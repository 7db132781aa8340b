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

//! Bit-level access to byte buffers.
//!
//! Bit index `i` refers to byte `i / 8`, and within that byte, to the bit
//! with value `1 << (7 - i % 8)`. Bit 0 is therefore the most significant
//! bit of the first byte.
//!
//! Indices must be less than <code>[bit_len]\(buf)</code>; out-of-range
//! indices panic like any other out-of-bounds slice access.

/// The number of addressable bits in `buf`.
pub fn bit_len(buf: &[u8]) -> usize {
    buf.len() * 8
}

fn mask(index: usize) -> u8 {
    0x80 >> (index % 8)
}

/// Returns the bit at `index`.
///
/// # Panics
///
/// Panics if `index` is not less than <code>[bit_len]\(buf)</code>.
pub fn get_bit(buf: &[u8], index: usize) -> bool {
    buf[index / 8] & mask(index) != 0
}

/// Sets the bit at `index` to `value`, leaving every other bit unchanged.
///
/// # Panics
///
/// Panics if `index` is not less than <code>[bit_len]\(buf)</code>.
pub fn set_bit(buf: &mut [u8], index: usize, value: bool) {
    let byte = &mut buf[index / 8];
    if value {
        *byte |= mask(index);
    } else {
        *byte &= !mask(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_zero_is_msb() {
        assert!(get_bit(&[0x80], 0));
        assert!(!get_bit(&[0x80], 1));
        assert!(get_bit(&[0x01], 7));
        assert!(get_bit(&[0x00, 0x80], 8));
        assert!(get_bit(&[0x00, 0x01], 15));
    }

    #[test]
    fn reads_every_bit() {
        let buf = [0b1010_0110, 0b0000_1111];
        let bits: [u8; 16] = [1, 0, 1, 0, 0, 1, 1, 0, 0, 0, 0, 0, 1, 1, 1, 1];
        for (i, &b) in bits.iter().enumerate() {
            assert_eq!(get_bit(&buf, i), b == 1, "bit {}", i);
        }
    }

    #[test]
    fn set_touches_one_bit() {
        let mut buf = [0xff; 3];
        set_bit(&mut buf, 10, false);
        assert_eq!(buf, [0xff, 0b1101_1111, 0xff]);
        set_bit(&mut buf, 10, true);
        assert_eq!(buf, [0xff; 3]);

        let mut buf = [0; 3];
        set_bit(&mut buf, 23, true);
        set_bit(&mut buf, 0, true);
        assert_eq!(buf, [0x80, 0x00, 0x01]);
        set_bit(&mut buf, 0, true);
        assert_eq!(buf, [0x80, 0x00, 0x01]);
    }

    #[test]
    fn copy_bit_by_bit() {
        let src = *b"Sample Text";
        let mut dst = [0; 11];
        for i in 0..bit_len(&src) {
            set_bit(&mut dst, i, get_bit(&src, i));
        }
        assert_eq!(dst, src);
    }

    #[test]
    #[should_panic]
    fn get_out_of_bounds() {
        get_bit(&[0; 2], 16);
    }

    #[test]
    #[should_panic]
    fn set_out_of_bounds() {
        set_bit(&mut [], 0, true);
    }
}
