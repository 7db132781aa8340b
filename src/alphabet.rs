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

//! The base64 symbol table and its inverse.

/// The 64 symbols, indexed by the 6-bit value they represent.
pub const ALPHABET: [u8; 64] =
    *b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// The padding character appended to encoded data.
pub const PAD: u8 = b'=';

const UNMAPPED: u8 = 0xff;

const fn invert(alphabet: [u8; 64]) -> [u8; 256] {
    let mut table = [UNMAPPED; 256];
    let mut i = 0;
    while i < 64 {
        table[alphabet[i] as usize] = i as u8;
        i += 1;
    }
    table
}

const INVERSE: [u8; 256] = invert(ALPHABET);

/// A 6-bit value: the unit represented by a single symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sextet(u8);

impl Sextet {
    /// Returns `None` if `x` is 64 or greater.
    pub fn new(x: u8) -> Option<Self> {
        (x < 64).then(|| Self(x))
    }

    /// Keeps only the low 6 bits of `x`.
    pub(crate) fn from_low_bits(x: u8) -> Self {
        Self(x & 0x3f)
    }

    /// Maps a symbol back to its value. Returns `None` for the padding
    /// character and for anything else outside [`ALPHABET`].
    pub fn from_symbol(c: u8) -> Option<Self> {
        match INVERSE[usize::from(c)] {
            UNMAPPED => None,
            n => Some(Self(n)),
        }
    }

    /// The symbol that represents this value.
    pub fn symbol(self) -> u8 {
        ALPHABET[usize::from(self.0)]
    }
}

impl From<Sextet> for u8 {
    fn from(s: Sextet) -> u8 {
        s.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_distinct() {
        for (i, c) in ALPHABET.iter().enumerate() {
            assert_ne!(*c, PAD);
            assert!(!ALPHABET[..i].contains(c), "duplicate {:?}", *c as char);
        }
    }

    #[test]
    fn ranges() {
        let expected = (b'A'..=b'Z')
            .chain(b'a'..=b'z')
            .chain(b'0'..=b'9')
            .chain([b'+', b'/'].iter().copied());
        assert!(ALPHABET.iter().copied().eq(expected));
        assert_eq!(Sextet::from_symbol(b'A'), Sextet::new(0));
        assert_eq!(Sextet::from_symbol(b'Z'), Sextet::new(25));
        assert_eq!(Sextet::from_symbol(b'a'), Sextet::new(26));
        assert_eq!(Sextet::from_symbol(b'z'), Sextet::new(51));
        assert_eq!(Sextet::from_symbol(b'0'), Sextet::new(52));
        assert_eq!(Sextet::from_symbol(b'9'), Sextet::new(61));
        assert_eq!(Sextet::from_symbol(b'+'), Sextet::new(62));
        assert_eq!(Sextet::from_symbol(b'/'), Sextet::new(63));
    }

    #[test]
    fn inverse_of_every_byte() {
        for c in 0..=u8::MAX {
            match Sextet::from_symbol(c) {
                Some(s) => assert_eq!(s.symbol(), c),
                None => assert!(!ALPHABET.contains(&c)),
            }
        }
        assert_eq!(Sextet::from_symbol(PAD), None);
        assert_eq!(Sextet::from_symbol(b' '), None);
        assert_eq!(Sextet::from_symbol(b'\n'), None);
        assert_eq!(Sextet::from_symbol(0), None);
    }

    #[test]
    fn new_checks_range() {
        assert_eq!(Sextet::new(63).map(u8::from), Some(63));
        assert_eq!(Sextet::new(64), None);
        assert_eq!(u8::from(Sextet::from_low_bits(0xff)), 63);
    }
}
