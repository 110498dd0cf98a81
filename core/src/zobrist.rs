/*
  This program is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  This program is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! Zobrist hashing: an incremental, reproducible hash of position state.
//!
//! Keys are drawn from a fixed 1024-slot table seeded deterministically
//! (seed 26) from a Mersenne-twister generator, so that two builds of this
//! crate always agree on the hash of the same position. `Piece::Empty`
//! never contributes a key (the table leaves those slots zero), so hashing
//! an empty square is a no-op rather than a branch.

use once_cell::sync::Lazy;

use crate::{color::Color, piece::Piece, square::Square};

const SEED: u64 = 26;
const NUM_KEYS: usize = 1024;

/// A 64-bit MT19937-64 Mersenne twister, used only to seed the static key
/// table below at startup.
struct Mt19937_64 {
    state: [u64; 312],
    index: usize,
}

impl Mt19937_64 {
    fn new(seed: u64) -> Self {
        let mut state = [0u64; 312];
        state[0] = seed;
        for i in 1..312 {
            state[i] = 6364136223846793005u64
                .wrapping_mul(state[i - 1] ^ (state[i - 1] >> 62))
                .wrapping_add(i as u64);
        }
        Mt19937_64 { state, index: 312 }
    }

    fn generate(&mut self) {
        const LOWER_MASK: u64 = (1u64 << 31) - 1;
        const UPPER_MASK: u64 = !LOWER_MASK;
        for i in 0..312 {
            let x = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % 312] & LOWER_MASK);
            let mut x_a = x >> 1;
            if x & 1 != 0 {
                x_a ^= 0xB502_6F5A_A966_19E9;
            }
            self.state[i] = self.state[(i + 156) % 312] ^ x_a;
        }
        self.index = 0;
    }

    fn next_u64(&mut self) -> u64 {
        if self.index >= 312 {
            self.generate();
        }
        let mut y = self.state[self.index];
        y ^= (y >> 29) & 0x5555_5555_5555_5555;
        y ^= (y << 17) & 0x71D6_7FFF_EDA6_0000;
        y ^= (y << 37) & 0xFFF7_EEE0_0000_0000;
        y ^= y >> 43;
        self.index += 1;
        y
    }
}

/// A flat bank of 1024 independently drawn keys, sliced up among the
/// position features that need one.
struct KeyBank([u64; NUM_KEYS]);

static KEYS: Lazy<KeyBank> = Lazy::new(|| {
    let mut gen = Mt19937_64::new(SEED);
    let mut keys = [0u64; NUM_KEYS];
    for slot in &mut keys {
        *slot = gen.next_u64();
    }
    KeyBank(keys)
});

// Layout within the 1024-slot bank: 768 piece-placement keys
// (64 squares * 2 colors * 6 non-empty piece kinds), 1 side-to-move key,
// 4 castling-right keys, 8 en-passant-file keys. The remainder is unused
// padding reserved for future position features.
const PIECE_SQUARE_BASE: usize = 0;
const SIDE_TO_MOVE_INDEX: usize = 768;
const CASTLING_BASE: usize = 769;
const EP_FILE_BASE: usize = 773;

#[must_use]
/// The key contribution of `piece` of `color` standing on `sq`. Zero for
/// `Piece::Empty`, per the invariant that hashing an empty square is a
/// no-op.
pub fn piece_square_key(piece: Piece, color: Color, sq: Square) -> u64 {
    if piece == Piece::Empty {
        return 0;
    }
    let piece_index = piece as usize - 1; // Empty has no slot
    let index = PIECE_SQUARE_BASE + (sq as usize * Color::NUM + color as usize) * 6 + piece_index;
    KEYS.0[index]
}

#[must_use]
/// The key toggled whenever the side to move changes.
pub fn side_to_move_key() -> u64 {
    KEYS.0[SIDE_TO_MOVE_INDEX]
}

#[must_use]
/// The key for a single castling-right bit (0..=3, matching
/// `CastleRights`'s bit layout).
pub fn castling_key(right_bit: u8) -> u64 {
    KEYS.0[CASTLING_BASE + right_bit as usize]
}

#[must_use]
/// The key for an en passant capture being available on file `file`
/// (0-indexed, `A` = 0).
pub fn en_passant_file_key(file: u8) -> u64 {
    KEYS.0[EP_FILE_BASE + file as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_piece_key_is_zero() {
        for &sq in &Square::ALL {
            for &color in &Color::ALL {
                assert_eq!(piece_square_key(Piece::Empty, color, sq), 0);
            }
        }
    }

    #[test]
    fn distinct_piece_square_pairs_give_distinct_keys() {
        let a = piece_square_key(Piece::Pawn, Color::White, Square::E2);
        let b = piece_square_key(Piece::Pawn, Color::White, Square::E4);
        let c = piece_square_key(Piece::Knight, Color::White, Square::E2);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn reproducible_across_calls() {
        let first = piece_square_key(Piece::King, Color::Black, Square::G8);
        let second = piece_square_key(Piece::King, Color::Black, Square::G8);
        assert_eq!(first, second);
    }

    #[test]
    fn castling_keys_are_distinct() {
        let keys: Vec<u64> = (0..4).map(castling_key).collect();
        for i in 0..4 {
            for j in (i + 1)..4 {
                assert_ne!(keys[i], keys[j]);
            }
        }
    }

    #[test]
    fn ep_file_keys_are_distinct() {
        let keys: Vec<u64> = (0..8).map(en_passant_file_key).collect();
        for i in 0..8 {
            for j in (i + 1)..8 {
                assert_ne!(keys[i], keys[j]);
            }
        }
    }
}
