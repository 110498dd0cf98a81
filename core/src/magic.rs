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

//! Magic-multiplication attack tables for sliding pieces (bishops and
//! rooks). Magic numbers and shift widths are found at startup rather than
//! hard-coded, so the table is a derived, self-checking artifact rather
//! than a block of opaque constants.

use once_cell::sync::Lazy;

use crate::{
    bitboard::Bitboard,
    direction::Direction,
    square::Square,
};

/// A single square's magic-multiplication entry: the relevant occupancy
/// mask, the magic multiplier, the down-shift, and a slice into the shared
/// attack table.
struct MagicEntry {
    mask: Bitboard,
    magic: u64,
    shift: u32,
    offset: usize,
}

struct SlidingTable {
    entries: [MagicEntry; 64],
    attacks: Vec<Bitboard>,
}

impl SlidingTable {
    #[inline(always)]
    fn attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        let entry = &self.entries[sq as usize];
        let relevant = occupancy & entry.mask;
        let index = (relevant.0.wrapping_mul(entry.magic)) >> entry.shift;
        self.attacks[entry.offset + index as usize]
    }
}

/// Build the relevant-occupancy mask for `sq` along `dirs`, excluding the
/// board edge in each direction (edge squares can never block further
/// sliding, so they're irrelevant to the index).
fn relevant_mask(sq: Square, dirs: &[Direction; 4]) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
    for &dir in dirs {
        let mut cur = Bitboard::from_square(sq);
        loop {
            let next = cur.shift(dir);
            if next.is_empty() {
                break;
            }
            let next_sq = next.lsb();
            let next_next = next.shift(dir);
            if next_next.is_empty() {
                break;
            }
            mask |= next;
            cur = Bitboard::from_square(next_sq);
        }
    }
    mask
}

/// The true attack set for `sq` given `dirs` and a full board `occupancy`,
/// computed by walking rays (used only to populate the table, never at
/// search time).
fn ray_attacks(sq: Square, dirs: &[Direction; 4], occupancy: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for &dir in dirs {
        let mut cur = Bitboard::from_square(sq);
        loop {
            let next = cur.shift(dir);
            if next.is_empty() {
                break;
            }
            attacks |= next;
            if !(next & occupancy).is_empty() {
                break;
            }
            cur = next;
        }
    }
    attacks
}

/// Enumerate every subset of `mask`, via the standard carry-rippler trick.
fn subsets(mask: Bitboard) -> Vec<Bitboard> {
    let mut subsets = Vec::with_capacity(1 << mask.len());
    let mut subset = 0u64;
    loop {
        subsets.push(Bitboard(subset));
        subset = subset.wrapping_sub(mask.0) & mask.0;
        if subset == 0 {
            break;
        }
    }
    subsets
}

/// Search for a magic multiplier that maps every occupancy subset of `mask`
/// to a unique index in `1 << (64 - shift)` slots without collision among
/// differing attack sets (constructive perfect-hash search, seeded from a
/// fixed deterministic generator so builds are reproducible).
fn find_magic(
    sq: Square,
    dirs: &[Direction; 4],
    mask: Bitboard,
    rng: &mut fastrand::Rng,
) -> (u64, u32, Vec<Bitboard>) {
    let shift = 64 - mask.len();
    let occupancies = subsets(mask);
    let reference: Vec<Bitboard> = occupancies.iter().map(|&o| ray_attacks(sq, dirs, o)).collect();
    let table_size = 1usize << mask.len();

    loop {
        let magic = rng.u64(..) & rng.u64(..) & rng.u64(..);
        if (mask.0.wrapping_mul(magic) & 0xFF00_0000_0000_0000).count_ones() < 6 {
            continue;
        }
        let mut table = vec![Bitboard::EMPTY; table_size];
        let mut seen = vec![false; table_size];
        let mut ok = true;
        for (occ, &attack) in occupancies.iter().zip(reference.iter()) {
            let index = (occ.0.wrapping_mul(magic) >> shift) as usize;
            if seen[index] && table[index] != attack {
                ok = false;
                break;
            }
            seen[index] = true;
            table[index] = attack;
        }
        if ok {
            return (magic, shift, table);
        }
    }
}

fn build_table(dirs: &'static [Direction; 4], seed: u64) -> SlidingTable {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut attacks = Vec::new();
    let entries: [MagicEntry; 64] = std::array::from_fn(|i| {
        let sq = Square::ALL[i];
        let mask = relevant_mask(sq, dirs);
        let (magic, shift, table) = find_magic(sq, dirs, mask, &mut rng);
        let offset = attacks.len();
        attacks.extend(table);
        MagicEntry { mask, magic, shift, offset }
    });
    SlidingTable { entries, attacks }
}

static ROOK_TABLE: Lazy<SlidingTable> = Lazy::new(|| build_table(&Direction::ROOK_DIRS, 0x1009_u64));
static BISHOP_TABLE: Lazy<SlidingTable> =
    Lazy::new(|| build_table(&Direction::BISHOP_DIRS, 0xB158_u64));

#[must_use]
/// The set of squares attacked by a rook on `sq`, given `occupancy`.
pub fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    ROOK_TABLE.attacks(sq, occupancy)
}

#[must_use]
/// The set of squares attacked by a bishop on `sq`, given `occupancy`.
pub fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    BISHOP_TABLE.attacks(sq, occupancy)
}

#[must_use]
/// The set of squares attacked by a queen on `sq`, given `occupancy`.
pub fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    rook_attacks(sq, occupancy) | bishop_attacks(sq, occupancy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_on_empty_board_sweeps_rank_and_file() {
        let attacks = rook_attacks(Square::D4, Bitboard::EMPTY);
        assert_eq!(attacks.len(), 14);
    }

    #[test]
    fn rook_attacks_stop_at_blocker() {
        let occ = Bitboard::from_square(Square::D6);
        let attacks = rook_attacks(Square::D4, occ);
        assert!(attacks.contains(Square::D6));
        assert!(!attacks.contains(Square::D7));
    }

    #[test]
    fn bishop_on_corner_has_seven_targets() {
        let attacks = bishop_attacks(Square::A1, Bitboard::EMPTY);
        assert_eq!(attacks.len(), 7);
    }

    #[test]
    fn queen_combines_rook_and_bishop() {
        let q = queen_attacks(Square::D4, Bitboard::EMPTY);
        let combined = rook_attacks(Square::D4, Bitboard::EMPTY) | bishop_attacks(Square::D4, Bitboard::EMPTY);
        assert_eq!(q, combined);
    }
}
