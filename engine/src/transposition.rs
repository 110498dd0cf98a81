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

//! The transposition table (§4.I): an open-addressed fixed-size array with
//! no secondary probing and an always-replace insertion policy. Unlike
//! `fiddler_engine::transposition::TTable`, which buckets three entries per
//! cache line behind raw pointers and compares only a truncated 16-bit
//! slice of the key, this table keeps the position's full 64-bit Zobrist
//! key resident in every slot and compares it in full on lookup — the
//! spec keeps the whole key around, so there is no truncation to recover
//! from a false-positive hit on.

use chaos_core::Move;

use crate::score::Eval;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy, Debug)]
pub struct TTEntry {
    pub key: u64,
    pub depth: u8,
    pub score: Eval,
    pub bound: Bound,
    pub best_move: Move,
}

#[derive(Debug)]
pub struct TTable {
    slots: Vec<Option<TTEntry>>,
}

impl TTable {
    #[must_use]
    /// A table with `size` slots, all empty. `size` should be the value
    /// from `SearchConfig::transposition_table_size` (default 10 million,
    /// per §4.I).
    pub fn with_size(size: usize) -> TTable {
        TTable { slots: vec![None; size.max(1)] }
    }

    #[must_use]
    fn index(&self, key: u64) -> usize {
        (key % self.slots.len() as u64) as usize
    }

    #[must_use]
    /// The entry at `key`'s slot, if the slot is occupied and its stored
    /// key matches exactly (no secondary probing: a miss on this one slot
    /// is a miss, full stop).
    pub fn get(&self, key: u64) -> Option<&TTEntry> {
        self.slots[self.index(key)].as_ref().filter(|e| e.key == key)
    }

    /// Write `entry` to its slot unconditionally, replacing whatever was
    /// there (always-replace policy — the spec's answer to TT resource
    /// exhaustion is simply "absorb collisions without error").
    pub fn store(&mut self, entry: TTEntry) {
        let idx = self.index(entry.key);
        self.slots[idx] = Some(entry);
    }

    /// Zero every slot, for `ucinewgame`.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaos_core::Square;

    fn mv() -> Move {
        Move::quiet(Square::E2, Square::E4, chaos_core::Piece::Pawn)
    }

    #[test]
    fn miss_on_empty_table() {
        let table = TTable::with_size(16);
        assert!(table.get(5).is_none());
    }

    #[test]
    fn store_then_get_round_trips() {
        let mut table = TTable::with_size(16);
        let entry = TTEntry { key: 5, depth: 3, score: 42, bound: Bound::Exact, best_move: mv() };
        table.store(entry);
        let got = table.get(5).unwrap();
        assert_eq!(got.score, 42);
        assert_eq!(got.depth, 3);
        assert_eq!(got.best_move, mv());
    }

    #[test]
    fn full_key_mismatch_on_index_collision_is_a_miss() {
        // two keys aliasing the same slot under a 16-slot table
        let mut table = TTable::with_size(16);
        table.store(TTEntry { key: 5, depth: 1, score: 1, bound: Bound::Exact, best_move: Move::NULL });
        // 21 % 16 == 5, same slot, different full key
        assert!(table.get(21).is_none());
    }

    #[test]
    fn always_replace_overwrites_without_depth_preference() {
        let mut table = TTable::with_size(16);
        table.store(TTEntry { key: 5, depth: 10, score: 1, bound: Bound::Exact, best_move: Move::NULL });
        table.store(TTEntry { key: 5, depth: 1, score: 2, bound: Bound::Exact, best_move: Move::NULL });
        assert_eq!(table.get(5).unwrap().depth, 1);
    }

    #[test]
    fn clear_empties_every_slot() {
        let mut table = TTable::with_size(16);
        table.store(TTEntry { key: 5, depth: 1, score: 1, bound: Bound::Exact, best_move: Move::NULL });
        table.clear();
        assert!(table.get(5).is_none());
    }
}
