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

//! Perft: count the number of leaf nodes reachable from a position at a
//! fixed remaining depth, used to validate the move generator against a
//! trusted oracle.

use std::collections::HashMap;

use crate::{algebraic, movegen::legal_moves, position::Position};

#[must_use]
/// Count leaf nodes reachable in exactly `depth` plies.
pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(pos);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in moves {
        pos.make_move(mv);
        nodes += perft(pos, depth - 1);
        pos.unmake_move();
    }
    nodes
}

#[must_use]
/// Per-root-move subtree counts at `depth - 1`, keyed by long algebraic
/// notation, for comparing move-for-move against an oracle.
pub fn divide(pos: &mut Position, depth: u32) -> HashMap<String, u64> {
    let mut result = HashMap::new();
    if depth == 0 {
        return result;
    }
    for mv in legal_moves(pos) {
        pos.make_move(mv);
        let count = perft(pos, depth - 1);
        pos.unmake_move();
        result.insert(algebraic::write_long(mv), count);
    }
    result
}
