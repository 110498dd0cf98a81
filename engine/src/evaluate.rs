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

//! Static evaluation (§4.J): material, piece-square tables, bishop pair,
//! mobility, hanging pieces, castling rights, and the King of the Hill
//! ring bonuses, blended by endgame progress and returned from the side
//! to move's perspective.

use chaos_core::{
    movegen::{attacked_squares, quasi_legal_moves_for},
    Color, Piece, Position, Square, Variant,
};

use crate::{material, pst, score::Score};

pub const BISHOP_PAIR: Score = Score::centipawns(30, 30);
pub const MOBILITY_PER_MOVE: Score = Score::centipawns(4, 4);
pub const CASTLE_RIGHT_VALUE: Score = Score::centipawns(20, 20);
pub const HILL_RING_2: Score = Score::centipawns(400, 400);
pub const HILL_RING_3: Score = Score::centipawns(200, 200);

const HILL: [Square; 4] = [Square::D4, Square::E4, Square::D5, Square::E5];

#[must_use]
fn hanging_penalty(piece: Piece) -> Score {
    match piece {
        Piece::Pawn => Score::centipawns(8, 8),
        Piece::Knight | Piece::Bishop => Score::centipawns(40, 40),
        Piece::Rook => Score::centipawns(80, 80),
        Piece::Queen => Score::centipawns(120, 120),
        Piece::King => Score::centipawns(220, 220),
        Piece::Empty => Score::DRAW,
    }
}

#[must_use]
fn hill_distance(sq: Square) -> u8 {
    HILL.iter().map(|&h| sq.chebyshev_to(h)).min().unwrap_or(u8::MAX)
}

#[must_use]
/// Full static evaluation of `pos` from the perspective of its side to
/// move. Does not itself handle checkmate, stalemate, or draw detection;
/// those are the search's responsibility before this is ever called.
pub fn evaluate(pos: &Position) -> i32 {
    let mover = pos.side_to_move;
    let mut score = material::evaluate(pos) + pst::evaluate(pos);

    for &color in &[Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        let own = pos.players[color as usize];

        if (pos.pieces[Piece::Bishop as usize] & own).len() >= 2 {
            score += BISHOP_PAIR * sign;
        }

        let attacked_by_enemy = attacked_squares(pos, !color);
        for &piece in &Piece::NON_EMPTY {
            let hanging = pos.pieces[piece as usize] & own & attacked_by_enemy;
            score -= hanging_penalty(piece) * (hanging.len() as i32 * sign);
        }

        if pos.variant != Variant::KingOfTheHillAndCompulsion {
            let rights = [
                chaos_core::CastleRights::kingside(color),
                chaos_core::CastleRights::queenside(color),
            ];
            let count = rights.iter().filter(|&&r| pos.castling_rights.has(r)).count() as i32;
            score += CASTLE_RIGHT_VALUE * (count * sign);
        }

        if pos.variant.has_king_of_the_hill() {
            if let Some(king_sq) = pos.king_square(color) {
                let dist = hill_distance(king_sq);
                if dist <= 2 {
                    score += HILL_RING_2 * sign;
                } else if dist <= 3 {
                    score += HILL_RING_3 * sign;
                }
            }
        }

        let mobility = quasi_legal_moves_for(pos, color).len() as i32;
        score += MOBILITY_PER_MOVE * (mobility * sign);
    }

    let phase = material::endgame_progress(pos);
    let mut eval = score.blend(phase);
    if mover == Color::Black {
        eval = -eval;
    }
    if pos.variant == Variant::Loser {
        eval = -eval;
    }
    eval
}
