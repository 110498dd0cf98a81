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

//! Forsyth-Edwards Notation parsing and writing.

use std::convert::TryFrom;

use crate::{
    bitboard::Bitboard, castling::CastleRights, color::Color, piece::Piece, position::Position,
    square::Square, variant::Variant, zobrist,
};

#[derive(Debug)]
pub struct FenError(pub String);

impl std::fmt::Display for FenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed FEN: {}", self.0)
    }
}
impl std::error::Error for FenError {}

#[must_use]
/// Parse a standard six-field FEN string into a fresh `Position`.
pub fn from_fen(fen: &str, variant: Variant) -> Result<Position, FenError> {
    let mut fields = fen.split_whitespace();
    let board = fields.next().ok_or_else(|| FenError("missing board field".into()))?;
    let side = fields.next().ok_or_else(|| FenError("missing side field".into()))?;
    let castling = fields.next().unwrap_or("-");
    let ep = fields.next().unwrap_or("-");

    let mut pos = Position::empty(variant);

    let ranks: Vec<&str> = board.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError(format!("expected 8 ranks, found {}", ranks.len())));
    }
    for (rank_from_top, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_from_top as u8;
        let mut file = 0u8;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as u8;
                continue;
            }
            if file >= 8 {
                return Err(FenError(format!("rank {rank_str} overflows 8 files")));
            }
            let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
            let piece = Piece::from_code(c).ok_or_else(|| FenError(format!("bad piece char {c}")))?;
            pos.set_piece(Square::new(file, rank), piece, color);
            file += 1;
        }
    }

    pos.side_to_move = match side {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError(format!("bad side field {other}"))),
    };
    if pos.side_to_move == Color::Black {
        pos.hash ^= zobrist::side_to_move_key();
    }

    let mut rights = CastleRights::NONE;
    if castling != "-" {
        for c in castling.chars() {
            let bit = match c {
                'K' => CastleRights::WHITE_KINGSIDE,
                'Q' => CastleRights::WHITE_QUEENSIDE,
                'k' => CastleRights::BLACK_KINGSIDE,
                'q' => CastleRights::BLACK_QUEENSIDE,
                other => return Err(FenError(format!("bad castling char {other}"))),
            };
            rights.0 |= bit;
            pos.hash ^= zobrist::castling_key(bit.trailing_zeros() as u8);
        }
    }
    pos.castling_rights = rights;

    if ep != "-" {
        let sq = Square::try_from(ep).map_err(|e| FenError(e.to_string()))?;
        pos.ep = Bitboard::from_square(sq);
        pos.hash ^= zobrist::en_passant_file_key(sq.file());
    }

    Ok(pos)
}

#[must_use]
/// Write `pos` as a FEN string. The engine does not track fullmove number
/// or a meaningful standalone halfmove clock for FEN purposes, so those
/// fields are always written as `0` and `1` respectively.
pub fn to_fen(pos: &Position) -> String {
    let mut board = String::new();
    for rank_from_top in 0..8u8 {
        let rank = 7 - rank_from_top;
        let mut empty_run = 0u8;
        for file in 0..8u8 {
            let sq = Square::new(file, rank);
            let piece = pos.piece_at(sq);
            if piece == Piece::Empty {
                empty_run += 1;
                continue;
            }
            if empty_run > 0 {
                board.push_str(&empty_run.to_string());
                empty_run = 0;
            }
            let letter = piece.code();
            match pos.color_at(sq) {
                Some(Color::White) => board.push_str(letter),
                _ => board.push_str(&letter.to_ascii_lowercase()),
            }
        }
        if empty_run > 0 {
            board.push_str(&empty_run.to_string());
        }
        if rank_from_top != 7 {
            board.push('/');
        }
    }

    let side = if pos.side_to_move == Color::White { "w" } else { "b" };
    let castling = pos.castling_rights.to_string();
    let ep = if pos.ep.is_empty() { "-".to_string() } else { pos.ep.lsb().to_string() };

    format!("{board} {side} {castling} {ep} 0 1")
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn start_position_round_trips() {
        let pos = from_fen(START, Variant::Classic).unwrap();
        assert_eq!(to_fen(&pos), START);
    }

    #[test]
    fn start_position_piece_count() {
        let pos = from_fen(START, Variant::Classic).unwrap();
        assert_eq!(pos.occupied.len(), 32);
        assert_eq!(pos.king_square(Color::White), Some(Square::E1));
        assert_eq!(pos.king_square(Color::Black), Some(Square::E8));
    }

    #[test]
    fn ep_square_is_parsed_and_written() {
        let fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 1";
        let pos = from_fen(fen, Variant::Classic).unwrap();
        assert_eq!(pos.ep.lsb(), Square::D6);
        assert!(to_fen(&pos).contains("d6"));
    }

    #[test]
    fn rejects_malformed_board() {
        assert!(from_fen("not-a-fen", Variant::Classic).is_err());
    }
}
