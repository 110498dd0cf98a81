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

//! Long (UCI-style) and short (SAN-like) algebraic move notation.

use std::convert::TryFrom;

use crate::{
    movegen::{legal_moves, quasi_legal_moves},
    moves::Move,
    piece::Piece,
    position::Position,
    square::Square,
};

#[must_use]
/// `<from><to>[<promotion>]`, e.g. `e2e4`, `e7e8q`. The null move writes as
/// `"0000"` and is also accepted on read as `"null"` or `"0000"`.
pub fn write_long(mv: Move) -> String {
    mv.to_string()
}

#[must_use]
/// Parse a long-algebraic string against `pos`, returning the matching
/// legal move, or `Move::NULL` if the string is malformed or matches no
/// legal move (per the parser sentinel policy of §7).
pub fn parse_long(s: &str, pos: &mut Position) -> Move {
    if s == "null" || s == "0000" {
        return Move::NULL;
    }
    if s.len() < 4 {
        return Move::NULL;
    }
    let from = match Square::try_from(&s[0..2]) {
        Ok(sq) => sq,
        Err(_) => return Move::NULL,
    };
    let to = match Square::try_from(&s[2..4]) {
        Ok(sq) => sq,
        Err(_) => return Move::NULL,
    };
    let promotion = s.chars().nth(4).and_then(Piece::from_code);

    for mv in legal_moves(pos) {
        if mv.from_square() != from || mv.to_square() != to {
            continue;
        }
        match promotion {
            Some(p) if mv.is_promotion() && mv.promotion() == p => return mv,
            None if !mv.is_promotion() => return mv,
            _ => continue,
        }
    }
    Move::NULL
}

#[must_use]
/// SAN-like short algebraic notation: piece letter (omitted for pawns),
/// minimal disambiguator, `x` for captures, destination, `=P` for
/// promotion, and a trailing `+`/`#` for check/checkmate. Castling writes
/// as `O-O` / `O-O-O`.
pub fn write_short(mv: Move, pos: &mut Position) -> String {
    if mv.is_null() {
        return "null".to_string();
    }
    if mv.is_castle() {
        let kingside = mv.to_square().file() > mv.from_square().file();
        let base = if kingside { "O-O" } else { "O-O-O" };
        return format!("{base}{}", check_suffix(mv, pos));
    }

    let mut out = String::new();
    if mv.piece() != Piece::Pawn {
        out.push_str(mv.piece().code());
        out.push_str(&disambiguator(mv, pos));
    } else if mv.is_capture() || is_contextual_en_passant(mv, pos) {
        out.push_str(mv.from_square().file_name());
    }

    if mv.is_capture() || is_contextual_en_passant(mv, pos) {
        out.push('x');
    }
    out.push_str(&mv.to_square().to_string());
    if mv.is_promotion() {
        out.push('=');
        out.push_str(mv.promotion().code());
    }
    out.push_str(&check_suffix(mv, pos));
    out
}

fn is_contextual_en_passant(mv: Move, pos: &Position) -> bool {
    mv.piece() == Piece::Pawn && !mv.is_capture() && mv.from_square().file() != mv.to_square().file() && pos.ep.contains(mv.to_square())
}

fn disambiguator(mv: Move, pos: &mut Position) -> String {
    let siblings: Vec<Move> = quasi_legal_moves(pos)
        .into_iter()
        .filter(|&other| {
            other.piece() == mv.piece() && other.to_square() == mv.to_square() && other.from_square() != mv.from_square()
        })
        .collect();
    if siblings.is_empty() {
        return String::new();
    }
    let same_file = siblings.iter().any(|s| s.from_square().file() == mv.from_square().file());
    let same_rank = siblings.iter().any(|s| s.from_square().rank() == mv.from_square().rank());
    if !same_file {
        mv.from_square().file_name().to_string()
    } else if !same_rank {
        (mv.from_square().rank() + 1).to_string()
    } else {
        mv.from_square().to_string()
    }
}

fn check_suffix(mv: Move, pos: &mut Position) -> String {
    pos.make_move(mv);
    let opponent = pos.side_to_move;
    let in_check = pos.is_in_check(opponent);
    let has_reply = !legal_moves(pos).is_empty();
    pos.unmake_move();
    if in_check && !has_reply {
        "#".to_string()
    } else if in_check {
        "+".to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fen, variant::Variant};

    #[test]
    fn long_algebraic_round_trips_a_quiet_move() {
        let mut pos = fen::from_fen(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            Variant::Classic,
        )
        .unwrap();
        let mv = parse_long("e2e4", &mut pos);
        assert!(!mv.is_null());
        assert_eq!(write_long(mv), "e2e4");
    }

    #[test]
    fn unrecognized_move_text_yields_null() {
        let mut pos = fen::from_fen(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            Variant::Classic,
        )
        .unwrap();
        assert!(parse_long("z9z9", &mut pos).is_null());
    }

    #[test]
    fn short_algebraic_names_a_knight_move() {
        let mut pos = fen::from_fen(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            Variant::Classic,
        )
        .unwrap();
        let mv = parse_long("g1f3", &mut pos);
        assert_eq!(write_short(mv, &mut pos), "Nf3");
    }

    #[test]
    fn short_algebraic_marks_checkmate() {
        // One ply before fool's mate; black's queen still on d8.
        let mut pos = fen::from_fen(
            "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2",
            Variant::Classic,
        )
        .unwrap();
        let mv = parse_long("d8h4", &mut pos);
        assert!(!mv.is_null());
        assert_eq!(write_short(mv, &mut pos), "Qh4#");
    }
}
