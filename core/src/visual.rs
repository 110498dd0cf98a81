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

//! Visual board notation: an 8-line board plus a trailer line, used by the
//! opening book and the `d` UCI extension. Unlike FEN, the en passant
//! token may be a `*` wildcard, which the opening book uses to match a
//! position regardless of whether en passant happens to be available.

use std::convert::TryFrom;

use crate::{
    bitboard::Bitboard, castling::CastleRights, color::Color, piece::Piece, position::Position,
    square::Square, variant::Variant, zobrist,
};

#[derive(Debug)]
pub struct VisualError(pub String);

impl std::fmt::Display for VisualError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed visual notation: {}", self.0)
    }
}
impl std::error::Error for VisualError {}

fn piece_char(piece: Piece, color: Color) -> char {
    let c = piece.code().chars().next().unwrap_or('?');
    if color == Color::White {
        c
    } else {
        c.to_ascii_lowercase()
    }
}

#[must_use]
/// Parse an 8-line board plus trailer into a `Position`. Rejects a `*` ep
/// token — wildcards are meaningful only as an opening-book matching
/// pattern, never as a concrete position.
pub fn from_visual(text: &str, variant: Variant) -> Result<Position, VisualError> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() != 9 {
        return Err(VisualError(format!("expected 9 non-blank lines, found {}", lines.len())));
    }

    let mut pos = Position::empty(variant);
    for (rank_from_top, line) in lines[0..8].iter().enumerate() {
        let rank = 7 - rank_from_top as u8;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 8 {
            return Err(VisualError(format!("rank line must have 8 tokens, found {}", tokens.len())));
        }
        for (file, token) in tokens.iter().enumerate() {
            if *token == "." {
                continue;
            }
            let c = token.chars().next().ok_or_else(|| VisualError("empty square token".into()))?;
            let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
            let piece = Piece::from_code(c).ok_or_else(|| VisualError(format!("bad piece token {token}")))?;
            pos.set_piece(Square::new(file as u8, rank), piece, color);
        }
    }

    let trailer: Vec<&str> = lines[8].split_whitespace().collect();
    if trailer.len() != 3 {
        return Err(VisualError(format!("trailer must have 3 tokens, found {}", trailer.len())));
    }
    pos.side_to_move = match trailer[0] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(VisualError(format!("bad side token {other}"))),
    };
    if pos.side_to_move == Color::Black {
        pos.hash ^= zobrist::side_to_move_key();
    }

    let mut rights = CastleRights::NONE;
    if trailer[1] != "-" {
        for c in trailer[1].chars() {
            let bit = match c {
                'K' => CastleRights::WHITE_KINGSIDE,
                'Q' => CastleRights::WHITE_QUEENSIDE,
                'k' => CastleRights::BLACK_KINGSIDE,
                'q' => CastleRights::BLACK_QUEENSIDE,
                other => return Err(VisualError(format!("bad castling token char {other}"))),
            };
            rights.0 |= bit;
            pos.hash ^= zobrist::castling_key(bit.trailing_zeros() as u8);
        }
    }
    pos.castling_rights = rights;

    match trailer[2] {
        "-" => {}
        "*" => return Err(VisualError("wildcard ep token is only valid in a book pattern".into())),
        sq_str => {
            let sq = Square::try_from(sq_str).map_err(|e| VisualError(e.to_string()))?;
            pos.ep = Bitboard::from_square(sq);
            pos.hash ^= zobrist::en_passant_file_key(sq.file());
        }
    }

    Ok(pos)
}

#[must_use]
/// Write `pos` in visual notation.
pub fn to_visual(pos: &Position) -> String {
    let mut out = String::new();
    for rank_from_top in 0..8u8 {
        let rank = 7 - rank_from_top;
        let mut tokens = Vec::with_capacity(8);
        for file in 0..8u8 {
            let sq = Square::new(file, rank);
            let piece = pos.piece_at(sq);
            if piece == Piece::Empty {
                tokens.push(".".to_string());
            } else {
                let color = pos.color_at(sq).unwrap_or(Color::White);
                tokens.push(piece_char(piece, color).to_string());
            }
        }
        out.push_str(&tokens.join(" "));
        out.push('\n');
    }
    let side = if pos.side_to_move == Color::White { "w" } else { "b" };
    let castling = pos.castling_rights.to_string();
    let ep = if pos.ep.is_empty() { "-".to_string() } else { pos.ep.lsb().to_string() };
    out.push_str(&format!("{side} {castling} {ep}"));
    out
}

/// Tokenize a visual board (ignoring the trailer) for opening-book
/// matching, where `*` on either side of a comparison is a wildcard.
#[must_use]
pub fn tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

#[must_use]
/// Whether two token streams match under `*`-wildcard rules (order
/// matters, lengths must match, each position matches if either token is
/// `*` or the tokens are equal).
pub fn tokens_match(a: &[String], b: &[String]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == "*" || y == "*" || x == y)
}
