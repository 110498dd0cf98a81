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

//! The mutable board state: bitboards, piece list, side to move, castling
//! rights, en passant target, incremental Zobrist hash, and the history
//! stacks that let `unmake_move` exactly reverse `make_move`.

use crate::{
    bitboard::{Bitboard, KING_ATTACKS},
    castling::CastleRights,
    color::Color,
    moves::Move,
    piece::Piece,
    square::Square,
    variant::{self, Variant},
    zobrist,
};

#[derive(Clone, Debug)]
/// A chess position under a fixed rule variant.
pub struct Position {
    /// Bitboard per piece kind; index 0 (`Piece::Empty`) is always empty
    /// and unused, kept only so `pieces[piece as usize]` needs no offset.
    pub pieces: [Bitboard; Piece::NUM],
    pub players: [Bitboard; Color::NUM],
    pub occupied: Bitboard,
    pub list: [Piece; Square::NUM],
    pub side_to_move: Color,
    pub castling_rights: CastleRights,
    pub ep: Bitboard,
    pub hash: u64,
    pub halfmove_clock: u32,
    pub variant: Variant,

    move_history: Vec<Move>,
    ep_history: Vec<Bitboard>,
    castling_history: Vec<CastleRights>,
    hash_history: Vec<u64>,
    halfmove_history: Vec<u32>,

    /// Snapshots taken only on destructive moves (§4.F step 1); empty for
    /// variants without destructive moves.
    pieces_snapshots: Vec<[Bitboard; Piece::NUM]>,
    players_snapshots: Vec<[Bitboard; Color::NUM]>,
    list_snapshots: Vec<[Piece; Square::NUM]>,
    /// Parallel to `move_history`: whether the corresponding move took a
    /// destructive snapshot, so `unmake_move` knows whether to pop one.
    destructive_history: Vec<bool>,
}

impl Position {
    #[must_use]
    /// An empty board (no pieces, white to move, no castling rights) under
    /// `variant`. Callers populate it via a FEN or visual-notation loader.
    pub fn empty(variant: Variant) -> Position {
        Position {
            pieces: [Bitboard::EMPTY; Piece::NUM],
            players: [Bitboard::EMPTY; Color::NUM],
            occupied: Bitboard::EMPTY,
            list: [Piece::Empty; Square::NUM],
            side_to_move: Color::White,
            castling_rights: CastleRights::NONE,
            ep: Bitboard::EMPTY,
            hash: 0,
            halfmove_clock: 0,
            variant,
            move_history: Vec::new(),
            ep_history: Vec::new(),
            castling_history: Vec::new(),
            hash_history: Vec::new(),
            halfmove_history: Vec::new(),
            pieces_snapshots: Vec::new(),
            players_snapshots: Vec::new(),
            list_snapshots: Vec::new(),
            destructive_history: Vec::new(),
        }
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Piece {
        self.list[sq as usize]
    }

    #[must_use]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        if self.players[Color::White as usize].contains(sq) {
            Some(Color::White)
        } else if self.players[Color::Black as usize].contains(sq) {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Place `piece` of `color` on `sq`, updating bitboards, the piece
    /// list, and the hash. Used only by position construction (FEN/visual
    /// loaders), never mid-search.
    pub fn set_piece(&mut self, sq: Square, piece: Piece, color: Color) {
        debug_assert_eq!(self.list[sq as usize], Piece::Empty);
        self.pieces[piece as usize] |= Bitboard::from_square(sq);
        self.players[color as usize] |= Bitboard::from_square(sq);
        self.occupied |= Bitboard::from_square(sq);
        self.list[sq as usize] = piece;
        self.hash ^= zobrist::piece_square_key(piece, color, sq);
    }

    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        (self.pieces[Piece::King as usize] & self.players[color as usize])
            .into_iter()
            .next()
    }

    #[must_use]
    /// Whether `sq` is attacked by any piece of `by_color`, per the same
    /// geometry `attacked_squares` uses.
    pub fn is_square_attacked(&self, sq: Square, by_color: Color) -> bool {
        crate::movegen::is_square_attacked(self, sq, by_color)
    }

    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        if self.variant.has_check_disabled() {
            return false;
        }
        match self.king_square(color) {
            Some(king_sq) => self.is_square_attacked(king_sq, !color),
            None => false,
        }
    }

    #[must_use]
    /// Whether `color` has reached an alternative winning condition:
    /// king-of-the-hill, the opponent's king simply being gone under
    /// `win_by_king_capture`, or (`Loser`) the opponent having no pieces
    /// left at all.
    pub fn has_alternative_win(&self, color: Color) -> bool {
        if self.variant.has_win_by_king_capture() && self.king_square(!color).is_none() {
            return true;
        }
        if self.variant.has_king_of_the_hill() {
            const HILL: [Square; 4] = [Square::D4, Square::E4, Square::D5, Square::E5];
            if let Some(king_sq) = self.king_square(color) {
                if HILL.contains(&king_sq) {
                    return true;
                }
            }
        }
        if self.variant == Variant::Loser && self.players[color as usize].is_empty() {
            return true;
        }
        false
    }

    #[must_use]
    /// How many times the current position's hash has occurred earlier in
    /// the game, within the reversible window since the last pawn move or
    /// capture. `0` means this is the first occurrence; `2` means this is
    /// the third occurrence (three-fold repetition).
    pub fn repetition_count(&self) -> u32 {
        let len = self.hash_history.len();
        let window = (self.halfmove_clock as usize).min(len);
        self.hash_history[len - window..].iter().filter(|&&h| h == self.hash).count() as u32
    }

    #[must_use]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Apply `mv`, updating all state and the hash incrementally, per the
    /// ordered procedure in §4.F.
    pub fn make_move(&mut self, mv: Move) {
        let side = self.side_to_move;
        let from = mv.from_square();
        let to = mv.to_square();
        let piece = mv.piece();
        let promotion = mv.promotion();

        // 1. history + destructive snapshot
        self.move_history.push(mv);
        self.ep_history.push(self.ep);
        self.castling_history.push(self.castling_rights);
        self.hash_history.push(self.hash);
        self.halfmove_history.push(self.halfmove_clock);
        let destructive = variant::is_destructive(mv, self.variant);
        self.destructive_history.push(destructive);
        if destructive {
            self.pieces_snapshots.push(self.pieces);
            self.players_snapshots.push(self.players);
            self.list_snapshots.push(self.list);
        }

        // 2. captured piece color
        let captured_piece = mv.captured_piece();
        let captured_color = if self.variant.has_friendly_fire_enabled() {
            mv.captured_color()
        } else {
            !side
        };

        // 3. clear `from`
        let from_bb = Bitboard::from_square(from);
        self.pieces[piece as usize] &= !from_bb;
        self.players[side as usize] &= !from_bb;
        self.hash ^= zobrist::piece_square_key(piece, side, from);

        // 4. clear `to` (captured piece)
        if captured_piece != Piece::Empty {
            let to_bb = Bitboard::from_square(to);
            self.pieces[captured_piece as usize] &= !to_bb;
            self.players[captured_color as usize] &= !to_bb;
            self.hash ^= zobrist::piece_square_key(captured_piece, captured_color, to);
        }

        // 5. set `to` (promoted/moved piece)
        let to_bb = Bitboard::from_square(to);
        self.pieces[promotion as usize] |= to_bb;
        self.players[side as usize] |= to_bb;
        self.hash ^= zobrist::piece_square_key(promotion, side, to);

        // 6. piece list
        self.list[from as usize] = Piece::Empty;
        self.list[to as usize] = promotion;

        // 7. exploding knights splash
        if self.variant.has_destructive_moves() && piece == Piece::Knight && captured_piece != Piece::Empty
        {
            let blast = (KING_ATTACKS[to as usize] | Bitboard::from_square(to)) & self.occupied_after_main_move();
            for sq in blast {
                if let Some(color) = self.color_at(sq) {
                    let victim = self.list[sq as usize];
                    if victim != Piece::Empty {
                        let bb = Bitboard::from_square(sq);
                        self.pieces[victim as usize] &= !bb;
                        self.players[color as usize] &= !bb;
                        self.list[sq as usize] = Piece::Empty;
                        self.hash ^= zobrist::piece_square_key(victim, color, sq);
                    }
                }
            }
        }

        // 8. en passant capture
        if piece == Piece::Pawn && !self.ep.is_empty() && self.ep.lsb() == to && captured_piece == Piece::Empty
        {
            let captured_sq = if side == Color::White { to - 8 } else { to + 8 };
            let victim = self.list[captured_sq as usize];
            if victim != Piece::Empty {
                let bb = Bitboard::from_square(captured_sq);
                let victim_color = !side;
                self.pieces[victim as usize] &= !bb;
                self.players[victim_color as usize] &= !bb;
                self.list[captured_sq as usize] = Piece::Empty;
                self.hash ^= zobrist::piece_square_key(victim, victim_color, captured_sq);
            }
        }

        // 9. update ep
        if !self.ep.is_empty() {
            self.hash ^= zobrist::en_passant_file_key(self.ep.lsb().file());
        }
        if mv.has_ep_square() {
            let new_ep = mv.ep_square();
            self.ep = Bitboard::from_square(new_ep);
            self.hash ^= zobrist::en_passant_file_key(new_ep.file());
        } else {
            self.ep = Bitboard::EMPTY;
        }

        // 10. castling execution
        if piece == Piece::King && (from.file() as i8 - to.file() as i8).abs() == 2 {
            let rank = from.rank();
            let (rook_from, rook_to) = if to.file() > from.file() {
                (Square::new(7, rank), Square::new(5, rank))
            } else {
                (Square::new(0, rank), Square::new(3, rank))
            };
            let rook_from_bb = Bitboard::from_square(rook_from);
            let rook_to_bb = Bitboard::from_square(rook_to);
            self.pieces[Piece::Rook as usize] &= !rook_from_bb;
            self.pieces[Piece::Rook as usize] |= rook_to_bb;
            self.players[side as usize] &= !rook_from_bb;
            self.players[side as usize] |= rook_to_bb;
            self.list[rook_from as usize] = Piece::Empty;
            self.list[rook_to as usize] = Piece::Rook;
            self.hash ^= zobrist::piece_square_key(Piece::Rook, side, rook_from);
            self.hash ^= zobrist::piece_square_key(Piece::Rook, side, rook_to);
        }
        if piece == Piece::King {
            for bit in [CastleRights::kingside(side), CastleRights::queenside(side)] {
                if self.castling_rights.has(bit) {
                    self.hash ^= zobrist::castling_key(bit.trailing_zeros() as u8);
                    self.castling_rights.revoke(bit);
                }
            }
        }

        // 11. castling-rights attrition from rook moves/captures or corner changes
        for (sq, bit) in [
            (Square::H1, CastleRights::WHITE_KINGSIDE),
            (Square::A1, CastleRights::WHITE_QUEENSIDE),
            (Square::H8, CastleRights::BLACK_KINGSIDE),
            (Square::A8, CastleRights::BLACK_QUEENSIDE),
        ] {
            if (from == sq || to == sq) && self.castling_rights.has(bit) {
                self.hash ^= zobrist::castling_key(bit.trailing_zeros() as u8);
                self.castling_rights.revoke(bit);
            }
        }

        // 12. recompute occupied
        self.occupied = self.players[Color::White as usize] | self.players[Color::Black as usize];

        // 13. flip side to move
        self.side_to_move = !side;
        self.hash ^= zobrist::side_to_move_key();

        // 14. half-move clock
        if piece == Piece::Pawn || captured_piece != Piece::Empty {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
    }

    /// Occupancy as it stood immediately after steps 3-6 (before the
    /// exploding-knights splash removes anything further), used only to
    /// bound the blast radius to squares that were actually occupied.
    fn occupied_after_main_move(&self) -> Bitboard {
        self.players[Color::White as usize] | self.players[Color::Black as usize]
    }

    /// Reverse the most recent `make_move`. Panics if called with no prior
    /// move (callers never undo past the start of a game).
    pub fn unmake_move(&mut self) {
        let destructive = self.destructive_history.pop().expect("unmake with empty history");
        let mv = self.move_history.pop().expect("unmake with empty history");
        self.ep = self.ep_history.pop().expect("unmake with empty history");
        self.castling_rights = self.castling_history.pop().expect("unmake with empty history");
        self.hash = self.hash_history.pop().expect("unmake with empty history");
        self.halfmove_clock = self.halfmove_history.pop().expect("unmake with empty history");

        if destructive {
            self.pieces = self.pieces_snapshots.pop().expect("destructive snapshot missing");
            self.players = self.players_snapshots.pop().expect("destructive snapshot missing");
            self.list = self.list_snapshots.pop().expect("destructive snapshot missing");
            self.occupied = self.players[Color::White as usize] | self.players[Color::Black as usize];
            return;
        }

        // side_to_move currently holds the post-move value; the mover was
        // the other side.
        let side = !self.side_to_move;
        self.side_to_move = side;

        let from = mv.from_square();
        let to = mv.to_square();
        let piece = mv.piece();
        let promotion = mv.promotion();
        let captured_piece = mv.captured_piece();
        let captured_color = if self.variant.has_friendly_fire_enabled() {
            mv.captured_color()
        } else {
            !side
        };

        // undo castling rook move
        if piece == Piece::King && (from.file() as i8 - to.file() as i8).abs() == 2 {
            let rank = from.rank();
            let (rook_from, rook_to) = if to.file() > from.file() {
                (Square::new(7, rank), Square::new(5, rank))
            } else {
                (Square::new(0, rank), Square::new(3, rank))
            };
            let rook_from_bb = Bitboard::from_square(rook_from);
            let rook_to_bb = Bitboard::from_square(rook_to);
            self.pieces[Piece::Rook as usize] &= !rook_to_bb;
            self.pieces[Piece::Rook as usize] |= rook_from_bb;
            self.players[side as usize] &= !rook_to_bb;
            self.players[side as usize] |= rook_from_bb;
            self.list[rook_to as usize] = Piece::Empty;
            self.list[rook_from as usize] = Piece::Rook;
        }

        // remove the moved/promoted piece from `to`, restore mover on `from`
        let to_bb = Bitboard::from_square(to);
        let from_bb = Bitboard::from_square(from);
        self.pieces[promotion as usize] &= !to_bb;
        self.players[side as usize] &= !to_bb;
        self.pieces[piece as usize] |= from_bb;
        self.players[side as usize] |= from_bb;
        self.list[from as usize] = piece;
        self.list[to as usize] = Piece::Empty;

        // restore a normally-captured piece on `to`
        if captured_piece != Piece::Empty {
            self.pieces[captured_piece as usize] |= to_bb;
            self.players[captured_color as usize] |= to_bb;
            self.list[to as usize] = captured_piece;
        }

        // restore an en-passant-captured pawn
        if piece == Piece::Pawn && captured_piece == Piece::Empty && !self.ep.is_empty() && self.ep.lsb() == to
        {
            let captured_sq = if side == Color::White { to - 8 } else { to + 8 };
            let bb = Bitboard::from_square(captured_sq);
            self.pieces[Piece::Pawn as usize] |= bb;
            self.players[(!side) as usize] |= bb;
            self.list[captured_sq as usize] = Piece::Pawn;
        }

        self.occupied = self.players[Color::White as usize] | self.players[Color::Black as usize];
    }

    #[must_use]
    /// Check invariants I1-I9 against the current state, reporting every
    /// inconsistent square or field rather than aborting (§7: generator
    /// and make/unmake invariant violations are programmer errors,
    /// reported but not fatal).
    pub fn sanity_check(&self) -> Vec<String> {
        let mut problems = Vec::new();

        // I1
        if !(self.players[Color::White as usize] & self.players[Color::Black as usize]).is_empty() {
            problems.push("players[WHITE] and players[BLACK] overlap".to_string());
        }

        // I2
        let derived_occupied = self.players[Color::White as usize] | self.players[Color::Black as usize];
        if derived_occupied != self.occupied {
            problems.push("occupied does not equal players[WHITE] | players[BLACK]".to_string());
        }

        // I3 + I4
        for &sq in &Square::ALL {
            let listed = self.list[sq as usize];
            let is_occupied = self.occupied.contains(sq);
            if (listed != Piece::Empty) != is_occupied {
                problems.push(format!("{sq}: list/occupied disagreement"));
            }
            if listed != Piece::Empty && !self.pieces[listed as usize].contains(sq) {
                problems.push(format!("{sq}: list says {listed:?} but pieces[{listed:?}] disagrees"));
            }
            if is_occupied {
                let owners = Color::ALL.iter().filter(|&&c| self.players[c as usize].contains(sq)).count();
                if owners != 1 {
                    problems.push(format!("{sq}: expected exactly one color owner, found {owners}"));
                }
            }
        }
        for &p in &Piece::NON_EMPTY {
            for &q in &Piece::NON_EMPTY {
                if p != q && !(self.pieces[p as usize] & self.pieces[q as usize]).is_empty() {
                    problems.push(format!("{p:?} and {q:?} bitboards overlap"));
                }
            }
        }

        // I5
        if self.ep.len() > 1 {
            problems.push("more than one ep bit set".to_string());
        }
        if !self.ep.is_empty() {
            let rank = self.ep.lsb().rank();
            let expected = if self.side_to_move == Color::Black { 2 } else { 5 };
            if rank != expected {
                problems.push(format!("ep square on rank {} but expected rank {}", rank + 1, expected + 1));
            }
        }

        // I7
        let lengths = [
            self.move_history.len(),
            self.ep_history.len(),
            self.castling_history.len(),
            self.hash_history.len(),
            self.halfmove_history.len(),
        ];
        if lengths.iter().any(|&l| l != lengths[0]) {
            problems.push("history stacks have mismatched lengths".to_string());
        }

        // I8
        if self.halfmove_clock as usize > self.move_history.len() {
            problems.push("halfmove_clock exceeds move history length".to_string());
        }

        // I9
        for (color, rank) in [(Color::White, 0u8), (Color::Black, 7u8)] {
            if self.castling_rights.has(CastleRights::kingside(color)) {
                let king_home = self.king_square(color) == Some(Square::new(4, rank));
                let rook_home =
                    self.piece_at(Square::new(7, rank)) == Piece::Rook && self.color_at(Square::new(7, rank)) == Some(color);
                if !king_home || !rook_home {
                    problems.push(format!("{color:?} kingside castling right set without king/rook on home squares"));
                }
            }
            if self.castling_rights.has(CastleRights::queenside(color)) {
                let king_home = self.king_square(color) == Some(Square::new(4, rank));
                let rook_home =
                    self.piece_at(Square::new(0, rank)) == Piece::Rook && self.color_at(Square::new(0, rank)) == Some(color);
                if !king_home || !rook_home {
                    problems.push(format!("{color:?} queenside castling right set without king/rook on home squares"));
                }
            }
        }

        problems
    }
}
