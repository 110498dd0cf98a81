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

//! Bitboard position representation, variant-parametric move generation,
//! and perft validation for a chess-variant engine. This crate has no
//! knowledge of search or evaluation; it is the board itself.

pub mod algebraic;
pub mod bitboard;
pub mod book;
pub mod castling;
pub mod color;
pub mod direction;
pub mod fen;
pub mod magic;
pub mod movegen;
pub mod moves;
pub mod perft;
pub mod piece;
pub mod position;
pub mod square;
pub mod variant;
pub mod visual;
pub mod zobrist;

pub use bitboard::Bitboard;
pub use castling::CastleRights;
pub use color::Color;
pub use direction::Direction;
pub use moves::Move;
pub use piece::Piece;
pub use position::Position;
pub use square::Square;
pub use variant::Variant;
