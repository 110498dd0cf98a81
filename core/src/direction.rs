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

//! Compass directions, used as a step vector for shifting bitboards and
//! walking sliding-piece rays.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
/// A step on the board, expressed as a signed (file, rank) delta.
pub struct Direction {
    pub df: i8,
    pub dr: i8,
}

impl Direction {
    pub const NORTH: Direction = Direction { df: 0, dr: 1 };
    pub const SOUTH: Direction = Direction { df: 0, dr: -1 };
    pub const EAST: Direction = Direction { df: 1, dr: 0 };
    pub const WEST: Direction = Direction { df: -1, dr: 0 };
    pub const NORTHEAST: Direction = Direction { df: 1, dr: 1 };
    pub const NORTHWEST: Direction = Direction { df: -1, dr: 1 };
    pub const SOUTHEAST: Direction = Direction { df: 1, dr: -1 };
    pub const SOUTHWEST: Direction = Direction { df: -1, dr: -1 };

    /// The four rook-like ray directions.
    pub const ROOK_DIRS: [Direction; 4] =
        [Direction::NORTH, Direction::SOUTH, Direction::EAST, Direction::WEST];
    /// The four bishop-like ray directions.
    pub const BISHOP_DIRS: [Direction; 4] = [
        Direction::NORTHEAST,
        Direction::NORTHWEST,
        Direction::SOUTHEAST,
        Direction::SOUTHWEST,
    ];

    /// The eight knight L-shaped steps.
    pub const KNIGHT_STEPS: [Direction; 8] = [
        Direction { df: 1, dr: 2 },
        Direction { df: 2, dr: 1 },
        Direction { df: 2, dr: -1 },
        Direction { df: 1, dr: -2 },
        Direction { df: -1, dr: -2 },
        Direction { df: -2, dr: -1 },
        Direction { df: -2, dr: 1 },
        Direction { df: -1, dr: 2 },
    ];

    /// The eight king steps (identical to rook + bishop directions).
    pub const KING_STEPS: [Direction; 8] = [
        Direction::NORTH,
        Direction::SOUTH,
        Direction::EAST,
        Direction::WEST,
        Direction::NORTHEAST,
        Direction::NORTHWEST,
        Direction::SOUTHEAST,
        Direction::SOUTHWEST,
    ];
}
