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

//! Time management: deciding how much of the remaining clock to spend on
//! one move. The engine rations indiscriminately rather than sizing the
//! budget to the position's complexity.

use std::cmp::min;

use chaos_core::Color;

#[must_use]
/// Decide how much time (in milliseconds) to spend on the next move,
/// given UCI `go` time-control fields for both players.
///
/// * `movestogo`: moves remaining until the next time-control increment.
/// * `increment`: each player's per-move increment, `(white, black)`.
/// * `remaining`: each player's remaining clock, `(white, black)`.
/// * `player`: whose turn this timing decision is for.
pub fn get_search_time(movestogo: Option<u8>, increment: (u32, u32), remaining: (u32, u32), player: Color) -> u32 {
    let (our_inc, our_remaining) = match player {
        Color::White => (increment.0, remaining.0),
        Color::Black => (increment.1, remaining.1),
    };

    let rem_float = our_remaining as f32;
    if let Some(moves) = movestogo {
        min(
            800 * our_remaining / (1000 * u32::from(moves)) + our_inc,
            (0.85 * rem_float) as u32,
        )
    } else {
        min(our_remaining / 80 + our_inc, (0.9 * rem_float) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn without_movestogo_uses_a_fraction_of_remaining_time() {
        let ms = get_search_time(None, (0, 0), (60_000, 60_000), Color::White);
        assert!(ms <= 60_000 / 80 + 1);
    }

    #[test]
    fn never_exceeds_ninety_percent_of_remaining_time() {
        let ms = get_search_time(None, (0, 0), (1000, 1000), Color::White);
        assert!(ms <= 900);
    }

    #[test]
    fn increment_is_added_to_the_budget() {
        let without_inc = get_search_time(None, (0, 0), (60_000, 60_000), Color::White);
        let with_inc = get_search_time(None, (5000, 0), (60_000, 60_000), Color::White);
        assert!(with_inc > without_inc);
    }
}
