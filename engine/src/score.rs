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

//! Evaluation scores. `Eval` is the final, single-number centipawn score
//! returned from the evaluator and threaded through search (side-to-move
//! perspective, positive is good for the mover). `Score` is the
//! midgame/endgame tapered pair that material and piece-square tables
//! accumulate before being blended down to a single `Eval`.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

pub type Eval = i32;

/// Reserved for mates; `1,000,000` minus the ply at which the mate was
/// found, so shallower mates (found closer to the root) score higher.
pub const CHECKMATE: Eval = 1_000_000;

#[must_use]
pub const fn checkmate_score(ply: u32) -> Eval {
    CHECKMATE - ply as Eval
}

#[must_use]
/// Whether `eval` is within search-depth range of a reported mate, i.e. far
/// enough from a plain material/positional score that it must have come
/// from `checkmate_score`.
pub const fn is_mate_score(eval: Eval) -> bool {
    eval > CHECKMATE - 1000 || eval < -(CHECKMATE - 1000)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// A midgame/endgame pair of centipawn values, the currency material and
/// piece-square evaluation are accumulated in before blending by phase.
pub struct Score {
    pub mg: Eval,
    pub eg: Eval,
}

impl Score {
    pub const DRAW: Score = Score { mg: 0, eg: 0 };

    #[must_use]
    pub const fn new(mg: Eval, eg: Eval) -> Score {
        Score { mg, eg }
    }

    #[must_use]
    pub const fn centipawns(mg: Eval, eg: Eval) -> Score {
        Score { mg, eg }
    }

    #[must_use]
    /// Interpolate down to a single `Eval` by endgame progress `phase` in
    /// `0..=24` (§4.J): `(mg * phase + eg * (24 - phase)) / 24`.
    pub const fn blend(self, phase: u32) -> Eval {
        let phase = phase as Eval;
        (self.mg * phase + self.eg * (24 - phase)) / 24
    }
}

impl Add for Score {
    type Output = Score;
    fn add(self, rhs: Score) -> Score {
        Score::new(self.mg + rhs.mg, self.eg + rhs.eg)
    }
}

impl Sub for Score {
    type Output = Score;
    fn sub(self, rhs: Score) -> Score {
        Score::new(self.mg - rhs.mg, self.eg - rhs.eg)
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Score) {
        *self = *self + rhs;
    }
}

impl SubAssign for Score {
    fn sub_assign(&mut self, rhs: Score) {
        *self = *self - rhs;
    }
}

impl Neg for Score {
    type Output = Score;
    fn neg(self) -> Score {
        Score::new(-self.mg, -self.eg)
    }
}

impl Mul<i32> for Score {
    type Output = Score;
    fn mul(self, rhs: i32) -> Score {
        Score::new(self.mg * rhs, self.eg * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_at_full_midgame_and_full_endgame() {
        let s = Score::centipawns(100, -50);
        assert_eq!(s.blend(24), 100);
        assert_eq!(s.blend(0), -50);
    }

    #[test]
    fn checkmate_scores_prefer_shallower_mates() {
        assert!(checkmate_score(1) > checkmate_score(3));
    }

    #[test]
    fn mate_score_detection_excludes_ordinary_material() {
        assert!(!is_mate_score(350));
        assert!(is_mate_score(checkmate_score(2)));
        assert!(is_mate_score(-checkmate_score(2)));
    }
}
