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

//! Iterative deepening over negamax alpha-beta with PVS (§4.K). Unlike
//! `fiddler_engine::search`, there is no quiescence search and no late
//! move reductions: the spec's leaf is a single static `evaluate()` call,
//! and the ordering pass is PST-delta only, not a phased capture/quiet
//! split.

use chaos_core::{movegen::legal_moves, Move, Position};

use crate::{
    evaluate, material,
    limit::SearchLimit,
    material::delta as material_delta,
    pst,
    score::{checkmate_score, Eval},
    transposition::{Bound, TTEntry, TTable},
    config::SearchConfig,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Why a search stopped short of a completed iteration.
pub enum SearchError {
    /// The search limit (time, nodes, or an external `stop`) fired.
    Cancelled,
}

pub type SearchResult = Result<SearchInfo, SearchError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What `find_best_move` reports about its most recently *completed*
/// iterative-deepening iteration. A cancelled in-flight iteration never
/// contributes to this; see §4.K's cancellation contract.
pub struct SearchInfo {
    pub best_move: Move,
    pub eval: Eval,
    pub depth: u8,
    pub nodes: u64,
}

/// Move-ordering weight for `mv`: the PST + material delta caused by
/// playing it, blended by the position's current phase and flipped to
/// the mover's perspective. Higher is better for the side to move.
fn order_value(mv: Move, pos: &Position) -> Eval {
    let phase = material::endgame_progress(pos);
    let delta = (material_delta(mv, pos) + pst::delta(mv, pos)).blend(phase);
    if pos.side_to_move == chaos_core::Color::White {
        delta
    } else {
        -delta
    }
}

/// Reorders `moves` in place: `hint` first (if present), then `tt_move`
/// (if present and distinct from `hint`), then the rest sorted
/// descending by [`order_value`] (§4.K step 5).
fn order_moves(mut moves: Vec<Move>, pos: &Position, hint: Move, tt_move: Move) -> Vec<Move> {
    let mut ordered = Vec::with_capacity(moves.len());
    if !hint.is_null() {
        if let Some(idx) = moves.iter().position(|&m| m == hint) {
            ordered.push(moves.swap_remove(idx));
        }
    }
    if !tt_move.is_null() && tt_move != hint {
        if let Some(idx) = moves.iter().position(|&m| m == tt_move) {
            ordered.push(moves.swap_remove(idx));
        }
    }
    moves.sort_by_key(|&m| std::cmp::Reverse(order_value(m, pos)));
    ordered.append(&mut moves);
    ordered
}

/// A single negamax-alpha-beta-PVS search owning one transposition table
/// and one cancellation token, run to completion or until cancelled.
pub struct Search<'a> {
    tt: &'a mut TTable,
    limit: &'a SearchLimit,
    config: SearchConfig,
    nodes: u64,
    nodes_since_poll: u64,
    cancelled: bool,
}

impl<'a> Search<'a> {
    #[must_use]
    pub fn new(tt: &'a mut TTable, limit: &'a SearchLimit, config: SearchConfig) -> Search<'a> {
        Search {
            tt,
            limit,
            config,
            nodes: 0,
            nodes_since_poll: 0,
            cancelled: false,
        }
    }

    /// Poll the cancellation token at most once every
    /// `config.limit_update_increment` nodes, amortizing the cost of the
    /// limit's mutex-guarded clock read (§5's "suspension points").
    fn poll_cancellation(&mut self) -> bool {
        if self.cancelled {
            return true;
        }
        self.nodes_since_poll += 1;
        if self.nodes_since_poll >= self.config.limit_update_increment {
            self.limit.add_nodes(self.nodes_since_poll);
            self.nodes_since_poll = 0;
            if self.limit.is_over() {
                self.cancelled = true;
            }
        }
        self.cancelled
    }

    /// Run iterative deepening from depth 1, rooted at `pos`, up to
    /// `config.depth` (or forever if `0`, relying on `limit` to end the
    /// search). Returns the best move from the last *completed*
    /// iteration; a cancellation mid-iteration never corrupts that
    /// answer (§4.K, "Cancellation").
    pub fn find_best_move(&mut self, pos: &mut Position) -> SearchResult {
        self.nodes = 0;
        self.nodes_since_poll = 0;
        self.cancelled = false;

        let mut best = SearchInfo { best_move: Move::NULL, eval: 0, depth: 0, nodes: 0 };
        let mut hint = Move::NULL;
        let mut depth: u32 = 1;

        loop {
            if self.config.depth != 0 && depth > u32::from(self.config.depth) {
                break;
            }
            match self.negamax(pos, 0, -(i32::MAX), i32::MAX, hint, depth) {
                Ok((eval, mv)) => {
                    best = SearchInfo { best_move: mv, eval, depth: depth as u8, nodes: self.nodes };
                    if mv.is_null() {
                        // Terminal at the root (finished position): no further
                        // iteration can do better.
                        break;
                    }
                    hint = mv;
                    depth += 1;
                }
                Err(SearchError::Cancelled) => break,
            }
        }

        self.limit.add_nodes(self.nodes_since_poll);
        Ok(best)
    }

    /// `search(ply, alpha, beta, hint)` of §4.K: negamax alpha-beta with
    /// principal variation search, reading and writing `self.tt`.
    fn negamax(
        &mut self,
        pos: &mut Position,
        ply: u32,
        mut alpha: Eval,
        mut beta: Eval,
        hint: Move,
        max_depth: u32,
    ) -> Result<(Eval, Move), SearchError> {
        let mover = pos.side_to_move;

        // Step 1: alternative winning condition.
        if pos.variant.has_alternative_winning_condition() {
            if pos.has_alternative_win(mover) {
                return Ok((checkmate_score(ply), Move::NULL));
            }
            if pos.has_alternative_win(!mover) {
                return Ok((-checkmate_score(ply), Move::NULL));
            }
        }

        // Step 2: fifty-move rule / three-fold repetition.
        if pos.is_fifty_move_draw() || pos.repetition_count() >= 2 {
            return Ok((alpha.max(0), Move::NULL));
        }

        // Step 3: transposition table probe, skipped entirely under
        // two-fold repetition (§4.I).
        let initial_alpha = alpha;
        let skip_tt = pos.repetition_count() >= 1;
        let mut tt_move = Move::NULL;
        if !skip_tt {
            if let Some(entry) = self.tt.get(pos.hash) {
                tt_move = entry.best_move;
                let remaining_depth = max_depth - ply;
                if u32::from(entry.depth) >= remaining_depth {
                    match entry.bound {
                        Bound::Exact => return Ok((entry.score, entry.best_move)),
                        Bound::Lower => {
                            if entry.score > alpha {
                                alpha = entry.score;
                            }
                        }
                        Bound::Upper => {
                            if entry.score < beta {
                                beta = entry.score;
                            }
                        }
                    }
                    if alpha >= beta {
                        return Ok((alpha.min(beta), entry.best_move));
                    }
                }
            }
        }

        // Step 4: leaf.
        if ply >= max_depth {
            return Ok((evaluate::evaluate(pos), Move::NULL));
        }

        // Step 5: move ordering.
        let moves = legal_moves(pos);
        if moves.is_empty() {
            // Step 8: no legal move.
            return Ok(if pos.variant.has_win_by_checkmate() {
                if pos.is_in_check(mover) {
                    (-checkmate_score(ply), Move::NULL)
                } else {
                    (0, Move::NULL)
                }
            } else {
                (0, Move::NULL)
            });
        }
        let ordered = order_moves(moves, pos, hint, tt_move);

        // Steps 6-7: PVS move loop.
        let mut best_move = Move::NULL;
        for (i, &mv) in ordered.iter().enumerate() {
            if self.poll_cancellation() {
                return Err(SearchError::Cancelled);
            }

            pos.make_move(mv);
            self.nodes += 1;
            let score = if i == 0 {
                -self.negamax(pos, ply + 1, -beta, -alpha, Move::NULL, max_depth)?.0
            } else {
                let zero_window = -self
                    .negamax(pos, ply + 1, -alpha - 1, -alpha, Move::NULL, max_depth)?
                    .0;
                if zero_window > alpha && zero_window < beta {
                    -self.negamax(pos, ply + 1, -beta, -alpha, Move::NULL, max_depth)?.0
                } else {
                    zero_window
                }
            };
            pos.unmake_move();

            if score > alpha {
                alpha = score;
                best_move = mv;
            }
            if alpha >= beta {
                break;
            }
        }

        // Step 9: transposition table store.
        let remaining_depth = (max_depth - ply).min(u32::from(u8::MAX)) as u8;
        if best_move.is_null() {
            self.tt.store(TTEntry {
                key: pos.hash,
                depth: remaining_depth,
                score: initial_alpha,
                bound: Bound::Upper,
                best_move: Move::NULL,
            });
        } else {
            let bound = if alpha >= beta { Bound::Lower } else { Bound::Exact };
            self.tt.store(TTEntry { key: pos.hash, depth: remaining_depth, score: alpha, bound, best_move });
        }

        Ok((alpha.min(beta), best_move))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaos_core::{fen, Variant};

    fn search_to_depth(fen_str: &str, variant: Variant, depth: u8) -> SearchInfo {
        let mut pos = fen::from_fen(fen_str, variant).unwrap();
        let mut tt = TTable::with_size(1 << 16);
        let limit = SearchLimit::new();
        limit.start();
        let config = SearchConfig { depth, ..SearchConfig::default() };
        let mut search = Search::new(&mut tt, &limit, config);
        search.find_best_move(&mut pos).unwrap()
    }

    #[test]
    fn start_position_search_returns_a_legal_move() {
        let info = search_to_depth(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            Variant::Classic,
            3,
        );
        let mut pos =
            fen::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", Variant::Classic)
                .unwrap();
        assert!(legal_moves(&mut pos).contains(&info.best_move));
    }

    #[test]
    fn back_rank_mate_in_one_is_found() {
        // White to move, Rd8# available.
        let info = search_to_depth("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1", Variant::Classic, 3);
        assert_eq!(info.best_move.from_square(), chaos_core::Square::A1);
        assert_eq!(info.best_move.to_square(), chaos_core::Square::D8);
    }

    #[test]
    fn finished_position_returns_null_move_without_crashing() {
        // Black is checkmated (Fool's-mate-style final position).
        let info =
            search_to_depth("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3", Variant::Classic, 3);
        assert!(info.best_move.is_null());
        assert!(evaluate::evaluate(
            &fen::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3", Variant::Classic)
                .unwrap()
        ) < 0);
    }

    #[test]
    fn cancelling_before_any_node_yields_null_or_legal_move() {
        let mut pos =
            fen::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", Variant::Classic)
                .unwrap();
        let mut tt = TTable::with_size(1024);
        let limit = SearchLimit::new();
        limit.start();
        limit.cancel();
        let config = SearchConfig { depth: 10, ..SearchConfig::default() };
        let mut search = Search::new(&mut tt, &limit, config);
        let info = search.find_best_move(&mut pos).unwrap();
        if !info.best_move.is_null() {
            let mut check_pos =
                fen::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", Variant::Classic)
                    .unwrap();
            assert!(legal_moves(&mut check_pos).contains(&info.best_move));
        }
    }

    #[test]
    fn loser_variant_with_forced_capture_returns_the_only_capture() {
        // A position where only a pawn push and a pawn capture exist; Loser
        // variant forces the capture (Compulsion-like forced-capture rule).
        let info = search_to_depth("8/8/8/3p4/4P3/8/8/k6K w - - 0 1", Variant::Loser, 1);
        assert!(info.best_move.is_capture());
    }
}
