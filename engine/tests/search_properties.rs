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

//! Cross-crate search properties (§4.K, §8): mate-in-N puzzles,
//! cancellation safety, and the finished-position contract, all driven
//! through the public `chaos_engine::search::Search` surface against
//! `chaos_core` positions.

use chaos_core::{fen, movegen::legal_moves, Variant};
use chaos_engine::config::SearchConfig;
use chaos_engine::limit::SearchLimit;
use chaos_engine::score::is_mate_score;
use chaos_engine::search::{Search, SearchInfo};
use chaos_engine::transposition::TTable;

const BACK_RANK_MATE_IN_ONE: &str = "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1";

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
fn a_deeper_search_still_finds_the_same_mate_in_one() {
    // Deepening past a terminal root should never talk the search out of
    // a mate it already sees: depth 5 must agree with depth 3 on both
    // the move and the fact that it's a mate score.
    let shallow = search_to_depth(BACK_RANK_MATE_IN_ONE, Variant::Classic, 3);
    let deep = search_to_depth(BACK_RANK_MATE_IN_ONE, Variant::Classic, 5);
    assert_eq!(shallow.best_move, deep.best_move);
    assert!(is_mate_score(shallow.eval));
    assert!(is_mate_score(deep.eval));
    assert!(shallow.eval > 0 && deep.eval > 0);
}

#[test]
fn mated_side_reports_a_losing_mate_score_and_no_move() {
    // Fool's-mate-style final position: Black just delivered mate, so
    // White (to move) has no legal replies at all.
    let fen_str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
    let info = search_to_depth(fen_str, Variant::Classic, 3);
    assert!(info.best_move.is_null());
    assert!(is_mate_score(info.eval));
    assert!(info.eval < 0);
}

#[test]
fn a_limit_that_is_already_over_before_the_first_poll_yields_the_initial_sentinel() {
    // `limit_update_increment: 1` forces the very first node of the
    // first iteration to observe the cancellation, so no iteration ever
    // completes and `find_best_move` must return its initial NULL_MOVE
    // sentinel rather than a half-searched answer.
    let mut pos = fen::from_fen(BACK_RANK_MATE_IN_ONE, Variant::Classic).unwrap();
    let mut tt = TTable::with_size(1024);
    let limit = SearchLimit::new();
    limit.start();
    limit.cancel();
    let config = SearchConfig { depth: 0, limit_update_increment: 1, ..SearchConfig::default() };
    let mut search = Search::new(&mut tt, &limit, config);
    let info = search.find_best_move(&mut pos).unwrap();
    assert!(info.best_move.is_null());
    assert_eq!(info.depth, 0);
    assert_eq!(info.nodes, 0);
}

#[test]
fn cancellation_mid_iteration_keeps_the_prior_completed_iterations_answer() {
    // With a node cap just past one full depth-1 iteration, iteration 2
    // is cancelled partway through, but `find_best_move` must still
    // report the legal move that finished at depth 1.
    let mut pos = fen::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
        Variant::Classic,
    )
    .unwrap();
    let mut tt = TTable::with_size(1 << 16);
    let limit = SearchLimit::new();
    limit.start();
    limit.set_nodes_cap(Some(50));
    let config = SearchConfig { depth: 0, limit_update_increment: 1, ..SearchConfig::default() };
    let mut search = Search::new(&mut tt, &limit, config);
    let info = search.find_best_move(&mut pos).unwrap();
    assert!(!info.best_move.is_null());
    let mut check_pos = pos.clone();
    assert!(legal_moves(&mut check_pos).contains(&info.best_move));
}
