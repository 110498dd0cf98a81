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

//! The six end-to-end variant scenarios of §8, driven through the engine
//! crate so the search and evaluator see the same rule-parametric
//! generation core does.

use chaos_core::{
    fen,
    movegen::{legal_moves, quasi_legal_moves},
    variant::is_destructive,
    Color, Variant,
};
use chaos_engine::{config::SearchConfig, limit::SearchLimit, search::Search, transposition::TTable};

fn search(fen_str: &str, variant: Variant, depth: u8) -> chaos_engine::search::SearchInfo {
    let mut pos = fen::from_fen(fen_str, variant).unwrap();
    let mut tt = TTable::with_size(1 << 16);
    let limit = SearchLimit::new();
    limit.start();
    let config = SearchConfig { depth, ..SearchConfig::default() };
    let mut s = Search::new(&mut tt, &limit, config);
    s.find_best_move(&mut pos).unwrap()
}

#[test]
fn classic_search_to_depth_five_only_ever_returns_legal_moves() {
    let info = search(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
        Variant::Classic,
        5,
    );
    let mut pos = fen::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
        Variant::Classic,
    )
    .unwrap();
    assert!(legal_moves(&mut pos).contains(&info.best_move));
}

#[test]
fn exploding_knights_capture_is_destructive_and_wins_by_king_capture() {
    // White knight on c6 can capture the lone black king on b8.
    let mut pos = fen::from_fen("1k6/8/2N5/8/8/8/8/K7 w - - 0 1", Variant::ExplodingKnights).unwrap();
    assert!(pos.variant.has_win_by_king_capture());

    let candidates = quasi_legal_moves(&pos);
    let capture = candidates
        .iter()
        .copied()
        .find(|mv| mv.to_square() == chaos_core::Square::B8)
        .expect("knight capture of the black king must be generated");
    assert!(capture.is_capture());
    assert!(is_destructive(capture, pos.variant));

    pos.make_move(capture);
    assert!(pos.has_alternative_win(Color::White));
    assert!(!pos.has_alternative_win(Color::Black));

    // The captured king must actually be gone from both the piece and
    // player bitboards, not just absent from the move word.
    assert!((pos.pieces[chaos_core::Piece::King as usize] & pos.players[Color::Black as usize]).is_empty());
    pos.unmake_move();
    assert!(!(pos.pieces[chaos_core::Piece::King as usize] & pos.players[Color::Black as usize]).is_empty());
}

#[test]
fn loser_variant_legal_moves_are_capture_only_when_a_capture_exists() {
    // A white pawn can capture a black pawn or push past it; Loser's
    // forced-capture rule (like Compulsion) must prune the push.
    let mut pos = fen::from_fen("8/8/8/3p4/4P3/8/8/k6K w - - 0 1", Variant::Loser).unwrap();
    assert!(pos.variant.has_forced_capture_enabled());
    let moves = legal_moves(&mut pos);
    assert!(!moves.is_empty());
    assert!(moves.iter().all(|mv| mv.is_capture()));
}

#[test]
fn forced_check_variant_legal_moves_all_give_check_when_a_check_exists() {
    // White queen can check the black king from several squares in
    // addition to quiet rook/queen moves; ForcedCheck must prune
    // everything but the checks.
    let mut pos = fen::from_fen("7k/8/8/8/8/8/6Q1/7K w - - 0 1", Variant::ForcedCheck).unwrap();
    assert!(pos.variant.has_forced_check_enabled());
    let moves = legal_moves(&mut pos);
    assert!(!moves.is_empty());
    for mv in &moves {
        pos.make_move(*mv);
        assert!(pos.is_in_check(Color::Black));
        pos.unmake_move();
    }
}

#[test]
fn king_of_the_hill_alternative_win_triggers_when_the_king_reaches_the_center() {
    let mut pos = fen::from_fen("8/8/8/2K5/8/8/8/7k w - - 0 1", Variant::KingOfTheHill).unwrap();
    assert!(!pos.has_alternative_win(Color::White));
    let candidates = quasi_legal_moves(&pos);
    let to_d4 = candidates
        .iter()
        .copied()
        .find(|mv| mv.to_square() == chaos_core::Square::D4)
        .expect("the king must be able to step onto d4");
    pos.make_move(to_d4);
    assert!(pos.has_alternative_win(Color::White));
}

#[test]
fn the_fifty_move_draw_triggers_exactly_at_a_hundred_reversible_half_moves() {
    // `is_fifty_move_draw` reads the position's tracked reversible-move
    // counter, which a FEN's halfmove clock field seeds directly.
    let at_boundary = fen::from_fen("8/8/8/2k5/8/8/8/K7 w - - 100 80", Variant::Classic).unwrap();
    assert!(at_boundary.is_fifty_move_draw());

    let just_under = fen::from_fen("8/8/8/2k5/8/8/8/K7 w - - 99 80", Variant::Classic).unwrap();
    assert!(!just_under.is_fifty_move_draw());

    let fresh = fen::from_fen("8/8/8/2k5/8/8/8/K7 w - - 0 1", Variant::Classic).unwrap();
    assert!(!fresh.is_fifty_move_draw());
}
