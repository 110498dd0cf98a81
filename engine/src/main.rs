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

//! The UCI-compatible front-end. Unlike `fiddler_engine`'s `main.rs`,
//! which shares one `Arc<RwLock<MainSearch>>` with up to a few dozen
//! helper-search threads, this engine's core is single-threaded (§5): at
//! most one search thread runs at a time (spawned so the stdin-reading
//! loop can still observe a `stop`), plus the one auxiliary timer thread
//! that `go movetime` schedules.

use std::io::stdin;
use std::process::exit;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chaos_core::{algebraic::parse_long, fen, perft, Position, Variant};

use chaos_engine::{
    config::SearchConfig,
    limit::SearchLimit,
    search::Search,
    time::get_search_time,
    transposition::TTable,
    uci::{parse_line, EngineInfo, GoOption, OptionType, UciCommand, UciMessage},
};

const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// The result of one backgrounded search: the position and table handed
/// back so the main loop can keep using them, plus what was found.
struct SearchOutcome {
    pos: Position,
    tt: TTable,
    best_move: chaos_core::Move,
    eval: i32,
    depth: u8,
    nodes: u64,
}

struct Engine {
    variant: Variant,
    pos: Position,
    tt: TTable,
    config: SearchConfig,
    debug: bool,
    in_flight: Option<(Arc<SearchLimit>, JoinHandle<SearchOutcome>)>,
}

impl Engine {
    fn new() -> Engine {
        let variant = Variant::Classic;
        Engine {
            variant,
            pos: fen::from_fen(STARTPOS_FEN, variant).unwrap(),
            tt: TTable::with_size(SearchConfig::default().transposition_table_size),
            config: SearchConfig::default(),
            debug: false,
            in_flight: None,
        }
    }

    /// Block until any in-flight search completes, folding its position
    /// and table back into `self` and printing `bestmove`.
    fn join_search(&mut self) {
        if let Some((_, handle)) = self.in_flight.take() {
            match handle.join() {
                Ok(outcome) => {
                    self.pos = outcome.pos;
                    self.tt = outcome.tt;
                    println!(
                        "{}",
                        UciMessage::Info(&[
                            EngineInfo::Depth(outcome.depth),
                            EngineInfo::Nodes(outcome.nodes),
                            EngineInfo::Score { eval: outcome.eval, is_lower_bound: false, is_upper_bound: false },
                        ])
                    );
                    println!("{}", UciMessage::BestMove { m: outcome.best_move, ponder: None });
                }
                Err(_) => log::error!("search thread panicked"),
            }
        }
    }

    fn stop_search(&mut self) {
        if let Some((limit, _)) = &self.in_flight {
            limit.cancel();
        }
        self.join_search();
    }

    fn handle(&mut self, command: UciCommand) -> bool {
        match command {
            UciCommand::Uci => {
                println!("{}", UciMessage::Id { name: Some("Chaos 0.1.0"), author: Some("the Chaos project") });
                println!(
                    "{}",
                    UciMessage::Option { name: "Hash", opt: OptionType::Spin { default: 10_000_000, min: 1024, max: 100_000_000 } }
                );
                println!("{}", UciMessage::Option { name: "Depth", opt: OptionType::Spin { default: 0, min: 0, max: 128 } });
                println!("{}", UciMessage::UciOk);
            }
            UciCommand::IsReady => println!("{}", UciMessage::ReadyOk),
            UciCommand::SetOption { name, value } => self.set_option(&name, value.as_deref()),
            UciCommand::NewGame => {
                self.stop_search();
                self.pos = fen::from_fen(STARTPOS_FEN, self.variant).unwrap();
                self.tt.clear();
            }
            UciCommand::Position { fen, moves } => {
                self.stop_search();
                let base = fen.as_deref().unwrap_or(STARTPOS_FEN);
                match fen::from_fen(base, self.variant) {
                    Ok(mut pos) => {
                        for mv_str in moves {
                            let mv = parse_long(&mv_str, &mut pos);
                            if mv.is_null() {
                                log::warn!("could not parse move `{mv_str}` against current position");
                                break;
                            }
                            pos.make_move(mv);
                        }
                        self.pos = pos;
                    }
                    Err(e) => log::warn!("bad FEN in `position`: {e}"),
                }
            }
            UciCommand::Go(opts) => self.go(&opts),
            UciCommand::Stop => self.stop_search(),
            UciCommand::Display => println!("{}", chaos_core::visual::to_visual(&self.pos)),
            UciCommand::Variant(name) => match parse_variant_name(&name) {
                Some(v) => {
                    self.variant = v;
                    self.pos = fen::from_fen(STARTPOS_FEN, v).unwrap();
                }
                None => log::warn!("unrecognized variant `{name}`"),
            },
            UciCommand::Quit => {
                self.stop_search();
                return false;
            }
        }
        true
    }

    fn set_option(&mut self, name: &str, value: Option<&str>) {
        match name {
            "Hash" => match value.and_then(|v| v.parse().ok()) {
                Some(slots) => {
                    self.config.transposition_table_size = slots;
                    self.tt = TTable::with_size(slots);
                }
                None => log::warn!("bad value for option `Hash`"),
            },
            "Depth" => match value.and_then(|v| v.parse().ok()) {
                Some(depth) => self.config.depth = depth,
                None => log::warn!("bad value for option `Depth`"),
            },
            other => log::warn!("unknown option `{other}`"),
        }
    }

    fn go(&mut self, opts: &[GoOption]) {
        self.stop_search();

        if let Some(GoOption::Perft(depth)) = opts.iter().find(|o| matches!(o, GoOption::Perft(_))) {
            self.run_perft(*depth);
            return;
        }

        let mut config = self.config;
        let mut movetime = None;
        let (mut wtime, mut btime) = (None, None);
        let (mut winc, mut binc) = (0u32, 0u32);
        let mut movestogo = None;
        let mut infinite = false;

        for opt in opts {
            match *opt {
                GoOption::Depth(d) => config.depth = d,
                GoOption::Nodes(_) => {} // node caps are set on the limit below
                GoOption::MoveTime(ms) => movetime = Some(Duration::from_millis(u64::from(ms))),
                GoOption::Perft(_) => unreachable!("handled above"),
                GoOption::Infinite => infinite = true,
                GoOption::WhiteTime(t) => wtime = Some(t),
                GoOption::BlackTime(t) => btime = Some(t),
                GoOption::WhiteInc(i) => winc = i,
                GoOption::BlackInc(i) => binc = i,
                GoOption::MovesToGo(n) => movestogo = Some(n),
            }
        }

        let limit = Arc::new(SearchLimit::new());
        for opt in opts {
            if let GoOption::Nodes(n) = opt {
                limit.set_nodes_cap(Some(*n));
            }
        }

        let duration = if infinite {
            None
        } else if let Some(mt) = movetime {
            Some(mt)
        } else if let (Some(w), Some(b)) = (wtime, btime) {
            Some(Duration::from_millis(u64::from(get_search_time(
                movestogo,
                (winc, binc),
                (w, b),
                self.pos.side_to_move,
            ))))
        } else {
            None
        };
        limit.set_search_duration(duration);
        limit.start();

        let timer_handle = duration.map(|d| {
            let limit = Arc::clone(&limit);
            thread::spawn(move || {
                thread::sleep(d);
                limit.cancel();
            })
        });

        let pos = std::mem::replace(&mut self.pos, Position::empty(self.variant));
        let mut tt = std::mem::replace(&mut self.tt, TTable::with_size(1));
        let search_limit = Arc::clone(&limit);

        let handle = thread::spawn(move || {
            let mut pos = pos;
            let info = {
                let mut search = Search::new(&mut tt, &search_limit, config);
                search.find_best_move(&mut pos).expect("find_best_move is infallible by construction")
            };
            if let Some(timer_handle) = timer_handle {
                let _ = timer_handle.join();
            }
            SearchOutcome { pos, tt, best_move: info.best_move, eval: info.eval, depth: info.depth, nodes: info.nodes }
        });

        self.in_flight = Some((limit, handle));
    }

    fn run_perft(&mut self, depth: u8) {
        let mut pos = self.pos.clone();
        let divide = perft::divide(&mut pos, u32::from(depth));
        let mut total = 0u64;
        for (notation, count) in &divide {
            println!("{notation}: {count}");
            total += count;
        }
        println!("{}", UciMessage::Info(&[EngineInfo::Nodes(total)]));
    }
}

fn parse_variant_name(name: &str) -> Option<Variant> {
    let normalized: String = name.to_ascii_lowercase().chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    Variant::ALL.into_iter().find(|v| {
        let canonical: String = format!("{v:?}").to_ascii_lowercase().chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        canonical == normalized
    })
}

fn main() {
    env_logger::init();
    let mut engine = Engine::new();

    loop {
        let mut line = String::new();
        if stdin().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse_line(trimmed) {
            Ok(command) => {
                log::debug!("dispatching UCI command: {trimmed}");
                if !engine.handle(command) {
                    break;
                }
            }
            Err(e) => log::warn!("could not parse UCI line `{trimmed}`: {e}"),
        }
    }

    engine.stop_search();
    exit(0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_name_round_trips_case_and_punctuation_insensitively() {
        assert_eq!(parse_variant_name("classic"), Some(Variant::Classic));
        assert_eq!(parse_variant_name("Exploding-Knights"), Some(Variant::ExplodingKnights));
        assert_eq!(parse_variant_name("KingOfTheHillAndCompulsion"), Some(Variant::KingOfTheHillAndCompulsion));
        assert_eq!(parse_variant_name("not-a-variant"), None);
    }

    #[test]
    fn named_startpos_matches_the_literal_constant() {
        assert_eq!(chaos_engine::uci::named_position_fen("startpos"), Some(STARTPOS_FEN));
    }
}
