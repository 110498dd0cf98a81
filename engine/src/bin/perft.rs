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

//! Standalone perft/divide CLI, for validating the generator against an
//! external oracle without going through UCI. Plain positional
//! `std::env::args()`, matching the teacher's `cli` binary's own
//! no-argument-parsing-crate style.
//!
//! Usage: `perft <depth> [variant] <fen...>`, or `perft <depth>` alone to
//! run from the standard start position under the Classic variant.

use std::env;
use std::process::exit;

use chaos_core::{fen, perft, Variant};

const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn parse_variant(name: &str) -> Option<Variant> {
    let normalized: String = name.to_ascii_lowercase().chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    Variant::ALL.into_iter().find(|v| {
        let canonical: String = format!("{v:?}").to_ascii_lowercase().chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        canonical == normalized
    })
}

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("usage: {} <depth> [variant] <fen...>", args.first().map_or("perft", String::as_str));
        exit(1);
    }

    let depth: u32 = match args[1].parse() {
        Ok(d) => d,
        Err(_) => {
            eprintln!("fatal: `{}` is not a valid depth", args[1]);
            exit(1);
        }
    };

    let (variant, fen_start) = if args.len() > 2 {
        match parse_variant(&args[2]) {
            Some(v) => (v, 3),
            None => (Variant::Classic, 2),
        }
    } else {
        (Variant::Classic, 2)
    };

    let fen_str = if args.len() > fen_start { args[fen_start..].join(" ") } else { STARTPOS_FEN.to_string() };

    let mut pos = match fen::from_fen(&fen_str, variant) {
        Ok(pos) => pos,
        Err(e) => {
            eprintln!("fatal: {e}");
            exit(1);
        }
    };

    log::info!("running perft({depth}) on `{fen_str}` under {variant:?}");

    let divide = perft::divide(&mut pos, depth);
    let mut entries: Vec<(&String, &u64)> = divide.iter().collect();
    entries.sort_by_key(|(notation, _)| (*notation).clone());
    let mut total = 0u64;
    for (notation, count) in entries {
        println!("{notation}: {count}");
        total += count;
    }
    println!("\n{total}");
}
