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

//! Parsing of the line-oriented UCI-compatible command surface (§6).
//! Unlike `fiddler`'s parser, moves in a `position ... moves ...` command
//! are kept as raw tokens rather than pre-resolved against a board: this
//! crate's notation parser (`core::algebraic::parse_long`) needs a
//! `&mut Position` to thread through, and the position doesn't exist yet
//! at parse time for a `position startpos moves ...` line.

use super::{GoOption, UciCommand};

pub type UciParseResult = Result<UciCommand, String>;

/// A handful of well-known positions recognized as the `<named>`
/// alternative to `startpos`/`fen` in `position` (§6). Drawn from the
/// perft corpus of §8.
#[must_use]
pub fn named_position_fen(name: &str) -> Option<&'static str> {
    match name.to_ascii_lowercase().as_str() {
        "startpos" | "start" => Some("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
        "kiwipete" => Some("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -"),
        "mango" => Some("rn1qk2r/pbp2pp1/1p1bpn1p/1N1p4/3P4/P3PN2/1PPBQPPP/3RK2R w Kkq -"),
        "grape" => Some("3Q4/8/3p4/3N3P/7P/1k6/8/K1R5 w - -"),
        _ => None,
    }
}

/// Parse one line of UCI input. Unrecognized commands and malformed
/// arguments return `Err`; per §7, the caller (untrusted input) discards
/// the line and continues rather than treating this as fatal.
pub fn parse_line(line: &str) -> UciParseResult {
    let mut tokens = line.split_ascii_whitespace();
    let first = tokens.next().ok_or("empty line")?;
    match first {
        "uci" => Ok(UciCommand::Uci),
        "isready" => Ok(UciCommand::IsReady),
        "setoption" => parse_set_option(&mut tokens),
        "ucinewgame" => Ok(UciCommand::NewGame),
        "position" => parse_position(&mut tokens),
        "go" => parse_go(&mut tokens),
        "stop" => Ok(UciCommand::Stop),
        "quit" => Ok(UciCommand::Quit),
        "d" => Ok(UciCommand::Display),
        "variant" => {
            let name = tokens.next().ok_or("variant requires a name")?;
            Ok(UciCommand::Variant(name.to_string()))
        }
        other => Err(format!("unrecognized UCI command `{other}`")),
    }
}

fn parse_set_option(tokens: &mut dyn Iterator<Item = &str>) -> UciParseResult {
    let name_tok = tokens.next().ok_or("reached EOL before `name` in setoption")?;
    if name_tok != "name" {
        return Err(format!("expected `name`, got `{name_tok}`"));
    }

    let mut key = String::new();
    loop {
        match tokens.next() {
            None => return Ok(UciCommand::SetOption { name: key, value: None }),
            Some("value") => break,
            Some(tok) => {
                if !key.is_empty() {
                    key += " ";
                }
                key += tok;
            }
        }
    }

    let mut value = String::new();
    for tok in tokens {
        if !value.is_empty() {
            value += " ";
        }
        value += tok;
    }
    Ok(UciCommand::SetOption { name: key, value: Some(value) })
}

fn parse_position(tokens: &mut dyn Iterator<Item = &str>) -> UciParseResult {
    let fen = match tokens.next().ok_or("reached EOL while parsing position")? {
        "startpos" => None,
        "fen" => {
            let mut fen = String::new();
            loop {
                match tokens.next() {
                    None => break,
                    Some("moves") => break,
                    Some(tok) => {
                        if !fen.is_empty() {
                            fen += " ";
                        }
                        fen += tok;
                    }
                }
            }
            Some(fen)
        }
        named => match named_position_fen(named) {
            Some(fen) => Some(fen.to_string()),
            None => return Err(format!("unrecognized position token `{named}`")),
        },
    };

    // Consume an optional `moves` token, then every remaining token is a
    // move in long algebraic notation.
    let mut moves = Vec::new();
    for tok in tokens {
        if tok == "moves" {
            continue;
        }
        moves.push(tok.to_string());
    }

    Ok(UciCommand::Position { fen, moves })
}

fn parse_go(tokens: &mut dyn Iterator<Item = &str>) -> UciParseResult {
    let mut opts = Vec::new();
    let peeks = tokens;
    let mut next;
    loop {
        next = peeks.next();
        let Some(opt_tok) = next else { break };
        opts.push(match opt_tok {
            "depth" => GoOption::Depth(parse_int(peeks.next())? as u8),
            "nodes" => GoOption::Nodes(parse_int(peeks.next())?),
            "movetime" => GoOption::MoveTime(parse_int(peeks.next())? as u32),
            "perft" => GoOption::Perft(parse_int(peeks.next())? as u8),
            "infinite" => GoOption::Infinite,
            "wtime" => GoOption::WhiteTime(parse_int(peeks.next())? as u32),
            "btime" => GoOption::BlackTime(parse_int(peeks.next())? as u32),
            "winc" => GoOption::WhiteInc(parse_int(peeks.next())? as u32),
            "binc" => GoOption::BlackInc(parse_int(peeks.next())? as u32),
            "movestogo" => GoOption::MovesToGo(parse_int(peeks.next())? as u8),
            other => return Err(format!("unrecognized `go` option `{other}`")),
        });
    }
    Ok(UciCommand::Go(opts))
}

fn parse_int(tok: Option<&str>) -> Result<u64, String> {
    tok.ok_or_else(|| "reached EOL while parsing an integer".to_string())?
        .parse()
        .map_err(|e| format!("bad integer: {e}"))
}
