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

//! Formatting of engine-to-GUI UCI messages (§6).

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use chaos_core::{algebraic::write_long, Move};

use crate::score::{is_mate_score, Eval, CHECKMATE};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UciMessage<'a> {
    Id { name: Option<&'a str>, author: Option<&'a str> },
    UciOk,
    ReadyOk,
    Option { name: &'a str, opt: OptionType<'a> },
    BestMove { m: Move, ponder: Option<Move> },
    Info(&'a [EngineInfo<'a>]),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineInfo<'a> {
    Depth(u8),
    Time(Duration),
    Nodes(u64),
    Pv(&'a [Move]),
    Score { eval: Eval, is_lower_bound: bool, is_upper_bound: bool },
    String(&'a str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionType<'a> {
    Spin { default: i64, min: i64, max: i64 },
    String(Option<&'a str>),
    Check(Option<bool>),
    Button,
}

impl<'a> Display for UciMessage<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            UciMessage::Id { name, author } => {
                write!(f, "id")?;
                if let Some(n) = name {
                    write!(f, " name {n}")?;
                }
                if let Some(a) = author {
                    if name.is_some() {
                        write!(f, "\nid")?;
                    }
                    write!(f, " author {a}")?;
                }
                Ok(())
            }
            UciMessage::UciOk => write!(f, "uciok"),
            UciMessage::ReadyOk => write!(f, "readyok"),
            UciMessage::Option { name, opt } => write_option(f, name, opt),
            UciMessage::BestMove { m, ponder } => {
                write!(f, "bestmove {}", write_long(*m))?;
                if let Some(p) = ponder {
                    write!(f, " ponder {}", write_long(*p))?;
                }
                Ok(())
            }
            UciMessage::Info(infos) => write_info(f, infos),
        }
    }
}

fn write_option(f: &mut Formatter, name: &str, opt: &OptionType) -> fmt::Result {
    write!(f, "option name {name} ")?;
    match opt {
        OptionType::Spin { default, min, max } => write!(f, "type spin default {default} min {min} max {max}"),
        OptionType::String(s) => {
            write!(f, "type string")?;
            if let Some(st) = s {
                write!(f, " default {st}")?;
            }
            Ok(())
        }
        OptionType::Check(default) => {
            write!(f, "type check")?;
            if let Some(d) = default {
                write!(f, " default {d}")?;
            }
            Ok(())
        }
        OptionType::Button => write!(f, "type button"),
    }
}

fn write_info(f: &mut Formatter, infos: &[EngineInfo]) -> fmt::Result {
    write!(f, "info")?;
    for info in infos {
        match info {
            EngineInfo::Depth(d) => write!(f, " depth {d}")?,
            EngineInfo::Time(t) => write!(f, " time {}", t.as_millis())?,
            EngineInfo::Nodes(n) => write!(f, " nodes {n}")?,
            EngineInfo::Pv(pv) => {
                write!(f, " pv")?;
                for m in pv.iter() {
                    write!(f, " {}", write_long(*m))?;
                }
            }
            EngineInfo::Score { eval, is_lower_bound, is_upper_bound } => {
                write!(f, " score ")?;
                if is_mate_score(*eval) {
                    let plies_to_mate = CHECKMATE - eval.abs();
                    let moves_to_mate = (plies_to_mate + 1) / 2;
                    if *eval > 0 {
                        write!(f, "mate {moves_to_mate}")?;
                    } else {
                        write!(f, "mate -{moves_to_mate}")?;
                    }
                } else {
                    write!(f, "cp {eval}")?;
                }
                if *is_lower_bound && !is_upper_bound {
                    write!(f, " lowerbound")?;
                } else if *is_upper_bound && !is_lower_bound {
                    write!(f, " upperbound")?;
                }
            }
            EngineInfo::String(s) => write!(f, " string {s}")?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_line_has_name_and_author() {
        let msg = UciMessage::Id { name: Some("chaos"), author: Some("the author") };
        assert_eq!(msg.to_string(), "id name chaos\nid author the author");
    }

    #[test]
    fn uciok_and_readyok_are_single_tokens() {
        assert_eq!(UciMessage::UciOk.to_string(), "uciok");
        assert_eq!(UciMessage::ReadyOk.to_string(), "readyok");
    }

    #[test]
    fn bestmove_without_ponder() {
        let m = Move::NULL;
        let msg = UciMessage::BestMove { m, ponder: None };
        assert_eq!(msg.to_string(), "bestmove 0000");
    }

    #[test]
    fn score_formats_centipawns() {
        let info = [EngineInfo::Score { eval: 35, is_lower_bound: false, is_upper_bound: false }];
        assert_eq!(UciMessage::Info(&info).to_string(), "info score cp 35");
    }

    #[test]
    fn score_formats_mate() {
        let eval = CHECKMATE - 3;
        let info = [EngineInfo::Score { eval, is_lower_bound: false, is_upper_bound: false }];
        assert_eq!(UciMessage::Info(&info).to_string(), "info score mate 2");
    }

    #[test]
    fn spin_option_round_trips() {
        let msg = UciMessage::Option { name: "Hash", opt: OptionType::Spin { default: 64, min: 1, max: 4096 } };
        assert_eq!(msg.to_string(), "option name Hash type spin default 64 min 1 max 4096");
    }
}
