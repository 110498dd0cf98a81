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

//! The UCI-compatible command surface (§6): a line-oriented protocol the
//! front-end (`engine/src/main.rs`) speaks over stdin/stdout. This module
//! only has parsing (`parse`) and formatting (`send`); the loop that reads
//! lines and drives a `Search` lives in `main.rs`.

mod parse;
mod send;

pub use parse::{named_position_fen, parse_line, UciParseResult};
pub use send::{EngineInfo, OptionType, UciMessage};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A command sent from the GUI/front-end to the engine.
pub enum UciCommand {
    Uci,
    IsReady,
    SetOption { name: String, value: Option<String> },
    NewGame,
    /// `fen` is `None` for `startpos`; `moves` are raw long-algebraic
    /// tokens, resolved one at a time against the position as it's built
    /// (a move's legality/disambiguation can depend on the position
    /// reached by the moves before it).
    Position { fen: Option<String>, moves: Vec<String> },
    Go(Vec<GoOption>),
    Stop,
    Quit,
    /// Custom extension (§6): print the current position.
    Display,
    /// Custom extension (§6): switch the active rule variant for a new
    /// session.
    Variant(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One option of a `go` command.
pub enum GoOption {
    Depth(u8),
    Nodes(u64),
    MoveTime(u32),
    Perft(u8),
    Infinite,
    WhiteTime(u32),
    BlackTime(u32),
    WhiteInc(u32),
    BlackInc(u32),
    MovesToGo(u8),
}
