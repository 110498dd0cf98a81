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

//! Opening book loading: a text format of braced visual-position entries,
//! each offering a set of weighted move options matched against the
//! current position's visual notation (§6, with `*` as a wildcard).

use log::warn;

use crate::{algebraic, moves::Move, position::Position, visual};

#[derive(Clone, Debug)]
pub struct Option {
    pub notation: String,
    pub is_universal: bool,
    pub percent: u32,
}

#[derive(Clone, Debug)]
pub struct VisualEntry {
    pub visual_tokens: Vec<String>,
    pub options: Vec<Option>,
}

impl VisualEntry {
    #[must_use]
    fn matches(&self, position_tokens: &[String]) -> bool {
        visual::tokens_match(&self.visual_tokens, position_tokens)
    }
}

#[derive(Clone, Debug, Default)]
pub struct OpeningBook {
    entries: Vec<VisualEntry>,
}

impl OpeningBook {
    #[must_use]
    pub fn empty() -> OpeningBook {
        OpeningBook { entries: Vec::new() }
    }

    /// Parse a book file's full text. Malformed entries are skipped with a
    /// logged warning rather than aborting the whole load, since a book is
    /// untrusted-ish auxiliary data rather than engine configuration.
    #[must_use]
    pub fn load(text: &str) -> OpeningBook {
        let mut entries = Vec::new();
        let mut in_visual_section = false;
        let mut lines = text.lines().peekable();

        while let Some(line) = lines.next() {
            let trimmed = line.trim();
            if trimmed.starts_with("**") {
                in_visual_section = trimmed.to_ascii_uppercase().contains("VISUAL ENTRIES");
                continue;
            }
            if !in_visual_section || trimmed != "{" {
                continue;
            }
            match parse_entry(&mut lines) {
                Some(entry) => entries.push(entry),
                None => warn!("skipping malformed opening book entry"),
            }
        }

        OpeningBook { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry that matches a full tokenisation of `pos`'s visual
    /// notation.
    #[must_use]
    fn matching_entries(&self, pos: &Position) -> Vec<&VisualEntry> {
        let board_tokens = visual::tokens(&visual::to_visual(pos));
        self.entries.iter().filter(|e| e.matches(&board_tokens)).collect()
    }

    #[must_use]
    /// Pick a move from the book for `pos`, weighted by percent, using
    /// `rng_draw` (a caller-supplied value in `0..100`) to select among the
    /// options. Returns `Move::NULL` if no entry matches.
    pub fn pick_move(&self, pos: &mut Position, rng_draw: u32) -> Move {
        let matches = self.matching_entries(pos);
        let Some(entry) = matches.first() else {
            return Move::NULL;
        };
        let mut cumulative = 0u32;
        for option in &entry.options {
            cumulative += option.percent;
            if rng_draw < cumulative {
                return algebraic::parse_long(&option.notation, pos);
            }
        }
        Move::NULL
    }

    /// Report every entry whose board line count or option percentages
    /// look wrong, without aborting the load (§7: generator/invariant
    /// issues are reported, not fatal, when the source is semi-trusted).
    #[must_use]
    pub fn sanity_check(&self) -> Vec<String> {
        let mut problems = Vec::new();
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.visual_tokens.len() != 8 * 8 + 3 {
                problems.push(format!("entry {i}: expected {} board+trailer tokens, found {}", 8 * 8 + 3, entry.visual_tokens.len()));
            }
            let total: u32 = entry.options.iter().map(|o| o.percent).sum();
            if total > 100 {
                problems.push(format!("entry {i}: option percentages sum to {total} > 100"));
            }
            if entry.options.is_empty() {
                problems.push(format!("entry {i}: no move options"));
            }
        }
        problems
    }
}

fn parse_entry<'a>(lines: &mut std::iter::Peekable<impl Iterator<Item = &'a str>>) -> std::option::Option<VisualEntry> {
    let mut board_lines = Vec::new();
    for _ in 0..9 {
        board_lines.push(lines.next()?.trim().to_string());
    }
    let visual_text = board_lines.join("\n");
    let visual_tokens = visual::tokens(&visual_text);

    if lines.next()?.trim() != "[" {
        return None;
    }

    let mut options = Vec::new();
    loop {
        let line = lines.next()?.trim().to_string();
        if line == "]" {
            break;
        }
        if let Some(opt) = parse_option(&line) {
            options.push(opt);
        }
    }

    if lines.next()?.trim() != "}" {
        return None;
    }

    Some(VisualEntry { visual_tokens, options })
}

fn parse_option(line: &str) -> std::option::Option<Option> {
    let clean = line.split('#').next().unwrap_or(line).trim();
    if clean.is_empty() {
        return None;
    }
    let (is_universal, rest) = match clean.strip_prefix("u ") {
        Some(r) => (true, r.trim()),
        None => (false, clean),
    };
    let mut parts = rest.split_whitespace();
    let notation = parts.next()?.to_string();
    let percent_str = parts.next()?.trim_end_matches('%');
    let percent: u32 = percent_str.parse().ok()?;
    Some(Option { notation, is_universal, percent })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOK_TEXT: &str = "\
** VISUAL ENTRIES **
{
r n b q k b n r
p p p p p p p p
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
P P P P P P P P
R N B Q K B N R
w KQkq -
[
u e2e4 60%
u d2d4 40%
]
}
";

    #[test]
    fn loads_a_single_entry() {
        let book = OpeningBook::load(BOOK_TEXT);
        assert_eq!(book.len(), 1);
        assert!(book.sanity_check().is_empty());
    }

    #[test]
    fn picks_a_move_for_the_matching_position() {
        use crate::{fen, variant::Variant};
        let book = OpeningBook::load(BOOK_TEXT);
        let mut pos = fen::from_fen(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            Variant::Classic,
        )
        .unwrap();
        let mv = book.pick_move(&mut pos, 10);
        assert_eq!(algebraic::write_long(mv), "e2e4");
        let mv2 = book.pick_move(&mut pos, 90);
        assert_eq!(algebraic::write_long(mv2), "d2d4");
    }

    #[test]
    fn empty_book_never_matches() {
        let book = OpeningBook::empty();
        use crate::{fen, variant::Variant};
        let mut pos = fen::from_fen(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            Variant::Classic,
        )
        .unwrap();
        assert!(book.pick_move(&mut pos, 0).is_null());
    }
}
