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

//! Tunable search configuration, overridden field-by-field from UCI
//! `setoption` commands.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Hard iterative-deepening depth cap; `0` means "no cap, run until
    /// cancelled".
    pub depth: u8,
    /// Number of slots in the transposition table.
    pub transposition_table_size: usize,
    /// How many nodes elapse between node-limit polls in `SearchLimit`.
    pub limit_update_increment: u64,
}

impl SearchConfig {
    #[must_use]
    pub fn new() -> SearchConfig {
        SearchConfig::default()
    }
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            depth: 0,
            transposition_table_size: 10_000_000,
            limit_update_increment: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_depth_cap_and_the_spec_default_table_size() {
        let config = SearchConfig::default();
        assert_eq!(config.depth, 0);
        assert_eq!(config.transposition_table_size, 10_000_000);
    }
}
