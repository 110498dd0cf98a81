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

//! The cancellation token shared between the search's calling thread and
//! the auxiliary timer thread (§5). The core itself has no notion of
//! threads; this is the one place the engine crosses one.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
/// Shared state a search polls at move-loop boundaries. `over` is set by
/// at most one auxiliary timer thread; everything else is only ever
/// touched by the search thread itself, so relaxed ordering on `over` is
/// sufficient (it only ever needs to become visible eventually, never to
/// establish a happens-before relationship with other memory).
pub struct SearchLimit {
    over: AtomicBool,
    num_nodes: AtomicU64,
    nodes_cap: Mutex<Option<u64>>,
    start_time: Mutex<Instant>,
    search_duration: Mutex<Option<Duration>>,
}

impl SearchLimit {
    #[must_use]
    pub fn new() -> SearchLimit {
        SearchLimit {
            over: AtomicBool::new(false),
            num_nodes: AtomicU64::new(0),
            nodes_cap: Mutex::new(None),
            start_time: Mutex::new(Instant::now()),
            search_duration: Mutex::new(None),
        }
    }

    /// Reset the clock and node counter, and clear cancellation, readying
    /// the limit for a fresh call to `find_best_move`.
    pub fn start(&self) {
        self.over.store(false, Ordering::Relaxed);
        self.num_nodes.store(0, Ordering::Relaxed);
        *self.start_time.lock().unwrap() = Instant::now();
    }

    pub fn set_nodes_cap(&self, cap: Option<u64>) {
        *self.nodes_cap.lock().unwrap() = cap;
    }

    pub fn set_search_duration(&self, duration: Option<Duration>) {
        *self.search_duration.lock().unwrap() = duration;
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        if self.over.load(Ordering::Relaxed) {
            return true;
        }
        if let Some(duration) = *self.search_duration.lock().unwrap() {
            if self.start_time.lock().unwrap().elapsed() >= duration {
                return true;
            }
        }
        if let Some(cap) = *self.nodes_cap.lock().unwrap() {
            if self.num_nodes.load(Ordering::Relaxed) >= cap {
                return true;
            }
        }
        false
    }

    /// Called by the auxiliary timer thread (or anyone else) to force
    /// cancellation.
    pub fn cancel(&self) {
        self.over.store(true, Ordering::Relaxed);
    }

    pub fn add_nodes(&self, n: u64) {
        self.num_nodes.fetch_add(n, Ordering::Relaxed);
    }

    #[must_use]
    pub fn num_nodes(&self) -> u64 {
        self.num_nodes.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.lock().unwrap().elapsed()
    }
}

impl Default for SearchLimit {
    fn default() -> SearchLimit {
        SearchLimit::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_limit_is_not_over() {
        let limit = SearchLimit::new();
        assert!(!limit.is_over());
    }

    #[test]
    fn explicit_cancel_is_observed() {
        let limit = SearchLimit::new();
        limit.cancel();
        assert!(limit.is_over());
    }

    #[test]
    fn start_clears_a_prior_cancellation() {
        let limit = SearchLimit::new();
        limit.cancel();
        limit.start();
        assert!(!limit.is_over());
    }

    #[test]
    fn node_cap_triggers_cancellation() {
        let limit = SearchLimit::new();
        limit.set_nodes_cap(Some(10));
        limit.add_nodes(10);
        assert!(limit.is_over());
    }
}
