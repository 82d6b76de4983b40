//! Run counters, threaded through the enumerator by mutable reference.
//!
//! Mirrors `RunData` in the original C: a plain in-out parameter, no
//! global state (spec.md §9, "Counters as a process-wide mutable record").

/// Counts of trees and HISTs found, both for the current call and
/// accumulated across an entire session (e.g. every vertex-deletion run
/// of the hypohisterian orchestrator, or every graph read by the CLI).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub hists_this_run: u64,
    pub hists_total: u64,
    pub trees_this_run: u64,
    pub trees_total: u64,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes the per-run fields before a fresh `find_hists`/
    /// `find_spanning_trees` call; cumulative totals are untouched.
    pub fn start_run(&mut self) {
        self.hists_this_run = 0;
        self.trees_this_run = 0;
    }

    /// Folds the per-run fields into the cumulative totals after a call
    /// completes.
    pub fn finish_run(&mut self) {
        self.hists_total += self.hists_this_run;
        self.trees_total += self.trees_this_run;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_finish_run_accumulate() {
        let mut c = Counters::new();
        c.start_run();
        c.hists_this_run = 2;
        c.trees_this_run = 5;
        c.finish_run();

        c.start_run();
        assert_eq!(c.hists_this_run, 0);
        assert_eq!(c.trees_this_run, 0);
        c.hists_this_run = 1;
        c.trees_this_run = 3;
        c.finish_run();

        assert_eq!(c.hists_total, 3);
        assert_eq!(c.trees_total, 8);
    }
}
