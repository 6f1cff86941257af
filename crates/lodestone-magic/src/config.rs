//! Tunables of the magic-number search.

use std::num::NonZeroUsize;
use std::thread;

/// Seed used when none is given; fixed so default runs are reproducible.
pub const DEFAULT_SEED: u64 = 0x0001_0DE5;

/// Budget and shift window of a search run.
///
/// Only the absence of destructive collisions is guaranteed; the window only
/// trades search time against table size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Worker threads used by [`search_all`](crate::search_all).
    pub threads: usize,
    /// Base seed; each (slider, square) job derives its own stream from it.
    pub seed: u64,
    /// Candidates drawn per shift before the shift is given up.
    pub attempts_per_shift: u64,
    /// Extra successes sampled at one shift, keeping the smallest table.
    pub refinements: u32,
    /// How many shifts above `64 - bits` to try once the base shift works.
    pub extra_shift: u8,
    /// How many shifts below `64 - bits` to fall back to when the base fails.
    pub max_widen: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threads: thread::available_parallelism().map_or(1, NonZeroUsize::get),
            seed: DEFAULT_SEED,
            attempts_per_shift: 100_000,
            refinements: 8,
            extra_shift: 1,
            max_widen: 1,
        }
    }
}
