//! Parallel dispatch of the 128 independent (slider, square) searches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use lodestone_core::attacks::MagicEntry;
use lodestone_core::{AttackTables, MagicDataError, MagicFile, Slider, Square};
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::error::SearchError;

use super::{MagicCandidate, search_best_magic};

/// Complete search output: one entry per square for both sliders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicSet {
    rook: [MagicEntry; 64],
    bishop: [MagicEntry; 64],
    attempts: u64,
}

impl MagicSet {
    /// Entries of one slider, indexed by square.
    pub fn entries(&self, slider: Slider) -> &[MagicEntry; 64] {
        match slider {
            Slider::Rook => &self.rook,
            Slider::Bishop => &self.bishop,
        }
    }

    /// Total slots the tables built from this set will allocate for `slider`.
    pub fn table_slots(&self, slider: Slider) -> usize {
        self.entries(slider).iter().map(MagicEntry::table_len).sum()
    }

    /// Candidates drawn over the whole run.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// The persisted form, stamped with `generated`.
    pub fn to_magic_file(&self, generated: impl Into<String>) -> MagicFile {
        MagicFile::new(generated, &self.rook, &self.bishop)
    }

    /// Build lookup tables straight from the search output.
    pub fn build_tables(&self) -> Result<AttackTables, MagicDataError> {
        AttackTables::from_entries(self.rook, self.bishop)
    }

    fn from_candidates(candidates: impl IntoIterator<Item = MagicCandidate>) -> MagicSet {
        let mut set = MagicSet {
            rook: [MagicEntry::default(); 64],
            bishop: [MagicEntry::default(); 64],
            attempts: 0,
        };
        for candidate in candidates {
            let slot = match candidate.slider {
                Slider::Rook => &mut set.rook,
                Slider::Bishop => &mut set.bishop,
            };
            slot[candidate.square.index()] = candidate.entry;
            set.attempts += candidate.attempts;
        }
        set
    }
}

/// Seed of one job, mixed from the run seed so every job gets its own stream.
pub fn job_seed(seed: u64, slider: Slider, square: Square) -> u64 {
    let slider_bit = match slider {
        Slider::Rook => 0,
        Slider::Bishop => 64,
    };
    splitmix64(seed ^ splitmix64((slider_bit + square.index()) as u64))
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn run_job(slider: Slider, square: Square, config: &SearchConfig) -> Result<MagicCandidate, SearchError> {
    let mut rng = fastrand::Rng::with_seed(job_seed(config.seed, slider, square));
    search_best_magic(slider, square, config, &mut rng)
}

/// Run jobs in order until one fails or `stop` is raised between two jobs.
///
/// A failure raises `stop` so the other workers give up after their current job.
fn run_batch<'a>(
    jobs: impl Iterator<Item = &'a (Slider, Square)>,
    config: &SearchConfig,
    stop: &AtomicBool,
) -> Result<Vec<MagicCandidate>, SearchError> {
    let mut batch = Vec::new();
    for &(slider, sq) in jobs {
        match run_job(slider, sq, config) {
            Ok(candidate) => batch.push(candidate),
            Err(err) => {
                stop.store(true, Ordering::Relaxed);
                return Err(err);
            }
        }
        if stop.load(Ordering::Relaxed) {
            break;
        }
    }
    Ok(batch)
}

/// Search every (slider, square) pair on `config.threads` workers.
///
/// Worker `w` takes jobs `w`, `w + threads`, ... in a fixed order and each job
/// seeds its own generator, so the result does not depend on the thread count
/// or on scheduling. The first failing job stops the run.
pub fn search_all(config: &SearchConfig) -> Result<MagicSet, SearchError> {
    let jobs: Vec<(Slider, Square)> = Slider::ALL
        .into_iter()
        .flat_map(|slider| Square::all().map(move |sq| (slider, sq)))
        .collect();
    let threads = config.threads.clamp(1, jobs.len());
    let stop = AtomicBool::new(false);

    info!(threads, jobs = jobs.len(), seed = config.seed, "starting magic search");

    let batches: Vec<thread::Result<Result<Vec<MagicCandidate>, SearchError>>> = if threads == 1 {
        // Single-thread fast path, no scope overhead
        vec![Ok(run_batch(jobs.iter(), config, &stop))]
    } else {
        thread::scope(|s| {
            let handles: Vec<_> = (0..threads)
                .map(|worker| {
                    let jobs = &jobs;
                    let stop = &stop;
                    s.spawn(move || {
                        let batch = run_batch(jobs.iter().skip(worker).step_by(threads), config, stop);
                        debug!(worker, ok = batch.is_ok(), "worker finished");
                        batch
                    })
                })
                .collect();
            // Join every handle before leaving the scope so a panic is reported, not rethrown.
            handles.into_iter().map(|handle| handle.join()).collect()
        })
    };

    let mut candidates = Vec::with_capacity(jobs.len());
    for batch in batches {
        let batch = batch.map_err(|_| SearchError::WorkerPanicked)?;
        candidates.extend(batch?);
    }

    let set = MagicSet::from_candidates(candidates);
    info!(
        rook_slots = set.table_slots(Slider::Rook),
        bishop_slots = set.table_slots(Slider::Bishop),
        attempts = set.attempts(),
        "magic search complete"
    );
    Ok(set)
}
