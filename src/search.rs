//! `lodestone search`: find magics for every square and write them to disk.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use clap::Args;
use lodestone_core::Slider;
use lodestone_magic::{SearchConfig, search_all};
use tracing::info;

/// Search magic numbers for both sliders and save them as JSON.
#[derive(Args)]
pub struct SearchOptions {
    /// File to write.
    #[arg(long, short = 'o', default_value = "magics.json")]
    output: PathBuf,

    /// Number of worker threads (defaults to all available cores).
    #[arg(long, short = 't')]
    threads: Option<usize>,

    /// Base seed; the same seed reproduces the same file.
    #[arg(long, short = 's')]
    seed: Option<u64>,

    /// Candidates drawn per shift before giving the shift up.
    #[arg(long, short = 'a')]
    attempts: Option<u64>,

    /// Narrower shifts to try once the base shift works.
    #[arg(long)]
    extra_shift: Option<u8>,

    /// Wider shifts to fall back to when the base shift fails.
    #[arg(long)]
    max_widen: Option<u8>,

    /// Extra successes sampled per shift, keeping the smallest table.
    #[arg(long)]
    refinements: Option<u32>,
}

impl SearchOptions {
    fn config(&self) -> SearchConfig {
        let defaults = SearchConfig::default();
        SearchConfig {
            threads: self.threads.unwrap_or(defaults.threads),
            seed: self.seed.unwrap_or(defaults.seed),
            attempts_per_shift: self.attempts.unwrap_or(defaults.attempts_per_shift),
            refinements: self.refinements.unwrap_or(defaults.refinements),
            extra_shift: self.extra_shift.unwrap_or(defaults.extra_shift),
            max_widen: self.max_widen.unwrap_or(defaults.max_widen),
        }
    }
}

pub fn run(opts: &SearchOptions) -> Result<()> {
    let config = opts.config();
    let started = Instant::now();

    let set = search_all(&config).context("magic search failed")?;

    // Tables are rebuilt before anything is written so a bad set never reaches disk.
    set.build_tables().context("searched magics failed to build")?;

    let generated = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, false);
    set.to_magic_file(generated)
        .save(&opts.output)
        .with_context(|| format!("failed to write {}", opts.output.display()))?;

    info!(
        path = %opts.output.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "magic data written"
    );
    println!(
        "wrote {} (rook slots {}, bishop slots {})",
        opts.output.display(),
        set.table_slots(Slider::Rook),
        set.table_slots(Slider::Bishop),
    );
    Ok(())
}
