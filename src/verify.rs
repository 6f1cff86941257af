//! `lodestone verify`: rebuild tables from magic data and compare every
//! lookup against the ray-walking oracle.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use lodestone_core::attacks::subsets;
use lodestone_core::{AttackTables, MagicFile, Slider, Square};
use tracing::info;

/// Check a magic data file (the embedded data when no path is given).
#[derive(Args)]
pub struct VerifyOptions {
    /// Magic data file to check.
    path: Option<PathBuf>,
}

pub fn run(opts: &VerifyOptions) -> Result<()> {
    let file = match &opts.path {
        Some(path) => MagicFile::load(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => MagicFile::embedded().context("embedded magic data is invalid")?,
    };
    let tables = AttackTables::from_magic_file(&file).context("magic data failed to build")?;

    let mut checked = 0usize;
    let mut mismatches = 0usize;
    for slider in Slider::ALL {
        for sq in Square::all() {
            for occupancy in subsets(tables.mask_attacks(slider, sq)) {
                checked += 1;
                if tables.slider_attacks(slider, sq, occupancy) != slider.attacks_on_the_fly(sq, occupancy) {
                    mismatches += 1;
                }
            }
        }
    }

    if mismatches > 0 {
        bail!("{mismatches} of {checked} lookups disagree with the oracle");
    }

    info!(checked, generated = %file.metadata.generated, "magic data verified");
    println!(
        "ok: {checked} occupancies (rook slots {}, bishop slots {})",
        tables.table(Slider::Rook).len(),
        tables.table(Slider::Bishop).len(),
    );
    Ok(())
}
