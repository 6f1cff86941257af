//! Integration tests for the full magic search.
//!
//! Runs every (slider, square) job, then checks the output the way the
//! runtime will consume it: persisted, reloaded and rebuilt into tables.

use lodestone_core::attacks::subsets;
use lodestone_core::{AttackTables, MagicFile, Slider, Square};
use lodestone_magic::{MagicSet, SearchConfig, search_all, verify_magic};

fn quick(threads: usize) -> SearchConfig {
    SearchConfig {
        threads,
        seed: 2024,
        attempts_per_shift: 500_000,
        refinements: 0,
        extra_shift: 0,
        max_widen: 2,
    }
}

fn assert_oracle_equivalence(tables: &AttackTables) {
    for slider in Slider::ALL {
        for sq in Square::all() {
            for occupancy in subsets(slider.relevant_mask(sq)) {
                assert_eq!(
                    tables.slider_attacks(slider, sq, occupancy),
                    slider.attacks_on_the_fly(sq, occupancy),
                    "{slider} on {sq}"
                );
            }
        }
    }
}

// ── Output ───────────────────────────────────────────────────────────────────

#[test]
fn searched_magics_build_correct_tables() {
    let set = search_all(&quick(4)).unwrap();

    for slider in Slider::ALL {
        for (sq, entry) in Square::all().zip(set.entries(slider).iter()) {
            assert_eq!(entry.mask, slider.relevant_mask(sq));
            verify_magic(slider, sq, entry.magic, entry.shift).unwrap();
        }
    }

    let tables = set.build_tables().unwrap();
    assert_oracle_equivalence(&tables);
}

#[test]
fn result_does_not_depend_on_thread_count() {
    let single: MagicSet = search_all(&quick(1)).unwrap();
    let parallel: MagicSet = search_all(&quick(3)).unwrap();
    assert_eq!(single, parallel);
}

// ── Persistence ──────────────────────────────────────────────────────────────

#[test]
fn magic_file_round_trips_through_disk() {
    let set = search_all(&quick(2)).unwrap();
    let file = set.to_magic_file("2026-10-19T09:30:00+00:00");
    assert_eq!(file.rook.len(), 64);
    assert_eq!(file.bishop.len(), 64);

    let path = std::env::temp_dir().join(format!("lodestone-magics-{}.json", std::process::id()));
    file.save(&path).unwrap();
    let reloaded = MagicFile::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(reloaded, file);
    assert_eq!(reloaded.entries(Slider::Rook).unwrap(), *set.entries(Slider::Rook));

    let tables = AttackTables::from_magic_file(&reloaded).unwrap();
    assert_oracle_equivalence(&tables);
}
