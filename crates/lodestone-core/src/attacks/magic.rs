//! Magic bitboard tables for sliding piece attack generation.
//!
//! Tables are built once from verified [`MagicEntry`] values and are read-only
//! afterwards. [`AttackTables`] owns both slider tables; build it during start-up
//! and share it by reference with every move generator.

use std::fmt;
use std::path::Path;

use tracing::{debug, info};

use crate::bitboard::Bitboard;
use crate::color::Color;
use crate::error::MagicDataError;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use super::magic_data::MagicFile;
use super::occupancy::subsets;
use super::{Slider, king_attacks, knight_attacks, pawn_attacks};

/// Smallest shift accepted from magic data (at most 2^20 slots per square).
pub const MIN_SHIFT: u8 = 44;

/// Largest shift accepted from magic data (at least 2 slots per square).
pub const MAX_SHIFT: u8 = 63;

/// Hash parameters of one (slider, square) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MagicEntry {
    /// Multiplier applied to the masked occupancy.
    pub magic: u64,
    /// Right shift applied to the product.
    pub shift: u8,
    /// Relevant-occupancy mask of the square.
    pub mask: Bitboard,
}

impl MagicEntry {
    /// Number of slots this entry addresses: `2^(64 - shift)`.
    #[inline]
    pub const fn table_len(&self) -> usize {
        1usize << (64 - self.shift)
    }

    /// Table index of a live occupancy (masked here, so any board works).
    #[inline(always)]
    pub fn index(&self, occupied: Bitboard) -> usize {
        magic_index(occupied & self.mask, self.magic, self.shift)
    }
}

/// Hash an already-masked occupancy: `(occupancy * magic) >> shift`.
#[inline(always)]
pub fn magic_index(masked: Bitboard, magic: u64, shift: u8) -> usize {
    ((masked * magic) >> shift) as usize
}

/// Dense attack table for one slider over all 64 squares.
///
/// Each square owns the slice `attacks[offsets[sq]..offsets[sq] + table_len]`.
pub struct MagicTable {
    slider: Slider,
    entries: [MagicEntry; 64],
    offsets: [usize; 64],
    attacks: Vec<Bitboard>,
}

impl MagicTable {
    /// Build the table by storing the oracle's answer for every subset of every mask.
    ///
    /// Fails if an entry has a shift outside [`MIN_SHIFT`]`..=`[`MAX_SHIFT`], a mask
    /// that is not the square's relevant mask, or a magic that sends two
    /// occupancies with different attack sets to the same slot.
    pub fn build(slider: Slider, entries: [MagicEntry; 64]) -> Result<MagicTable, MagicDataError> {
        let mut offsets = [0usize; 64];
        let mut total = 0usize;

        for (sq, entry) in Square::all().zip(entries.iter()) {
            if !(MIN_SHIFT..=MAX_SHIFT).contains(&entry.shift) {
                return Err(MagicDataError::ShiftOutOfRange {
                    slider,
                    square: sq,
                    shift: entry.shift,
                    min: MIN_SHIFT,
                    max: MAX_SHIFT,
                });
            }
            let expected = slider.relevant_mask(sq);
            if entry.mask != expected {
                return Err(MagicDataError::MaskMismatch {
                    slider,
                    square: sq,
                    found: entry.mask.inner(),
                    expected: expected.inner(),
                });
            }
            offsets[sq.index()] = total;
            total += entry.table_len();
        }

        // Slider attack sets are never empty, so EMPTY marks an unwritten slot.
        let mut attacks = vec![Bitboard::EMPTY; total];

        for (sq, entry) in Square::all().zip(entries.iter()) {
            let base = offsets[sq.index()];
            for occupancy in subsets(entry.mask) {
                let index = magic_index(occupancy, entry.magic, entry.shift);
                let truth = slider.attacks_on_the_fly(sq, occupancy);
                let slot = &mut attacks[base + index];
                if *slot == Bitboard::EMPTY {
                    *slot = truth;
                } else if *slot != truth {
                    return Err(MagicDataError::DestructiveCollision { slider, square: sq, index });
                }
            }
        }

        debug!(%slider, slots = total, "built magic table");
        Ok(MagicTable { slider, entries, offsets, attacks })
    }

    /// Attacks from `sq` given the live `occupied` bitboard.
    #[inline]
    pub fn attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let entry = &self.entries[sq.index()];
        self.attacks[self.offsets[sq.index()] + entry.index(occupied)]
    }

    /// The slider this table answers for.
    #[inline]
    pub fn slider(&self) -> Slider {
        self.slider
    }

    /// The hash parameters of `sq`.
    #[inline]
    pub fn entry(&self, sq: Square) -> &MagicEntry {
        &self.entries[sq.index()]
    }

    /// All 64 entries in square order.
    pub fn entries(&self) -> &[MagicEntry; 64] {
        &self.entries
    }

    /// Total number of slots across all squares.
    pub fn len(&self) -> usize {
        self.attacks.len()
    }

    /// Always `false` for a built table; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }
}

impl fmt::Debug for MagicTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MagicTable")
            .field("slider", &self.slider)
            .field("slots", &self.attacks.len())
            .finish()
    }
}

/// Rook and bishop magic tables, built together and published read-only.
///
/// Lookups take `&self` and never allocate, so one instance can be shared
/// across threads once construction has returned.
#[derive(Debug)]
pub struct AttackTables {
    rook: MagicTable,
    bishop: MagicTable,
}

impl AttackTables {
    /// Build from explicit rook and bishop entries.
    pub fn from_entries(
        rook: [MagicEntry; 64],
        bishop: [MagicEntry; 64],
    ) -> Result<AttackTables, MagicDataError> {
        Ok(AttackTables {
            rook: MagicTable::build(Slider::Rook, rook)?,
            bishop: MagicTable::build(Slider::Bishop, bishop)?,
        })
    }

    /// Build from a parsed magic data file.
    pub fn from_magic_file(file: &MagicFile) -> Result<AttackTables, MagicDataError> {
        let tables = AttackTables::from_entries(
            file.entries(Slider::Rook)?,
            file.entries(Slider::Bishop)?,
        )?;
        info!(
            generated = %file.metadata.generated,
            slots = tables.rook.len() + tables.bishop.len(),
            "attack tables ready"
        );
        Ok(tables)
    }

    /// Build from the magic data compiled into this crate.
    pub fn embedded() -> Result<AttackTables, MagicDataError> {
        AttackTables::from_magic_file(&MagicFile::embedded()?)
    }

    /// Build from a magic data file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<AttackTables, MagicDataError> {
        AttackTables::from_magic_file(&MagicFile::load(path)?)
    }

    /// The table of one slider.
    #[inline]
    pub fn table(&self, slider: Slider) -> &MagicTable {
        match slider {
            Slider::Rook => &self.rook,
            Slider::Bishop => &self.bishop,
        }
    }

    /// Relevant-occupancy mask of `slider` on `sq`, as stored in the table.
    #[inline]
    pub fn mask_attacks(&self, slider: Slider, sq: Square) -> Bitboard {
        self.table(slider).entry(sq).mask
    }

    /// Attacks of `slider` from `sq` given `occupied` squares.
    #[inline]
    pub fn slider_attacks(&self, slider: Slider, sq: Square, occupied: Bitboard) -> Bitboard {
        self.table(slider).attacks(sq, occupied)
    }

    /// Return rook attacks from `sq` given `occupied` squares.
    #[inline]
    pub fn rook_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.rook.attacks(sq, occupied)
    }

    /// Return bishop attacks from `sq` given `occupied` squares.
    #[inline]
    pub fn bishop_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.bishop.attacks(sq, occupied)
    }

    /// Return queen attacks from `sq` given `occupied` squares.
    #[inline]
    pub fn queen_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.rook_attacks(sq, occupied) | self.bishop_attacks(sq, occupied)
    }

    /// Attacks of any piece kind. `color` only matters for pawns.
    pub fn piece_attacks(
        &self,
        kind: PieceKind,
        color: Color,
        sq: Square,
        occupied: Bitboard,
    ) -> Bitboard {
        match kind {
            PieceKind::Pawn => pawn_attacks(color, sq),
            PieceKind::Knight => knight_attacks(sq),
            PieceKind::King => king_attacks(sq),
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => kind
                .sliders()
                .iter()
                .fold(Bitboard::EMPTY, |acc, &slider| acc | self.slider_attacks(slider, sq, occupied)),
        }
    }
}
