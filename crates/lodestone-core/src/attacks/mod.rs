//! Attack generation: ray oracle, occupancy enumeration, magic tables and
//! precomputed leaper tables.

mod leapers;
mod magic;
mod magic_data;
mod occupancy;
mod rays;

use std::fmt;

use crate::bitboard::Bitboard;
use crate::color::Color;
use crate::square::Square;

pub use self::magic::{AttackTables, MAX_SHIFT, MIN_SHIFT, MagicEntry, MagicTable, magic_index};
pub use self::magic_data::{EntryRecord, FORMAT_VERSION, MagicFile, Metadata};
pub use self::occupancy::{Subsets, occupancy_at, subsets};
pub use self::rays::{bishop_attacks_on_the_fly, bishop_mask, rook_attacks_on_the_fly, rook_mask};

use self::leapers::{KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};

/// A piece type with its own magic table. Queens combine both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slider {
    Rook,
    Bishop,
}

impl Slider {
    /// Both sliders, in the order they are persisted.
    pub const ALL: [Slider; 2] = [Slider::Rook, Slider::Bishop];

    /// Lowercase name, as used for the sections of the magic data file.
    pub const fn name(self) -> &'static str {
        match self {
            Slider::Rook => "rook",
            Slider::Bishop => "bishop",
        }
    }

    /// Squares whose occupancy can change this slider's attacks from `sq`.
    ///
    /// Rays stop one square short of the board edge and never include `sq`.
    #[inline]
    pub const fn relevant_mask(self, sq: Square) -> Bitboard {
        let bits = match self {
            Slider::Rook => rook_mask(sq.index()),
            Slider::Bishop => bishop_mask(sq.index()),
        };
        Bitboard::new(bits)
    }

    /// Attacks from `sq` computed by walking every ray until the first blocker.
    ///
    /// This is the ground truth that every magic table is checked against.
    #[inline]
    pub const fn attacks_on_the_fly(self, sq: Square, blockers: Bitboard) -> Bitboard {
        let bits = match self {
            Slider::Rook => rook_attacks_on_the_fly(sq.index(), blockers.inner()),
            Slider::Bishop => bishop_attacks_on_the_fly(sq.index(), blockers.inner()),
        };
        Bitboard::new(bits)
    }
}

impl fmt::Display for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Return the squares a knight on `sq` attacks.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index()]
}

/// Return the squares a king on `sq` attacks.
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index()]
}

/// Return the squares a pawn of `color` on `sq` attacks.
#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squares(list: &[Square]) -> Bitboard {
        list.iter().copied().collect()
    }

    // --- Leaper constants on e4 ---

    #[test]
    fn knight_e4_constant() {
        assert_eq!(knight_attacks(Square::E4), Bitboard::new(0x0028_4400_4428_0000));
        assert_eq!(
            knight_attacks(Square::E4),
            squares(&[
                Square::D6, Square::F6, Square::C5, Square::G5,
                Square::C3, Square::G3, Square::D2, Square::F2,
            ])
        );
    }

    #[test]
    fn king_e4_constant() {
        assert_eq!(king_attacks(Square::E4), Bitboard::new(0x0000_3828_3800_0000));
    }

    #[test]
    fn pawn_e4_constants() {
        assert_eq!(pawn_attacks(Color::White, Square::E4), Bitboard::new(0x0000_0000_2800_0000));
        assert_eq!(pawn_attacks(Color::Black, Square::E4), Bitboard::new(0x0000_2800_0000_0000));
        assert_eq!(
            pawn_attacks(Color::White, Square::E4),
            squares(&[Square::D5, Square::F5])
        );
    }

    #[test]
    fn leapers_in_corners() {
        assert_eq!(knight_attacks(Square::A1).count(), 2);
        assert_eq!(king_attacks(Square::H8).count(), 3);
    }

    #[test]
    fn pawn_no_wrap() {
        assert_eq!(pawn_attacks(Color::White, Square::A4), Square::B5.bitboard());
        assert_eq!(pawn_attacks(Color::White, Square::H4), Square::G5.bitboard());
        assert_eq!(pawn_attacks(Color::Black, Square::A5), Square::B4.bitboard());
        assert_eq!(pawn_attacks(Color::Black, Square::H5), Square::G4.bitboard());
    }

    #[test]
    fn pawns_on_far_rank_attack_nothing() {
        assert!(pawn_attacks(Color::White, Square::E8).is_empty());
        assert!(pawn_attacks(Color::Black, Square::E1).is_empty());
    }

    // --- Oracle scenarios ---

    #[test]
    fn rook_d4_empty_board() {
        let mask = Slider::Rook.relevant_mask(Square::D4);
        assert_eq!(mask.count(), 10);
        assert_eq!(mask, Bitboard::new(0x0008_0876_0808_0800));

        let attacks = Slider::Rook.attacks_on_the_fly(Square::D4, Bitboard::EMPTY);
        assert_eq!(attacks.count(), 14);
        assert_eq!(attacks, Bitboard::new(0x0808_08f7_0808_0808));
        assert!(!attacks.contains(Square::D4));
    }

    #[test]
    fn rook_d4_with_blockers() {
        let blockers = squares(&[Square::D7, Square::D3, Square::F4, Square::B4, Square::A4]);
        let attacks = Slider::Rook.attacks_on_the_fly(Square::D4, blockers);
        let expected = squares(&[
            Square::D5, Square::D6, Square::D7,
            Square::E4, Square::F4,
            Square::C4, Square::B4,
            Square::D3,
        ]);
        assert_eq!(attacks, expected);
        assert!(!attacks.contains(Square::A4), "a4 sits behind the b4 blocker");
    }

    #[test]
    fn bishop_a1_blocked_on_f6() {
        let attacks = Slider::Bishop.attacks_on_the_fly(Square::A1, Square::F6.bitboard());
        assert_eq!(
            attacks,
            squares(&[Square::B2, Square::C3, Square::D4, Square::E5, Square::F6])
        );
    }

    #[test]
    fn masks_exclude_origin_and_edges() {
        for slider in Slider::ALL {
            for sq in Square::all() {
                let mask = slider.relevant_mask(sq);
                assert!(!mask.contains(sq), "{slider} mask on {sq} contains its origin");
                let full = slider.attacks_on_the_fly(sq, Bitboard::EMPTY);
                assert!(mask.is_subset_of(full), "{slider} mask on {sq} leaves the rays");
            }
        }
        assert_eq!(Slider::Rook.relevant_mask(Square::A1).count(), 12);
        assert_eq!(Slider::Bishop.relevant_mask(Square::D4).count(), 9);
    }

    #[test]
    fn slider_names() {
        assert_eq!(Slider::Rook.to_string(), "rook");
        assert_eq!(Slider::Bishop.to_string(), "bishop");
    }
}
