//! Chess move representation, bit-packed into a u32.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::piece::Piece;
use crate::square::Square;

// Private bit-field constants.
const SOURCE_MASK: u32 = 0x0000_003F;
const TARGET_MASK: u32 = 0x0000_0FC0;
const PIECE_MASK: u32 = 0x0000_F000;
const PROMO_MASK: u32 = 0x000F_0000;
const FLAGS_MASK: u32 = 0x00F0_0000;
const TARGET_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const PROMO_SHIFT: u32 = 16;
const FLAGS_SHIFT: u32 = 20;

/// The four boolean properties carried by a [`Move`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MoveFlags(u8);

impl MoveFlags {
    pub const NONE: MoveFlags = MoveFlags(0);
    pub const CAPTURE: MoveFlags = MoveFlags(1);
    pub const DOUBLE_PUSH: MoveFlags = MoveFlags(1 << 1);
    pub const EN_PASSANT: MoveFlags = MoveFlags(1 << 2);
    pub const CASTLING: MoveFlags = MoveFlags(1 << 3);

    /// Return `true` if every flag of `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: MoveFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Return the four flag bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Rebuild flags from the low four bits of `bits`.
    #[inline]
    pub const fn from_bits(bits: u8) -> MoveFlags {
        MoveFlags(bits & 0x0F)
    }
}

impl BitOr for MoveFlags {
    type Output = MoveFlags;
    #[inline]
    fn bitor(self, rhs: MoveFlags) -> MoveFlags {
        MoveFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for MoveFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: MoveFlags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for MoveFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(MoveFlags, &str); 4] = [
            (MoveFlags::CAPTURE, "CAPTURE"),
            (MoveFlags::DOUBLE_PUSH, "DOUBLE_PUSH"),
            (MoveFlags::EN_PASSANT, "EN_PASSANT"),
            (MoveFlags::CASTLING, "CASTLING"),
        ];
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            f.write_str("NONE")?;
        }
        Ok(())
    }
}

/// A chess move encoded in 32 bits.
///
/// ```text
/// bits  0-5:  source square   (0-63, a8 = 0)
/// bits  6-11: target square   (0-63)
/// bits 12-15: moving piece    (raw Piece byte)
/// bits 16-19: promotion piece (raw Piece byte, 0 = none)
/// bit  20:    capture
/// bit  21:    double pawn push
/// bit  22:    en passant
/// bit  23:    castling
/// ```
///
/// Raw 0 is the white pawn, which is never a promotion target, so it doubles
/// as "no promotion". Nothing is validated at encode time.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    /// Null move sentinel (all fields zero). Never produced by move generation.
    pub const NULL: Move = Move(0);

    /// Pack every field of a move.
    #[inline]
    pub const fn encode(
        source: Square,
        target: Square,
        piece: Piece,
        promotion: Option<Piece>,
        flags: MoveFlags,
    ) -> Move {
        let promo = match promotion {
            Some(p) => p.raw() as u32,
            None => 0,
        };
        Move(
            (source.index() as u32)
                | ((target.index() as u32) << TARGET_SHIFT)
                | ((piece.raw() as u32) << PIECE_SHIFT)
                | (promo << PROMO_SHIFT)
                | ((flags.bits() as u32) << FLAGS_SHIFT),
        )
    }

    /// A quiet move with no flags.
    #[inline]
    pub const fn quiet(source: Square, target: Square, piece: Piece) -> Move {
        Move::encode(source, target, piece, None, MoveFlags::NONE)
    }

    /// A plain capture.
    #[inline]
    pub const fn capture(source: Square, target: Square, piece: Piece) -> Move {
        Move::encode(source, target, piece, None, MoveFlags::CAPTURE)
    }

    /// Return the packed integer.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Extract the source square.
    #[inline]
    pub const fn source(self) -> Square {
        Square::from_index_unchecked((self.0 & SOURCE_MASK) as u8)
    }

    /// Extract the target square.
    #[inline]
    pub const fn target(self) -> Square {
        Square::from_index_unchecked(((self.0 & TARGET_MASK) >> TARGET_SHIFT) as u8)
    }

    /// Extract the moving piece.
    #[inline]
    pub const fn piece(self) -> Piece {
        match Piece::from_raw(((self.0 & PIECE_MASK) >> PIECE_SHIFT) as u8) {
            Some(piece) => piece,
            None => Piece::WHITE_PAWN,
        }
    }

    /// Extract the promotion piece, if any.
    #[inline]
    pub const fn promotion(self) -> Option<Piece> {
        match (self.0 & PROMO_MASK) >> PROMO_SHIFT {
            0 => None,
            raw => Piece::from_raw(raw as u8),
        }
    }

    /// Extract the flag bits.
    #[inline]
    pub const fn flags(self) -> MoveFlags {
        MoveFlags::from_bits(((self.0 & FLAGS_MASK) >> FLAGS_SHIFT) as u8)
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    pub const fn is_capture(self) -> bool {
        self.flags().contains(MoveFlags::CAPTURE)
    }

    pub const fn is_double_push(self) -> bool {
        self.flags().contains(MoveFlags::DOUBLE_PUSH)
    }

    pub const fn is_en_passant(self) -> bool {
        self.flags().contains(MoveFlags::EN_PASSANT)
    }

    pub const fn is_castling(self) -> bool {
        self.flags().contains(MoveFlags::CASTLING)
    }

    pub const fn is_promotion(self) -> bool {
        self.0 & PROMO_MASK != 0
    }

    /// Return the UCI string representation, e.g. `e7e8q`.
    pub fn to_uci(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "0000");
        }
        write!(f, "{}{}", self.source(), self.target())?;
        if let Some(promo) = self.promotion() {
            write!(f, "{}", promo.kind().letter())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {} {:?})", self.piece(), self, self.flags())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{Move, MoveFlags};
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    #[test]
    fn size_of_move() {
        assert_eq!(std::mem::size_of::<Move>(), 4);
    }

    #[test]
    fn quiet_move_fields() {
        let mv = Move::quiet(Square::G1, Square::F3, Piece::WHITE_KNIGHT);
        assert_eq!(mv.source(), Square::G1);
        assert_eq!(mv.target(), Square::F3);
        assert_eq!(mv.piece(), Piece::WHITE_KNIGHT);
        assert_eq!(mv.promotion(), None);
        assert_eq!(mv.flags(), MoveFlags::NONE);
        assert!(!mv.is_capture());
        assert!(!mv.is_null());
    }

    #[test]
    fn bit_layout_is_fixed() {
        let mv = Move::encode(
            Square::from_index(1).unwrap(),
            Square::from_index(2).unwrap(),
            Piece::BLACK_ROOK,
            Some(Piece::BLACK_QUEEN),
            MoveFlags::CAPTURE | MoveFlags::CASTLING,
        );
        let expected = 1 | (2 << 6) | (11 << 12) | (12 << 16) | (0b1001 << 20);
        assert_eq!(mv.raw(), expected);
    }

    #[test]
    fn exhaustive_roundtrip() {
        let flag_sets: Vec<MoveFlags> = (0u8..16).map(MoveFlags::from_bits).collect();
        for source in Square::all() {
            for target in Square::all() {
                for piece in Piece::ALL {
                    let mv = Move::quiet(source, target, piece);
                    assert_eq!((mv.source(), mv.target(), mv.piece()), (source, target, piece));
                }
            }
        }
        for piece in Piece::ALL {
            let promos = PieceKind::PROMOTIONS
                .iter()
                .map(|&kind| Some(Piece::new(kind, piece.color())))
                .chain([None]);
            for promotion in promos {
                for &flags in &flag_sets {
                    let mv = Move::encode(Square::B7, Square::A8, piece, promotion, flags);
                    assert_eq!(mv.source(), Square::B7);
                    assert_eq!(mv.target(), Square::A8);
                    assert_eq!(mv.piece(), piece);
                    assert_eq!(mv.promotion(), promotion);
                    assert_eq!(mv.flags(), flags);
                }
            }
        }
    }

    #[test]
    fn flag_accessors() {
        let ep = Move::encode(
            Square::E5,
            Square::D6,
            Piece::WHITE_PAWN,
            None,
            MoveFlags::CAPTURE | MoveFlags::EN_PASSANT,
        );
        assert!(ep.is_capture() && ep.is_en_passant());
        assert!(!ep.is_double_push() && !ep.is_castling());

        let push = Move::encode(Square::E2, Square::E4, Piece::WHITE_PAWN, None, MoveFlags::DOUBLE_PUSH);
        assert!(push.is_double_push());
        assert!(!push.is_capture());

        let castle = Move::encode(Square::E8, Square::G8, Piece::BLACK_KING, None, MoveFlags::CASTLING);
        assert!(castle.is_castling());
    }

    #[test]
    fn uci_strings() {
        assert_eq!(Move::quiet(Square::E2, Square::E4, Piece::WHITE_PAWN).to_uci(), "e2e4");
        let promo = Move::encode(
            Square::E7,
            Square::E8,
            Piece::WHITE_PAWN,
            Some(Piece::WHITE_QUEEN),
            MoveFlags::NONE,
        );
        assert!(promo.is_promotion());
        assert_eq!(promo.to_uci(), "e7e8q");
        let under = Move::encode(
            Square::B2,
            Square::A1,
            Piece::BLACK_PAWN,
            Some(Piece::BLACK_KNIGHT),
            MoveFlags::CAPTURE,
        );
        assert_eq!(under.to_string(), "b2a1n");
    }

    #[test]
    fn null_move() {
        assert!(Move::NULL.is_null());
        assert_eq!(Move::NULL.to_string(), "0000");
        assert_eq!(Move::NULL.source(), Square::A8);
    }

    #[test]
    fn debug_shows_flags() {
        let mv = Move::capture(Square::D4, Square::E5, Piece::WHITE_BISHOP);
        let debug_str = format!("{mv:?}");
        assert!(debug_str.contains("d4e5"), "{debug_str}");
        assert!(debug_str.contains("CAPTURE"), "{debug_str}");
        assert_eq!(format!("{:?}", MoveFlags::NONE), "NONE");
    }

    #[test]
    fn equality_is_bitwise() {
        let a = Move::quiet(Square::E2, Square::E4, Piece::WHITE_PAWN);
        let b = Move::encode(Square::E2, Square::E4, Piece::WHITE_PAWN, None, MoveFlags::DOUBLE_PUSH);
        assert_ne!(a, b);

        let set: HashSet<Move> = [a, a, b].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
