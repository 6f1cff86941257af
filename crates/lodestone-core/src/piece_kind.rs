//! Piece kinds, without color.

use std::fmt;

use crate::attacks::Slider;

/// The kind of a chess piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// Total number of piece kinds.
    pub const COUNT: usize = 6;

    /// All piece kinds in index order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to, strongest first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Return the index (0..5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Return the kind stored in the low three bits of `bits`, if valid.
    #[inline]
    pub const fn from_index(bits: u8) -> Option<PieceKind> {
        match bits {
            0 => Some(PieceKind::Pawn),
            1 => Some(PieceKind::Knight),
            2 => Some(PieceKind::Bishop),
            3 => Some(PieceKind::Rook),
            4 => Some(PieceKind::Queen),
            5 => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Return the lowercase letter used for this kind.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Return the magic-table sliders whose rays this kind moves along.
    ///
    /// Queens use both tables; non-sliding kinds use none.
    pub const fn sliders(self) -> &'static [Slider] {
        match self {
            PieceKind::Bishop => &[Slider::Bishop],
            PieceKind::Rook => &[Slider::Rook],
            PieceKind::Queen => &[Slider::Rook, Slider::Bishop],
            _ => &[],
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::PieceKind;
    use crate::attacks::Slider;

    #[test]
    fn index_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_index(kind.index() as u8), Some(kind));
        }
        assert_eq!(PieceKind::from_index(6), None);
    }

    #[test]
    fn letters_are_lowercase_and_distinct() {
        let letters: String = PieceKind::ALL.into_iter().map(PieceKind::letter).collect();
        assert_eq!(letters, "pnbrqk");
        assert_eq!(PieceKind::Queen.to_string(), "q");
    }

    #[test]
    fn queen_composes_both_sliders() {
        assert_eq!(PieceKind::Queen.sliders(), &[Slider::Rook, Slider::Bishop]);
        assert!(PieceKind::Knight.sliders().is_empty());
    }
}
