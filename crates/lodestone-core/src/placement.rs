//! Piece placement: one bitboard per colored piece.

use std::fmt;

use crate::bitboard::Bitboard;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Where every piece stands. No side to move, castling or clocks.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PiecePlacement {
    pieces: [Bitboard; Piece::COUNT],
}

impl PiecePlacement {
    /// An empty board.
    pub const fn empty() -> PiecePlacement {
        PiecePlacement { pieces: [Bitboard::EMPTY; Piece::COUNT] }
    }

    /// The standard starting position.
    pub fn starting() -> PiecePlacement {
        let mut placement = PiecePlacement::empty();
        placement.pieces[Piece::WHITE_PAWN.index()] = Bitboard::RANK_2;
        placement.pieces[Piece::BLACK_PAWN.index()] = Bitboard::RANK_7;
        for (color, rank) in [(Color::White, Bitboard::RANK_1), (Color::Black, Bitboard::RANK_8)] {
            for sq in rank {
                placement.put(Piece::new(BACK_RANK[sq.col() as usize], color), sq);
            }
        }
        placement
    }

    /// Place `piece` on `sq`, replacing whatever stood there.
    pub fn put(&mut self, piece: Piece, sq: Square) {
        self.remove(sq);
        self.pieces[piece.index()] |= sq.bitboard();
    }

    /// Clear `sq`, returning the piece that stood there.
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.piece_on(sq)?;
        self.pieces[piece.index()] = self.pieces[piece.index()].without(sq);
        Some(piece)
    }

    /// Squares holding `piece`.
    #[inline]
    pub fn pieces(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.index()]
    }

    /// Squares holding pieces of `color`.
    pub fn side(&self, color: Color) -> Bitboard {
        PieceKind::ALL
            .into_iter()
            .fold(Bitboard::EMPTY, |acc, kind| acc | self.pieces(Piece::new(kind, color)))
    }

    /// Squares holding any piece.
    pub fn occupied(&self) -> Bitboard {
        self.pieces.iter().fold(Bitboard::EMPTY, |acc, &bb| acc | bb)
    }

    /// The piece on `sq`, if any.
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        Piece::ALL.into_iter().find(|piece| self.pieces(*piece).contains(sq))
    }
}

/// Later entries replace earlier ones on the same square.
impl FromIterator<(Piece, Square)> for PiecePlacement {
    fn from_iter<I: IntoIterator<Item = (Piece, Square)>>(iter: I) -> PiecePlacement {
        let mut placement = PiecePlacement::empty();
        for (piece, sq) in iter {
            placement.put(piece, sq);
        }
        placement
    }
}

/// 8x8 grid of piece letters, rank 8 at the top.
impl fmt::Debug for PiecePlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for sq in Square::all() {
            if sq.col() == 0 {
                write!(f, "  {} ", sq.rank_char())?;
            }
            match self.piece_on(sq) {
                Some(piece) => write!(f, "{piece} ")?,
                None => write!(f, ". ")?,
            }
            if sq.col() == 7 {
                writeln!(f)?;
            }
        }
        write!(f, "    a b c d e f g h")
    }
}
