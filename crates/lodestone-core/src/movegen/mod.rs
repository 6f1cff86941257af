//! Pseudo-legal move generation over a [`PiecePlacement`].
//!
//! Moves may leave the mover's king in check and castling is never emitted;
//! legality filtering belongs to the caller.

mod king;
mod knights;
mod pawns;
mod sliders;

use crate::attacks::AttackTables;
use crate::bitboard::Bitboard;
use crate::chess_move::{Move, MoveFlags};
use crate::color::Color;
use crate::piece::Piece;
use crate::placement::PiecePlacement;
use crate::square::Square;

use self::king::gen_king;
use self::knights::gen_knights;
use self::pawns::gen_pawns;
use self::sliders::gen_sliders;

/// Stack-allocated buffer for generated moves. Capacity 256 covers the theoretical max of 218.
pub struct MoveList {
    moves: [Move; 256],
    len: u16,
}

impl MoveList {
    /// Create an empty move list.
    pub fn new() -> MoveList {
        MoveList {
            moves: [Move::NULL; 256],
            len: 0,
        }
    }

    /// Push a move onto the list.
    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!((self.len as usize) < 256);
        self.moves[self.len as usize] = mv;
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len as usize]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;
    #[inline]
    fn index(&self, index: usize) -> &Move {
        &self.as_slice()[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

/// Push one move per target square, flagged as a capture when the target is an enemy.
#[inline]
fn push_targets(list: &mut MoveList, piece: Piece, src: Square, targets: Bitboard, enemy: Bitboard) {
    for dst in targets {
        let flags = if enemy.contains(dst) { MoveFlags::CAPTURE } else { MoveFlags::NONE };
        list.push(Move::encode(src, dst, piece, None, flags));
    }
}

/// Generate every pseudo-legal move of `side`.
///
/// Sliding moves come from the magic tables; `en_passant` is the target
/// square of an en passant capture, if one is available.
pub fn generate_pseudo_legal(
    tables: &AttackTables,
    placement: &PiecePlacement,
    side: Color,
    en_passant: Option<Square>,
) -> MoveList {
    let mut list = MoveList::new();
    gen_pawns(placement, side, en_passant, &mut list);
    gen_knights(placement, side, &mut list);
    gen_sliders(tables, placement, side, &mut list);
    gen_king(placement, side, &mut list);
    list
}
