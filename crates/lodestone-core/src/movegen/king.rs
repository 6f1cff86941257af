//! King move generation. Castling is left to the caller.

use crate::attacks::king_attacks;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::placement::PiecePlacement;

use super::{MoveList, push_targets};

/// Generate pseudo-legal king steps for `us`.
pub(super) fn gen_king(placement: &PiecePlacement, us: Color, list: &mut MoveList) {
    let piece = Piece::new(PieceKind::King, us);
    let friendly = placement.side(us);
    let enemy = placement.side(us.flip());

    for src in placement.pieces(piece) {
        push_targets(list, piece, src, king_attacks(src) & !friendly, enemy);
    }
}
