//! Knight move generation.

use crate::attacks::knight_attacks;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::placement::PiecePlacement;

use super::{MoveList, push_targets};

/// Generate pseudo-legal knight moves for `us`.
pub(super) fn gen_knights(placement: &PiecePlacement, us: Color, list: &mut MoveList) {
    let piece = Piece::new(PieceKind::Knight, us);
    let friendly = placement.side(us);
    let enemy = placement.side(us.flip());

    for src in placement.pieces(piece) {
        push_targets(list, piece, src, knight_attacks(src) & !friendly, enemy);
    }
}
