//! Sliding piece (bishop, rook, queen) move generation.

use crate::attacks::AttackTables;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::placement::PiecePlacement;

use super::{MoveList, push_targets};

const SLIDING_KINDS: [PieceKind; 3] = [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen];

/// Generate pseudo-legal slider moves for `us` through the magic tables.
pub(super) fn gen_sliders(
    tables: &AttackTables,
    placement: &PiecePlacement,
    us: Color,
    list: &mut MoveList,
) {
    let friendly = placement.side(us);
    let enemy = placement.side(us.flip());
    let occupied = friendly | enemy;

    for kind in SLIDING_KINDS {
        let piece = Piece::new(kind, us);
        for src in placement.pieces(piece) {
            let targets = tables.piece_attacks(kind, us, src, occupied) & !friendly;
            push_targets(list, piece, src, targets, enemy);
        }
    }
}
