//! Pawn move generation.

use crate::attacks::pawn_attacks;
use crate::bitboard::Bitboard;
use crate::chess_move::{Move, MoveFlags};
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::placement::PiecePlacement;
use crate::square::Square;

use super::MoveList;

/// Generate pseudo-legal pawn moves for `us`.
///
/// `en_passant` is the square a capturing pawn would land on, not the square
/// of the pawn being captured.
pub(super) fn gen_pawns(
    placement: &PiecePlacement,
    us: Color,
    en_passant: Option<Square>,
    list: &mut MoveList,
) {
    let them = us.flip();
    let piece = Piece::new(PieceKind::Pawn, us);
    let pawns = placement.pieces(piece);
    let enemy = placement.side(them);
    let empty = !placement.occupied();

    // Index delta of one step forward; White moves toward a8 = 0.
    let push_delta = us.forward() * 8;
    let (double_rank, promo_rank) = match us {
        Color::White => (Bitboard::RANK_4, Bitboard::RANK_8),
        Color::Black => (Bitboard::RANK_5, Bitboard::RANK_1),
    };
    let advance = |bb: Bitboard| match us {
        Color::White => bb >> 8,
        Color::Black => bb << 8,
    };
    let behind = |dst: Square, steps: i8| {
        Square::from_index_unchecked((dst.index() as i8 - push_delta * steps) as u8)
    };

    // --- Pushes ---
    let single = advance(pawns) & empty;
    for dst in single {
        push_pawn_move(list, piece, behind(dst, 1), dst, promo_rank, MoveFlags::NONE);
    }

    let double = advance(single) & empty & double_rank;
    for dst in double {
        list.push(Move::encode(behind(dst, 2), dst, piece, None, MoveFlags::DOUBLE_PUSH));
    }

    // --- Captures ---
    for src in pawns {
        for dst in pawn_attacks(us, src) & enemy {
            push_pawn_move(list, piece, src, dst, promo_rank, MoveFlags::CAPTURE);
        }
    }

    // --- En passant ---
    if let Some(ep_sq) = en_passant {
        for src in pawn_attacks(them, ep_sq) & pawns {
            list.push(Move::encode(
                src,
                ep_sq,
                piece,
                None,
                MoveFlags::CAPTURE | MoveFlags::EN_PASSANT,
            ));
        }
    }
}

/// Push one pawn move, expanded into the four promotions on the last rank.
fn push_pawn_move(
    list: &mut MoveList,
    piece: Piece,
    src: Square,
    dst: Square,
    promo_rank: Bitboard,
    flags: MoveFlags,
) {
    if promo_rank.contains(dst) {
        for kind in PieceKind::PROMOTIONS {
            let promotion = Piece::new(kind, piece.color());
            list.push(Move::encode(src, dst, piece, Some(promotion), flags));
        }
    } else {
        list.push(Move::encode(src, dst, piece, None, flags));
    }
}
