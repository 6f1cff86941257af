//! Precomputed attack tables for the non-sliding pieces.

use crate::bitboard::Bitboard;

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// One table entry per square: the union of every on-board `(row, col)` step.
const fn compute_step_attacks(deltas: &[(i8, i8); 8]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0usize;
    while sq < 64 {
        let row = (sq / 8) as i8;
        let col = (sq % 8) as i8;
        let mut bits = 0u64;
        let mut d = 0;
        while d < 8 {
            let r = row + deltas[d].0;
            let c = col + deltas[d].1;
            if r >= 0 && r < 8 && c >= 0 && c < 8 {
                bits |= 1u64 << (r as usize * 8 + c as usize);
            }
            d += 1;
        }
        table[sq] = Bitboard::new(bits);
        sq += 1;
    }
    table
}

/// Pawn capture tables, index 0 = White, 1 = Black.
///
/// White captures toward row 0 (lower indices), Black toward row 7. Masking
/// the destination file stops a capture from wrapping around the board edge.
const fn compute_pawn_attacks() -> [[Bitboard; 64]; 2] {
    const FILE_A_BITS: u64 = Bitboard::FILE_A.inner();
    const FILE_H_BITS: u64 = Bitboard::FILE_H.inner();

    let mut table = [[Bitboard::EMPTY; 64]; 2];
    let mut sq = 0usize;
    while sq < 64 {
        let bit = 1u64 << sq;

        // One row up is 8 indices down: -9 is up-left, -7 is up-right.
        let white = ((bit >> 9) & !FILE_H_BITS) | ((bit >> 7) & !FILE_A_BITS);
        // One row down: +7 is down-left, +9 is down-right.
        let black = ((bit << 7) & !FILE_H_BITS) | ((bit << 9) & !FILE_A_BITS);

        table[0][sq] = Bitboard::new(white);
        table[1][sq] = Bitboard::new(black);
        sq += 1;
    }
    table
}

pub(crate) static KNIGHT_ATTACKS: [Bitboard; 64] = compute_step_attacks(&KNIGHT_DELTAS);
pub(crate) static KING_ATTACKS: [Bitboard; 64] = compute_step_attacks(&KING_DELTAS);
pub(crate) static PAWN_ATTACKS: [[Bitboard; 64]; 2] = compute_pawn_attacks();
