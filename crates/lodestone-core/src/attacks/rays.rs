//! Brute-force ray walking: relevant-occupancy masks and on-the-fly attacks.
//!
//! Everything here is `const fn` over raw `u64` so the same code serves the
//! table builder, the offline search and the tests.

/// (row, column) steps of the four orthogonal rays.
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

/// (row, column) steps of the four diagonal rays.
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, 1), (-1, -1), (1, 1), (1, -1)];

const fn on_board(row: i8, col: i8) -> bool {
    row >= 0 && row < 8 && col >= 0 && col < 8
}

const fn bit(row: i8, col: i8) -> u64 {
    1u64 << (row as usize * 8 + col as usize)
}

/// Walk every ray from `sq`, adding each square until (and including) the
/// first one set in `blockers`.
const fn slide(sq: usize, blockers: u64, directions: &[(i8, i8); 4]) -> u64 {
    let row = (sq / 8) as i8;
    let col = (sq % 8) as i8;
    let mut attacks = 0u64;

    let mut d = 0;
    while d < 4 {
        let (dr, dc) = directions[d];
        let mut r = row + dr;
        let mut c = col + dc;
        while on_board(r, c) {
            let b = bit(r, c);
            attacks |= b;
            if blockers & b != 0 {
                break;
            }
            r += dr;
            c += dc;
        }
        d += 1;
    }

    attacks
}

/// Union of the rays from `sq`, each stopped one square short of the edge.
///
/// A piece on the last square of a ray can never shorten the slide, so it is
/// left out of the mask.
const fn relevant(sq: usize, directions: &[(i8, i8); 4]) -> u64 {
    let row = (sq / 8) as i8;
    let col = (sq % 8) as i8;
    let mut mask = 0u64;

    let mut d = 0;
    while d < 4 {
        let (dr, dc) = directions[d];
        let mut r = row + dr;
        let mut c = col + dc;
        while on_board(r + dr, c + dc) {
            mask |= bit(r, c);
            r += dr;
            c += dc;
        }
        d += 1;
    }

    mask
}

/// Rook attacks from square index `sq` given the `blockers` bitboard.
pub const fn rook_attacks_on_the_fly(sq: usize, blockers: u64) -> u64 {
    slide(sq, blockers, &ROOK_DIRECTIONS)
}

/// Bishop attacks from square index `sq` given the `blockers` bitboard.
pub const fn bishop_attacks_on_the_fly(sq: usize, blockers: u64) -> u64 {
    slide(sq, blockers, &BISHOP_DIRECTIONS)
}

/// Rook relevant-occupancy mask for square index `sq`.
pub const fn rook_mask(sq: usize) -> u64 {
    relevant(sq, &ROOK_DIRECTIONS)
}

/// Bishop relevant-occupancy mask for square index `sq`.
pub const fn bishop_mask(sq: usize) -> u64 {
    relevant(sq, &BISHOP_DIRECTIONS)
}
