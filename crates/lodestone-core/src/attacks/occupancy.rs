//! Enumeration of blocker configurations over a relevant-occupancy mask.

use crate::bitboard::Bitboard;

/// Map `index` to one subset of `mask`.
///
/// Bit `i` of `index` decides whether the `i`-th lowest square of `mask` is
/// included. For `index` in `0..2^k` (`k = mask.count()`) every subset of
/// `mask` comes out exactly once.
pub fn occupancy_at(index: usize, mask: Bitboard) -> Bitboard {
    let mut occupancy = Bitboard::EMPTY;
    let mut remaining = mask;
    let mut i = 0;

    while let Some((sq, rest)) = remaining.pop_lsb() {
        remaining = rest;
        if index & (1 << i) != 0 {
            occupancy = occupancy.with(sq);
        }
        i += 1;
    }

    occupancy
}

/// Iterate over every subset of `mask`, starting with the empty set.
pub fn subsets(mask: Bitboard) -> Subsets {
    Subsets {
        mask: mask.inner(),
        next: Some(0),
    }
}

/// Iterator returned by [`subsets`].
///
/// Steps with the carry-rippler trick: `next = (current - mask) & mask`, which
/// wraps back to zero after the full mask.
#[derive(Debug, Clone)]
pub struct Subsets {
    mask: u64,
    next: Option<u64>,
}

impl Iterator for Subsets {
    type Item = Bitboard;

    #[inline]
    fn next(&mut self) -> Option<Bitboard> {
        let current = self.next?;
        let following = current.wrapping_sub(self.mask) & self.mask;
        self.next = (following != 0).then_some(following);
        Some(Bitboard::new(current))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::attacks::Slider;
    use crate::square::Square;

    #[test]
    fn index_zero_is_empty_and_last_is_full() {
        let mask = Slider::Rook.relevant_mask(Square::D4);
        let k = mask.count();
        assert_eq!(occupancy_at(0, mask), Bitboard::EMPTY);
        assert_eq!(occupancy_at((1 << k) - 1, mask), mask);
    }

    #[test]
    fn single_bits_select_mask_squares_in_order() {
        let mask: Bitboard = [Square::B7, Square::E4, Square::G2].into_iter().collect();
        assert_eq!(occupancy_at(0b001, mask), Square::B7.bitboard());
        assert_eq!(occupancy_at(0b010, mask), Square::E4.bitboard());
        assert_eq!(occupancy_at(0b100, mask), Square::G2.bitboard());
    }

    #[test]
    fn enumeration_is_complete_and_distinct() {
        for slider in Slider::ALL {
            for sq in [Square::A1, Square::D4, Square::H8, Square::B7] {
                let mask = slider.relevant_mask(sq);
                let total = 1usize << mask.count();
                let seen: HashSet<Bitboard> =
                    (0..total).map(|index| occupancy_at(index, mask)).collect();
                assert_eq!(seen.len(), total, "duplicates for {slider} on {sq}");
                assert!(seen.iter().all(|occ| occ.is_subset_of(mask)));
            }
        }
    }

    #[test]
    fn carry_rippler_matches_indexed_enumeration() {
        let mask = Slider::Bishop.relevant_mask(Square::E5);
        let total = 1usize << mask.count();
        let indexed: HashSet<Bitboard> = (0..total).map(|i| occupancy_at(i, mask)).collect();
        let rippled: Vec<Bitboard> = subsets(mask).collect();
        assert_eq!(rippled.len(), total);
        assert_eq!(rippled.into_iter().collect::<HashSet<_>>(), indexed);
    }

    #[test]
    fn empty_mask_has_one_subset() {
        assert_eq!(subsets(Bitboard::EMPTY).collect::<Vec<_>>(), vec![Bitboard::EMPTY]);
        assert_eq!(occupancy_at(0, Bitboard::EMPTY), Bitboard::EMPTY);
    }
}
