//! Error types for the magic-number search.

use lodestone_core::{Slider, Square};

/// Failure of a search run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Every shift in the window used up its attempt budget without a valid magic.
    #[error("no {slider} magic found for {square} after {attempts} attempts")]
    Exhausted {
        /// Slider being searched.
        slider: Slider,
        /// Square being searched.
        square: Square,
        /// Candidates drawn before giving up.
        attempts: u64,
    },

    /// A worker thread panicked before returning its results.
    #[error("a search worker panicked")]
    WorkerPanicked,
}

/// Reason a (magic, shift) pair is not a valid hash for a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    /// The shift would address no slots or more slots than any mask needs.
    #[error("shift {shift} outside {min}..={max}")]
    ShiftOutOfRange {
        /// The rejected shift.
        shift: u8,
        /// Smallest accepted shift.
        min: u8,
        /// Largest accepted shift.
        max: u8,
    },

    /// Two occupancies with different attack sets land in the same slot.
    #[error("destructive collision at index {index}")]
    Collision {
        /// The contested slot.
        index: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let err = SearchError::Exhausted { slider: Slider::Bishop, square: Square::C1, attempts: 0 };
        assert_eq!(err.to_string(), "no bishop magic found for c1 after 0 attempts");
        assert_eq!(VerifyError::Collision { index: 17 }.to_string(), "destructive collision at index 17");
    }
}
