//! Error types for square parsing and magic-data loading.

use crate::attacks::Slider;
use crate::square::Square;

/// Errors that occur when parsing a square from algebraic notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SquareError {
    /// The string is not a file letter `a`-`h` followed by a rank digit `1`-`8`.
    #[error("invalid square: \"{found}\"")]
    InvalidAlgebraic {
        /// The rejected string.
        found: String,
    },
}

/// Configuration errors raised while loading persisted magic data or building
/// attack tables from it.
///
/// Every variant is fatal: a table set is either fully verified or not built.
#[derive(Debug, thiserror::Error)]
pub enum MagicDataError {
    /// The magic data file could not be read or written.
    #[error("I/O error on magic data file {path}: {source}")]
    Io {
        /// Path of the file.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The text is not valid JSON for the magic data schema.
    #[error("malformed magic data: {source}")]
    Json {
        /// The underlying parse error.
        #[from]
        source: serde_json::Error,
    },

    /// The `metadata.version` field names a format this build does not read.
    #[error("unsupported magic data version \"{found}\", expected \"{expected}\"")]
    UnsupportedVersion {
        /// Version found in the file.
        found: String,
        /// Version this build reads.
        expected: &'static str,
    },

    /// A slider section does not hold exactly one entry per square.
    #[error("{slider} section has {found} entries, expected 64")]
    WrongEntryCount {
        /// Section with the wrong length.
        slider: Slider,
        /// Number of entries found.
        found: usize,
    },

    /// An entry's `square` field is not algebraic notation.
    #[error("{slider} entry has invalid square \"{found}\"")]
    InvalidSquare {
        /// Section holding the entry.
        slider: Slider,
        /// The rejected string.
        found: String,
    },

    /// Two entries in one section name the same square.
    #[error("{slider} section lists {square} more than once")]
    DuplicateSquare {
        /// Section holding the entries.
        slider: Slider,
        /// The repeated square.
        square: Square,
    },

    /// A `magic` or `mask` field is not exactly 16 hex digits.
    #[error("{slider} entry for {square} has invalid {field} \"{found}\"")]
    InvalidHex {
        /// Section holding the entry.
        slider: Slider,
        /// Square of the entry.
        square: Square,
        /// Field name (`magic` or `mask`).
        field: &'static str,
        /// The rejected string.
        found: String,
    },

    /// A shift would produce an empty or oversized table.
    #[error("{slider} entry for {square} has shift {shift} outside {min}..={max}")]
    ShiftOutOfRange {
        /// Section holding the entry.
        slider: Slider,
        /// Square of the entry.
        square: Square,
        /// The rejected shift.
        shift: u8,
        /// Smallest accepted shift.
        min: u8,
        /// Largest accepted shift.
        max: u8,
    },

    /// The stored mask differs from the relevant-occupancy mask of the square.
    #[error("{slider} mask for {square} is {found:016x}, expected {expected:016x}")]
    MaskMismatch {
        /// Section holding the entry.
        slider: Slider,
        /// Square of the entry.
        square: Square,
        /// Mask stored in the file.
        found: u64,
        /// Mask computed for the square.
        expected: u64,
    },

    /// Two occupancies with different attack sets hash to the same slot.
    #[error("{slider} magic for {square} collides destructively at index {index}")]
    DestructiveCollision {
        /// Section holding the entry.
        slider: Slider,
        /// Square of the entry.
        square: Square,
        /// Table slot where the collision was found.
        index: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::{MagicDataError, SquareError};
    use crate::attacks::Slider;
    use crate::square::Square;

    #[test]
    fn square_error_display() {
        let err = SquareError::InvalidAlgebraic { found: "j9".to_string() };
        assert_eq!(format!("{err}"), "invalid square: \"j9\"");
    }

    #[test]
    fn magic_error_display() {
        let err = MagicDataError::WrongEntryCount { slider: Slider::Rook, found: 63 };
        assert_eq!(format!("{err}"), "rook section has 63 entries, expected 64");

        let err = MagicDataError::MaskMismatch {
            slider: Slider::Bishop,
            square: Square::D4,
            found: 0,
            expected: 0x0022_1400_1422_4000,
        };
        assert_eq!(
            format!("{err}"),
            "bishop mask for d4 is 0000000000000000, expected 0022140014224000"
        );
    }

    #[test]
    fn json_error_converts() {
        let parse_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: MagicDataError = parse_err.into();
        assert!(matches!(err, MagicDataError::Json { .. }));
    }
}
