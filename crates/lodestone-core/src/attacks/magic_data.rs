//! Persisted magic data: the JSON schema, parsing and validation.
//!
//! Hex fields are stored as exactly 16 lowercase digits without a prefix.
//! Only the schema is checked here; masks, shifts and collisions are checked
//! when the tables are built.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bitboard::Bitboard;
use crate::error::MagicDataError;
use crate::square::Square;

use super::Slider;
use super::magic::MagicEntry;

/// The only format version this build reads and writes.
pub const FORMAT_VERSION: &str = "1";

const EMBEDDED_MAGICS: &str = include_str!("../../data/magics.json");

/// Top-level document of a magic data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicFile {
    pub metadata: Metadata,
    pub rook: Vec<EntryRecord>,
    pub bishop: Vec<EntryRecord>,
}

/// Provenance of a magic data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// RFC 3339 timestamp of the search run.
    pub generated: String,
    pub version: String,
}

/// One square of one slider section, as written on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub square: String,
    pub magic: String,
    pub shift: u8,
    pub mask: String,
}

impl EntryRecord {
    pub fn new(square: Square, entry: &MagicEntry) -> EntryRecord {
        EntryRecord {
            square: square.to_string(),
            magic: format!("{:016x}", entry.magic),
            shift: entry.shift,
            mask: format!("{:016x}", entry.mask),
        }
    }
}

impl MagicFile {
    /// Assemble a file from complete rook and bishop entry sets, in square order.
    pub fn new(
        generated: impl Into<String>,
        rook: &[MagicEntry; 64],
        bishop: &[MagicEntry; 64],
    ) -> MagicFile {
        let records = |entries: &[MagicEntry; 64]| {
            Square::all()
                .zip(entries.iter())
                .map(|(sq, entry)| EntryRecord::new(sq, entry))
                .collect()
        };
        MagicFile {
            metadata: Metadata {
                generated: generated.into(),
                version: FORMAT_VERSION.to_string(),
            },
            rook: records(rook),
            bishop: records(bishop),
        }
    }

    /// Parse JSON text and check the format version.
    pub fn from_json_str(text: &str) -> Result<MagicFile, MagicDataError> {
        let file: MagicFile = serde_json::from_str(text)?;
        if file.metadata.version != FORMAT_VERSION {
            return Err(MagicDataError::UnsupportedVersion {
                found: file.metadata.version,
                expected: FORMAT_VERSION,
            });
        }
        Ok(file)
    }

    /// Read and parse a magic data file.
    pub fn load(path: impl AsRef<Path>) -> Result<MagicFile, MagicDataError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MagicDataError::Io {
            path: path.display().to_string(),
            source,
        })?;
        MagicFile::from_json_str(&text)
    }

    /// The magic data compiled into this crate.
    pub fn embedded() -> Result<MagicFile, MagicDataError> {
        MagicFile::from_json_str(EMBEDDED_MAGICS)
    }

    /// Pretty-printed JSON with a trailing newline.
    pub fn to_json_string(&self) -> Result<String, MagicDataError> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        Ok(text)
    }

    /// Write the file, replacing any existing one.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MagicDataError> {
        let path = path.as_ref();
        let text = self.to_json_string()?;
        fs::write(path, text).map_err(|source| MagicDataError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// The raw records of one slider section.
    pub fn section(&self, slider: Slider) -> &[EntryRecord] {
        match slider {
            Slider::Rook => &self.rook,
            Slider::Bishop => &self.bishop,
        }
    }

    /// Decode one section into square-indexed entries.
    ///
    /// Records may appear in any order but every square must appear exactly once.
    pub fn entries(&self, slider: Slider) -> Result<[MagicEntry; 64], MagicDataError> {
        let records = self.section(slider);
        if records.len() != Square::COUNT {
            return Err(MagicDataError::WrongEntryCount { slider, found: records.len() });
        }

        let mut entries = [MagicEntry::default(); 64];
        let mut seen = [false; 64];

        for record in records {
            let square = Square::from_algebraic(&record.square).ok_or_else(|| {
                MagicDataError::InvalidSquare { slider, found: record.square.clone() }
            })?;
            if seen[square.index()] {
                return Err(MagicDataError::DuplicateSquare { slider, square });
            }
            seen[square.index()] = true;

            entries[square.index()] = MagicEntry {
                magic: parse_hex(slider, square, "magic", &record.magic)?,
                shift: record.shift,
                mask: Bitboard::new(parse_hex(slider, square, "mask", &record.mask)?),
            };
        }

        // 64 records with no duplicates cover every square.
        Ok(entries)
    }
}

fn parse_hex(
    slider: Slider,
    square: Square,
    field: &'static str,
    text: &str,
) -> Result<u64, MagicDataError> {
    let invalid = || MagicDataError::InvalidHex { slider, square, field, found: text.to_string() };
    if text.len() != 16 || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    u64::from_str_radix(text, 16).map_err(|_| invalid())
}
