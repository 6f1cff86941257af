//! Offline search for magic multipliers.
//!
//! The output is a [`MagicSet`] that can be persisted as a
//! [`MagicFile`](lodestone_core::MagicFile) or turned into lookup tables directly.

pub mod config;
pub mod error;
pub mod search;

pub use config::SearchConfig;
pub use error::{SearchError, VerifyError};
pub use search::pool::{MagicSet, job_seed, search_all};
pub use search::{MagicCandidate, search_best_magic, verify_magic};
