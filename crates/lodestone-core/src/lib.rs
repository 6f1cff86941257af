//! Core chess types and magic-bitboard attack generation.

pub mod attacks;
mod bitboard;
mod chess_move;
mod color;
mod error;
pub mod movegen;
mod piece;
mod piece_kind;
mod placement;
mod square;

pub use attacks::{AttackTables, MagicEntry, MagicFile, MagicTable, Slider};
pub use bitboard::Bitboard;
pub use chess_move::{Move, MoveFlags};
pub use color::Color;
pub use error::{MagicDataError, SquareError};
pub use movegen::{MoveList, generate_pseudo_legal};
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use placement::PiecePlacement;
pub use square::Square;
