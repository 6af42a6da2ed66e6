//! Piecework - a piece table for editable text.
//!
//! A document is an immutable original text plus an append-only buffer of
//! everything inserted since, described by an ordered list of pieces.
//! Edits splice, split and trim pieces; the bulk of the text is never
//! copied. A small editing cache makes the common case (typing and
//! backspacing around one cursor) skip position lookups entirely.
//!
//! # Quick Start
//!
//! ```
//! use piecework::PieceTable;
//!
//! let mut doc = PieceTable::new("1234567890");
//!
//! doc.insert("ABC", 5);
//! assert_eq!(doc.render(), "12345ABC67890");
//!
//! // Delete the 3 chars ending at offset 8, like pressing backspace 3 times.
//! doc.delete(3, 8).unwrap();
//! assert_eq!(doc.to_string(), "1234567890");
//! ```
//!
//! Positions and lengths count `char`s. Grapheme clusters are not treated
//! specially.

pub mod buffer;
mod cache;
pub mod config;
pub mod error;
pub mod piece_list;
pub mod table;

pub use buffer::Source;
pub use config::{Config, Overflow};
pub use error::EditError;
pub use piece_list::Piece;
pub use table::PieceTable;
