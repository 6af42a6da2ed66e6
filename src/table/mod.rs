//! Piece table.
//!
//! The document is the original text plus an append-only log of inserted
//! text, described by an ordered list of pieces. Edits never copy document
//! text: an insert appends to the log and splices one piece into the list,
//! a delete trims, splits or removes pieces.
//!
//! Key design decisions:
//!
//! 1. **Coalescing**: an insert that continues the previous one, both in
//!    the document and in the append buffer, extends the previous piece in
//!    place. Sequential typing therefore produces one piece, not one piece
//!    per keystroke.
//!
//! 2. **Editing cache**: the piece touched by the last edit and the offset
//!    it ends at. Edits at that offset skip position resolution; other
//!    lookups may scan from it when it is the closest known point.
//!
//! 3. **Arena list**: pieces live in a [`PieceList`] addressed by stable
//!    handles, so the cache can point at a piece without owning it.

mod delete;
mod locate;

use std::fmt;

use tracing::trace;

use crate::buffer::{AppendBuffer, Source};
use crate::cache::EditingCache;
use crate::config::Config;
use crate::piece_list::{Handle, Piece, PieceList};

/// An editable text buffer built from an immutable original and an
/// append-only log of insertions.
///
/// Positions and lengths count `char`s.
pub struct PieceTable {
    /// Text supplied at construction. Never modified.
    original: Box<[char]>,
    /// Every character inserted this session.
    added: AppendBuffer,
    /// Pieces in document order.
    pieces: PieceList,
    /// Document length, equal to the sum of piece lengths.
    len: usize,
    cache: EditingCache,
    config: Config,
}

impl PieceTable {
    /// Create a table over `original` with the default [`Config`].
    pub fn new(original: &str) -> PieceTable {
        return PieceTable::with_config(original, Config::default());
    }

    pub fn with_config(original: &str, config: Config) -> PieceTable {
        let original: Box<[char]> = original.chars().collect();
        let len = original.len();
        let mut pieces = PieceList::new();
        let cache = if len > 0 {
            let whole = pieces.insert_first(Piece::new(Source::Original, 0, len));
            EditingCache::at(whole, len)
        } else {
            EditingCache::empty()
        };

        return PieceTable {
            original,
            added: AppendBuffer::new(),
            pieces,
            len,
            cache,
            config,
        };
    }

    /// Document length in chars.
    pub fn len(&self) -> usize {
        return self.len;
    }

    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    /// Number of pieces describing the document.
    pub fn piece_count(&self) -> usize {
        return self.pieces.len();
    }

    /// Pieces in document order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        return self.pieces.iter();
    }

    pub fn config(&self) -> Config {
        return self.config;
    }

    /// Insert `text` so that it begins at `position`.
    ///
    /// A position past the end of the document is treated as the end.
    /// Inserting an empty string does nothing.
    pub fn insert(&mut self, text: &str, position: usize) {
        if text.is_empty() {
            return;
        }
        let position = position.min(self.len);
        let (start, len) = self.added.append(text);

        let piece = match self.cache.ends_at(position) {
            Some(cached) if self.continues(cached, start) => {
                trace!(position, len, "coalescing insert into cached piece");
                self.pieces.get_mut(cached).len += len;
                cached
            }
            _ => self.splice(Piece::new(Source::Additional, start, len), position),
        };

        self.cache.set(piece, position + len);
        self.len += len;
        self.check_invariants();
    }

    /// Whether `handle` is an additional piece whose buffer range ends
    /// where `start` begins.
    fn continues(&self, handle: Handle, start: usize) -> bool {
        let piece = self.pieces.get(handle);
        return piece.source == Source::Additional && piece.end() == start;
    }

    /// Link `piece` into the list so it begins at `position`.
    fn splice(&mut self, piece: Piece, position: usize) -> Handle {
        if position == 0 {
            return self.pieces.insert_first(piece);
        }
        if position >= self.len {
            return self.pieces.insert_last(piece);
        }

        let (target, offset) = match self.cache.ends_at(position) {
            Some(cached) => (cached, self.pieces.get(cached).len),
            None => self.locate(position),
        };

        if offset == 0 {
            return self.pieces.insert_before(target, piece);
        }
        if offset < self.pieces.get(target).len {
            self.pieces.split(target, offset);
        }
        return self.pieces.insert_after(target, piece);
    }

    /// Remove `handle` from the list, dropping any cached reference to it.
    fn remove_piece(&mut self, handle: Handle) {
        self.cache.forget(handle);
        self.pieces.remove(handle);
    }

    /// The characters a piece names.
    fn text(&self, piece: &Piece) -> &[char] {
        return match piece.source {
            Source::Original => &self.original[piece.start..piece.end()],
            Source::Additional => self.added.slice(piece.start, piece.len),
        };
    }

    /// The full current document.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.len);
        for piece in self.pieces.iter() {
            out.extend(self.text(piece));
        }
        return out;
    }

    /// The text of `[start, end)`, or `None` if the range is reversed or
    /// extends past the document.
    pub fn slice(&self, start: usize, end: usize) -> Option<String> {
        if start > end || end > self.len {
            return None;
        }

        let mut out = String::with_capacity(end - start);
        let mut piece_start = 0;
        for piece in self.pieces.iter() {
            if piece_start >= end {
                break;
            }
            let piece_end = piece_start + piece.len;
            if piece_end > start {
                let from = start.saturating_sub(piece_start);
                let to = piece.len.min(end - piece_start);
                out.extend(&self.text(piece)[from..to]);
            }
            piece_start = piece_end;
        }
        return Some(out);
    }

    // --- Invariant checking ---

    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        self.pieces.check_invariants();

        let total: usize = self.pieces.iter().map(|p| p.len).sum();
        assert_eq!(
            total, self.len,
            "INVARIANT VIOLATED: sum of piece lengths={} != len={}",
            total, self.len
        );

        if let Some((cached, end)) = self.cache.get() {
            assert!(
                self.pieces.contains(cached),
                "INVARIANT VIOLATED: cache refers to a removed piece"
            );
            let mut offset = 0;
            let mut node = self.pieces.first();
            while let Some(handle) = node {
                offset += self.pieces.get(handle).len;
                if handle == cached {
                    break;
                }
                node = self.pieces.next(handle);
            }
            assert_eq!(
                offset, end,
                "INVARIANT VIOLATED: cached piece ends at {} but cache says {}",
                offset, end
            );
        }
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    fn check_invariants(&self) {}
}

impl Default for PieceTable {
    fn default() -> Self {
        return PieceTable::new("");
    }
}

impl fmt::Display for PieceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;

        for piece in self.pieces.iter() {
            for &c in self.text(piece) {
                f.write_char(c)?;
            }
        }
        return Ok(());
    }
}

impl fmt::Debug for PieceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f
            .debug_struct("PieceTable")
            .field("len", &self.len)
            .field("pieces", &self.pieces.iter().collect::<Vec<_>>())
            .field("cache", &self.cache)
            .finish();
    }
}
