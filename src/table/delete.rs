//! Deletion.
//!
//! `delete(length, position)` removes the `length` chars that end at
//! `position`, the way backspace removes the chars before the cursor.
//!
//! The deletion point is resolved to `(target, offset)` such that the
//! deleted run ends `offset` chars into `target`. What happens next depends
//! on where that run sits in the piece:
//!
//! ```text
//! whole piece      [#####]        -> remove the piece
//! tail             [abc##]        -> shrink len
//! head             [##cde]        -> advance start, shrink len
//! middle           [ab##e]        -> split after the run, shrink first half
//! spans pieces     [ab###][###]   -> remove whole pieces walking backward,
//!                                    then shrink the first partial one
//! ```
//!
//! The piece left holding the chars just before the deleted run becomes the
//! cached piece. Where it ends in the shifted document depends on whether
//! it lost its front or its back, which is what [`Trimmed`] records.

use tracing::debug;

use super::PieceTable;
use crate::config::Overflow;
use crate::error::EditError;
use crate::piece_list::Handle;

/// What happened to the piece a delete finished on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Trimmed {
    /// Chars were cut from the front; the piece now starts at the deletion
    /// start.
    Front(Handle),
    /// Chars were cut from the back; the piece now ends at the deletion
    /// start.
    Back(Handle),
    /// The piece was removed outright and nothing is left to cache.
    Removed,
}

impl PieceTable {
    /// Delete the `length` chars ending at `position`, i.e. the range
    /// `[position - length, position)`.
    ///
    /// Fails without touching the table if `length` is zero, if the range
    /// would start before the document, or (unless the table is configured
    /// with [`Overflow::Clamp`]) if `position` is past the end.
    pub fn delete(&mut self, length: usize, position: usize) -> Result<(), EditError> {
        let position = self
            .check_delete(length, position)
            .inspect_err(|err| debug!(%err, length, position, "delete rejected"))?;

        let (target, offset) = self.deletion_point(position);
        let trimmed = if length == 1 {
            self.delete_one(target, offset)
        } else {
            self.delete_run(target, offset, length)
        };

        let start = position - length;
        match trimmed {
            Trimmed::Front(piece) => {
                let end = start + self.pieces.get(piece).len;
                self.cache.set(piece, end);
            }
            Trimmed::Back(piece) => self.cache.set(piece, start),
            Trimmed::Removed => self.cache.clear(),
        }

        self.len -= length;
        self.check_invariants();
        return Ok(());
    }

    /// Validate a delete, returning the effective position.
    fn check_delete(&self, length: usize, position: usize) -> Result<usize, EditError> {
        let position = if position > self.len {
            match self.config.delete_past_end {
                Overflow::Reject => {
                    return Err(EditError::PositionBeyondDocument {
                        position,
                        len: self.len,
                    });
                }
                Overflow::Clamp => self.len,
            }
        } else {
            position
        };

        if length == 0 {
            return Err(EditError::InvalidLength);
        }
        if length > position {
            return Err(EditError::InvalidPosition { position, length });
        }
        return Ok(position);
    }

    /// Resolve `position` to the piece holding the char just before it.
    ///
    /// Requires `0 < position <= len`. The returned offset is never 0.
    fn deletion_point(&self, position: usize) -> (Handle, usize) {
        let (target, offset) = if position == self.len {
            let last = self
                .pieces
                .last()
                .expect("invariant violated: non-empty document has no pieces");
            (last, self.pieces.get(last).len)
        } else if let Some(cached) = self.cache.ends_at(position) {
            (cached, self.pieces.get(cached).len)
        } else {
            self.locate(position)
        };

        if offset > 0 {
            return (target, offset);
        }
        let prev = self
            .pieces
            .prev(target)
            .expect("invariant violated: deletion point before the first piece");
        return (prev, self.pieces.get(prev).len);
    }

    /// Delete the single char ending `offset` chars into `target`.
    fn delete_one(&mut self, target: Handle, offset: usize) -> Trimmed {
        let len = self.pieces.get(target).len;
        if len == 1 {
            self.remove_piece(target);
            return Trimmed::Removed;
        }

        if offset == len {
            self.pieces.get_mut(target).len -= 1;
            return Trimmed::Back(target);
        }
        if offset == 1 {
            let piece = self.pieces.get_mut(target);
            piece.start += 1;
            piece.len -= 1;
            return Trimmed::Front(target);
        }

        self.pieces.split(target, offset);
        self.pieces.get_mut(target).len -= 1;
        return Trimmed::Back(target);
    }

    /// Delete `length > 1` chars ending `offset` chars into `target`,
    /// walking backward across as many pieces as the run covers.
    fn delete_run(&mut self, mut target: Handle, offset: usize, length: usize) -> Trimmed {
        let piece_len = self.pieces.get(target).len;
        if offset < piece_len {
            if length == offset {
                let piece = self.pieces.get_mut(target);
                piece.start += length;
                piece.len -= length;
                return Trimmed::Front(target);
            }
            self.pieces.split(target, offset);
        }

        // `target` now ends exactly where the run ends.
        let mut remaining = length;
        let mut removed = 0;
        loop {
            let len = self.pieces.get(target).len;
            if remaining < len {
                self.pieces.get_mut(target).len -= remaining;
                if removed > 0 {
                    debug!(length, removed, "delete spanned multiple pieces");
                }
                return Trimmed::Back(target);
            }
            if remaining == len {
                self.remove_piece(target);
                if removed > 0 {
                    debug!(length, removed = removed + 1, "delete spanned multiple pieces");
                }
                return Trimmed::Removed;
            }

            remaining -= len;
            let prev = self
                .pieces
                .prev(target)
                .expect("invariant violated: delete ran past the first piece");
            self.remove_piece(target);
            removed += 1;
            target = prev;
        }
    }
}
