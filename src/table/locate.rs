//! Position resolution.
//!
//! Maps a document offset to `(piece, offset_within_piece)`. There are
//! three places a linear scan can start: the first piece, the last piece,
//! or the cached piece. Each scan costs the number of pieces it walks, so
//! the resolver starts from whichever known offset is nearest.
//!
//! # Boundaries
//!
//! An offset on the boundary between two pieces has two spellings:
//! `(earlier, earlier.len)` and `(later, 0)`. Forward scans report the
//! first, backward scans the second. Callers accept both.

use tracing::trace;

use super::PieceTable;
use crate::piece_list::Handle;

/// Where a position scan starts and which way it walks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Strategy {
    /// Walk forward from the first piece.
    FromStart,
    /// Walk backward from the last piece.
    FromEnd,
    /// Walk forward from the cached piece.
    CacheForward,
    /// Walk backward from the cached piece.
    CacheBackward,
}

impl PieceTable {
    /// Pick the scan that starts nearest to `position`. Ties go to the
    /// cache.
    pub(crate) fn strategy(&self, position: usize) -> Strategy {
        let Some((_, cache_end)) = self.cache.directional(self.len) else {
            if position <= self.len / 2 {
                return Strategy::FromStart;
            }
            return Strategy::FromEnd;
        };

        if cache_end > position {
            if cache_end - position > position {
                return Strategy::FromStart;
            }
            return Strategy::CacheBackward;
        }

        if position - cache_end > self.len - position {
            return Strategy::FromEnd;
        }
        return Strategy::CacheForward;
    }

    /// Find the piece containing `position`, for `0 <= position <= len`.
    ///
    /// Panics if the pieces cannot account for `position`; that means the
    /// tracked length and the piece list disagree.
    pub(crate) fn locate(&self, position: usize) -> (Handle, usize) {
        let strategy = self.strategy(position);
        trace!(position, ?strategy, "locating position");

        let found = match strategy {
            Strategy::FromStart => self.scan_forward(self.pieces.first(), 0, position),
            Strategy::FromEnd => self.scan_backward(self.pieces.last(), self.len, position),
            Strategy::CacheForward | Strategy::CacheBackward => {
                let (cached, end) = self
                    .cache
                    .get()
                    .expect("invariant violated: cache strategy chosen with an empty cache");
                if strategy == Strategy::CacheForward {
                    let before = end - self.pieces.get(cached).len;
                    self.scan_forward(Some(cached), before, position)
                } else {
                    self.scan_backward(Some(cached), end, position)
                }
            }
        };

        return found.unwrap_or_else(|| {
            panic!(
                "invariant violated: position {} not found in document of length {}",
                position, self.len
            )
        });
    }

    /// Walk forward from `from`, which begins at document offset `before`,
    /// until a piece ends at or after `position`.
    fn scan_forward(
        &self,
        from: Option<Handle>,
        mut before: usize,
        position: usize,
    ) -> Option<(Handle, usize)> {
        let mut node = from;
        while let Some(handle) = node {
            let len = self.pieces.get(handle).len;
            if before + len >= position {
                return Some((handle, position - before));
            }
            before += len;
            node = self.pieces.next(handle);
        }
        return None;
    }

    /// Walk backward from `from`, which ends at document offset `after`,
    /// until a piece starts at or before `position`.
    fn scan_backward(
        &self,
        from: Option<Handle>,
        mut after: usize,
        position: usize,
    ) -> Option<(Handle, usize)> {
        let mut node = from;
        while let Some(handle) = node {
            after -= self.pieces.get(handle).len;
            if after <= position {
                return Some((handle, position - after));
            }
            node = self.pieces.prev(handle);
        }
        return None;
    }
}
