//! Editing cache for spatially local edits.
//!
//! Typing inserts at the offset the previous insert ended at; backspace
//! deletes at the offset the previous delete left behind. The cache
//! remembers the piece the last edit touched and the document offset where
//! that piece ends, so those edits skip position resolution entirely and
//! other lookups can scan from a nearby starting point.

use crate::piece_list::Handle;

/// The most recently touched piece and the document offset it ends at.
///
/// Empty is distinct from "ends at offset 0". The handle is a back
/// reference: whoever removes the cached piece must [`forget`] it.
///
/// [`forget`]: EditingCache::forget
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct EditingCache {
    entry: Option<(Handle, usize)>,
}

impl EditingCache {
    pub fn empty() -> EditingCache {
        return EditingCache { entry: None };
    }

    pub fn at(piece: Handle, end: usize) -> EditingCache {
        return EditingCache {
            entry: Some((piece, end)),
        };
    }

    /// The cached piece and its end offset, if any.
    #[inline]
    pub fn get(&self) -> Option<(Handle, usize)> {
        return self.entry;
    }

    #[inline]
    pub fn set(&mut self, piece: Handle, end: usize) {
        self.entry = Some((piece, end));
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// Clear the cache if it refers to `piece`.
    #[inline]
    pub fn forget(&mut self, piece: Handle) {
        if self.entry.is_some_and(|(cached, _)| cached == piece) {
            self.entry = None;
        }
    }

    /// The cached piece, if it ends exactly at `position`.
    #[inline]
    pub fn ends_at(&self, position: usize) -> Option<Handle> {
        return match self.entry {
            Some((piece, end)) if end == position => Some(piece),
            _ => None,
        };
    }

    /// The cached entry, unless it carries no directional information.
    ///
    /// An entry ending at `doc_len` says nothing about which side of the
    /// document a target lies on, so it counts as absent.
    #[inline]
    pub fn directional(&self, doc_len: usize) -> Option<(Handle, usize)> {
        return self.entry.filter(|&(_, end)| end != doc_len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Source;
    use crate::piece_list::{Piece, PieceList};

    fn handles(count: usize) -> Vec<Handle> {
        let mut list = PieceList::new();
        return (0..count)
            .map(|i| list.insert_last(Piece::new(Source::Original, i, 1)))
            .collect();
    }

    #[test]
    fn cache_initially_empty() {
        let cache = EditingCache::default();
        assert_eq!(cache.get(), None);
        assert_eq!(cache.ends_at(0), None);
    }

    #[test]
    fn empty_differs_from_offset_zero() {
        let h = handles(1);
        let cache = EditingCache::at(h[0], 0);
        assert_eq!(cache.get(), Some((h[0], 0)));
        assert_eq!(cache.ends_at(0), Some(h[0]));
        assert_ne!(cache, EditingCache::empty());
    }

    #[test]
    fn set_and_clear() {
        let h = handles(2);
        let mut cache = EditingCache::empty();

        cache.set(h[1], 7);
        assert_eq!(cache.get(), Some((h[1], 7)));

        cache.clear();
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn exact_hit() {
        let h = handles(1);
        let cache = EditingCache::at(h[0], 10);

        assert_eq!(cache.ends_at(10), Some(h[0]));
        assert_eq!(cache.ends_at(9), None);
        assert_eq!(cache.ends_at(11), None);
    }

    #[test]
    fn forget_only_matching_piece() {
        let h = handles(2);
        let mut cache = EditingCache::at(h[0], 4);

        cache.forget(h[1]);
        assert_eq!(cache.get(), Some((h[0], 4)));

        cache.forget(h[0]);
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn end_of_document_is_not_directional() {
        let h = handles(1);
        let cache = EditingCache::at(h[0], 12);

        assert_eq!(cache.directional(12), None);
        assert_eq!(cache.directional(20), Some((h[0], 12)));
        assert_eq!(EditingCache::empty().directional(0), None);
    }
}
