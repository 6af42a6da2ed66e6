//! Piece List
//!
//! An ordered, doubly linked list of piece descriptors stored in an arena.
//! Concatenating the pieces in order (each resolved against its source
//! buffer) gives the current document.
//!
//! # Handles
//!
//! Nodes are addressed by [`Handle`]s, which are slot indices into the
//! arena. A handle stays valid until its piece is removed. Removed slots go
//! on a free list and are reused by later insertions, so a handle kept past
//! removal may alias an unrelated piece: whoever removes a piece must drop
//! every copy of its handle first (the piece table clears its editing
//! cache).
//!
//! # Operations
//!
//! - `insert_first` / `insert_last` / `insert_before` / `insert_after`: O(1)
//! - `remove(handle)`: O(1)
//! - `split(handle, at)`: O(1), the truncated first half keeps the handle
//! - `iter()`: in-order traversal
//!
//! ```text
//! head -> [Original 0..5] <-> [Additional 0..3] <-> [Original 5..10] <- tail
//! ```

use crate::buffer::Source;

/// Arena slot index. u32 keeps nodes small.
type Idx = u32;

/// Null link marker.
const NULL: Idx = Idx::MAX;

/// A stable reference to a live piece in a [`PieceList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle(Idx);

/// A contiguous run of characters drawn from exactly one buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    /// The buffer the characters live in.
    pub source: Source,
    /// Offset of the first character within the source buffer.
    pub start: usize,
    /// Number of characters. Never zero for a piece held by a list.
    pub len: usize,
}

impl Piece {
    pub fn new(source: Source, start: usize, len: usize) -> Piece {
        return Piece { source, start, len };
    }

    /// Offset in the source buffer just past the last character.
    pub fn end(&self) -> usize {
        return self.start + self.len;
    }
}

struct Node {
    piece: Piece,
    prev: Idx,
    next: Idx,
    live: bool,
}

/// Ordered list of pieces with O(1) splicing around a known node.
pub struct PieceList {
    /// Arena of nodes, live and free.
    nodes: Vec<Node>,
    head: Idx,
    tail: Idx,
    /// Number of live pieces.
    len: usize,
    /// Free slots available for reuse.
    free_list: Vec<Idx>,
}

impl PieceList {
    pub fn new() -> PieceList {
        return PieceList {
            nodes: Vec::new(),
            head: NULL,
            tail: NULL,
            len: 0,
            free_list: Vec::new(),
        };
    }

    /// Number of live pieces.
    pub fn len(&self) -> usize {
        return self.len;
    }

    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    pub fn first(&self) -> Option<Handle> {
        return link(self.head);
    }

    pub fn last(&self) -> Option<Handle> {
        return link(self.tail);
    }

    /// The piece after `handle`, if any.
    pub fn next(&self, handle: Handle) -> Option<Handle> {
        return link(self.node(handle).next);
    }

    /// The piece before `handle`, if any.
    pub fn prev(&self, handle: Handle) -> Option<Handle> {
        return link(self.node(handle).prev);
    }

    /// Whether `handle` names a live piece.
    pub fn contains(&self, handle: Handle) -> bool {
        return self
            .nodes
            .get(handle.0 as usize)
            .is_some_and(|node| node.live);
    }

    pub fn get(&self, handle: Handle) -> &Piece {
        return &self.node(handle).piece;
    }

    pub fn get_mut(&mut self, handle: Handle) -> &mut Piece {
        return &mut self.node_mut(handle).piece;
    }

    // --- Node access helpers ---

    fn node(&self, handle: Handle) -> &Node {
        let node = &self.nodes[handle.0 as usize];
        assert!(node.live, "stale piece handle {:?}", handle);
        return node;
    }

    fn node_mut(&mut self, handle: Handle) -> &mut Node {
        let node = &mut self.nodes[handle.0 as usize];
        assert!(node.live, "stale piece handle {:?}", handle);
        return node;
    }

    fn alloc(&mut self, piece: Piece, prev: Idx, next: Idx) -> Idx {
        let node = Node { piece, prev, next, live: true };
        self.len += 1;
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx as usize] = node;
            return idx;
        }
        let idx = self.nodes.len() as Idx;
        assert!(idx != NULL, "piece arena exhausted");
        self.nodes.push(node);
        return idx;
    }

    // --- Splicing ---

    /// Insert `piece` at the front of the list.
    pub fn insert_first(&mut self, piece: Piece) -> Handle {
        let old_head = self.head;
        let idx = self.alloc(piece, NULL, old_head);
        if old_head == NULL {
            self.tail = idx;
        } else {
            self.nodes[old_head as usize].prev = idx;
        }
        self.head = idx;
        return Handle(idx);
    }

    /// Insert `piece` at the back of the list.
    pub fn insert_last(&mut self, piece: Piece) -> Handle {
        let old_tail = self.tail;
        let idx = self.alloc(piece, old_tail, NULL);
        if old_tail == NULL {
            self.head = idx;
        } else {
            self.nodes[old_tail as usize].next = idx;
        }
        self.tail = idx;
        return Handle(idx);
    }

    /// Insert `piece` immediately before `handle`.
    pub fn insert_before(&mut self, handle: Handle, piece: Piece) -> Handle {
        let prev = self.node(handle).prev;
        let idx = self.alloc(piece, prev, handle.0);
        self.nodes[handle.0 as usize].prev = idx;
        if prev == NULL {
            self.head = idx;
        } else {
            self.nodes[prev as usize].next = idx;
        }
        return Handle(idx);
    }

    /// Insert `piece` immediately after `handle`.
    pub fn insert_after(&mut self, handle: Handle, piece: Piece) -> Handle {
        let next = self.node(handle).next;
        let idx = self.alloc(piece, handle.0, next);
        self.nodes[handle.0 as usize].next = idx;
        if next == NULL {
            self.tail = idx;
        } else {
            self.nodes[next as usize].prev = idx;
        }
        return Handle(idx);
    }

    /// Unlink and free `handle`, returning its piece.
    ///
    /// The handle is dead afterwards; the slot will be reused.
    pub fn remove(&mut self, handle: Handle) -> Piece {
        let node = self.node_mut(handle);
        let (prev, next, piece) = (node.prev, node.next, node.piece);
        node.live = false;
        node.prev = NULL;
        node.next = NULL;

        if prev == NULL {
            self.head = next;
        } else {
            self.nodes[prev as usize].next = next;
        }
        if next == NULL {
            self.tail = prev;
        } else {
            self.nodes[next as usize].prev = prev;
        }

        self.len -= 1;
        self.free_list.push(handle.0);
        return piece;
    }

    /// Split `handle` at `at` characters into the piece.
    ///
    /// `handle` keeps `[0, at)`; a new piece holding `[at, len)` of the same
    /// source range is inserted right after it and returned.
    pub fn split(&mut self, handle: Handle, at: usize) -> Handle {
        let piece = &mut self.node_mut(handle).piece;
        assert!(
            at > 0 && at < piece.len,
            "split offset {} outside piece of length {}",
            at,
            piece.len
        );
        let tail = Piece::new(piece.source, piece.start + at, piece.len - at);
        piece.len = at;
        return self.insert_after(handle, tail);
    }

    /// Iterate over pieces in document order.
    pub fn iter(&self) -> Iter<'_> {
        return Iter {
            list: self,
            idx: self.head,
        };
    }

    // --- Invariant checking ---

    /// Verify the link structure: no cycles, `prev` mirrors `next`, the
    /// live count matches, and no piece is empty.
    #[cfg(debug_assertions)]
    pub fn check_invariants(&self) {
        use rustc_hash::FxHashSet;

        let mut seen = FxHashSet::default();
        let mut prev = NULL;
        let mut idx = self.head;
        while idx != NULL {
            assert!(
                seen.insert(idx),
                "INVARIANT VIOLATED: node {} reached twice",
                idx
            );
            let node = &self.nodes[idx as usize];
            assert!(node.live, "INVARIANT VIOLATED: freed node {} is linked", idx);
            assert_eq!(
                node.prev, prev,
                "INVARIANT VIOLATED: node {} prev link disagrees",
                idx
            );
            assert!(
                node.piece.len > 0,
                "INVARIANT VIOLATED: node {} holds an empty piece",
                idx
            );
            prev = idx;
            idx = node.next;
        }
        assert_eq!(prev, self.tail, "INVARIANT VIOLATED: tail is not the last node");
        assert_eq!(
            seen.len(),
            self.len,
            "INVARIANT VIOLATED: linked count={} != len={}",
            seen.len(),
            self.len
        );
        assert_eq!(
            self.nodes.len() - self.free_list.len(),
            self.len,
            "INVARIANT VIOLATED: free list out of sync"
        );
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    pub fn check_invariants(&self) {}
}

impl Default for PieceList {
    fn default() -> Self {
        return Self::new();
    }
}

fn link(idx: Idx) -> Option<Handle> {
    if idx == NULL {
        return None;
    }
    return Some(Handle(idx));
}

/// In-order iterator over the pieces of a [`PieceList`].
pub struct Iter<'a> {
    list: &'a PieceList,
    idx: Idx,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Piece;

    fn next(&mut self) -> Option<&'a Piece> {
        if self.idx == NULL {
            return None;
        }
        let node = &self.list.nodes[self.idx as usize];
        self.idx = node.next;
        return Some(&node.piece);
    }
}
