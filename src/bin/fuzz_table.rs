//! AFL fuzz harness for the piece table.
//!
//! Decodes the input into a stream of inserts, deletes, typing runs and
//! backspace runs, applies each to a table and to a plain `Vec<char>`
//! model, and asserts the two agree after every step. Typing and
//! backspacing at the cursor drive the editing cache's fast paths; the
//! positioned operations drive every search strategy.

use afl::fuzz;

#[path = "shared/fuzz_ops.rs"]
mod fuzz_ops;

use fuzz_ops::{FuzzOp, Replay};

fn main() {
    fuzz!(|data: &[u8]| {
        let mut replay = Replay::new();
        let mut remaining = data;

        while let Some((op, rest)) = FuzzOp::from_bytes(remaining) {
            remaining = rest;
            replay.apply(op);
        }
    });
}
