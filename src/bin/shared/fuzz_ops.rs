//! Operation decoding and a reference model shared by the fuzz harness and
//! the crash reproducer.
//!
//! The reference model is the document as a plain `Vec<char>`. Every
//! operation is applied to both; they must agree on the outcome (including
//! which error a rejected delete reports) and on the resulting text.

use piecework::{EditError, PieceTable};

/// Text the table starts from.
const ORIGINAL: &str = "the quick brown fox jumps over the lazy dog";

/// Characters inserted text is drawn from. Mixes widths so that byte and
/// char offsets disagree.
const ALPHABET: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'é', 'あ', 'い'];

#[derive(Debug, Clone, Copy)]
pub enum FuzzOp {
    /// Insert `len` chars at a fraction of the document. May land past the
    /// end, which the table clamps.
    Insert { pos_frac: u8, len: u8 },
    /// Delete at a fraction of the document. Length and position may be
    /// invalid on purpose.
    Delete { pos_frac: u8, len: u8 },
    /// Type `count` chars one at a time at the cursor.
    Type { count: u8 },
    /// Backspace `count` times at the cursor.
    Backspace { count: u8 },
}

impl FuzzOp {
    pub fn from_bytes(bytes: &[u8]) -> Option<(FuzzOp, &[u8])> {
        if bytes.is_empty() {
            return None;
        }

        let op_type = bytes[0] % 4;
        let rest = &bytes[1..];

        match op_type {
            0 if rest.len() >= 2 => {
                let op = FuzzOp::Insert {
                    pos_frac: rest[0],
                    len: (rest[1] % 32).saturating_add(1), // 1-32 chars
                };
                Some((op, &rest[2..]))
            }
            1 if rest.len() >= 2 => {
                let op = FuzzOp::Delete {
                    pos_frac: rest[0],
                    len: rest[1] % 17, // 0-16 chars
                };
                Some((op, &rest[2..]))
            }
            2 if !rest.is_empty() => {
                let op = FuzzOp::Type {
                    count: (rest[0] % 16).saturating_add(1),
                };
                Some((op, &rest[1..]))
            }
            3 if !rest.is_empty() => {
                let op = FuzzOp::Backspace {
                    count: (rest[0] % 16).saturating_add(1),
                };
                Some((op, &rest[1..]))
            }
            _ => None,
        }
    }
}

/// A table, its reference model, and the cursor left by the last edit.
pub struct Replay {
    pub table: PieceTable,
    pub model: Vec<char>,
    pub cursor: usize,
    /// Number of chars inserted so far, used to vary content.
    typed: usize,
}

impl Replay {
    pub fn new() -> Replay {
        return Replay {
            table: PieceTable::new(ORIGINAL),
            model: ORIGINAL.chars().collect(),
            cursor: 0,
            typed: 0,
        };
    }

    pub fn apply(&mut self, op: FuzzOp) {
        match op {
            FuzzOp::Insert { pos_frac, len } => {
                let pos = pos_frac as usize * (self.model.len() + 4) / 256;
                let text = self.content(len as usize);
                self.insert(&text, pos);
            }

            FuzzOp::Delete { pos_frac, len } => {
                let pos = pos_frac as usize * (self.model.len() + 2) / 256;
                self.delete(len as usize, pos);
            }

            FuzzOp::Type { count } => {
                for _ in 0..count {
                    let text = self.content(1);
                    self.insert(&text, self.cursor);
                }
            }

            FuzzOp::Backspace { count } => {
                for _ in 0..count {
                    if self.cursor == 0 {
                        break;
                    }
                    self.delete(1, self.cursor);
                }
            }
        }
        self.check();
    }

    fn content(&mut self, len: usize) -> String {
        let text = (0..len)
            .map(|i| ALPHABET[(self.typed + i) % ALPHABET.len()])
            .collect();
        self.typed += len;
        return text;
    }

    fn insert(&mut self, text: &str, pos: usize) {
        self.table.insert(text, pos);

        let pos = pos.min(self.model.len());
        let chars: Vec<char> = text.chars().collect();
        self.cursor = pos + chars.len();
        self.model.splice(pos..pos, chars);
    }

    fn delete(&mut self, length: usize, position: usize) {
        let expected = model_delete(&mut self.model, length, position);
        let actual = self.table.delete(length, position);
        assert_eq!(
            actual, expected,
            "delete({}, {}) disagrees with the model",
            length, position
        );
        if actual.is_ok() {
            self.cursor = position - length;
        }
    }

    /// Verify the table against the model.
    pub fn check(&self) {
        let expected: String = self.model.iter().collect();
        assert_eq!(self.table.render(), expected, "text diverged from model");
        assert_eq!(self.table.len(), self.model.len(), "length mismatch");

        let piece_total: usize = self.table.pieces().map(|p| p.len).sum();
        assert_eq!(piece_total, self.table.len(), "piece lengths do not sum to len");
        assert!(
            self.table.pieces().all(|p| p.len > 0),
            "empty piece in list"
        );
    }
}

/// Apply a delete to the model, with the same validation as the table's
/// default configuration.
fn model_delete(model: &mut Vec<char>, length: usize, position: usize) -> Result<(), EditError> {
    if position > model.len() {
        return Err(EditError::PositionBeyondDocument {
            position,
            len: model.len(),
        });
    }
    if length == 0 {
        return Err(EditError::InvalidLength);
    }
    if length > position {
        return Err(EditError::InvalidPosition { position, length });
    }
    model.drain(position - length..position);
    return Ok(());
}
