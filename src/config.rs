//! Table configuration.

/// What `delete` does with a position past the end of the document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overflow {
    /// Fail with [`EditError::PositionBeyondDocument`](crate::EditError::PositionBeyondDocument).
    #[default]
    Reject,
    /// Treat the position as the end of the document.
    Clamp,
}

/// Policy knobs for a [`PieceTable`](crate::PieceTable).
///
/// ```
/// use piecework::{Config, Overflow, PieceTable};
///
/// let config = Config::new().delete_past_end(Overflow::Clamp);
/// let mut table = PieceTable::with_config("12345", config);
/// table.delete(1, 99).unwrap();
/// assert_eq!(table.render(), "1234");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Handling of delete positions beyond the document. Insert positions
    /// beyond the document are always clamped.
    pub delete_past_end: Overflow,
}

impl Config {
    pub fn new() -> Config {
        return Config::default();
    }

    pub fn delete_past_end(mut self, overflow: Overflow) -> Config {
        self.delete_past_end = overflow;
        return self;
    }
}
