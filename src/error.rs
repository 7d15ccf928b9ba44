use thiserror::Error;

/// Errors raised while building or editing a [PathingGrid](crate::pathing_grid::PathingGrid).
/// Searching never fails; see [PathOutcome](crate::solver::PathOutcome) for why a path is missing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("coordinate ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },

    #[error("unexpected character {found:?} at line {line}, column {column}")]
    Parse {
        line: usize,
        column: usize,
        found: char,
    },

    #[error("line {line} has {found} cells, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, GridError>;
