//! Error types for the optimizer.

use thiserror::Error;

/// Structural input errors. Detected before any packing starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    /// Board dimensions are zero, or the kerf leaves no usable material.
    #[error("invalid board {width}x{height} with kerf {kerf}: dimensions must be non-zero and larger than the kerf")]
    InvalidBoard { width: u32, height: u32, kerf: u32 },

    /// A panel that can never be placed on the board.
    #[error("panel #{index} ({width}x{height}) exceeds board size {board_width}x{board_height}")]
    InvalidPanel {
        index: usize,
        width: u32,
        height: u32,
        board_width: u32,
        board_height: u32,
    },

    /// A token or dimension string could not be parsed.
    #[error("{0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, OptimizeError>;
