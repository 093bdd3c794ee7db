//! Error types for the board engine.
//!
//! Every rejected command maps onto one of four coarse return codes so that
//! bindings can hand a plain number to a renderer, while Rust callers match
//! on the specific reason.

use thiserror::Error;

use crate::{Direction, MAX_HISTORY};

/// Coarse result code reported across the binding boundary.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum ReturnCode {
    Ok = 0,
    /// An argument is outside its domain.
    InvalidParam = 1,
    /// A cell or the hand was expected to hold a piece (or to be free) and did not.
    Empty = 2,
    /// The rules forbid the command in the current state.
    Forbidden = 3,
}

impl<T> From<&EngineResult<T>> for ReturnCode {
    fn from(result: &EngineResult<T>) -> Self {
        match result {
            Ok(_) => ReturnCode::Ok,
            Err(err) => err.code(),
        }
    }
}

/// Errors returned by board engine commands.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Piece size outside 1..=3
    #[error("Invalid piece size: {size} (must be 1-3)")]
    InvalidSize { size: u8 },

    /// Player code that names neither side
    #[error("Invalid player: {player}")]
    InvalidPlayer { player: u8 },

    /// Direction code outside 0..=4
    #[error("Invalid direction: {direction}")]
    InvalidDirection { direction: u8 },

    /// Coordinates outside the grid
    #[error("Position ({row}, {col}) is outside the board")]
    OutOfBounds { row: i64, col: i64 },

    /// Rules that cannot describe a playable game
    #[error("Invalid rules: {reason}")]
    InvalidRules { reason: &'static str },

    /// No pieces of this size left to place
    #[error("No pieces of size {size} left to place")]
    QuotaExhausted { size: u8 },

    /// Placement target already holds a piece
    #[error("Cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    /// Pick source holds no piece
    #[error("Cell ({row}, {col}) is empty")]
    CellEmpty { row: usize, col: usize },

    /// Pick outside the player's frontier row
    #[error("Row {row} is not the frontier row for this player")]
    NotFrontier { row: usize },

    /// A winner has already been declared
    #[error("The game is over")]
    GameOver,

    /// A piece is already in hand
    #[error("A piece is already picked")]
    AlreadyPicked,

    /// No piece in hand
    #[error("No piece is picked")]
    NothingPicked,

    /// Step rejected by the movement rules
    #[error("Move {direction:?} is not allowed")]
    MoveForbidden { direction: Direction },

    /// Swap requested while the picked piece is not above another piece
    #[error("The picked piece is not hovering over another piece")]
    NotHovering,

    /// Swap destination already holds a piece
    #[error("Swap target ({row}, {col}) is occupied")]
    SwapTargetOccupied { row: usize, col: usize },

    /// Step history reached its capacity
    #[error("Step history is full ({} steps)", MAX_HISTORY)]
    HistoryFull,
}

impl EngineError {
    /// Coarse return code for this error.
    pub fn code(&self) -> ReturnCode {
        match self {
            EngineError::InvalidSize { .. }
            | EngineError::InvalidPlayer { .. }
            | EngineError::InvalidDirection { .. }
            | EngineError::OutOfBounds { .. }
            | EngineError::InvalidRules { .. } => ReturnCode::InvalidParam,

            EngineError::CellOccupied { .. }
            | EngineError::CellEmpty { .. }
            | EngineError::NothingPicked => ReturnCode::Empty,

            EngineError::QuotaExhausted { .. }
            | EngineError::NotFrontier { .. }
            | EngineError::GameOver
            | EngineError::AlreadyPicked
            | EngineError::MoveForbidden { .. }
            | EngineError::NotHovering
            | EngineError::SwapTargetOccupied { .. }
            | EngineError::HistoryFull => ReturnCode::Forbidden,
        }
    }
}

/// Result type alias for board engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
