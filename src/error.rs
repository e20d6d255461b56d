use crate::board::Player;
use thiserror::Error;

/// Errors produced while manipulating boards or running a search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A move or undo referenced a cell outside the board.
    #[error("illegal move: cell {index} is out of range (expected 0..{size})")]
    CellOutOfRange { index: usize, size: usize },

    /// A move targeted a cell that is already taken.
    #[error("illegal move: cell {index} is already occupied by {occupant:?}")]
    CellOccupied { index: usize, occupant: Player },

    /// An undo targeted a cell that holds no move.
    #[error("cannot undo cell {index}: it is empty")]
    CellEmpty { index: usize },

    #[error("invalid piece counts: X={x_count}, O={o_count} (must be equal or X ahead by 1)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("invalid board: both players have three in a row")]
    BothPlayersWin,

    #[error("invalid board: {winner:?} has three in a row but {last_mover:?} moved last")]
    WinnerMismatch { winner: Player, last_mover: Player },

    #[error("invalid board length: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    /// The board reported an ongoing game but offered no moves.
    #[error("no legal moves available in an ongoing position")]
    NoLegalMoves,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
