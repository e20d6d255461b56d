//! Ready-made implementations of the `Board` trait.

/// The 3x3 Tic-Tac-Toe board.
pub mod tic_tac_toe;
