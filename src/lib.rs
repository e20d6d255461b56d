//! A small and simple library for exhaustive minimax search.
//!
//! This library provides an exact minimax search over two-player, perfect-information games,
//! with a ready-made Tic-Tac-Toe board. The search explores every line of play, so the score it
//! reports is the game-theoretic value of the position and the move it picks is optimal.
//! Alpha-beta pruning and a transposition table are available to speed it up without changing
//! the result.
//!
//! # Example
//!
//! ```rust
//! use minimax_lib::board::Player;
//! use minimax_lib::boards::tic_tac_toe::TicTacToeBoard;
//! use minimax_lib::minimax::{Minimax, Scoring};
//!
//! // X has two in a row and it is X's turn
//! let board: TicTacToeBoard = "XX-OO----".parse().unwrap();
//!
//! // Create and configure a new search instance using the builder
//! let mut minimax = Minimax::builder()
//!     .with_scoring(Scoring::Outcome)
//!     .with_alpha_beta_pruning(true)
//!     .build();
//!
//! let result = minimax.search(&board, Player::X).unwrap();
//! assert_eq!(result.score, 1);
//! assert_eq!(result.best_move, Some(2));
//! ```

/// Contains the `Board` trait and related enums that define the interface for a game.
pub mod board;
/// Contains pre-made implementations of the `Board` trait.
pub mod boards;
/// Error type shared by boards and the search.
pub mod error;
/// Materializes the complete minimax tree of a position in an arena.
pub mod game_tree;
/// The core module of the library, containing the `Minimax` search.
pub mod minimax;
/// Contains traits and implementations for random number generation.
pub mod random;

pub use error::{Error, Result};
