use crate::error::Result;
use std::fmt::Debug;
use std::ops::{Deref, DerefMut};
use tracing::error;

/// The central trait of the library, defining the interface for a game state.
///
/// To search a custom game, this trait must be implemented.
/// The search engine mutates a single working copy through `apply_move` and `undo_move`,
/// so implementations must restore the exact prior state on undo.
pub trait Board: Default + Clone {
    /// The type representing a move in the game. For Tic-Tac-Toe this is a cell index.
    type Move: Copy + Debug + PartialEq;

    /// Returns every legal move in a deterministic, ascending order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Places `player`'s mark according to `b_move`.
    fn apply_move(&mut self, b_move: Self::Move, player: Player) -> Result<()>;

    /// Reverts a move previously placed with `apply_move`, returning the player whose mark was removed.
    fn undo_move(&mut self, b_move: Self::Move) -> Result<Player>;

    /// Classifies the current position.
    fn evaluate(&self) -> GameOutcome;

    /// Number of moves left before the board is full.
    fn remaining_moves(&self) -> usize;

    /// Checks that the position is reachable and returns the player to move.
    fn validate(&self) -> Result<Player>;

    /// Returns a hash value for the current board state.
    fn get_hash(&self) -> u128;
}

/// Terminal classification of a board.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum GameOutcome {
    /// The game is still ongoing.
    Ongoing = 0,
    /// X completed a line.
    XWins = 1,
    /// O completed a line.
    OWins = 2,
    /// The board is full and nobody completed a line.
    Draw = 3,
}

impl GameOutcome {
    pub fn is_terminal(self) -> bool {
        self != GameOutcome::Ongoing
    }

    /// The winning player, if any.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::XWins => Some(Player::X),
            GameOutcome::OWins => Some(Player::O),
            GameOutcome::Draw | GameOutcome::Ongoing => None,
        }
    }

    pub(crate) fn from_winner(player: Player) -> Self {
        match player {
            Player::X => GameOutcome::XWins,
            Player::O => GameOutcome::OWins,
        }
    }
}

/// The two players. X moves first and maximizes the score, O minimizes it.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Player {
    X = 1,
    O = 2,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn is_maximizer(self) -> bool {
        self == Player::X
    }
}

/// A move held on a board for the lifetime of the guard.
///
/// Creating the guard applies the move; dropping it undoes the move, so the board is
/// restored on every exit path of the scope that owns the guard.
pub struct AppliedMove<'a, T: Board> {
    board: &'a mut T,
    b_move: T::Move,
}

impl<'a, T: Board> AppliedMove<'a, T> {
    pub fn new(board: &'a mut T, b_move: T::Move, player: Player) -> Result<Self> {
        board.apply_move(b_move, player)?;
        Ok(Self { board, b_move })
    }
}

impl<T: Board> Deref for AppliedMove<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.board
    }
}

impl<T: Board> DerefMut for AppliedMove<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.board
    }
}

impl<T: Board> Drop for AppliedMove<'_, T> {
    fn drop(&mut self) {
        if let Err(err) = self.board.undo_move(self.b_move) {
            error!(b_move = ?self.b_move, %err, "failed to undo move");
        }
    }
}
