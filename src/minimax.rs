use crate::board::{AppliedMove, Board, GameOutcome, Player};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::marker::PhantomData;
use tracing::{debug, trace};

/// How terminal positions are turned into scores.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Scoring {
    /// X win is `+1`, O win is `-1`, draw is `0`.
    #[default]
    Outcome,
    /// Wins are worth `1 + empty cells`, so a faster win (or a slower loss) is preferred.
    ///
    /// On a 3x3 board scores lie in `-10..=10`. Unlike [`Scoring::Outcome`] this changes
    /// which move is chosen, not only the magnitude of the score.
    DepthWeighted,
}

impl Scoring {
    /// Score of a finished game from X's point of view, or `None` while it is ongoing.
    pub fn terminal_score(self, outcome: GameOutcome, remaining_moves: usize) -> Option<i32> {
        let weight = match self {
            Scoring::Outcome => 1,
            Scoring::DepthWeighted => 1 + remaining_moves as i32,
        };
        match outcome {
            GameOutcome::XWins => Some(weight),
            GameOutcome::OWins => Some(-weight),
            GameOutcome::Draw => Some(0),
            GameOutcome::Ongoing => None,
        }
    }
}

/// The exact game-theoretic value of a position and the move achieving it.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct SearchResult<M> {
    /// Positive favors X, negative favors O, zero is a draw.
    pub score: i32,
    /// `None` when the position is already terminal.
    pub best_move: Option<M>,
}

impl<M> SearchResult<M> {
    fn terminal(score: i32) -> Self {
        Self {
            score,
            best_move: None,
        }
    }
}

/// Counters collected during the most recent search.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct SearchStats {
    /// Positions visited, including terminal ones.
    pub nodes: u64,
    pub transposition_hits: u64,
    /// Number of times alpha-beta pruning skipped the remaining siblings.
    pub cutoffs: u64,
}

/// Exhaustive minimax search.
///
/// X maximizes and O minimizes. Moves are tried in the order the board returns them and a
/// candidate replaces the current best only when it is strictly better, so ties go to the
/// first move. Alpha-beta pruning and the transposition table never change the result.
pub struct Minimax<T: Board> {
    scoring: Scoring,
    use_alpha_beta_pruning: bool,
    transpositions: Option<HashMap<(u128, Player), SearchResult<T::Move>>>,
    stats: SearchStats,
}

impl<T: Board> Default for Minimax<T> {
    fn default() -> Self {
        MinimaxBuilder::new().build()
    }
}

/// A builder for creating instances of `Minimax`.
pub struct MinimaxBuilder<T: Board> {
    scoring: Scoring,
    use_alpha_beta_pruning: bool,
    use_transposition_table: bool,
    board: PhantomData<T>,
}

impl<T: Board> Default for MinimaxBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Board> MinimaxBuilder<T> {
    /// Creates a builder with outcome scoring, alpha-beta pruning on and no transposition table.
    pub fn new() -> Self {
        Self {
            scoring: Scoring::Outcome,
            use_alpha_beta_pruning: true,
            use_transposition_table: false,
            board: PhantomData,
        }
    }

    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    /// Enables or disables alpha-beta pruning.
    pub fn with_alpha_beta_pruning(mut self, use_abp: bool) -> Self {
        self.use_alpha_beta_pruning = use_abp;
        self
    }

    /// Enables caching of exact results keyed by position and player to move.
    ///
    /// The cache lives as long as the `Minimax` instance and is shared by all of its searches.
    pub fn with_transposition_table(mut self, use_tt: bool) -> Self {
        self.use_transposition_table = use_tt;
        self
    }

    pub fn build(self) -> Minimax<T> {
        Minimax::new(
            self.scoring,
            self.use_alpha_beta_pruning,
            self.use_transposition_table,
        )
    }
}

impl<T: Board> Minimax<T> {
    /// Returns a new builder for `Minimax`.
    pub fn builder() -> MinimaxBuilder<T> {
        MinimaxBuilder::new()
    }

    /// Creates a new `Minimax` instance.
    ///
    /// It is recommended to use the builder pattern via `Minimax::builder()` instead.
    pub fn new(
        scoring: Scoring,
        use_alpha_beta_pruning: bool,
        use_transposition_table: bool,
    ) -> Self {
        Self {
            scoring,
            use_alpha_beta_pruning,
            transpositions: use_transposition_table.then(HashMap::new),
            stats: SearchStats::default(),
        }
    }

    /// Statistics of the last call to `search` or `solve`.
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// Computes the exact score and best move for `player` to move on `board`.
    ///
    /// The caller's board is left untouched; the search works on its own copy. The board is
    /// assumed to be valid, use [`Minimax::solve`] to validate first.
    pub fn search(&mut self, board: &T, player: Player) -> Result<SearchResult<T::Move>> {
        self.stats = SearchStats::default();
        let mut working = board.clone();
        let result = self.minimax(&mut working, player, i32::MIN, i32::MAX, true)?;
        debug!(
            ?player,
            score = result.score,
            best_move = ?result.best_move,
            nodes = self.stats.nodes,
            transposition_hits = self.stats.transposition_hits,
            cutoffs = self.stats.cutoffs,
            "search finished"
        );
        Ok(result)
    }

    /// Validates `board`, works out whose turn it is and searches from there.
    pub fn solve(&mut self, board: &T) -> Result<SearchResult<T::Move>> {
        let player = board.validate()?;
        self.search(board, player)
    }

    fn minimax(
        &mut self,
        board: &mut T,
        player: Player,
        mut alpha: i32,
        mut beta: i32,
        is_root: bool,
    ) -> Result<SearchResult<T::Move>> {
        self.stats.nodes += 1;

        let outcome = board.evaluate();
        if let Some(score) = self.scoring.terminal_score(outcome, board.remaining_moves()) {
            return Ok(SearchResult::terminal(score));
        }

        let key = (board.get_hash(), player);
        if let Some(hit) = self.transpositions.as_ref().and_then(|t| t.get(&key)) {
            self.stats.transposition_hits += 1;
            return Ok(*hit);
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let mut best: Option<(i32, T::Move)> = None;
        for b_move in board.legal_moves() {
            let score = {
                let mut applied = AppliedMove::new(&mut *board, b_move, player)?;
                self.minimax(&mut *applied, player.opponent(), alpha, beta, false)?
                    .score
            };
            if is_root {
                trace!(?player, ?b_move, score, "root move scored");
            }

            let improves = match best {
                None => true,
                Some((best_score, _)) if player.is_maximizer() => score > best_score,
                Some((best_score, _)) => score < best_score,
            };
            if improves {
                best = Some((score, b_move));
            }

            if self.use_alpha_beta_pruning {
                if player.is_maximizer() {
                    alpha = alpha.max(score);
                } else {
                    beta = beta.min(score);
                }
                if alpha >= beta {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
        }

        let (score, b_move) = best.ok_or(Error::NoLegalMoves)?;
        let result = SearchResult {
            score,
            best_move: Some(b_move),
        };

        // Inside the original window a fail-soft score is exact.
        let is_exact = !self.use_alpha_beta_pruning || (alpha_orig < score && score < beta_orig);
        if is_exact {
            if let Some(table) = self.transpositions.as_mut() {
                table.insert(key, result);
            }
        }
        Ok(result)
    }
}

/// Searches `board` with the default configuration.
pub fn search<T: Board>(board: &T, player: Player) -> Result<SearchResult<T::Move>> {
    Minimax::default().search(board, player)
}
