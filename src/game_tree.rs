use crate::board::{AppliedMove, Board, GameOutcome, Player};
use crate::error::{Error, Result};
use crate::minimax::Scoring;
use ego_tree::{NodeMut, NodeRef, Tree};
use std::fmt::{Debug, Write};
use tracing::debug;

/// Represents a single position in the materialized game tree.
#[derive(Debug, Clone, PartialEq)]
pub struct GameTreeNode<M> {
    /// The move that led to this node's state from its parent. `None` for the root node.
    pub prev_move: Option<M>,
    /// The player whose turn it is in this node's game state.
    pub current_player: Player,
    /// The outcome of the game at this node.
    pub outcome: GameOutcome,
    /// The minimax score of this node, from X's point of view.
    pub score: i32,
    /// The move chosen by minimax from this node. `None` for terminal nodes.
    pub best_move: Option<M>,
}

impl<M> GameTreeNode<M> {
    fn new(prev_move: Option<M>, current_player: Player, outcome: GameOutcome) -> Self {
        Self {
            prev_move,
            current_player,
            outcome,
            score: 0,
            best_move: None,
        }
    }
}

/// The full minimax tree below a position, stored in an arena.
///
/// Every reachable position is expanded. Children are kept in move order and the scores
/// follow the same tie-break as [`crate::minimax::Minimax`], so the root agrees with it.
pub struct GameTree<M> {
    tree: Tree<GameTreeNode<M>>,
}

impl<M: Copy + Debug + PartialEq> GameTree<M> {
    /// Expands every line of play from `board` with `player` to move.
    pub fn build<T: Board<Move = M>>(board: &T, player: Player, scoring: Scoring) -> Result<Self> {
        let mut working = board.clone();
        let mut tree = Tree::new(GameTreeNode::new(None, player, working.evaluate()));
        expand(tree.root_mut(), &mut working, player, scoring)?;

        let game_tree = Self { tree };
        debug!(
            ?player,
            nodes = game_tree.node_count(),
            score = game_tree.root().value().score,
            "game tree built"
        );
        Ok(game_tree)
    }

    pub fn root(&self) -> NodeRef<'_, GameTreeNode<M>> {
        self.tree.root()
    }

    /// Returns an immutable reference to the underlying arena.
    pub fn get_tree(&self) -> &Tree<GameTreeNode<M>> {
        &self.tree
    }

    pub fn node_count(&self) -> usize {
        self.tree.nodes().count()
    }

    /// The principal variation: best moves from the root until the game ends.
    pub fn best_line(&self) -> Vec<M> {
        let mut line = Vec::new();
        let mut node = self.root();
        while let Some(best_move) = node.value().best_move {
            line.push(best_move);
            match node
                .children()
                .find(|child| child.value().prev_move == Some(best_move))
            {
                Some(child) => node = child,
                None => break,
            }
        }
        line
    }

    /// Renders the tree with one line per node, indented two spaces per level.
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_node(self.root(), 0, &mut out);
        out
    }
}

fn render_node<M: Debug>(node: NodeRef<'_, GameTreeNode<M>>, level: usize, out: &mut String) {
    let data = node.value();
    // Writing into a String cannot fail.
    let _ = match &data.prev_move {
        None => writeln!(out, "Root Node - Score {}", data.score),
        Some(prev_move) => writeln!(
            out,
            "{}Player {:?}, Square {:?}, Score {}",
            "  ".repeat(level),
            data.current_player.opponent(),
            prev_move,
            data.score
        ),
    };
    for child in node.children() {
        render_node(child, level + 1, out);
    }
}

fn expand<T: Board>(
    mut node: NodeMut<'_, GameTreeNode<T::Move>>,
    board: &mut T,
    player: Player,
    scoring: Scoring,
) -> Result<i32> {
    let outcome = board.evaluate();
    if let Some(score) = scoring.terminal_score(outcome, board.remaining_moves()) {
        node.value().score = score;
        return Ok(score);
    }

    let mut best: Option<(i32, T::Move)> = None;
    for b_move in board.legal_moves() {
        let mut applied = AppliedMove::new(&mut *board, b_move, player)?;
        let child_value = GameTreeNode::new(Some(b_move), player.opponent(), applied.evaluate());
        let score = expand(
            node.append(child_value),
            &mut *applied,
            player.opponent(),
            scoring,
        )?;

        let improves = match best {
            None => true,
            Some((best_score, _)) if player.is_maximizer() => score > best_score,
            Some((best_score, _)) => score < best_score,
        };
        if improves {
            best = Some((score, b_move));
        }
    }

    let (score, b_move) = best.ok_or(Error::NoLegalMoves)?;
    let data = node.value();
    data.score = score;
    data.best_move = Some(b_move);
    Ok(score)
}
