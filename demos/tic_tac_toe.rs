extern crate minimax_lib;

use minimax_lib::board::{Board, GameOutcome, Player};
use minimax_lib::boards::tic_tac_toe::TicTacToeBoard;
use minimax_lib::game_tree::GameTree;
use minimax_lib::minimax::{Minimax, Scoring};
use minimax_lib::random::StandardRandomGenerator;
use tracing_subscriber::EnvFilter;

fn main() -> minimax_lib::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut minimax = Minimax::builder()
        .with_scoring(Scoring::DepthWeighted)
        .with_transposition_table(true)
        .build();

    // Perfect play from both sides always ends in a draw
    let mut board = TicTacToeBoard::new();
    let mut player = Player::X;
    while !board.evaluate().is_terminal() {
        let result = minimax.search(&board, player)?;
        let Some(best_move) = result.best_move else {
            break;
        };
        board.apply_move(best_move, player)?;
        println!("{player:?} plays {best_move} (score {})", result.score);
        player = player.opponent();
    }
    println!("{board}\nOutcome: {:?}\n", board.evaluate());
    assert_eq!(board.evaluate(), GameOutcome::Draw);

    // Solve a random opening
    let mut rng = StandardRandomGenerator;
    let (opening, to_move) = TicTacToeBoard::random_position(&mut rng, 3);
    let result = minimax.solve(&opening)?;
    println!(
        "{opening}\n{to_move:?} to move: score {}, best move {:?}\n",
        result.score, result.best_move
    );

    // The whole tree of a nearly finished game
    let endgame: TicTacToeBoard = "XXOX-OO--".parse()?;
    let tree = GameTree::build(&endgame, Player::X, Scoring::Outcome)?;
    print!("{}", tree.render());
    println!("Best line: {:?}", tree.best_line());

    Ok(())
}
