use criterion::{Criterion, criterion_group, criterion_main};
use minimax_lib::board::Player;
use minimax_lib::boards::tic_tac_toe::TicTacToeBoard;
use minimax_lib::minimax::Minimax;
use std::hint::black_box;

fn bench_empty_board(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax_empty_board");
    group.sample_size(10);
    let board = TicTacToeBoard::new();

    group.bench_function("plain", |b| {
        let mut minimax = Minimax::builder().with_alpha_beta_pruning(false).build();
        b.iter(|| minimax.search(black_box(&board), Player::X).unwrap());
    });

    group.bench_function("alpha_beta", |b| {
        let mut minimax = Minimax::builder().build();
        b.iter(|| minimax.search(black_box(&board), Player::X).unwrap());
    });

    group.bench_function("alpha_beta_fresh_table", |b| {
        b.iter(|| {
            let mut minimax = Minimax::builder().with_transposition_table(true).build();
            minimax.search(black_box(&board), Player::X).unwrap()
        });
    });
    group.finish();
}

fn bench_midgame(c: &mut Criterion) {
    let board: TicTacToeBoard = "XO-------".parse().unwrap();
    c.bench_function("minimax_midgame", |b| {
        let mut minimax = Minimax::builder().build();
        b.iter(|| minimax.search(black_box(&board), Player::X).unwrap());
    });
}

criterion_group!(benches, bench_empty_board, bench_midgame);
criterion_main!(benches);
