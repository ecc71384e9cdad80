use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetris_train::core::{Board, GameState, RailPath, Tetromino, TrainNavigator};
use tetris_train::types::{GameConfig, PieceKind, Rotation};

/// Board with a few dozen committed pieces, enough for a long rail path.
fn busy_board() -> Board {
    let mut board = Board::new();
    let kinds = [PieceKind::I, PieceKind::O, PieceKind::T, PieceKind::L];
    for y in (2..18).step_by(2).rev() {
        for (i, x) in [0i8, 4, 7].into_iter().enumerate() {
            let kind = kinds[(i + y as usize) % kinds.len()];
            let piece = Tetromino {
                kind,
                rotation: Rotation::North,
                x,
                y: y - 1,
            };
            board.place(&piece);
        }
    }
    board
}

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if state.game_over() {
                state = GameState::new(12345);
                state.start();
            }
            state.tick(black_box(16));
        })
    });
}

fn bench_rail_rebuild(c: &mut Criterion) {
    let board = busy_board();
    let mut path = RailPath::new();

    c.bench_function("rail_rebuild", |b| {
        b.iter(|| {
            path.rebuild(black_box(board.placed()));
        })
    });
}

fn bench_train_advance(c: &mut Criterion) {
    let board = busy_board();
    let path = RailPath::from_placed(board.placed());
    let config = GameConfig::default();
    let mut train = TrainNavigator::new();
    let mut events = Vec::new();

    c.bench_function("train_advance_16ms", |b| {
        b.iter(|| {
            train.advance(black_box(16), &path, &config, &mut events);
            events.clear();
        })
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            let mut state = GameState::new(12345);
            state.spawn(black_box(PieceKind::T));
        })
    });
}

fn bench_move_by(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("move_by", |b| {
        b.iter(|| {
            if !state.move_by(1, 0) {
                while state.move_by(-1, 0) {}
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            state.rotate();
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_rail_rebuild,
    bench_train_advance,
    bench_piece_spawn,
    bench_move_by,
    bench_rotate
);
criterion_main!(benches);
