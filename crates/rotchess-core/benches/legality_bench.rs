use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rotchess_core::{Board, GameConfig, PieceId, Point};

fn select_at(board: &mut Board, x: f64, y: f64) -> PieceId {
    let id = board.pieces_at(x, y)[0];
    board.toggle_selection(id).expect("select");
    id
}

fn legality_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("legality");
    group.sample_size(100);

    let mut board = Board::standard(GameConfig::default());
    let queen = select_at(&mut board, 175.0, 375.0);
    let targets: Vec<Point> = board.get(queen).expect("queen").movable_points().collect();

    group.bench_function("queen_all_targets", |b| {
        b.iter(|| {
            targets
                .iter()
                .filter(|point| {
                    board
                        .can_move(queen, black_box(point.x), black_box(point.y))
                        .expect("selected")
                })
                .count()
        })
    });

    group.bench_function("reach_after_rotation", |b| {
        let mut board = Board::standard(GameConfig::default());
        let queen = select_at(&mut board, 175.0, 375.0);
        let mut angle = 0.0;
        b.iter(|| {
            angle += 0.01;
            board.set_preview(queen, black_box(angle)).expect("preview");
            board.get(queen).expect("queen").reach().len()
        })
    });

    group.bench_function("standard_setup", |b| {
        b.iter(|| Board::standard(black_box(GameConfig::default())))
    });

    group.finish();
}

criterion_group!(benches, legality_benchmarks);
criterion_main!(benches);
