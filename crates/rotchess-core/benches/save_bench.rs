use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rotchess_core::{save, Board, GameConfig, TurnHistory};

fn long_history(turns: usize) -> TurnHistory {
    let mut rng = rand::thread_rng();
    let mut history = TurnHistory::new(Board::standard(GameConfig::default()).snapshot());
    for _ in 1..turns {
        history.record(Board::chess960(GameConfig::default(), &mut rng).snapshot());
    }
    history
}

fn save_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("save");
    group.sample_size(50);

    let history = long_history(200);
    let text = save::export(&history).expect("export");

    group.bench_function("export_200_turns", |b| {
        b.iter(|| save::export(black_box(&history)).expect("export"))
    });

    group.bench_function("import_200_turns", |b| {
        b.iter(|| save::import(black_box(&text)).expect("import"))
    });

    group.finish();
}

criterion_group!(benches, save_benchmarks);
criterion_main!(benches);
