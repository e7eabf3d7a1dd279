//! Simulation micro-benchmarks.
//!
//! Focus:
//! - A single block on a busy mid-run snapshot
//! - Full runs of known solutions from start to `Complete`
//! - Snapshot encoding

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use railmix::core::EngineConfig;
use railmix::engine::Game;
use railmix::levels::{LevelCatalog, Solution};

const LEVELS: &str = include_str!("../tests/fixtures/levels.json");
const SOLUTIONS: &str = include_str!("../tests/fixtures/solutions.json");

fn load_all() -> (LevelCatalog, Vec<Solution>) {
    let catalog = LevelCatalog::from_json(LEVELS).unwrap();
    let solutions = serde_json::from_str(SOLUTIONS).unwrap();
    (catalog, solutions)
}

fn replay(catalog: &LevelCatalog, solution: &Solution, blocks: usize) -> Game {
    let mut game = solution.load(catalog, &EngineConfig::fast()).unwrap();
    game.start();
    for _ in 0..blocks {
        game.step().unwrap();
    }
    game
}

/// The solution with the most trains on the board after `blocks` blocks.
fn busiest<'a>(catalog: &LevelCatalog, solutions: &'a [Solution], blocks: usize) -> &'a Solution {
    solutions
        .iter()
        .max_by_key(|solution| replay(catalog, solution, blocks).state().trains.len())
        .unwrap()
}

fn bench_single_block(c: &mut Criterion) {
    let (catalog, solutions) = load_all();
    let busy = busiest(&catalog, &solutions, 10);

    c.bench_function("sim.step.busy_board", |b| {
        b.iter_batched(
            || replay(&catalog, busy, 10),
            |mut game| {
                black_box(game.step().unwrap().block);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_full_runs(c: &mut Criterion) {
    let (catalog, solutions) = load_all();
    let config = EngineConfig::fast();

    c.bench_function("sim.run.known_solutions", |b| {
        b.iter(|| {
            for solution in &solutions {
                let mut game = solution.load(&catalog, &config).unwrap();
                game.start();
                while !game.step().unwrap().run_state.is_terminal() {}
                black_box(game.run_state());
            }
        });
    });
}

fn bench_snapshot_encode(c: &mut Criterion) {
    let (catalog, solutions) = load_all();
    let busy = replay(&catalog, busiest(&catalog, &solutions, 10), 10);

    c.bench_function("sim.snapshot.encode", |b| {
        b.iter(|| black_box(busy.state().encode().unwrap()));
    });
}

criterion_group!(
    benches,
    bench_single_block,
    bench_full_runs,
    bench_snapshot_encode
);
criterion_main!(benches);
