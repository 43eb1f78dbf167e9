use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pairflip_core::{DeckGenerator, Difficulty, RandomDeckGenerator};
use std::hint::black_box;

fn deck_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("deck_gen");
    for difficulty in Difficulty::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty.name()),
            &difficulty,
            |b, &difficulty| {
                let mut seed = 0u64;
                b.iter(|| {
                    seed = seed.wrapping_add(1);
                    RandomDeckGenerator::new(black_box(seed)).generate(difficulty.pair_count())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, deck_generation);
criterion_main!(benches);
