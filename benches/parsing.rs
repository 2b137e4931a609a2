
use config_generator::generate_config;
use criterion::{criterion_group, criterion_main, Criterion};
use plaindb::{LineModel, Syntax};

fn parsing_benchmarks(c: &mut Criterion) {
    // Generate databases of different sizes
    let small = generate_config(50);
    let medium = generate_config(300);
    let large = generate_config(1_000);
    let xlarge = generate_config(10_000);
    let syntax = Syntax::default();

    let mut group = c.benchmark_group("parsing");

    group.bench_function("small_50_lines", |b| {
        b.iter(|| LineModel::parse(&small, &syntax).unwrap())
    });

    group.bench_function("medium_300_lines", |b| {
        b.iter(|| LineModel::parse(&medium, &syntax).unwrap())
    });

    group.bench_function("large_1000_lines", |b| {
        b.iter(|| LineModel::parse(&large, &syntax).unwrap())
    });

    group.bench_function("xlarge_10000_lines", |b| {
        b.iter(|| LineModel::parse(&xlarge, &syntax).unwrap())
    });

    group.finish();
}

criterion_group!(benches, parsing_benchmarks);
criterion_main!(benches);
