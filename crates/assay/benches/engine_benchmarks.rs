//! Benchmarks for tokenization and full validation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use assay::input::Tokenizer;
use assay::{Engine, ValidationOptions};

fn generate_csv(rows: usize) -> String {
    let mut text = String::from("id,name,amount,joined\n");
    for i in 0..rows {
        text.push_str(&format!(
            "{},user_{},\"{}.{:02}\",2024-01-{:02}\n",
            i,
            i,
            i % 1000,
            i % 100,
            (i % 28) + 1
        ));
    }
    text
}

fn bench_tokenize(c: &mut Criterion) {
    let text = generate_csv(1_000);
    let tokenizer = Tokenizer::new(',', '"');

    c.bench_function("tokenize_1k_rows", |b| {
        b.iter(|| tokenizer.tokenize(black_box(&text)))
    });
}

fn bench_validate(c: &mut Criterion) {
    let text = generate_csv(1_000);
    let engine = Engine::new(ValidationOptions::default());

    c.bench_function("validate_1k_rows", |b| {
        b.iter(|| engine.validate(black_box(&text)))
    });
}

fn bench_validate_with_profiling(c: &mut Criterion) {
    let text = generate_csv(1_000);
    let engine = Engine::new(ValidationOptions {
        enable_profiling: true,
        outlier_detection: true,
        calculate_correlations: true,
        ..ValidationOptions::default()
    });

    c.bench_function("validate_1k_rows_profiled", |b| {
        b.iter(|| engine.validate(black_box(&text)))
    });
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_validate,
    bench_validate_with_profiling
);
criterion_main!(benches);
