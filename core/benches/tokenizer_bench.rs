use criterion::{criterion_group, criterion_main, Criterion};
use core::tokenizer::tokenize;

fn bench_tokenize(c: &mut Criterion) {
    let text = "The quick brown fox, jumps over the lazy dog! ".repeat(500);
    c.bench_function("tokenize_20k_words", |b| b.iter(|| tokenize(&text)));
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
