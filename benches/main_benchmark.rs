use floatcodec::{convert, decompose, encode, Precision};

fn test_encode_single() {
    for i in 0..1000 {
        let v = i as f64 * 0.1 - 50.;
        black_box(encode(black_box(v), Precision::Single));
    }
}

fn test_encode_denormals() {
    for i in 0..1000 {
        let v = f64::from(i) * 1e-42;
        black_box(encode(black_box(v), Precision::Single));
    }
}

fn test_decompose() {
    let layout = encode(std::f64::consts::PI, Precision::Double);
    for _ in 0..1000 {
        black_box(decompose(black_box(&layout)));
    }
}

fn test_convert_and_render() {
    let conv = convert("0.1", Precision::Double).unwrap();
    black_box(conv.binary());
    black_box(conv.hex());
    black_box(conv.explain());
}

use criterion::{black_box, criterion_group, criterion_main, Criterion};

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("test_encode_single", |b| b.iter(test_encode_single));
    c.bench_function("test_encode_denormals", |b| {
        b.iter(test_encode_denormals)
    });
    c.bench_function("test_decompose", |b| b.iter(test_decompose));
    c.bench_function("test_convert_and_render", |b| {
        b.iter(test_convert_and_render)
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
