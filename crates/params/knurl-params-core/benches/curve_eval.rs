use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use knurl_params_core::{AnimCurve, Interpolation, Keyframe, Value};

fn dense_curve(mode: Interpolation, keys: usize) -> AnimCurve {
    let mut curve = AnimCurve::new(mode);
    for i in 0..keys {
        curve
            .insert_or_update(Keyframe::new(i as f64, Value::Double((i % 17) as f64)))
            .unwrap();
    }
    curve
}

fn bench_evaluate(c: &mut Criterion) {
    let linear = dense_curve(Interpolation::Linear, 256);
    c.bench_function("evaluate_linear_256", |b| {
        b.iter(|| linear.evaluate(black_box(127.3)).unwrap())
    });

    let catmull = dense_curve(Interpolation::CatmullRom, 256);
    c.bench_function("evaluate_catmull_rom_256", |b| {
        b.iter(|| catmull.evaluate(black_box(127.3)).unwrap())
    });
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("insert_256_shuffled", |b| {
        b.iter(|| {
            let mut curve = AnimCurve::new(Interpolation::Linear);
            // Stride through a co-prime step so insertions land out of order.
            for i in 0..256usize {
                let t = ((i * 97) % 256) as f64;
                curve
                    .insert_or_update(Keyframe::new(t, Value::Double(t)))
                    .unwrap();
            }
            black_box(curve.len())
        })
    });
}

criterion_group!(benches, bench_evaluate, bench_insert);
criterion_main!(benches);
