//! Benchmarks for VARX fitting and prediction.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use varmax_forecast::core::{ForecastHorizon, Period};
use varmax_forecast::models::{MultiForecaster, Varmax};
use varmax_forecast::synth::random_integer_frame;

fn bench_varmax(c: &mut Criterion) {
    let start = Period::new(2000, 1).unwrap();
    let y = random_integer_frame(42, start, 240, &["A", "B", "C"]).unwrap();

    c.bench_function("varmax_fit_240x3", |b| {
        b.iter(|| {
            let mut model = Varmax::default();
            model.fit(black_box(&y), None).unwrap();
            model
        })
    });

    let mut model = Varmax::default();
    model.fit(&y, None).unwrap();
    let fh = ForecastHorizon::contiguous(12).unwrap();

    c.bench_function("varmax_predict_h12", |b| {
        b.iter(|| model.predict(black_box(&fh), None).unwrap())
    });
}

criterion_group!(benches, bench_varmax);
criterion_main!(benches);
