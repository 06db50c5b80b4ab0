//! Benchmarks for the aggregation + compositing hot path.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use heatfield_core::{LatLng, MercatorView, Sample};
use heatfield_render::{HeatmapOptions, HeatmapOverlay};

fn synthetic_samples(n: usize) -> Vec<Sample> {
    // Deterministic LCG scatter around the origin.
    let mut rng: u64 = 0x9e37_79b9_7f4a_7c15;
    let mut samples = Vec::with_capacity(n);
    for _ in 0..n {
        rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let lat = ((rng >> 33) as f64 / (1u64 << 31) as f64 - 0.5) * 0.01;
        rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let lng = ((rng >> 33) as f64 / (1u64 << 31) as f64 - 0.5) * 0.01;
        rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let value = (rng >> 33) as f64 / (1u64 << 31) as f64 * 10.0;
        samples.push(Sample::with_value(lat, lng, value));
    }
    samples
}

fn bench_redraw(c: &mut Criterion) {
    let view = MercatorView::new(LatLng::new(0.0, 0.0), 14.0, 512, 512);
    let samples = synthetic_samples(5_000);

    c.bench_function("redraw_5k_samples_512px", |b| {
        b.iter(|| {
            let mut overlay = HeatmapOverlay::new(HeatmapOptions {
                max: 10.0,
                ..Default::default()
            })
            .unwrap();
            overlay.set_samples(samples.clone());
            let raster = overlay.on_frame(black_box(&view)).unwrap();
            black_box(raster.map(|r| r.covered_pixels()));
        })
    });
}

criterion_group!(benches, bench_redraw);
criterion_main!(benches);
