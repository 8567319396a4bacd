use criterion::{Criterion, black_box, criterion_group, criterion_main};
use edge_vector::models::{GrayBuffer, WHITE};
use edge_vector::pipeline::{PipelineConfig, run_pipeline};
use edge_vector::{Channels, Operator, Raster, Threshold, trace_segments};

fn grid_mask(width: usize, height: usize, pitch: usize) -> GrayBuffer {
    let mut mask = GrayBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            if x % pitch == 0 || y % pitch == 0 {
                mask.set(x, y, WHITE);
            }
        }
    }
    mask
}

fn bench_trace_grid_small(c: &mut Criterion) {
    let mask = grid_mask(100, 100, 10);
    c.bench_function("trace_segments_grid_100x100", |b| {
        b.iter(|| trace_segments(black_box(&mask)))
    });
}

fn bench_trace_grid_medium(c: &mut Criterion) {
    let mask = grid_mask(640, 480, 16);
    c.bench_function("trace_segments_grid_640x480", |b| {
        b.iter(|| trace_segments(black_box(&mask)))
    });
}

fn bench_full_pipeline_medium(c: &mut Criterion) {
    let mut raster = Raster::filled(640, 480, Channels::Rgb, [20, 20, 20, 255]);
    for y in 120..360 {
        for x in 160..480 {
            raster.set_pixel(x, y, [230, 230, 230, 255]);
        }
    }
    let config = PipelineConfig::new(Operator::Sobel).with_threshold(Threshold::new(100));
    c.bench_function("run_pipeline_640x480", |b| {
        b.iter(|| run_pipeline(black_box(&raster), black_box(&config)))
    });
}

criterion_group!(
    benches,
    bench_trace_grid_small,
    bench_trace_grid_medium,
    bench_full_pipeline_medium
);
criterion_main!(benches);
