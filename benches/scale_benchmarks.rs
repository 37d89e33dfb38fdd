use bubble_plot_wasm::domain::plot::{
    BubblePlot, DatasetId, LinearScale, PixelPoint, PlotConfig, Point, PointId, Targets, Viewport,
    Extent,
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

/// Deterministic scattered points
fn generate_points(count: usize) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            Point::new(
                format!("p{}", i),
                t * 0.37 + (t * 0.1).sin() * 5.0,
                300.0 + (t * 0.2).cos() * 250.0,
                1.0 + (t * 0.3).sin().abs() * 20.0,
            )
        })
        .collect()
}

fn loaded_plot(count: usize) -> BubblePlot {
    let mut plot = BubblePlot::new(Viewport { width: 600.0, height: 500.0 }, PlotConfig::default())
        .expect("default plot");
    plot.load_dataset(DatasetId::from("bench"), generate_points(count), Targets::new(Some(200.0), Some(500.0)))
        .expect("valid points");
    plot
}

fn bench_nice_and_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("linear_scale");
    for (lo, hi) in [(0.23, 9.7), (103.0, 587.0), (-0.0042, 0.0187)] {
        let label = format!("{}..{}", lo, hi);
        group.bench_with_input(BenchmarkId::new("nice_ticks", &label), &(lo, hi), |b, &(lo, hi)| {
            b.iter(|| {
                let scale = LinearScale::new(Extent::new(lo, hi), (0.0, 425.0)).nice(10);
                let ticks = scale.ticks(10);
                let labels: Vec<String> = ticks.iter().map(|v| scale.tick_format(10, *v)).collect();
                black_box(labels)
            });
        });
    }
    group.finish();
}

fn bench_build_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_scene");
    group.measurement_time(Duration::from_secs(5));
    for count in [10, 100, 1000] {
        let plot = loaded_plot(count);
        group.bench_with_input(BenchmarkId::new("render", count), &count, |b, _| {
            b.iter(|| black_box(plot.render()));
        });
    }
    group.finish();
}

fn bench_drag_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag_commit");
    for count in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("down_move_up", count), &count, |b, &count| {
            let mut plot = loaded_plot(count);
            let id = PointId::from("p0");
            b.iter(|| {
                plot.pointer_down_on(&id, PixelPoint::new(10.0, 10.0));
                plot.pointer_move(PixelPoint::new(200.0, 150.0));
                black_box(plot.pointer_up(None))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_nice_and_ticks, bench_build_scene, bench_drag_commit);
criterion_main!(benches);
