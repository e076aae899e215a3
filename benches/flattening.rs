#[macro_use]
extern crate criterion;

use criterion::{BenchmarkId, Criterion};
use fillconv::geom::ArcFlags;
use fillconv::math::{point, vector, Angle};
use fillconv::path::{FlattenOptions, PathSegment, Subpath};

static TOLERANCES: [f32; 6] = [0.01, 0.05, 0.1, 0.25, 0.5, 1.0];

fn generate_segments() -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut rng = 0.5f32;
    let mut next = || {
        rng = (rng * 3.7 + 0.31).fract();
        rng * 500.0
    };

    for i in 0..1000 {
        let segment = match i % 4 {
            0 => PathSegment::line(point(next(), next())),
            1 => PathSegment::quadratic(point(next(), next()), point(next(), next())),
            2 => PathSegment::cubic(
                point(next(), next()),
                point(next(), next()),
                point(next(), next()),
            ),
            _ => PathSegment::arc(
                vector(next() * 0.2, next() * 0.2),
                Angle::radians(next() * 0.01),
                ArcFlags::default(),
                point(next(), next()),
            ),
        };
        segments.push(segment);
    }

    segments
}

fn polygon_approximation(c: &mut Criterion) {
    let segments = generate_segments();
    let mut g = c.benchmark_group("polygon_approximation");
    for tol in &TOLERANCES {
        g.bench_with_input(BenchmarkId::new("subpath", tol), tol, |b, tol| {
            b.iter(|| {
                let subpath = Subpath::with_options(
                    point(0.0, 0.0),
                    segments.iter().cloned(),
                    false,
                    FlattenOptions::tolerance(*tol),
                )
                .unwrap();
                std::hint::black_box(subpath.polygon_approximation().len());
            })
        });
    }
}

criterion_group!(subpath_flattening, polygon_approximation);
criterion_main!(subpath_flattening);
