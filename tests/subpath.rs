use fillconv::geom::ArcFlags;
use fillconv::math::{point, vector, Angle, Point};
use fillconv::path::{ErrorKind, FlattenOptions, PathSegment, Subpath, SubpathError};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn open_square() {
    init_logger();

    let subpath = Subpath::new(
        point(0.0, 0.0),
        vec![
            PathSegment::line(point(10.0, 0.0)),
            PathSegment::line(point(10.0, 10.0)),
            PathSegment::line(point(0.0, 10.0)),
        ],
        false,
    )
    .unwrap();

    assert!(!subpath.segments_are_geometrically_closed());

    let closing = subpath.closing_segment().unwrap();
    assert_eq!(*closing, PathSegment::line(point(0.0, 0.0)));
    assert_eq!(
        subpath.closed_segments().last().unwrap().end_point(),
        subpath.start_point()
    );

    let polygon = subpath.polygon_approximation();
    assert_eq!(
        polygon.points(),
        &[
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(10.0, 10.0),
            point(0.0, 10.0),
        ]
    );

    let edges: Vec<_> = polygon.edges().collect();
    assert_eq!(edges.len(), 4);
    assert_eq!(edges[3].from, point(0.0, 10.0));
    assert_eq!(edges[3].to, point(0.0, 0.0));
}

#[test]
fn closed_triangle_back_and_forth() {
    init_logger();

    let subpath = Subpath::new(
        point(0.0, 0.0),
        vec![
            PathSegment::line(point(10.0, 0.0)),
            PathSegment::line(point(0.0, 0.0)),
        ],
        true,
    )
    .unwrap();

    assert!(subpath.segments_are_geometrically_closed());
    assert!(subpath.closing_segment().is_none());
    assert!(subpath.closed_segments().eq(subpath.segments().iter()));
    assert_eq!(
        subpath.polygon_approximation().points(),
        &[point(0.0, 0.0), point(10.0, 0.0), point(0.0, 0.0)]
    );
}

#[test]
fn single_point_subpath() {
    init_logger();

    let subpath = Subpath::new(point(5.0, 5.0), Vec::new(), false).unwrap();

    assert_eq!(subpath.polygon_approximation().points(), &[point(5.0, 5.0)]);
    assert!(subpath.segments_are_geometrically_closed());
    assert_eq!(
        subpath.end_point().unwrap_err().kind(),
        ErrorKind::EmptyChainAccess
    );
}

#[test]
fn absent_segment_anywhere_is_rejected() {
    init_logger();

    let line = PathSegment::line(point(3.0, 4.0));
    for missing in 0..3 {
        let segments = (0..3).map(|i| if i == missing { None } else { Some(line) });
        match Subpath::from_optional_segments(point(0.0, 0.0), segments, false) {
            Err(SubpathError::MissingSegment { index }) => assert_eq!(index, missing),
            other => panic!("unexpected result {:?}", other),
        }
    }
}

fn mixed_subpath(tolerance: f32) -> Subpath {
    Subpath::builder(point(0.0, 0.0))
        .with_options(FlattenOptions::tolerance(tolerance))
        .line_to(point(40.0, 0.0))
        .quadratic_bezier_to(point(60.0, 0.0), point(60.0, 20.0))
        .cubic_bezier_to(point(60.0, 50.0), point(30.0, 60.0), point(10.0, 40.0))
        .arc_to(
            vector(15.0, 10.0),
            Angle::degrees(30.0),
            ArcFlags {
                large_arc: true,
                sweep: false,
            },
            point(5.0, 20.0),
        )
        .build()
        .unwrap()
}

#[test]
fn polygon_length_matches_segment_approximations() {
    init_logger();

    let subpath = mixed_subpath(0.05);
    let flattening = subpath.ensure_flattened();

    let expected = 1 + flattening
        .polylines()
        .iter()
        .map(|polyline| polyline.len() - 1)
        .sum::<usize>();
    assert_eq!(subpath.polygon_approximation().len(), expected);

    // Polylines chain exactly from one segment to the next.
    let mut entry = subpath.start_point();
    for (segment, polyline) in subpath.segments().iter().zip(flattening.polylines()) {
        assert_eq!(polyline.first(), entry);
        assert_eq!(polyline.last(), segment.end_point());
        entry = polyline.last();
    }

    let closing = flattening.closing().unwrap();
    assert_eq!(closing.first(), point(5.0, 20.0));
    assert_eq!(closing.last(), subpath.start_point());
}

#[test]
fn approximation_points_lie_on_the_curves() {
    init_logger();

    let tolerance = 0.05;
    let subpath = mixed_subpath(tolerance);

    let mut entry = subpath.start_point();
    for (index, segment) in subpath.segments().iter().enumerate() {
        let geometry = segment.to_geometry(entry);
        let polyline = subpath.segment_polyline(index).unwrap();

        for p in polyline.iter() {
            let distance = distance_to_curve(|t| geometry.sample(t), *p);
            assert!(
                distance < tolerance,
                "segment {}: {:?} is {} away from the curve",
                index,
                p,
                distance
            );
        }

        entry = segment.end_point();
    }
}

fn distance_to_curve(sample: impl Fn(f32) -> Point, p: Point) -> f32 {
    let mut best = f32::MAX;
    for i in 0..=10000 {
        let t = i as f32 / 10000.0;
        best = best.min((sample(t) - p).length());
    }

    best
}

#[test]
fn chords_stay_within_tolerance_of_every_curve() {
    init_logger();

    for &tolerance in &[0.5, 0.05] {
        let subpath = mixed_subpath(tolerance);

        let mut entry = subpath.start_point();
        for (index, segment) in subpath.segments().iter().enumerate() {
            let geometry = segment.to_geometry(entry);
            let polyline = subpath.segment_polyline(index).unwrap();

            for chord in polyline.line_segments() {
                let mid = chord.from.lerp(chord.to, 0.5);
                let distance = distance_to_curve(|t| geometry.sample(t), mid);
                assert!(
                    distance <= tolerance * 1.05,
                    "segment {}: chord {:?} is {} away from the curve",
                    index,
                    chord,
                    distance
                );
            }

            entry = segment.end_point();
        }
    }
}

#[test]
fn approximation_length_converges() {
    init_logger();

    let segment = PathSegment::cubic(point(0.0, 0.0), point(100.0, 100.0), point(100.0, 0.0));
    let entry = point(0.0, 100.0);
    let length = |tolerance: f32| -> f32 {
        let polyline = segment.flatten(entry, tolerance);
        polyline.line_segments().map(|s| s.length()).sum()
    };

    let reference = length(FlattenOptions::MIN_TOLERANCE);
    let coarse = (length(1.0) - reference).abs();
    let fine = (length(0.01) - reference).abs();

    assert!(fine < 0.5, "{} vs {}", length(0.01), reference);
    assert!(fine <= coarse, "{} > {}", fine, coarse);
}

#[test]
fn large_arc_within_tolerance() {
    init_logger();

    // Half circle of radius 5000 around (5000, 0), then back along the diameter.
    let tolerance = 0.05;
    let subpath = Subpath::builder(point(0.0, 0.0))
        .with_options(FlattenOptions::tolerance(tolerance))
        .arc_to(
            vector(5000.0, 5000.0),
            Angle::radians(0.0),
            ArcFlags {
                large_arc: false,
                sweep: true,
            },
            point(10000.0, 0.0),
        )
        .build()
        .unwrap();

    let polyline = subpath.segment_polyline(0).unwrap();
    assert!(polyline.len() > 100, "{} points", polyline.len());

    let center = point(5000.0, 0.0);
    for chord in polyline.line_segments() {
        let mid = chord.from.lerp(chord.to, 0.5);
        for &p in &[chord.from, mid] {
            let error = (5000.0 - (p - center).length()).abs();
            // f32 positions around 5000 are only accurate to about 5e-4.
            assert!(error <= tolerance + 5e-3, "{:?} is {} away from the arc", p, error);
        }
    }

    assert!(subpath.closing_segment().is_some());
    assert_eq!(subpath.polygon_approximation().len(), polyline.len());
}

#[test]
fn shared_between_threads() {
    init_logger();

    let subpath = mixed_subpath(0.1);

    let shared = &subpath;
    let lengths: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || shared.polygon_approximation().len()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(lengths.iter().all(|len| *len == lengths[0]));
    assert!(subpath.is_flattened());
}
