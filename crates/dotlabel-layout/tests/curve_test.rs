use dotlabel_core::Spline;
use dotlabel_core::geom::point;
use dotlabel_layout::curve::{CubicSegment, CurveGeometry, CurveRequest};
use dotlabel_layout::{normalize_orthogonal, reconstruct_curve, reconstruct_curve_str};

#[test]
fn duplicated_anchors_make_a_single_cubic() {
    let splines = [Spline::new([
        point(0.0, 0.0),
        point(2.0, 2.0),
        point(5.0, 2.0),
        point(8.0, 2.0),
        point(10.0, 0.0),
    ])];
    let curve = reconstruct_curve(&CurveRequest {
        start: Some(point(0.0, 0.0)),
        end: Some(point(10.0, 0.0)),
        splines: &splines,
        orthogonal: false,
    })
    .expect("curve");
    assert_eq!(
        curve,
        CurveGeometry::Piecewise {
            lead_in: None,
            cubics: vec![CubicSegment {
                from: point(0.0, 0.0),
                ctrl1: point(2.0, 2.0),
                ctrl2: point(5.0, 2.0),
                to: point(10.0, 0.0),
            }],
            lead_out: None,
        }
    );
    assert_eq!(curve.to_path_d(), "M0,0C2,2,5,2,10,0");
}

#[test]
fn fewer_than_four_points_is_exactly_the_straight_segment() {
    for n in 0..4 {
        let pts: Vec<_> = (0..n).map(|i| point(i as f64, 1.0)).collect();
        let splines = [Spline::new(pts)];
        let curve = reconstruct_curve(&CurveRequest {
            start: Some(point(-1.0, 0.0)),
            end: Some(point(9.0, 0.0)),
            splines: &splines,
            orthogonal: n % 2 == 0,
        });
        assert_eq!(
            curve,
            Some(CurveGeometry::Straight {
                from: point(-1.0, 0.0),
                to: point(9.0, 0.0)
            })
        );
    }
}

#[test]
fn pos_string_round_trip_to_path() {
    let curve = reconstruct_curve_str(
        "e,54,18 27,71.7 27,63.98 27,54.71 27,46.11",
        Some(point(27.0, 71.7)),
        Some(point(54.0, 18.0)),
        false,
    )
    .expect("pos parses")
    .expect("curve");
    assert_eq!(curve.start(), point(27.0, 71.7));
    assert_eq!(curve.end(), point(54.0, 18.0));
    assert_eq!(curve.to_path_d(), "M27,71.7C27,63.98,27,54.71,27,46.11L54,18");
}

#[test]
fn bad_pos_string_is_an_error() {
    assert!(reconstruct_curve_str("1,2 x,y", None, None, false).is_err());
}

#[test]
fn orthogonal_normalization_is_idempotent() {
    let start = point(0.0, 0.0);
    let end = point(30.0, 20.0);
    let inputs = [
        vec![
            start,
            start,
            point(0.0, 5.0),
            point(0.0, 10.0),
            point(15.0, 10.0),
            point(30.0, 10.0),
            end,
            end,
        ],
        vec![start, point(10.0, 0.0), point(20.0, 0.0), end],
        vec![point(5.0, 5.0), point(5.0, 5.0)],
        vec![],
    ];
    for pts in inputs {
        let once = normalize_orthogonal(&pts, start, end);
        let twice = normalize_orthogonal(&once, start, end);
        assert_eq!(once, twice, "input {pts:?}");
    }
}

#[test]
fn orthogonal_route_keeps_corners_only() {
    let splines = [Spline::new([
        point(0.0, 0.0),
        point(0.0, 5.0),
        point(0.0, 10.0),
        point(15.0, 10.0),
        point(30.0, 10.0),
        point(30.0, 20.0),
        point(30.0, 20.0),
    ])];
    let curve = reconstruct_curve(&CurveRequest {
        start: Some(point(0.0, 0.0)),
        end: Some(point(30.0, 20.0)),
        splines: &splines,
        orthogonal: true,
    })
    .expect("curve");
    assert_eq!(
        curve,
        CurveGeometry::Orthogonal {
            start: point(0.0, 0.0),
            waypoints: vec![point(0.0, 10.0), point(30.0, 10.0)],
            end: point(30.0, 20.0),
        }
    );
}

#[test]
fn degradation_counts_every_spline_point() {
    let splines = [
        Spline::new([point(0.0, 0.0), point(1.0, 1.0)]),
        Spline::new([point(1.0, 1.0), point(3.0, 0.0)]),
    ];
    let curve = reconstruct_curve(&CurveRequest {
        start: Some(point(0.0, 0.0)),
        end: Some(point(3.0, 0.0)),
        splines: &splines,
        orthogonal: false,
    })
    .expect("curve");
    assert_eq!(
        curve,
        CurveGeometry::Piecewise {
            lead_in: None,
            cubics: vec![CubicSegment {
                from: point(0.0, 0.0),
                ctrl1: point(1.0, 1.0),
                ctrl2: point(3.0, 0.0),
                to: point(3.0, 0.0),
            }],
            lead_out: None,
        }
    );
    assert_eq!(curve.to_path_d(), "M0,0C1,1,3,0,3,0");
}

#[test]
fn splines_collapsing_to_one_point_stay_straight() {
    let splines: Vec<_> = (0..4).map(|_| Spline::new([point(2.0, 2.0)])).collect();
    let curve = reconstruct_curve(&CurveRequest {
        start: Some(point(0.0, 0.0)),
        end: Some(point(4.0, 0.0)),
        splines: &splines,
        orthogonal: false,
    });
    assert_eq!(
        curve,
        Some(CurveGeometry::Straight {
            from: point(0.0, 0.0),
            to: point(4.0, 0.0)
        })
    );
}
