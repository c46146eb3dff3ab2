//! Edge curve reconstruction from routed B-spline control points.
//!
//! Routed edges arrive as a control-point stream where the first and last points double as the
//! anchor points unless explicit `s,`/`e,` anchors are given. Reconstruction turns that stream
//! into straight lead-in/lead-out pieces plus cubic Bézier segments, or into an axis-aligned
//! waypoint list when orthogonal routing is requested.

use dotlabel_core::Spline;
use dotlabel_core::geom::{Point, same_point};
use serde::{Deserialize, Serialize};

use crate::util::fmt_number_into;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicSegment {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CurveGeometry {
    Straight {
        from: Point,
        to: Point,
    },
    #[serde(rename_all = "camelCase")]
    Piecewise {
        lead_in: Option<LineSegment>,
        cubics: Vec<CubicSegment>,
        lead_out: Option<LineSegment>,
    },
    /// Axis-aligned route: `start`, the router's waypoints, then `end`.
    Orthogonal {
        start: Point,
        waypoints: Vec<Point>,
        end: Point,
    },
}

impl CurveGeometry {
    pub fn start(&self) -> Point {
        match self {
            Self::Straight { from, .. } => *from,
            Self::Piecewise {
                lead_in, cubics, ..
            } => match (lead_in, cubics.first()) {
                (Some(line), _) => line.from,
                (None, Some(c)) => c.from,
                // Piecewise geometry always carries at least one cubic.
                (None, None) => Point::origin(),
            },
            Self::Orthogonal { start, .. } => *start,
        }
    }

    pub fn end(&self) -> Point {
        match self {
            Self::Straight { to, .. } => *to,
            Self::Piecewise {
                lead_out, cubics, ..
            } => match (lead_out, cubics.last()) {
                (Some(line), _) => line.to,
                (None, Some(c)) => c.to,
                (None, None) => Point::origin(),
            },
            Self::Orthogonal { end, .. } => *end,
        }
    }

    /// SVG path data (`M`, `L`, `C` commands, comma-separated coordinates).
    pub fn to_path_d(&self) -> String {
        let mut out = String::new();
        match self {
            Self::Straight { from, to } => {
                emit_pair(&mut out, 'M', *from);
                emit_pair(&mut out, 'L', *to);
            }
            Self::Piecewise {
                lead_in,
                cubics,
                lead_out,
            } => {
                emit_pair(&mut out, 'M', self.start());
                if let Some(line) = lead_in {
                    emit_pair(&mut out, 'L', line.to);
                }
                for c in cubics {
                    emit_cubic(&mut out, c);
                }
                if let Some(line) = lead_out {
                    emit_pair(&mut out, 'L', line.to);
                }
            }
            Self::Orthogonal {
                start,
                waypoints,
                end,
            } => {
                emit_pair(&mut out, 'M', *start);
                for p in waypoints {
                    emit_pair(&mut out, 'L', *p);
                }
                emit_pair(&mut out, 'L', *end);
            }
        }
        out
    }
}

fn emit_point(out: &mut String, p: Point) {
    fmt_number_into(out, p.x);
    out.push(',');
    fmt_number_into(out, p.y);
}

fn emit_pair(out: &mut String, cmd: char, p: Point) {
    out.push(cmd);
    emit_point(out, p);
}

fn emit_cubic(out: &mut String, c: &CubicSegment) {
    out.push('C');
    emit_point(out, c.ctrl1);
    out.push(',');
    emit_point(out, c.ctrl2);
    out.push(',');
    emit_point(out, c.to);
}

/// Inputs for one edge.
#[derive(Debug, Clone, Copy)]
pub struct CurveRequest<'a> {
    /// Resolved start point (tail side). `None` when the router has not fixed it yet.
    pub start: Option<Point>,
    pub end: Option<Point>,
    pub splines: &'a [Spline],
    pub orthogonal: bool,
}

/// Builds the geometry of one edge.
///
/// Returns `None` only when neither an endpoint nor a spline anchor exists for one of the ends.
pub fn reconstruct_curve(request: &CurveRequest<'_>) -> Option<CurveGeometry> {
    let start_ref = request.splines.first().and_then(Spline::start_anchor);
    let end_ref = request.splines.last().and_then(Spline::end_anchor);
    let start = request.start.or(start_ref)?;
    let end = request.end.or(end_ref)?;

    let points = control_points(request.splines);
    let (Some(start_ref), Some(end_ref)) = (start_ref, end_ref) else {
        return Some(CurveGeometry::Straight {
            from: start,
            to: end,
        });
    };
    let total: usize = request.splines.iter().map(|s| s.points.len()).sum();
    // A lone merged point has nothing to bend around, whatever the raw count.
    if total < 4 || points.len() < 2 || request.start.is_none() || request.end.is_none() {
        tracing::debug!(
            control_points = total,
            has_start = request.start.is_some(),
            has_end = request.end.is_some(),
            "degrading edge curve to a straight line"
        );
        return Some(CurveGeometry::Straight {
            from: start,
            to: end,
        });
    }

    if request.orthogonal {
        return Some(CurveGeometry::Orthogonal {
            start,
            waypoints: normalize_orthogonal(&points, start_ref, end_ref),
            end,
        });
    }

    Some(piecewise(&points, start, end, start_ref, end_ref))
}

/// Concatenates the control points of all splines, merging the shared joint between
/// consecutive splines.
fn control_points(splines: &[Spline]) -> Vec<Point> {
    let mut points: Vec<Point> = Vec::new();
    for spline in splines {
        let joint = match (points.last(), spline.points.first()) {
            (Some(last), Some(first)) => same_point(*last, *first),
            _ => false,
        };
        let skip = usize::from(joint);
        points.extend(spline.points.iter().skip(skip).copied());
    }
    points
}

fn piecewise(
    points: &[Point],
    start: Point,
    end: Point,
    start_ref: Point,
    end_ref: Point,
) -> CurveGeometry {
    let first = points[0];
    let (mut current, lead_in) = if same_point(first, start_ref) {
        (start, None)
    } else {
        (first, Some(LineSegment {
            from: start_ref,
            to: first,
        }))
    };

    let mut rest = &points[1..];
    let mut end_anchor_dropped = false;
    if rest.len() % 3 == 1
        && rest.len() > 1
        && rest.last().is_some_and(|p| same_point(*p, end_ref))
    {
        rest = &rest[..rest.len() - 1];
        end_anchor_dropped = true;
    }

    let mut cubics = Vec::with_capacity(rest.len().div_ceil(3));
    let mut lead_out = None;
    let groups = rest.len().div_ceil(3);
    for (i, group) in rest.chunks(3).enumerate() {
        let pad = group[group.len() - 1];
        let ctrl1 = group[0];
        let ctrl2 = group.get(1).copied().unwrap_or(pad);
        let mut to = group.get(2).copied().unwrap_or(pad);
        if i + 1 == groups {
            if end_anchor_dropped || same_point(to, end_ref) {
                to = end;
            } else {
                lead_out = Some(LineSegment {
                    from: to,
                    to: end_ref,
                });
            }
        }
        cubics.push(CubicSegment {
            from: current,
            ctrl1,
            ctrl2,
            to,
        });
        current = to;
    }

    CurveGeometry::Piecewise {
        lead_in,
        cubics,
        lead_out,
    }
}

/// Reduces a control-point list to the waypoints an axis-aligned router needs.
///
/// Drops duplicated end points, points lying on a straight horizontal or vertical run through
/// both neighbors, and end points that coincide with the anchors. The passes repeat until
/// nothing changes, so the output is a fixpoint.
pub fn normalize_orthogonal(points: &[Point], start_ref: Point, end_ref: Point) -> Vec<Point> {
    let mut current = points.to_vec();
    loop {
        let next = normalize_pass(&current, start_ref, end_ref);
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}

fn normalize_pass(points: &[Point], start_ref: Point, end_ref: Point) -> Vec<Point> {
    let mut pts = points.to_vec();

    while pts.len() >= 2 && same_point(pts[0], pts[1]) {
        pts.remove(0);
    }
    while pts.len() >= 2 && same_point(pts[pts.len() - 1], pts[pts.len() - 2]) {
        pts.pop();
    }

    let mut kept: Vec<Point> = Vec::with_capacity(pts.len());
    for (i, p) in pts.iter().enumerate() {
        let next = pts.get(i + 1);
        let redundant = match (kept.last(), next) {
            (Some(prev), Some(next)) => on_axis_run(*prev, *p, *next),
            _ => false,
        };
        if !redundant {
            kept.push(*p);
        }
    }

    if kept.first().is_some_and(|p| same_point(*p, start_ref)) {
        kept.remove(0);
    }
    if kept.last().is_some_and(|p| same_point(*p, end_ref)) {
        kept.pop();
    }
    kept
}

fn on_axis_run(a: Point, b: Point, c: Point) -> bool {
    let eps = dotlabel_core::geom::POINT_EPSILON;
    let same_x = (a.x - b.x).abs() <= eps && (b.x - c.x).abs() <= eps;
    let same_y = (a.y - b.y).abs() <= eps && (b.y - c.y).abs() <= eps;
    same_x || same_y
}
