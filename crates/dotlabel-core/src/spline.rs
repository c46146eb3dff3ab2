//! Edge spline streams (`pos` attribute of routed edges).
//!
//! A stream is a `;`-separated list of splines. Each spline is a whitespace-separated list of
//! `x,y` control points, optionally preceded by `e,x,y` (explicit end) and `s,x,y` (explicit
//! start) anchors.

use serde::{Deserialize, Serialize};

use crate::geom::{Point, point};
use crate::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spline {
    /// Explicit start anchor. When absent the first control point doubles as the anchor.
    #[serde(default)]
    pub start: Option<Point>,
    /// Explicit end anchor. When absent the last control point doubles as the anchor.
    #[serde(default)]
    pub end: Option<Point>,
    pub points: Vec<Point>,
}

impl Spline {
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            start: None,
            end: None,
            points: points.into_iter().collect(),
        }
    }

    pub fn with_start(mut self, start: Point) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: Point) -> Self {
        self.end = Some(end);
        self
    }

    pub fn start_anchor(&self) -> Option<Point> {
        self.start.or_else(|| self.points.first().copied())
    }

    pub fn end_anchor(&self) -> Option<Point> {
        self.end.or_else(|| self.points.last().copied())
    }
}

pub fn parse_spline_list(src: &str) -> Result<Vec<Spline>> {
    src.split(';')
        .filter(|s| !s.trim().is_empty())
        .map(parse_spline)
        .collect()
}

pub fn parse_spline(src: &str) -> Result<Spline> {
    let mut spline = Spline::default();
    for token in src.split_whitespace() {
        if let Some(rest) = token.strip_prefix("e,") {
            spline.end = Some(parse_point(rest, token)?);
        } else if let Some(rest) = token.strip_prefix("s,") {
            spline.start = Some(parse_point(rest, token)?);
        } else {
            spline.points.push(parse_point(token, token)?);
        }
    }
    Ok(spline)
}

fn parse_point(src: &str, token: &str) -> Result<Point> {
    let src = src.trim_end_matches('!');
    let mut parts = src.split(',');
    let (Some(x), Some(y)) = (parts.next(), parts.next()) else {
        return Err(Error::SplineParse {
            token: token.to_string(),
            message: "expected `x,y`".to_string(),
        });
    };
    // A third coordinate (3D layouts) is accepted and dropped.
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| Error::SplineParse {
                token: token.to_string(),
                message: format!("invalid coordinate `{v}`"),
            })
    };
    Ok(point(coord(x)?, coord(y)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_anchors_and_points() {
        let splines = parse_spline_list("e,10,0 s,0,0 1,1 2,2 3,3 4,4").unwrap();
        assert_eq!(splines.len(), 1);
        let s = &splines[0];
        assert_eq!(s.start, Some(point(0.0, 0.0)));
        assert_eq!(s.end, Some(point(10.0, 0.0)));
        assert_eq!(s.points.len(), 4);
        assert_eq!(s.points[3], point(4.0, 4.0));
    }

    #[test]
    fn splits_on_semicolons() {
        let splines = parse_spline_list("0,0 1,1 2,2 3,3;3,3 4,4 5,5 6,6;").unwrap();
        assert_eq!(splines.len(), 2);
        assert_eq!(splines[1].start_anchor(), Some(point(3.0, 3.0)));
        assert_eq!(splines[1].end_anchor(), Some(point(6.0, 6.0)));
    }

    #[test]
    fn pinned_marker_is_ignored() {
        let s = parse_spline("1.5,2.5!").unwrap();
        assert_eq!(s.points, vec![point(1.5, 2.5)]);
    }

    #[test]
    fn rejects_bad_coordinates() {
        assert!(matches!(
            parse_spline_list("0,0 x,1"),
            Err(Error::SplineParse { .. })
        ));
        assert!(parse_spline_list("7").is_err());
    }
}
