//! Numeric attribute readers. Bad values never fail a layout; they clamp or fall back.

/// Largest accepted `ROWSPAN` / `COLSPAN`.
pub const MAX_SPAN: usize = 65535;

/// `ROWSPAN` / `COLSPAN`: at least 1; anything unparsable or smaller is 1, larger values clamp
/// to [`MAX_SPAN`].
pub fn parse_span(value: Option<&str>) -> usize {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v >= 1)
        .map_or(1, |v| usize::try_from(v).unwrap_or(MAX_SPAN).min(MAX_SPAN))
}

/// Lengths such as `BORDER` or `CELLPADDING`: negative values clamp to 0, unparsable values are
/// treated as unset.
pub fn parse_dimension(value: &str) -> Option<f64> {
    let v = value.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(v.max(0.0))
}

/// Strictly positive numbers (`POINT-SIZE`); anything else is unset.
pub fn parse_positive(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}
