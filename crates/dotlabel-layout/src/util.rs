/// Appends `v` using JS number-to-string formatting (`1`, `1.5`, `0.1`), so emitted style and
/// path strings are stable across platforms.
pub(crate) fn fmt_number_into(out: &mut String, v: f64) {
    let mut buf = ryu_js::Buffer::new();
    out.push_str(js_number_to_string(v, &mut buf));
}

fn js_number_to_string(mut v: f64, buf: &mut ryu_js::Buffer) -> &str {
    if !v.is_finite() {
        return "0";
    }
    if v == -0.0 {
        v = 0.0;
    }
    buf.format_finite(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(v: f64) -> String {
        let mut s = String::new();
        fmt_number_into(&mut s, v);
        s
    }

    #[test]
    fn formats_like_js() {
        assert_eq!(fmt(14.0), "14");
        assert_eq!(fmt(1.5), "1.5");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(f64::NAN), "0");
        assert_eq!(fmt(0.1 + 0.2), "0.30000000000000004");
    }
}
