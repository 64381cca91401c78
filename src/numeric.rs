//! Lenient numeric parsing and display formatting.
//!
//! Cell values are strings typed by people or filled in by enrichment jobs, so
//! "$1,200", "42%" and " 7 " all need to read as numbers. Anything that does
//! not parse to a finite number is reported as `None`.

/// Parse a cell string as a finite number.
///
/// Accepts surrounding whitespace, a leading minus sign, a leading `$`,
/// a trailing `%` (kept as the plain number: "42%" is 42), and `,` thousands
/// separators. `NaN`, `inf` and friends are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };
    let rest = rest.strip_prefix('$').unwrap_or(rest);
    let rest = rest.strip_suffix('%').unwrap_or(rest);
    let cleaned: String = rest.chars().filter(|c| *c != ',').collect();

    let first = cleaned.bytes().next()?;
    if !(first.is_ascii_digit() || first == b'.') {
        return None;
    }
    if !cleaned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return None;
    }

    let n: f64 = cleaned.parse().ok()?;
    if !n.is_finite() {
        return None;
    }
    Some(if negative { -n } else { n })
}

/// Format a number for display: thousands separators, at most two decimals,
/// trailing zeros dropped. Non-finite input formats as an empty string.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return String::new();
    }
    let scaled = n * 100.0;
    let rounded = if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        n
    };
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(text.len() + 4);
    if rounded < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format a 0..=1 ratio as a whole percentage ("67%").
pub fn format_percent(ratio: f64) -> String {
    if !ratio.is_finite() {
        return "0%".to_string();
    }
    format!("{}%", (ratio * 100.0).round())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("10", Some(10.0); "plain integer")]
    #[test_case(" 2.5 ", Some(2.5); "padded decimal")]
    #[test_case("$1,200", Some(1200.0); "currency with separators")]
    #[test_case("-$5", Some(-5.0); "negative currency")]
    #[test_case("42%", Some(42.0); "percent suffix")]
    #[test_case(".5", Some(0.5); "leading dot")]
    #[test_case("bad", None; "word")]
    #[test_case("", None; "empty")]
    #[test_case("NaN", None; "nan")]
    #[test_case("inf", None; "infinity")]
    #[test_case("--5", None; "double minus")]
    #[test_case("12abc", None; "trailing garbage")]
    fn test_parse_number(input: &str, expected: Option<f64>) {
        assert_eq!(parse_number(input), expected);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(30.0), "30");
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-1000.126), "-1,000.13");
        assert_eq!(format_number(-0.001), "0");
        assert_eq!(format_number(f64::NAN), "");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(2.0 / 3.0), "67%");
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(f64::INFINITY), "0%");
    }
}
