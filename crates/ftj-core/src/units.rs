//! SI-suffixed values as written on SPICE model cards.

/// Multiplier for a SPICE scale suffix (case-insensitive, trailing unit
/// letters ignored: `1.6nm` reads as 1.6e-9).
fn suffix_multiplier(suffix: &str) -> Option<f64> {
    let s = suffix.to_ascii_uppercase();
    if s.is_empty() {
        return Some(1.0);
    }
    // MEG and MIL have to be checked before the single-letter M.
    if s.starts_with("MEG") {
        return Some(1e6);
    }
    if s.starts_with("MIL") {
        return Some(25.4e-6);
    }
    let multiplier = match s.as_bytes()[0] {
        b'T' => 1e12,
        b'G' => 1e9,
        b'K' => 1e3,
        b'M' => 1e-3,
        b'U' => 1e-6,
        b'N' => 1e-9,
        b'P' => 1e-12,
        b'F' => 1e-15,
        b'A' => 1e-18,
        _ => return None,
    };
    Some(multiplier)
}

/// Parse a value with an optional SI suffix (`50n`, `1.6e-9`, `2MEG`).
pub fn parse_value(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<f64>() {
        return Some(v);
    }

    // Longest numeric prefix that parses; the rest is the suffix.
    let split = (1..=s.len())
        .rev()
        .filter(|&i| s.is_char_boundary(i))
        .find(|&i| s[..i].parse::<f64>().is_ok())?;
    let (number, suffix) = s.split_at(split);
    let value: f64 = number.parse().ok()?;

    Some(value * suffix_multiplier(suffix)?)
}

/// Format a value with an engineering prefix, four decimals.
pub fn format_value(value: f64) -> String {
    const PREFIXES: [(f64, &str); 9] = [
        (1e12, "T"),
        (1e9, "G"),
        (1e6, "M"),
        (1e3, "k"),
        (1.0, ""),
        (1e-3, "m"),
        (1e-6, "u"),
        (1e-9, "n"),
        (1e-12, "p"),
    ];

    let magnitude = value.abs();
    if magnitude == 0.0 {
        return format!("{:.4}", 0.0);
    }
    for (scale, prefix) in PREFIXES {
        if magnitude >= scale {
            return format!("{:.4}{}", value / scale, prefix);
        }
    }
    if magnitude >= 1e-15 {
        return format!("{:.4}f", value / 1e-15);
    }
    format!("{:.4e}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|v| (v - b).abs() <= b.abs() * 1e-12)
    }

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_value("300"), Some(300.0));
        assert_eq!(parse_value(" -0.5 "), Some(-0.5));
        assert_eq!(parse_value("1.6e-9"), Some(1.6e-9));
    }

    #[test]
    fn test_parse_suffixes() {
        assert!(approx_eq(parse_value("1.6n"), 1.6e-9));
        assert!(approx_eq(parse_value("50N"), 50e-9));
        assert!(approx_eq(parse_value("2meg"), 2e6));
        assert!(approx_eq(parse_value("10m"), 10e-3));
        assert!(approx_eq(parse_value("100p"), 100e-12));
        assert!(approx_eq(parse_value("1.6nm"), 1.6e-9));
        assert!(approx_eq(parse_value("1e-3k"), 1.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value("1.6x"), None);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0.0), "0.0000");
        assert_eq!(format_value(1500.0), "1.5000k");
        assert_eq!(format_value(1.6e-9), "1.6000n");
        assert_eq!(format_value(-2e-6), "-2.0000u");
        assert_eq!(format_value(3e-15), "3.0000f");
    }
}
