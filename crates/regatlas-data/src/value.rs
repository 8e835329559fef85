//! Cell value normalization.
//!
//! Raw cells come either as numbers (typed columns) or as text (columns
//! polars could not infer as numeric, usually because of localized number
//! formatting or sentinel markers). Both paths end in `Option<f64>`: `None`
//! means the cell holds no data and must be left out of the result.

/// Textual markers meaning "no data", compared case-insensitively after
/// trimming. Zero is a value, whether the column was read as text or numbers.
pub const MISSING_MARKERS: &[&str] = &["", "...", "null", "n/a", "нет данных"];

/// Returns true if the text is one of the [`MISSING_MARKERS`].
pub fn is_missing_marker(text: &str) -> bool {
    let cleaned = text.trim().to_lowercase();
    MISSING_MARKERS.contains(&cleaned.as_str())
}

/// Normalize a numeric cell. Non-finite values count as missing.
pub const fn normalize_number(value: f64) -> Option<f64> {
    if value.is_finite() { Some(value) } else { None }
}

/// Normalize a text cell.
///
/// Spaces (including non-breaking ones) used as thousands separators are
/// removed and a decimal comma becomes a point before parsing. Markers and
/// unparsable text yield `None`.
pub fn normalize_text(text: &str) -> Option<f64> {
    if is_missing_marker(text) {
        return None;
    }

    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    cleaned.parse::<f64>().ok().and_then(normalize_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("...")]
    #[case("")]
    #[case("   ")]
    #[case("null")]
    #[case("NULL")]
    #[case("n/a")]
    #[case("N/A")]
    #[case("нет данных")]
    #[case("Нет данных")]
    fn test_missing_markers(#[case] text: &str) {
        assert!(is_missing_marker(text));
        assert_eq!(normalize_text(text), None);
    }

    #[rstest]
    #[case("1234", 1234.0)]
    #[case("1 234", 1234.0)]
    #[case("1\u{a0}234,5", 1234.5)]
    #[case("12,75", 12.75)]
    #[case("-3,5", -3.5)]
    #[case("0,0", 0.0)]
    #[case("0", 0.0)]
    #[case(" 0 ", 0.0)]
    fn test_text_parsing(#[case] text: &str, #[case] expected: f64) {
        assert_eq!(normalize_text(text), Some(expected));
    }

    #[test]
    fn test_unparsable_text_dropped() {
        assert_eq!(normalize_text("abc"), None);
        assert_eq!(normalize_text("12-14"), None);
        assert_eq!(normalize_text("NaN"), None);
    }

    #[test]
    fn test_numeric_zero_retained() {
        assert_eq!(normalize_number(0.0), Some(0.0));
        assert_eq!(normalize_number(f64::NAN), None);
        assert_eq!(normalize_number(f64::INFINITY), None);
    }
}
