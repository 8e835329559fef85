//! Number and title formatting for legends.

/// Format a legend breakpoint.
///
/// `0` as is, two decimals below 1, one decimal below 10, the integer part
/// below 1000, and space-grouped thousands above.
pub fn format_legend_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value < 1.0 {
        format!("{:.2}", value)
    } else if value < 10.0 {
        format!("{:.1}", value)
    } else if value < 1000.0 {
        format!("{}", value.trunc())
    } else {
        group_thousands(&format!("{:.0}", value))
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    grouped
}

/// Label of the range between two breakpoints.
pub fn range_label(lower: f64, upper: f64) -> String {
    format!(
        "{}-{}",
        format_legend_number(lower),
        format_legend_number(upper)
    )
}

/// Title suffix for values restated in another year's prices.
pub fn adjustment_suffix(year: i32) -> String {
    format!(" (в ценах {} г.)", year)
}

/// Title suffix naming the displayed year.
pub fn year_suffix(year: i32) -> String {
    format!(" ({} год)", year)
}

/// Append the optional adjustment and year suffixes to a title.
pub fn with_suffixes(mut title: String, adjustment_year: Option<i32>, year: Option<i32>) -> String {
    if let Some(adjustment_year) = adjustment_year {
        title.push_str(&adjustment_suffix(adjustment_year));
    }
    if let Some(year) = year {
        title.push_str(&year_suffix(year));
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "0")]
    #[case(0.256, "0.26")]
    #[case(4.26, "4.3")]
    #[case(7.0, "7.0")]
    #[case(18.0, "18")]
    #[case(999.9, "999")]
    #[case(1000.0, "1 000")]
    #[case(1_234_567.4, "1 234 567")]
    #[case(-4.0, "-4.00")]
    fn test_format_legend_number(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_legend_number(value), expected);
    }

    #[test]
    fn test_range_label() {
        assert_eq!(range_label(100.0, 2500.0), "100-2 500");
    }

    #[test]
    fn test_suffixes() {
        assert_eq!(
            with_suffixes("ВРП, млн руб.".to_string(), Some(2023), Some(2015)),
            "ВРП, млн руб. (в ценах 2023 г.) (2015 год)"
        );
        assert_eq!(with_suffixes("ВРП".to_string(), None, None), "ВРП");
    }
}
