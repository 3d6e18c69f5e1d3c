//! Project-specific utilities live here.

/// Placeholder shown for values a record does not carry.
pub const MISSING: &str = "-";

/// Formats a price with thousands separators and at most three fraction
/// digits, e.g. `18000.0` -> `18,000` and `1234.5678` -> `1,234.568`.
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return MISSING.to_string();
    }

    let rendered = format!("{:.3}", price.abs());
    let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if price < 0.0 && (whole != "0" || !fraction.is_empty()) {
        "-"
    } else {
        ""
    };

    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

/// Shows an optional price via [`format_price`], or [`MISSING`] when absent.
pub fn price_or_missing(price: Option<f64>) -> String {
    price.map(format_price).unwrap_or_else(|| MISSING.to_string())
}

/// Shows an optional text value, falling back to [`MISSING`] when absent or
/// blank.
pub fn or_missing(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => MISSING.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_price(0.5), "0.5");
        assert_eq!(format_price(999.0), "999");
        assert_eq!(format_price(18000.0), "18,000");
        assert_eq!(format_price(1234567.0), "1,234,567");
        assert_eq!(format_price(1234.5678), "1,234.568");
        assert_eq!(format_price(-2500.25), "-2,500.25");
    }

    #[test]
    fn non_finite_prices_are_missing() {
        assert_eq!(format_price(f64::NAN), "-");
        assert_eq!(format_price(f64::INFINITY), "-");
    }

    #[test]
    fn absent_price_is_missing() {
        assert_eq!(price_or_missing(None), "-");
        assert_eq!(price_or_missing(Some(18000.0)), "18,000");
        assert_eq!(price_or_missing(Some(f64::NAN)), "-");
    }

    #[test]
    fn blank_text_is_missing() {
        assert_eq!(or_missing(None), "-");
        assert_eq!(or_missing(Some("  ")), "-");
        assert_eq!(or_missing(Some("Penguin")), "Penguin");
    }
}
