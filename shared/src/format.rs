use chrono::{DateTime, NaiveDateTime};

/// Whole dollars with thousands separators: `45000.0` → `45,000`.
pub fn format_price(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0.0 {
        out.insert(0, '-');
    }
    out
}

/// `sports_car` → `sports car`.
pub fn humanize_type(car_type: &str) -> String {
    car_type.replace('_', " ")
}

/// ISO 8601 timestamp as `DD/MM/YYYY HH:MM` in its own offset. Anything
/// unparseable is returned as-is.
pub fn format_timestamp(iso: &str) -> String {
    parse(iso).map_or_else(|| iso.to_string(), |dt| dt.format("%d/%m/%Y %H:%M").to_string())
}

pub fn format_date(iso: &str) -> String {
    parse(iso).map_or_else(|| iso.to_string(), |dt| dt.format("%d/%m/%Y").to_string())
}

// Offset-less timestamps are taken at face value.
fn parse(iso: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "0")]
    #[case(999.0, "999")]
    #[case(1000.0, "1,000")]
    #[case(45000.4, "45,000")]
    #[case(1234567.8, "1,234,568")]
    #[case(-2500.0, "-2,500")]
    fn prices(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_price(value), expected);
    }

    #[test]
    fn car_types_lose_underscores() {
        assert_eq!(humanize_type("sports_car"), "sports car");
        assert_eq!(humanize_type("suv"), "suv");
    }

    #[test]
    fn timestamps_keep_their_offset() {
        assert_eq!(format_timestamp("2024-05-01T10:30:00-03:00"), "01/05/2024 10:30");
        assert_eq!(format_date("2024-05-01T10:30:00.123456+00:00"), "01/05/2024");
        assert_eq!(format_timestamp("2024-05-01T08:05:00"), "01/05/2024 08:05");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }
}
