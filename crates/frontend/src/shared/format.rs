//! Display formatting for table cells and cards

use chrono::{DateTime, Utc};

/// Thousands separated by spaces, fixed number of decimals
///
/// ```ignore
/// assert_eq!(format_number(1234567.891, 2), "1 234 567.89");
/// ```
pub fn format_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (integer_part, fraction) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Whole amounts print without decimals
pub fn format_price(amount: f64, currency: &str) -> String {
    let decimals = if amount.fract() == 0.0 { 0 } else { 2 };
    format!("{} {}", format_number(amount, decimals), currency)
}

pub fn format_area(area_sqm: f64) -> String {
    format!("{} m²", format_number(area_sqm, if area_sqm.fract() == 0.0 { 0 } else { 1 }))
}

pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%d.%m.%Y").to_string()
}

pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%d.%m.%Y %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234567.891, 2), "1 234 567.89");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1000.0, 0), "1 000");
        assert_eq!(format_number(-1234.5, 1), "-1 234.5");
        assert_eq!(format_number(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(250000.0, "EUR"), "250 000 EUR");
        assert_eq!(format_price(1499.5, "USD"), "1 499.50 USD");
    }

    #[test]
    fn test_format_area() {
        assert_eq!(format_area(85.0), "85 m²");
        assert_eq!(format_area(1250.3), "1 250.3 m²");
    }

    #[test]
    fn test_format_dates() {
        let value = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        assert_eq!(format_date(&value), "15.03.2024");
        assert_eq!(format_datetime(&value), "15.03.2024 14:02");
    }
}
