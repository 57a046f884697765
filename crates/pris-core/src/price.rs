//! Price observations and the date formats used to label them

use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single (timestamp, price) observation for a product at one store
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: f64,
    pub date: DateTime<Utc>,
}

impl PricePoint {
    pub fn new(price: f64, date: DateTime<Utc>) -> Self {
        Self { price, date }
    }

    /// Short axis label, e.g. `"19. mai"`
    pub fn short_date(&self) -> String {
        format_short_date(&self.date)
    }

    /// Long tooltip label, e.g. `"19. mai 2025"`
    pub fn long_date(&self) -> String {
        format_long_date(&self.date)
    }
}

/// Returns a copy of `points` sorted ascending by date.
///
/// The sort is stable, so points sharing a date keep their input order.
pub fn sorted_by_date(points: &[PricePoint]) -> Vec<PricePoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|p| p.date);
    sorted
}

/// Lowest and highest price in the series
pub fn price_bounds(points: &[PricePoint]) -> Option<(f64, f64)> {
    let first = points.first()?;
    let init = (first.price, first.price);
    Some(points.iter().fold(init, |(min, max), p| {
        (min.min(p.price), max.max(p.price))
    }))
}

/// Month abbreviation + day in Norwegian Bokmål
pub fn format_short_date(date: &DateTime<Utc>) -> String {
    date.format_localized("%-d. %b", Locale::nb_NO).to_string()
}

/// Day + full month name + year in Norwegian Bokmål
pub fn format_long_date(date: &DateTime<Utc>) -> String {
    date.format_localized("%-d. %B %Y", Locale::nb_NO).to_string()
}

/// Parse the timestamp shapes the product API emits.
///
/// Accepts RFC 3339 (`2025-05-19T07:00:20.000000Z`), naive ISO-8601 with or
/// without fractional seconds, the space-separated SQL form and a bare date.
/// Naive values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, day, 7, 0, 0).unwrap()
    }

    #[test]
    fn test_sorted_by_date_leaves_input_untouched() {
        let points = vec![
            PricePoint::new(3.0, at(3)),
            PricePoint::new(1.0, at(1)),
            PricePoint::new(2.0, at(2)),
        ];
        let sorted = sorted_by_date(&points);

        let prices: Vec<f64> = sorted.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![1.0, 2.0, 3.0]);
        assert_eq!(points[0].price, 3.0);
    }

    #[test]
    fn test_sort_is_stable_for_duplicate_dates() {
        let points = vec![
            PricePoint::new(10.0, at(2)),
            PricePoint::new(20.0, at(1)),
            PricePoint::new(30.0, at(2)),
        ];
        let sorted = sorted_by_date(&points);
        let prices: Vec<f64> = sorted.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![20.0, 10.0, 30.0]);
    }

    #[test]
    fn test_price_bounds() {
        assert_eq!(price_bounds(&[]), None);

        let points = vec![
            PricePoint::new(29.9, at(1)),
            PricePoint::new(24.5, at(2)),
            PricePoint::new(31.0, at(3)),
        ];
        assert_eq!(price_bounds(&points), Some((24.5, 31.0)));
    }

    #[test]
    fn test_norwegian_dates() {
        let point = PricePoint::new(29.9, at(19));
        assert_eq!(point.short_date(), "19. mai");
        assert_eq!(point.long_date(), "19. mai 2025");
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let expected = Utc.with_ymd_and_hms(2025, 5, 19, 7, 0, 20).unwrap();
        assert_eq!(parse_timestamp("2025-05-19T07:00:20.000000Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-05-19T07:00:20"), Some(expected));
        assert_eq!(parse_timestamp("2025-05-19 07:00:20"), Some(expected));
        assert_eq!(
            parse_timestamp("2025-05-19"),
            Some(Utc.with_ymd_and_hms(2025, 5, 19, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("igår"), None);
    }
}
