//! # pris-core
//!
//! Core domain types for PrisSjekk.
//! Implements Strategy pattern for price formatting.

pub mod catalog;
pub mod filter;
pub mod pagination;
pub mod price;
pub mod product;

pub use catalog::*;
pub use filter::*;
pub use pagination::*;
pub use price::*;
pub use product::*;

// ============================================================================
// STRATEGY PATTERN: Formatters
// ============================================================================

/// Strategy trait for price formatting
pub trait PriceFormatter: Send + Sync {
    fn format(&self, price: f64) -> String;
}

/// Norwegian krone formatter (`nb-NO`, currency `NOK`).
///
/// Whole amounts render without decimals, everything else with exactly two:
/// `29.9` becomes `"29,90 kr"` and `30.0` becomes `"30 kr"`. Thousands are
/// grouped with a no-break space and negative amounts use U+2212.
#[derive(Debug, Clone, Copy, Default)]
pub struct NokFormatter;

/// No-break space used between groups and before the currency suffix
pub const NBSP: char = '\u{a0}';

const MINUS_SIGN: char = '\u{2212}';

impl PriceFormatter for NokFormatter {
    fn format(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return format!("{}{}kr", amount, NBSP);
        }

        let decimals = if amount.fract() != 0.0 { 2 } else { 0 };
        let fixed = round_half_away(amount.abs(), decimals);
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (fixed.as_str(), None),
        };

        let mut out = String::with_capacity(fixed.len() + 8);
        let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
        if amount < 0.0 && !is_zero {
            out.push(MINUS_SIGN);
        }
        out.push_str(&group_thousands(int_part));
        if let Some(frac) = frac_part {
            out.push(',');
            out.push_str(frac);
        }
        out.push(NBSP);
        out.push_str("kr");
        out
    }
}

/// Round a non-negative amount to `decimals` places, ties away from zero.
///
/// Works on the shortest decimal form of the float, so `0.125` becomes
/// `"0.13"` and `1.005` becomes `"1.01"` the way `Intl.NumberFormat` does.
fn round_half_away(value: f64, decimals: usize) -> String {
    let repr = value.to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(decimals))
        .collect();

    if frac_part.as_bytes().get(decimals).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let (int_digits, frac_digits) = digits.split_at(digits.len() - decimals);
    let mut out: String = int_digits.iter().map(|&d| d as char).collect();
    if decimals > 0 {
        out.push('.');
        out.extend(frac_digits.iter().map(|&d| d as char));
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(NBSP);
        }
        grouped.push(ch);
    }
    grouped
}

/// Format an amount as a compact NOK string
pub fn format_nok_compact(amount: f64) -> String {
    NokFormatter.format(amount)
}

/// Group a count the Norwegian way: `6000` becomes `"6 000"`
pub fn format_count(count: u64) -> String {
    group_thousands(&count.to_string())
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const PRIMARY: &str = "#8b5cf6";
    pub const GRID: &str = "#f1f5f9";
    pub const AXIS: &str = "#e2e8f0";
    pub const TEXT_MUTED: &str = "#64748b";
    pub const MARKER_OUTLINE: &str = "#ffffff";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nok_fractional_amount() {
        assert_eq!(format_nok_compact(29.9), "29,90\u{a0}kr");
        assert_eq!(format_nok_compact(59.8), "59,80\u{a0}kr");
    }

    #[test]
    fn test_nok_whole_amount() {
        assert_eq!(format_nok_compact(30.0), "30\u{a0}kr");
        assert_eq!(format_nok_compact(0.0), "0\u{a0}kr");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(6000), "6\u{a0}000");
        assert_eq!(format_count(1_234_567), "1\u{a0}234\u{a0}567");
    }

    #[test]
    fn test_nok_grouping() {
        assert_eq!(format_nok_compact(1234.5), "1\u{a0}234,50\u{a0}kr");
        assert_eq!(format_nok_compact(1_234_567.0), "1\u{a0}234\u{a0}567\u{a0}kr");
        assert_eq!(format_nok_compact(999.0), "999\u{a0}kr");
    }

    #[test]
    fn test_nok_negative_and_rounding() {
        assert_eq!(format_nok_compact(-5.0), "\u{2212}5\u{a0}kr");
        assert_eq!(format_nok_compact(12.345_6), "12,35\u{a0}kr");
        assert_eq!(format_nok_compact(-0.001), "0,00\u{a0}kr");
    }

    #[test]
    fn test_nok_ties_round_away_from_zero() {
        assert_eq!(format_nok_compact(0.125), "0,13\u{a0}kr");
        assert_eq!(format_nok_compact(10.625), "10,63\u{a0}kr");
        assert_eq!(format_nok_compact(1.005), "1,01\u{a0}kr");
        assert_eq!(format_nok_compact(-0.125), "\u{2212}0,13\u{a0}kr");
    }

    #[test]
    fn test_nok_rounding_carries_into_integer_part() {
        assert_eq!(format_nok_compact(9.995), "10,00\u{a0}kr");
        assert_eq!(format_nok_compact(999.999), "1\u{a0}000,00\u{a0}kr");
    }

    #[test]
    fn test_formatter_strategy() {
        let formatter: &dyn PriceFormatter = &NokFormatter;
        assert_eq!(formatter.format(42.0), "42\u{a0}kr");
    }
}
