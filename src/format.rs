//! Currency display formatting
//!
//! Compact output abbreviates large amounts (lakh/crore in the Indian
//! system, million/billion in the international one). Plain output groups
//! digits the way the locale does: Indian is 3 then 2 (12,34,567.00).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    Indian,
    International,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatOptions {
    pub symbol: String,
    pub locale: Locale,
    pub compact: bool,
    pub decimals: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            symbol: "₹".to_string(),
            locale: Locale::Indian,
            compact: true,
            decimals: 2,
        }
    }
}

impl FormatOptions {
    /// Full digits with locale grouping
    pub fn plain() -> Self {
        Self {
            compact: false,
            ..Self::default()
        }
    }

    /// Symbol used for an ISO currency code, falling back to the code itself
    pub fn for_currency(code: &str) -> Self {
        let (symbol, locale) = match code {
            "INR" => ("₹".to_string(), Locale::Indian),
            "USD" => ("$".to_string(), Locale::International),
            "EUR" => ("€".to_string(), Locale::International),
            "GBP" => ("£".to_string(), Locale::International),
            other => (format!("{} ", other), Locale::International),
        };
        Self {
            symbol,
            locale,
            ..Self::default()
        }
    }
}

const INDIAN_UNITS: [(f64, &str); 3] = [(1e7, " Cr"), (1e5, " L"), (1e3, "K")];
const INTERNATIONAL_UNITS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

pub fn format_currency(value: f64, options: &FormatOptions) -> String {
    if !value.is_finite() {
        return format!("{}{}", options.symbol, value);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();

    if options.compact {
        let units = match options.locale {
            Locale::Indian => &INDIAN_UNITS,
            Locale::International => &INTERNATIONAL_UNITS,
        };
        if let Some((scale, suffix)) = units.iter().find(|(scale, _)| abs >= *scale) {
            return format!(
                "{}{}{:.*}{}",
                sign,
                options.symbol,
                options.decimals,
                abs / scale,
                suffix
            );
        }
    }

    let fixed = format!("{:.*}", options.decimals, abs);
    let (whole, fraction) = match fixed.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = format!("{}{}{}", sign, options.symbol, group_digits(whole, options.locale));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

fn group_digits(digits: &str, locale: Locale) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let size = match locale {
        Locale::Indian => 2,
        Locale::International => 3,
    };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(size);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indian_compact() {
        let opts = FormatOptions::default();
        assert_eq!(format_currency(25_000_000.0, &opts), "₹2.50 Cr");
        assert_eq!(format_currency(1_161_695.38, &opts), "₹11.62 L");
        assert_eq!(format_currency(29_862.0, &opts), "₹29.86K");
        assert_eq!(format_currency(999.5, &opts), "₹999.50");
    }

    #[test]
    fn test_international_compact() {
        let opts = FormatOptions {
            symbol: "$".to_string(),
            locale: Locale::International,
            ..FormatOptions::default()
        };
        assert_eq!(format_currency(3_400_000_000.0, &opts), "$3.40B");
        assert_eq!(format_currency(1_500_000.0, &opts), "$1.50M");
        assert_eq!(format_currency(12_346.0, &opts), "$12.35K");
    }

    #[test]
    fn test_plain_grouping() {
        let opts = FormatOptions::plain();
        assert_eq!(format_currency(1_234_567.0, &opts), "₹12,34,567.00");
        assert_eq!(format_currency(100_000.0, &opts), "₹1,00,000.00");
        assert_eq!(format_currency(1000.0, &opts), "₹1,000.00");
        assert_eq!(format_currency(12.5, &opts), "₹12.50");

        let intl = FormatOptions {
            locale: Locale::International,
            ..FormatOptions::plain()
        };
        assert_eq!(format_currency(1_234_567.891, &intl), "₹1,234,567.89");
    }

    #[test]
    fn test_negative_keeps_sign() {
        assert_eq!(format_currency(-100.0, &FormatOptions::plain()), "-₹100.00");
        assert_eq!(format_currency(-250_000.0, &FormatOptions::default()), "-₹2.50 L");
    }

    #[test]
    fn test_zero_decimals() {
        let opts = FormatOptions {
            decimals: 0,
            ..FormatOptions::plain()
        };
        assert_eq!(format_currency(1_234_567.4, &opts), "₹12,34,567");
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(FormatOptions::for_currency("USD").symbol, "$");
        assert_eq!(FormatOptions::for_currency("INR").locale, Locale::Indian);
        assert_eq!(FormatOptions::for_currency("JPY").symbol, "JPY ");
    }
}
