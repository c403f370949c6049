//! Number formatting, percentage helpers and exact fraction arithmetic
//!
//! `apply_format` renders a value the way tooltips and data labels show it.
//! `Fraction` keeps decimal inputs exact when percentages and bucket sums
//! are derived from them.

use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

/// Kind of number format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormatKind {
    #[default]
    Numbers,
    Currency,
    Percent,
}

/// Number format configuration attached to a measure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormatConfig {
    pub name: NumberFormatKind,
    /// Fixed number of decimals; `None` means automatic (up to two, trimmed)
    pub decimal_scale: Option<u8>,
    pub trillion: bool,
    pub billion: bool,
    pub million: bool,
    pub kilo: bool,
    pub thousand_separator: bool,
    /// Currency symbol goes before the number
    pub prefix: bool,
    pub symbol: String,
    /// Locale name understood by `num-format` ("en", "de", ...)
    pub locale: String,
}

impl Default for NumberFormatConfig {
    fn default() -> Self {
        Self {
            name: NumberFormatKind::Numbers,
            decimal_scale: None,
            trillion: true,
            billion: true,
            million: true,
            kilo: true,
            thousand_separator: true,
            prefix: true,
            symbol: "$".to_string(),
            locale: "en".to_string(),
        }
    }
}

impl NumberFormatConfig {
    pub fn percent() -> Self {
        Self {
            name: NumberFormatKind::Percent,
            ..Default::default()
        }
    }

    pub fn currency(symbol: impl Into<String>) -> Self {
        Self {
            name: NumberFormatKind::Currency,
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimal_scale = Some(decimals);
        self
    }

    /// Disable K/M/B/T abbreviations
    pub fn without_abbreviations(mut self) -> Self {
        self.trillion = false;
        self.billion = false;
        self.million = false;
        self.kilo = false;
        self
    }
}

const AUTO_DECIMALS: usize = 2;

/// Format a value according to a number format configuration
pub fn apply_format(config: &NumberFormatConfig, value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let mut number = value;
    if config.name == NumberFormatKind::Percent {
        number *= 100.0;
    }

    let (scaled, suffix) = if config.name == NumberFormatKind::Percent {
        (number, "")
    } else {
        abbreviate(config, number)
    };

    let locale = Locale::from_name(&config.locale).unwrap_or(Locale::en);
    let body = match config.decimal_scale {
        Some(decimals) => format_fixed(scaled.abs(), decimals as usize, config.thousand_separator, &locale),
        None => trim_decimals(format_fixed(
            scaled.abs(),
            AUTO_DECIMALS,
            config.thousand_separator,
            &locale,
        ), locale.decimal()),
    };

    let is_zero = body.chars().all(|c| !c.is_ascii_digit() || c == '0');
    let sign = if scaled < 0.0 && !is_zero { "-" } else { "" };

    match config.name {
        NumberFormatKind::Numbers => format!("{sign}{body}{suffix}"),
        NumberFormatKind::Percent => format!("{sign}{body}%"),
        NumberFormatKind::Currency if config.prefix => {
            format!("{sign}{}{body}{suffix}", config.symbol)
        }
        NumberFormatKind::Currency => format!("{sign}{body}{suffix} {}", config.symbol),
    }
}

/// Format a value with the default configuration
pub fn format_number(value: f64) -> String {
    apply_format(&NumberFormatConfig::default(), value)
}

fn abbreviate(config: &NumberFormatConfig, value: f64) -> (f64, &'static str) {
    let abs = value.abs();
    if config.trillion && abs >= 1.0e12 {
        (value / 1.0e12, "T")
    } else if config.billion && abs >= 1.0e9 {
        (value / 1.0e9, "B")
    } else if config.million && abs >= 1.0e6 {
        (value / 1.0e6, "M")
    } else if config.kilo && abs >= 1.0e3 {
        (value / 1.0e3, "K")
    } else {
        (value, "")
    }
}

fn format_fixed(abs: f64, decimals: usize, separator: bool, locale: &Locale) -> String {
    let fixed = format!("{abs:.decimals$}");
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let int_text = match int_part.parse::<u64>() {
        Ok(n) if separator => n.to_formatted_string(locale),
        _ => int_part.to_string(),
    };

    match frac_part {
        Some(frac) => format!("{int_text}{}{frac}", locale.decimal()),
        None => int_text,
    }
}

fn trim_decimals(mut text: String, decimal: &str) -> String {
    if text.contains(decimal) {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with(decimal) {
            text.truncate(text.len() - decimal.len());
        }
    }
    text
}

/// Round a value to a number of decimals
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Share of `value` in `total` as a percentage; `None` for a zero total
pub fn percentage(value: f64, total: f64) -> Option<f64> {
    if total == 0.0 || !total.is_finite() || !value.is_finite() {
        return None;
    }
    Some(
        Fraction::from_f64(value)
            .zip(Fraction::from_f64(total))
            .and_then(|(v, t)| v.checked_div(t)?.checked_mul(Fraction::integer(100)))
            .map(|f| f.to_f64())
            .unwrap_or(value / total * 100.0),
    )
}

/// Exact sum of decimal values, falling back to float addition on overflow
pub fn exact_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    let values: Vec<f64> = values.into_iter().collect();
    values
        .iter()
        .try_fold(Fraction::integer(0), |acc, v| acc.checked_add(Fraction::from_f64(*v)?))
        .map(|f| f.to_f64())
        .unwrap_or_else(|| values.iter().sum())
}

/// A reduced rational number over `i128`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    numerator: i128,
    denominator: i128,
}

impl Fraction {
    /// Create a reduced fraction with a positive denominator
    ///
    /// `None` for a zero denominator or when the reduced sign cannot be
    /// represented in `i128`.
    pub fn new(numerator: i128, denominator: i128) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let divisor = gcd(numerator.unsigned_abs(), denominator.unsigned_abs()).max(1);
        let divisor = i128::try_from(divisor).ok()?;
        let (numerator, denominator) = (numerator / divisor, denominator / divisor);
        if denominator < 0 {
            Some(Self {
                numerator: numerator.checked_neg()?,
                denominator: denominator.checked_neg()?,
            })
        } else {
            Some(Self {
                numerator,
                denominator,
            })
        }
    }

    pub fn integer(value: i128) -> Self {
        Self {
            numerator: value,
            denominator: 1,
        }
    }

    /// Exact fraction of the shortest decimal representation of `value`
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let text = value.to_string();
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
        if int_part.len() + frac_part.len() > 30 {
            return None;
        }
        let digits: i128 = format!("{int_part}{frac_part}").parse().ok()?;
        let denominator = 10i128.checked_pow(frac_part.len() as u32)?;
        Self::new(digits, denominator)
    }

    pub fn checked_add(self, other: Fraction) -> Option<Self> {
        let numerator = self
            .numerator
            .checked_mul(other.denominator)?
            .checked_add(other.numerator.checked_mul(self.denominator)?)?;
        Self::new(numerator, self.denominator.checked_mul(other.denominator)?)
    }

    pub fn checked_mul(self, other: Fraction) -> Option<Self> {
        Self::new(
            self.numerator.checked_mul(other.numerator)?,
            self.denominator.checked_mul(other.denominator)?,
        )
    }

    pub fn checked_div(self, other: Fraction) -> Option<Self> {
        Self::new(
            self.numerator.checked_mul(other.denominator)?,
            self.denominator.checked_mul(other.numerator)?,
        )
    }

    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format_abbreviates() {
        assert_eq!(format_number(1234.0), "1.23K");
        assert_eq!(format_number(2_500_000.0), "2.5M");
        assert_eq!(format_number(3.0e9), "3B");
        assert_eq!(format_number(4.2e12), "4.2T");
        assert_eq!(format_number(999.0), "999");
    }

    #[test]
    fn test_format_without_abbreviations_uses_separator() {
        let config = NumberFormatConfig::default().without_abbreviations();
        assert_eq!(apply_format(&config, 1234567.891), "1,234,567.89");
    }

    #[test]
    fn test_fixed_decimals() {
        let config = NumberFormatConfig::default().with_decimals(3);
        assert_eq!(apply_format(&config, 303.3), "303.300");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(format_number(-1500.0), "-1.5K");
        assert_eq!(format_number(-0.001), "0");
    }

    #[test]
    fn test_percent_format() {
        assert_eq!(apply_format(&NumberFormatConfig::percent(), 0.4567), "45.67%");
    }

    #[test]
    fn test_currency_format() {
        assert_eq!(apply_format(&NumberFormatConfig::currency("$"), 12.5), "$12.5");
        let suffix = NumberFormatConfig {
            prefix: false,
            ..NumberFormatConfig::currency("€")
        };
        assert_eq!(apply_format(&suffix, 2000.0), "2K €");
    }

    #[test]
    fn test_non_finite_is_empty() {
        assert_eq!(format_number(f64::NAN), "");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(303.3, 303.3), Some(100.0));
        let p = percentage(202.2, 303.3).unwrap();
        assert!((p - 66.667).abs() < 0.001);
        assert_eq!(percentage(1.0, 0.0), None);
    }

    #[test]
    fn test_exact_sum() {
        assert_eq!(exact_sum(vec![0.1, 0.2]), 0.3);
        assert_eq!(exact_sum(vec![303.3, 202.2, 101.1]), 606.6);
    }

    #[test]
    fn test_fraction_arithmetic() {
        let a = Fraction::from_f64(202.2).unwrap();
        assert_eq!(a, Fraction::new(1011, 5).unwrap());
        let half = Fraction::new(2, -4).unwrap();
        assert_eq!(half.to_f64(), -0.5);
        assert!(Fraction::new(1, 0).is_none());
        assert!(a.checked_div(Fraction::integer(0)).is_none());
    }

    #[test]
    fn test_fraction_sign_overflow() {
        assert!(Fraction::new(i128::MIN, -1).is_none());
        assert!(Fraction::integer(i128::MIN).checked_div(Fraction::integer(-1)).is_none());
        assert_eq!(Fraction::new(i128::MIN, 2).map(Fraction::to_f64), Some(i128::MIN as f64 / 2.0));
        assert_eq!(Fraction::new(-6, -4), Fraction::new(3, 2));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(66.66666, 2), 66.67);
        assert_eq!(round_to(2.5, 0), 3.0);
    }
}
