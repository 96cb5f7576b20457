//! Value formatting capability.
//!
//! Hosts usually hand over pre-formatted strings; this formatter covers
//! points without one and the axis boundary labels.

use serde::{Deserialize, Serialize};

/// Magnitude units applied before formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayUnits {
    /// Picks the largest unit not exceeding the value's magnitude.
    #[default]
    Auto,
    None,
    Thousands,
    Millions,
    Billions,
    Trillions,
}

impl DisplayUnits {
    /// Returns `(divisor, suffix)` for `value`.
    #[must_use]
    pub fn resolve(self, value: f64) -> (f64, &'static str) {
        match self {
            Self::Auto => {
                let magnitude = value.abs();
                if magnitude >= 1e12 {
                    (1e12, "T")
                } else if magnitude >= 1e9 {
                    (1e9, "bn")
                } else if magnitude >= 1e6 {
                    (1e6, "M")
                } else if magnitude >= 1e3 {
                    (1e3, "K")
                } else {
                    (1.0, "")
                }
            }
            Self::None => (1.0, ""),
            Self::Thousands => (1e3, "K"),
            Self::Millions => (1e6, "M"),
            Self::Billions => (1e9, "bn"),
            Self::Trillions => (1e12, "T"),
        }
    }
}

/// Format request: optional pattern (e.g. `"$#,0.00"`, `"0.0%"`), precision
/// override and display units.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValueFormat {
    pub pattern: Option<String>,
    pub precision: Option<u32>,
    pub display_units: DisplayUnits,
}

pub trait ValueFormatter: Send + Sync {
    fn format(&self, value: f64, format: &ValueFormat) -> String;
}

impl<F> ValueFormatter for F
where
    F: Fn(f64, &ValueFormat) -> String + Send + Sync,
{
    fn format(&self, value: f64, format: &ValueFormat) -> String {
        self(value, format)
    }
}

/// Pattern-aware formatter covering prefixes/suffixes, grouping, percent,
/// fixed decimals and display units.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValueFormatter;

#[derive(Debug, Default)]
struct NumberPattern<'a> {
    prefix: &'a str,
    suffix: &'a str,
    decimals: Option<usize>,
    grouping: bool,
    percent: bool,
}

fn parse_pattern(pattern: &str) -> NumberPattern<'_> {
    let Some(start) = pattern.find(['#', '0']) else {
        return NumberPattern {
            percent: pattern.contains('%'),
            ..NumberPattern::default()
        };
    };
    let end = pattern
        .rfind(['#', '0', '.', ','])
        .map_or(pattern.len(), |idx| idx + 1);
    let number = &pattern[start..end];
    let prefix = &pattern[..start];
    let suffix = &pattern[end..];

    NumberPattern {
        prefix,
        suffix,
        decimals: number
            .find('.')
            .map(|dot| number[dot + 1..].chars().filter(|c| matches!(c, '0' | '#')).count()),
        grouping: number.contains(','),
        percent: prefix.contains('%') || suffix.contains('%'),
    }
}

fn trim_fraction(mut digits: String) -> String {
    if digits.contains('.') {
        while digits.ends_with('0') {
            digits.pop();
        }
        if digits.ends_with('.') {
            digits.pop();
        }
    }
    digits
}

fn group_thousands(digits: &str) -> String {
    let (sign, unsigned) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(dot) => (&unsigned[..dot], &unsigned[dot..]),
        None => (unsigned, ""),
    };

    let mut grouped = String::with_capacity(digits.len() + int_part.len() / 3);
    grouped.push_str(sign);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped.push_str(frac_part);
    grouped
}

impl ValueFormatter for DefaultValueFormatter {
    fn format(&self, value: f64, format: &ValueFormat) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        let pattern = format
            .pattern
            .as_deref()
            .map(parse_pattern)
            .unwrap_or_default();
        let (scaled, unit) = if pattern.percent {
            (value * 100.0, "")
        } else {
            let (divisor, unit) = format.display_units.resolve(value);
            (value / divisor, unit)
        };

        let decimals = format
            .precision
            .map(|precision| precision as usize)
            .or(pattern.decimals);
        let mut digits = match decimals {
            Some(prec) => format!("{scaled:.prec$}"),
            None => trim_fraction(format!("{scaled:.2}")),
        };
        if digits.starts_with('-') && digits[1..].chars().all(|c| matches!(c, '0' | '.')) {
            digits.remove(0);
        }
        if pattern.grouping {
            digits = group_thousands(&digits);
        }

        format!("{}{digits}{unit}{}", pattern.prefix, pattern.suffix)
    }
}
