//! Shop configuration.
//!
//! Options are set one `key`/`value` pair at a time, either programmatically
//! or from `key = value` lines. Problems never abort configuration: they are
//! collected as [`OptionWarning`]s and the offending value is not applied.

use rust_decimal::Decimal;
use std::collections::HashSet;
use std::str::FromStr;

use crate::{Basis, RateTable};

/// Known option names.
const KNOWN_OPTIONS: &[&str] = &["stock", "hourly_rate", "daily_rate", "weekly_rate"];

/// Option validation warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionWarning {
    /// Warning code (C001 unknown, C002 invalid, C003 duplicate).
    pub code: &'static str,
    /// Warning message.
    pub message: String,
    /// Option name.
    pub option: String,
    /// Option value.
    pub value: String,
}

/// Configuration of a [`RentalShop`](crate::RentalShop).
///
/// # Examples
///
/// ```
/// use carrental_core::{Basis, ShopOptions};
/// use rust_decimal_macros::dec;
///
/// let options = ShopOptions::parse("
///     ## a small branch
///     stock = 12
///     weekly_rate = 55
/// ");
/// assert!(options.warnings.is_empty());
/// assert_eq!(options.stock, 12);
/// assert_eq!(options.rates.rate(Basis::Weekly), dec!(55));
/// assert_eq!(options.rates.rate(Basis::Daily), dec!(20));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShopOptions {
    /// Cars in stock when the shop opens.
    pub stock: u32,

    /// Per-car rates.
    pub rates: RateTable,

    /// Options that have been set (for duplicate detection).
    set_options: HashSet<String>,

    /// Validation warnings collected while setting options.
    pub warnings: Vec<OptionWarning>,
}

impl ShopOptions {
    /// Create options with defaults: no stock and the standard rate table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key = value` lines. Blank lines and `#` comments are skipped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut options = Self::new();
        options.apply(text);
        options
    }

    /// Apply `key = value` lines on top of the current values.
    pub fn apply(&mut self, text: &str) {
        for line in text.lines() {
            let line = line.split_once('#').map_or(line, |(before, _)| before).trim();
            if line.is_empty() {
                continue;
            }
            match line.split_once('=') {
                Some((key, value)) => self.set(key.trim(), value.trim()),
                None => self.warn(
                    "C002",
                    format!("Malformed option line \"{line}\": expected KEY = VALUE"),
                    line,
                    "",
                ),
            }
        }
    }

    /// Set an option by name.
    ///
    /// Validates the option and collects any warnings in `self.warnings`.
    pub fn set(&mut self, key: &str, value: &str) {
        // Check for unknown options (C001)
        if !KNOWN_OPTIONS.contains(&key) {
            self.warn("C001", format!("Unknown option \"{key}\""), key, value);
            return;
        }

        // Check for duplicates (C003)
        if !self.set_options.insert(key.to_string()) {
            self.warn(
                "C003",
                format!("Option \"{key}\" can only be specified once"),
                key,
                value,
            );
        }

        match key {
            "stock" => match value.parse::<u32>() {
                Ok(stock) => self.stock = stock,
                Err(_) => self.warn(
                    "C002",
                    format!(
                        "Invalid value \"{value}\" for option \"{key}\": expected a non-negative integer"
                    ),
                    key,
                    value,
                ),
            },
            "hourly_rate" => self.set_rate(Basis::Hourly, key, value),
            "daily_rate" => self.set_rate(Basis::Daily, key, value),
            "weekly_rate" => self.set_rate(Basis::Weekly, key, value),
            _ => {}
        }
    }

    fn set_rate(&mut self, basis: Basis, key: &str, value: &str) {
        match Decimal::from_str(value) {
            Ok(rate) if !rate.is_sign_negative() => {
                self.rates = self.rates.with_rate(basis, rate);
            }
            _ => self.warn(
                "C002",
                format!(
                    "Invalid value \"{value}\" for option \"{key}\": expected a non-negative decimal number"
                ),
                key,
                value,
            ),
        }
    }

    fn warn(&mut self, code: &'static str, message: String, option: &str, value: &str) {
        tracing::warn!(code, "{message}");
        self.warnings.push(OptionWarning {
            code,
            message,
            option: option.to_string(),
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let options = ShopOptions::new();
        assert_eq!(options.stock, 0);
        assert_eq!(options.rates, RateTable::default());
        assert!(options.warnings.is_empty());
    }

    #[test]
    fn test_set_rates() {
        let mut options = ShopOptions::new();
        options.set("hourly_rate", "6.50");
        options.set("daily_rate", "0");
        assert_eq!(options.rates.hourly, dec!(6.50));
        assert_eq!(options.rates.daily, dec!(0));
        assert!(options.warnings.is_empty());
    }

    #[test]
    fn test_unknown_option() {
        let mut options = ShopOptions::new();
        options.set("monthly_rate", "100");
        assert_eq!(options.warnings.len(), 1);
        assert_eq!(options.warnings[0].code, "C001");
        assert_eq!(options.warnings[0].option, "monthly_rate");
    }

    #[test]
    fn test_invalid_values_not_applied() {
        let mut options = ShopOptions::new();
        options.set("stock", "-3");
        options.set("weekly_rate", "-1");
        options.set("daily_rate", "cheap");
        assert_eq!(options.stock, 0);
        assert_eq!(options.rates, RateTable::default());
        let codes: Vec<_> = options.warnings.iter().map(|w| w.code).collect();
        assert_eq!(codes, vec!["C002", "C002", "C002"]);
    }

    #[test]
    fn test_duplicate_option() {
        let mut options = ShopOptions::new();
        options.set("stock", "3");
        options.set("stock", "4");
        assert_eq!(options.warnings.len(), 1);
        assert_eq!(options.warnings[0].code, "C003");
        // The later value still wins.
        assert_eq!(options.stock, 4);
    }

    #[test]
    fn test_parse_lines() {
        let options = ShopOptions::parse(
            "stock = 7   # opening stock\n\n# rates\nhourly_rate=4\nnot an option line\n",
        );
        assert_eq!(options.stock, 7);
        assert_eq!(options.rates.hourly, dec!(4));
        assert_eq!(options.warnings.len(), 1);
        assert_eq!(options.warnings[0].code, "C002");
    }
}
