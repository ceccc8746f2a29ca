//! Amount and timestamp rendering for shell output.

use chrono::{DateTime, Local, Utc};
use roomshare_config::Config;

/// Renders money with the configured symbol, digit grouping and two decimals.
///
/// `en-IN` groups the integer part as lakh/crore (`12,34,567.50`); every
/// other locale groups by thousands. Negative values carry a leading sign.
pub fn format_amount(config: &Config, amount: f64) -> String {
    let body = format!("{:.2}", amount.abs());
    let (int_part, fraction) = body.split_once('.').unwrap_or((body.as_str(), "00"));
    let grouped = if config.locale.eq_ignore_ascii_case("en-IN") {
        group_indian(int_part)
    } else {
        group_thousands(int_part)
    };
    let sign = if amount < 0.0 && body != "0.00" { "-" } else { "" };
    format!("{sign}{}{grouped}.{fraction}", config.currency_symbol)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
    }
    grouped
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut grouped = String::new();
    for (count, ch) in head.chars().rev().enumerate() {
        if count != 0 && count % 2 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, ch);
    }
    format!("{grouped},{tail}")
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(locale: &str, symbol: &str) -> Config {
        Config {
            locale: locale.into(),
            currency_symbol: symbol.into(),
            ..Config::default()
        }
    }

    #[test]
    fn indian_locale_groups_lakhs() {
        let cfg = config("en-IN", "₹");
        assert_eq!(format_amount(&cfg, 1234567.5), "₹12,34,567.50");
        assert_eq!(format_amount(&cfg, 999.0), "₹999.00");
        assert_eq!(format_amount(&cfg, -100.0), "-₹100.00");
    }

    #[test]
    fn other_locales_group_thousands() {
        let cfg = config("en-US", "$");
        assert_eq!(format_amount(&cfg, 1234567.5), "$1,234,567.50");
        assert_eq!(format_amount(&cfg, 66.666), "$66.67");
    }

    #[test]
    fn negative_zero_drops_sign() {
        let cfg = config("en-US", "$");
        assert_eq!(format_amount(&cfg, -0.001), "$0.00");
    }
}
