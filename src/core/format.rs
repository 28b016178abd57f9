//! Display formatting for amounts and dates
//!
//! Output follows the `es-CO` conventions used across the dashboard: `.` as
//! the thousands separator, no fraction digits, Spanish month abbreviations.

use chrono::{DateTime, Datelike, Utc};
use regex::Regex;
use std::sync::OnceLock;

const MONTHS_SHORT: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Format an amount as currency, e.g. `$ 1.234.567` for COP
///
/// Amounts are rounded half away from zero. COP renders as `$`, USD as `US$`,
/// and any other code is printed as-is.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let whole = amount.round();
    let sign = if whole < 0.0 { "-" } else { "" };
    let digits = group_thousands(whole.abs() as u128);
    format!("{}{} {}", sign, currency_symbol(currency), digits)
}

/// Format an amount with a compact suffix, e.g. `$ 980 mil` or `$ 1 M`
pub fn format_compact_currency(amount: f64, currency: &str) -> String {
    const UNITS: [(f64, &str); 3] = [(1e9, " mil M"), (1e6, " M"), (1e3, " mil")];

    let abs = amount.abs();
    let sign = if amount.round() < 0.0 { "-" } else { "" };

    let mut scaled = abs.round();
    let mut suffix = "";
    for (index, (factor, unit)) in UNITS.iter().enumerate() {
        if abs >= *factor {
            scaled = (abs / factor).round();
            suffix = unit;
            // 999_600 rounds to "1000 mil"; promote to the next unit instead
            if scaled >= 1000.0 && index > 0 {
                let (bigger, bigger_unit) = UNITS[index - 1];
                scaled = (abs / bigger).round();
                suffix = bigger_unit;
            }
            break;
        }
    }

    format!(
        "{}{} {}{}",
        sign,
        currency_symbol(currency),
        group_thousands(scaled as u128),
        suffix
    )
}

/// Extract a number from free-form user input, `0.0` when nothing parses
pub fn parse_amount(value: &str) -> f64 {
    static NON_NUMERIC: OnceLock<Regex> = OnceLock::new();
    let re = NON_NUMERIC.get_or_init(|| Regex::new(r"[^\d.-]").expect("valid regex"));
    let cleaned = re.replace_all(value, "");
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// `MMM dd, yyyy`, e.g. `dic 15, 2024`
pub fn format_short_date(date: DateTime<Utc>) -> String {
    format!(
        "{} {:02}, {}",
        month_short(date),
        date.day(),
        date.year()
    )
}

/// Medium date, e.g. `15 dic 2024`
pub fn format_date(date: DateTime<Utc>) -> String {
    format!("{} {} {}", date.day(), month_short(date), date.year())
}

/// Medium date with time, e.g. `15 dic 2024, 10:30`
pub fn format_date_time(date: DateTime<Utc>) -> String {
    format!("{}, {}", format_date(date), format_time(date))
}

/// Date relative to `now`: `Hoy, 10:30`, `Ayer, 10:30`, or `hace 3 días`
pub fn format_relative_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let day = date.date_naive();
    let today = now.date_naive();

    if day == today {
        return format!("Hoy, {}", format_time(date));
    }
    if today.pred_opt() == Some(day) {
        return format!("Ayer, {}", format_time(date));
    }

    let days = (now - date).num_days();
    let distance = describe_days(days.abs());
    if days >= 0 {
        format!("hace {}", distance)
    } else {
        format!("dentro de {}", distance)
    }
}

fn describe_days(days: i64) -> String {
    match days {
        0..=1 => "1 día".to_string(),
        2..=29 => format!("{} días", days),
        30..=59 => "1 mes".to_string(),
        60..=364 => format!("{} meses", days / 30),
        365..=729 => "1 año".to_string(),
        _ => format!("{} años", days / 365),
    }
}

fn format_time(date: DateTime<Utc>) -> String {
    date.format("%-H:%M").to_string()
}

fn month_short(date: DateTime<Utc>) -> &'static str {
    MONTHS_SHORT[date.month0() as usize]
}

fn currency_symbol(currency: &str) -> &str {
    match currency {
        "COP" => "$",
        "USD" => "US$",
        other => other,
    }
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_format_currency_cop() {
        assert_eq!(format_currency(1000.0, "COP"), "$ 1.000");
        assert_eq!(format_currency(1234567.0, "COP"), "$ 1.234.567");
        assert_eq!(format_currency(0.0, "COP"), "$ 0");
        assert_eq!(format_currency(65000.0, "COP"), "$ 65.000");
    }

    #[test]
    fn test_format_currency_other_codes() {
        assert_eq!(format_currency(1000.0, "USD"), "US$ 1.000");
        assert_eq!(format_currency(1000.0, "EUR"), "EUR 1.000");
    }

    #[test]
    fn test_format_currency_negative_and_fractions() {
        assert_eq!(format_currency(-1000.0, "COP"), "-$ 1.000");
        assert_eq!(format_currency(1000.5, "USD"), "US$ 1.001");
        assert_eq!(format_currency(-0.4, "COP"), "$ 0");
    }

    #[test]
    fn test_format_compact_currency() {
        assert_eq!(format_compact_currency(980_000.0, "COP"), "$ 980 mil");
        assert_eq!(format_compact_currency(1_250_000.0, "COP"), "$ 1 M");
        assert_eq!(format_compact_currency(999_600.0, "COP"), "$ 1 M");
        assert_eq!(format_compact_currency(2_000_000_000.0, "COP"), "$ 2 mil M");
        assert_eq!(format_compact_currency(500.0, "COP"), "$ 500");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$ 50.000"), 50.0);
        assert_eq!(parse_amount("1234"), 1234.0);
        assert_eq!(parse_amount("-5"), -5.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
    }

    #[test]
    fn test_format_short_date() {
        assert_eq!(format_short_date(at(2024, 12, 15, 10, 30)), "dic 15, 2024");
        assert_eq!(format_short_date(at(2024, 1, 1, 0, 0)), "ene 01, 2024");
        assert_eq!(format_short_date(at(2024, 9, 5, 0, 0)), "sept 05, 2024");
    }

    #[test]
    fn test_format_date_time() {
        assert_eq!(format_date(at(2024, 12, 15, 10, 30)), "15 dic 2024");
        assert_eq!(
            format_date_time(at(2024, 12, 15, 9, 5)),
            "15 dic 2024, 9:05"
        );
    }

    #[test]
    fn test_format_relative_date() {
        let now = at(2024, 12, 15, 18, 0);
        assert_eq!(format_relative_date(at(2024, 12, 15, 10, 30), now), "Hoy, 10:30");
        assert_eq!(format_relative_date(at(2024, 12, 14, 8, 0), now), "Ayer, 8:00");
        assert_eq!(format_relative_date(at(2024, 12, 10, 18, 0), now), "hace 5 días");
        assert_eq!(format_relative_date(at(2024, 10, 15, 18, 0), now), "hace 2 meses");
        assert_eq!(format_relative_date(at(2022, 12, 15, 18, 0), now), "hace 2 años");
    }
}
