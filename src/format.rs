use chrono::{DateTime, Local, NaiveDateTime};

/// Direction of a gain/loss figure, used to pick the display color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Gain,
    Loss,
    Flat,
}

const LAST_UPDATED_FORMAT: &str = "%B %-d, %Y, %I:%M %p";

/// Accepted input shapes for `lastUpdated`, tried in order after RFC 3339.
const LAST_UPDATED_INPUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%B %d, %Y, %I:%M %p",
    "%B %d, %Y at %I:%M %p",
];

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// en-US grouping with a fixed number of decimals: `1234.5` -> `1,234.50`.
pub fn format_number(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rendered.as_str(), None),
    };

    // -0.001 rounds to "0.00" and must not print as "-0.00"
    let is_zero = rendered.chars().all(|c| c == '0' || c == '.');
    let mut out = String::new();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

pub fn format_currency(value: f64, currency: &str) -> String {
    let amount = format_number(value.abs(), 2);
    let sign = if value < 0.0 && amount.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{amount}"),
        None => format!("{sign}{currency} {amount}"),
    }
}

pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{}%", format_number(value, decimals))
}

pub fn gain_loss_tone(value: f64) -> Tone {
    if value > 0.0 {
        Tone::Gain
    } else if value < 0.0 {
        Tone::Loss
    } else {
        Tone::Flat
    }
}

/// `+$8,250.50 (+7.02%)` for gains, `-$12.00 (-1.50%)` for losses.
pub fn format_gain_loss(value: f64, percentage: f64, currency: &str) -> (String, Tone) {
    let sign = if value >= 0.0 { "+" } else { "" };
    let formatted = format!(
        "{sign}{} ({sign}{})",
        format_currency(value, currency),
        format_percentage(percentage, 2)
    );
    (formatted, gain_loss_tone(value))
}

pub fn parse_last_updated(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    LAST_UPDATED_INPUTS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format(LAST_UPDATED_FORMAT).to_string()
}

/// Unparseable timestamps fall back to the current local time.
pub fn format_last_updated(raw: &str) -> String {
    let dt = parse_last_updated(raw).unwrap_or_else(|| Local::now().naive_local());
    format_datetime(dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn number_grouping() {
        assert_eq!(format_number(0.0, 2), "0.00");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1234.5, 2), "1,234.50");
        assert_eq!(format_number(125750.5, 2), "125,750.50");
        assert_eq!(format_number(1_000_000.0, 2), "1,000,000.00");
        assert_eq!(format_number(-4321.0, 1), "-4,321.0");
    }

    #[test]
    fn negative_rounding_to_zero_has_no_sign() {
        assert_eq!(format_number(-0.001, 2), "0.00");
        assert_eq!(format_currency(-0.001, "USD"), "$0.00");
    }

    #[test]
    fn currency_symbols() {
        assert_eq!(format_currency(27787.5, "USD"), "$27,787.50");
        assert_eq!(format_currency(-12.0, "USD"), "-$12.00");
        assert_eq!(format_currency(10.0, "EUR"), "€10.00");
        assert_eq!(format_currency(10.0, "CHF"), "CHF 10.00");
    }

    #[test]
    fn percentage() {
        assert_eq!(format_percentage(7.02, 2), "7.02%");
        assert_eq!(format_percentage(11.4167, 1), "11.4%");
    }

    #[test]
    fn gain_loss_signs_and_tone() {
        let (text, tone) = format_gain_loss(8250.5, 7.02, "USD");
        assert_eq!(text, "+$8,250.50 (+7.02%)");
        assert_eq!(tone, Tone::Gain);

        let (text, tone) = format_gain_loss(-12.0, -1.5, "USD");
        assert_eq!(text, "-$12.00 (-1.50%)");
        assert_eq!(tone, Tone::Loss);

        let (text, tone) = format_gain_loss(0.0, 0.0, "USD");
        assert_eq!(text, "+$0.00 (+0.00%)");
        assert_eq!(tone, Tone::Flat);
    }

    #[test]
    fn last_updated_accepts_backend_format() {
        let parsed = parse_last_updated("October 19, 2026, 02:30 PM").unwrap();
        let expected = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(format_datetime(parsed), "October 19, 2026, 02:30 PM");
    }

    #[test]
    fn last_updated_accepts_iso_without_offset() {
        let parsed = parse_last_updated("2024-03-05T09:07:00").unwrap();
        assert_eq!(format_datetime(parsed), "March 5, 2024, 09:07 AM");
    }

    #[test]
    fn last_updated_garbage_falls_back_to_now() {
        assert!(parse_last_updated("not a date").is_none());
        // Falls back rather than failing; the exact text depends on the clock.
        assert!(!format_last_updated("not a date").is_empty());
    }
}
