//! Display formatting helpers.
//!
//! The backend reports KRW amounts as plain numbers and rates as signed
//! fractions; everything user-facing goes through these.

use rust_decimal::Decimal;

/// Format a KRW amount: no decimals, thousands separators, `₩` prefix.
pub fn format_krw(amount: Decimal) -> String {
    let rounded = amount.round();
    let digits = rounded.abs().to_string();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-₩{}", group_thousands(&digits))
    } else {
        format!("₩{}", group_thousands(&digits))
    }
}

/// Format a signed fraction as a percentage: `0.0234` becomes `+2.34%`.
pub fn format_percent(rate: Decimal) -> String {
    let mut percent = (rate * Decimal::ONE_HUNDRED).round_dp(2);
    if percent.is_zero() {
        // Avoid a negative zero picking up the minus sign.
        percent = Decimal::ZERO;
    }
    if percent.is_sign_negative() {
        format!("{percent:.2}%")
    } else {
        format!("+{percent:.2}%")
    }
}

/// Format a remaining-seconds value as `1h 23m`.
pub fn format_remaining(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{hours}h {minutes}m")
}

/// Truncate a string to at most `max_chars` characters, appending an
/// ellipsis. Char-based so multibyte names (Korean tickers) never split.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn krw_groups_thousands() {
        assert_eq!(format_krw(dec!(0)), "₩0");
        assert_eq!(format_krw(dec!(500)), "₩500");
        assert_eq!(format_krw(dec!(10_000_000)), "₩10,000,000");
        assert_eq!(format_krw(dec!(-1_234_567)), "-₩1,234,567");
        assert_eq!(format_krw(dec!(999.6)), "₩1,000");
    }

    #[test]
    fn percent_from_signed_fraction() {
        assert_eq!(format_percent(dec!(0.0234)), "+2.34%");
        assert_eq!(format_percent(dec!(-0.0512)), "-5.12%");
        assert_eq!(format_percent(dec!(0)), "+0.00%");
    }

    #[test]
    fn remaining_time() {
        assert_eq!(format_remaining(5400), "1h 30m");
        assert_eq!(format_remaining(59), "0h 0m");
        assert_eq!(format_remaining(-10), "0h 0m");
    }

    #[test]
    fn truncate_is_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("삼성전자우선주", 5), "삼성전자…");
    }
}
