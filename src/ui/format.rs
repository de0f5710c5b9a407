use std::fmt::Display;
use std::sync::LazyLock;

use chrono::{DateTime, Local, TimeZone, Utc};
use regex::Regex;

static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\D").expect("static pattern compiles"));

/// WhatsApp deep link for a free-text phone contact.
pub fn whatsapp_link(contact: &str) -> String {
    format!("https://wa.me/{}", NON_DIGITS.replace_all(contact, ""))
}

/// Brazilian real formatting, e.g. `R$ 1.234,56`.
pub fn format_brl(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{sign}R$ {grouped},{:02}", cents % 100)
}

pub fn format_timestamp<Tz>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp
        .with_timezone(tz)
        .format("%d/%m/%Y %H:%M:%S")
        .to_string()
}

pub fn format_local(timestamp: &DateTime<Utc>) -> String {
    format_timestamp(timestamp, &Local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn whatsapp_link_strips_formatting() {
        assert_eq!(
            whatsapp_link("+55 (11) 98765-4321"),
            "https://wa.me/5511987654321"
        );
        assert_eq!(whatsapp_link("11987654321"), "https://wa.me/11987654321");
    }

    #[test]
    fn brl_groups_thousands() {
        assert_eq!(format_brl(150.0), "R$ 150,00");
        assert_eq!(format_brl(1234.5), "R$ 1.234,50");
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_brl(0.125), "R$ 0,13");
    }

    #[test]
    fn timestamp_uses_brazilian_order() {
        let brasilia = FixedOffset::west_opt(3 * 3600).unwrap();
        let timestamp: DateTime<Utc> = "2024-09-30T15:04:05Z".parse().unwrap();
        assert_eq!(format_timestamp(&timestamp, &brasilia), "30/09/2024 12:04:05");
    }
}
