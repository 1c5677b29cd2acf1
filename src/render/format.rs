//! Number and time formatting for the popup card.

use chrono::{DateTime, Utc};

/// `12000` -> `12k`, `1500` -> `1.5k`, `500` -> `500`.
///
/// The decimal is truncated, so `9999` is `9.9k` rather than `10.0k`.
pub fn format_stars(stars: u64) -> String {
    if stars >= 10_000 {
        format!("{}k", stars / 1_000)
    } else if stars >= 1_000 {
        let tenths = stars / 100;
        format!("{}.{}k", tenths / 10, tenths % 10)
    } else {
        stars.to_string()
    }
}

/// `1234567` -> `1,234,567`.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{} {} ago", n, unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Relative "updated" label. Timestamps in the future read as "just now".
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);

    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return plural(hours, "hour");
    }

    match elapsed.num_days() {
        1 => "yesterday".to_string(),
        days @ 2..=30 => plural(days, "day"),
        _ => format!("on {}", then.format("%b %-d, %Y")),
    }
}

pub fn updated_label(pushed_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match pushed_at {
        Some(then) => relative_time(then, now),
        None => "unknown".to_string(),
    }
}
