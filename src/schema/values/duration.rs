use std::{sync::LazyLock, time::Duration};

use regex::Regex;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;

#[allow(clippy::expect_used)]
static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+(?:\.\d+)?(?:ns|us|µs|ms|s|m|h|d|w))+$")
        .expect("duration pattern must compile")
});

#[allow(clippy::expect_used)]
static DURATION_TERM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)(ns|us|µs|ms|s|m|h|d|w)").expect("duration term must compile")
});

/// Renders a duration the way command-line defaults spell it: `0s`, `250ms`,
/// `1m30s`, `1h0m0s`.
///
/// ```
/// use std::time::Duration;
/// use confdoc::schema::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{nanos}ns");
    }
    if nanos < NANOS_PER_MILLI {
        return format!("{}µs", with_fraction(nanos, NANOS_PER_MICRO));
    }
    if nanos < NANOS_PER_SECOND {
        return format!("{}ms", with_fraction(nanos, NANOS_PER_MILLI));
    }

    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = total_secs % 3600 / 60;
    let seconds = with_fraction(
        u128::from(total_secs % 60) * NANOS_PER_SECOND + u128::from(duration.subsec_nanos()),
        NANOS_PER_SECOND,
    );

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Parses `1h30m`, `250ms`, `1.5s`, `7d` and the bare `0`.
///
/// Returns `None` for anything else.
pub fn parse_duration(text: &str) -> Option<Duration> {
    let text = text.trim();
    if text == "0" {
        return Some(Duration::ZERO);
    }
    if !DURATION.is_match(text) {
        return None;
    }

    let nanos: f64 = DURATION_TERM
        .captures_iter(text)
        .map(|term| {
            let amount: f64 = term[1].parse().unwrap_or_default();
            amount * unit_nanos(&term[2])
        })
        .sum();

    Some(Duration::from_nanos(nanos.round() as u64))
}

fn unit_nanos(unit: &str) -> f64 {
    match unit {
        "ns" => 1.0,
        "us" | "µs" => 1e3,
        "ms" => 1e6,
        "s" => 1e9,
        "m" => 60.0 * 1e9,
        "h" => 3600.0 * 1e9,
        "d" => 86_400.0 * 1e9,
        _ => 7.0 * 86_400.0 * 1e9,
    }
}

fn with_fraction(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let fraction = value % unit;

    if fraction == 0 {
        return whole.to_string();
    }

    let width = unit.ilog10() as usize;
    let digits = format!("{fraction:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
