//! Human-readable elapsed time for build summaries.

use chrono::{DateTime, TimeDelta, Utc};

/// Format a duration as `"1 hour, 1 minute and 1 second"`.
///
/// Sub-second remainders are dropped once there is at least one whole second;
/// shorter durations render as `"<n> milliseconds"`. Negative durations count
/// as zero.
pub fn format_duration(duration: TimeDelta) -> String {
    let total_millis = duration.num_milliseconds().max(0);
    let total_seconds = total_millis / 1000;

    if total_seconds == 0 {
        return format!("{} milliseconds", total_millis);
    }

    let units = [
        (total_seconds / 3600, "hour"),
        ((total_seconds % 3600) / 60, "minute"),
        (total_seconds % 60, "second"),
    ];

    let parts: Vec<String> = units
        .iter()
        .filter(|(amount, _)| *amount > 0)
        .map(|(amount, unit)| {
            if *amount == 1 {
                format!("{} {}", amount, unit)
            } else {
                format!("{} {}s", amount, unit)
            }
        })
        .collect();

    match parts.split_last() {
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
        None => String::new(),
    }
}

/// Format the time elapsed between `start` and `now`.
pub fn format_duration_since(start: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format_duration(now - start)
}

/// Format the time elapsed since `start`.
pub fn format_duration_till(start: DateTime<Utc>) -> String {
    format_duration_since(start, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_second_uses_milliseconds() {
        assert_eq!(format_duration(TimeDelta::milliseconds(200)), "200 milliseconds");
        assert_eq!(format_duration(TimeDelta::zero()), "0 milliseconds");
    }

    #[test]
    fn hours_minutes_and_seconds() {
        let duration = TimeDelta::hours(1) + TimeDelta::minutes(1) + TimeDelta::seconds(1);
        assert_eq!(format_duration(duration), "1 hour, 1 minute and 1 second");
    }

    #[test]
    fn plural_units_and_skipped_zeroes() {
        let duration = TimeDelta::hours(2) + TimeDelta::seconds(5);
        assert_eq!(format_duration(duration), "2 hours and 5 seconds");
    }

    #[test]
    fn single_unit() {
        assert_eq!(format_duration(TimeDelta::minutes(3)), "3 minutes");
        assert_eq!(
            format_duration(TimeDelta::seconds(1) + TimeDelta::milliseconds(999)),
            "1 second"
        );
    }

    #[test]
    fn negative_duration_is_zero() {
        assert_eq!(format_duration(TimeDelta::seconds(-5)), "0 milliseconds");
    }

    #[test]
    fn since_uses_both_instants() {
        let start = DateTime::from_timestamp(1_445_385_600, 0).unwrap();
        let now = start + TimeDelta::seconds(3661);
        assert_eq!(format_duration_since(start, now), "1 hour, 1 minute and 1 second");
    }

    #[test]
    fn till_now_reports_milliseconds_for_recent_start() {
        let start = Utc::now() - TimeDelta::milliseconds(200);
        assert!(format_duration_till(start).contains("milliseconds"));
    }
}
