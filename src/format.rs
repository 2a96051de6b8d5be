//! Human-readable rendering of schedule strings for read-only views.

use crate::schedule::{parse_lenient, parse_time_field, weekday_index, DayField, TimeField};
use chrono::Weekday;

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const SHORT_DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const TIME_FALLBACK: &str = "Scheduled";
const SCHEDULE_FALLBACK: &str = "Scheduled activity";

pub fn day_name(day: Weekday) -> &'static str {
    DAY_NAMES[usize::from(weekday_index(day))]
}

pub fn short_day_name(day: Weekday) -> &'static str {
    SHORT_DAY_NAMES[usize::from(weekday_index(day))]
}

/// Renders the time portion of a schedule, e.g. `9 AM` or `9:05 AM`.
///
/// Only the minute and hour fields are read.
pub fn format_time(schedule: &str) -> String {
    let mut fields = schedule.split_whitespace();
    let (Some(minute), Some(hour)) = (fields.next(), fields.next()) else {
        return TIME_FALLBACK.to_string();
    };

    match (parse_time_field(minute, 59), parse_time_field(hour, 23)) {
        (Ok(TimeField::Any), Ok(TimeField::Any)) => "Multiple times".to_string(),
        (Ok(_), Ok(TimeField::Any)) => "Every hour".to_string(),
        (Ok(minute), Ok(TimeField::At(hour))) => time_phrase(minute, hour),
        _ => TIME_FALLBACK.to_string(),
    }
}

/// Renders a full schedule, e.g. `9 AM, every Monday and Wednesday`.
///
/// Fields past the fifth are ignored. Anything that does not parse renders
/// as a fixed fallback.
pub fn format_schedule(schedule: &str) -> String {
    let Ok(parsed) = parse_lenient(schedule) else {
        return SCHEDULE_FALLBACK.to_string();
    };

    let time = match (parsed.minute, parsed.hour) {
        (TimeField::Any, TimeField::Any) => "Throughout the day".to_string(),
        (TimeField::At(minute), TimeField::Any) => format!("Every hour at {minute} minutes"),
        (minute, TimeField::At(hour)) => time_phrase(minute, hour),
    };

    match day_phrase(&parsed.days) {
        Some(days) => format!("{time}, {days}"),
        None => SCHEDULE_FALLBACK.to_string(),
    }
}

fn time_phrase(minute: TimeField, hour: u8) -> String {
    match minute {
        TimeField::At(minute) => clock_label(hour, minute),
        TimeField::Any => format!("Every minute from {}", clock_label(hour, 0)),
    }
}

fn clock_label(hour: u8, minute: u8) -> String {
    let period = if hour >= 12 { "PM" } else { "AM" };
    let display_hour = match hour % 12 {
        0 => 12,
        other => other,
    };

    if minute == 0 {
        format!("{display_hour} {period}")
    } else {
        format!("{display_hour}:{minute:02} {period}")
    }
}

fn day_phrase(days: &DayField) -> Option<String> {
    let DayField::On(selection) = days else {
        return Some("every day".to_string());
    };

    let names: Vec<&str> = selection.selected().map(day_name).collect();
    match names.as_slice() {
        [] => None,
        [only] => Some(format!("every {only}")),
        [first, second] => Some(format!("every {first} and {second}")),
        [rest @ .., last] => Some(format!("every {}, and {last}", rest.join(", "))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_omits_zero_minutes() {
        assert_eq!(format_time("0 9 * * *"), "9 AM");
        assert_eq!(format_time("5 9 * * *"), "9:05 AM");
        assert_eq!(format_time("45 17 * * 1"), "5:45 PM");
    }

    #[test]
    fn time_maps_midnight_and_noon_to_twelve() {
        assert_eq!(format_time("0 0 * * *"), "12 AM");
        assert_eq!(format_time("0 12 * * *"), "12 PM");
        assert_eq!(format_time("0 13 * * *"), "1 PM");
        assert_eq!(format_time("30 23 * * *"), "11:30 PM");
    }

    #[test]
    fn time_handles_wildcards_and_garbage() {
        assert_eq!(format_time("* * * * *"), "Multiple times");
        assert_eq!(format_time("15 * * * *"), "Every hour");
        assert_eq!(format_time("garbage"), "Scheduled");
        assert_eq!(format_time("x 9 * * *"), "Scheduled");
        assert_eq!(format_time(""), "Scheduled");
    }

    #[test]
    fn schedule_phrases_day_lists() {
        assert_eq!(format_schedule("0 9 * * 1"), "9 AM, every Monday");
        assert_eq!(format_schedule("0 9 * * 1,3"), "9 AM, every Monday and Wednesday");
        assert_eq!(
            format_schedule("0 9 * * 0,1,2"),
            "9 AM, every Sunday, Monday, and Tuesday"
        );
        assert_eq!(format_schedule("0 9 * * *"), "9 AM, every day");
    }

    #[test]
    fn schedule_lists_days_in_week_order() {
        assert_eq!(
            format_schedule("30 18 * * 5,1,3"),
            "6:30 PM, every Monday, Wednesday, and Friday"
        );
        assert_eq!(
            format_schedule("0 7 * * 0,1,2,3,4,5,6"),
            "7 AM, every Sunday, Monday, Tuesday, Wednesday, Thursday, Friday, and Saturday"
        );
    }

    #[test]
    fn schedule_ignores_fields_past_day_of_week() {
        assert_eq!(format_schedule("0 9 * * 1 2026"), "9 AM, every Monday");
        assert_eq!(
            format_schedule("15 18 * * 2,4 extra tokens"),
            "6:15 PM, every Tuesday and Thursday"
        );
    }

    #[test]
    fn schedule_handles_wildcard_times() {
        assert_eq!(format_schedule("* * * * *"), "Throughout the day, every day");
        assert_eq!(
            format_schedule("15 * * * 6"),
            "Every hour at 15 minutes, every Saturday"
        );
    }

    #[test]
    fn schedule_falls_back_on_malformed_input() {
        for bad in ["garbage", "0 9 * *", "0 9 * * 9", "0 25 * * 1", ""] {
            assert_eq!(format_schedule(bad), "Scheduled activity", "{bad}");
        }
    }

    #[test]
    fn day_names_follow_sunday_first_table() {
        assert_eq!(day_name(Weekday::Sun), "Sunday");
        assert_eq!(short_day_name(Weekday::Sat), "Sat");
    }
}
