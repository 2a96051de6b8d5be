//! Conversion between day/time selections and five-field schedule strings.
//!
//! A schedule string is `minute hour dayOfMonth month dayOfWeek`. Only the
//! minute, hour and day-of-week fields carry meaning here; day-of-month and
//! month are written as `*` and never inspected.

use crate::errors::ScheduleError;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Day-of-week numbering used on disk: index 0 is Sunday, 6 is Saturday.
pub const WEEK: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

const FIELD_COUNT: usize = 5;
const WILDCARD: &str = "*";

pub fn weekday_index(day: Weekday) -> u8 {
    day.num_days_from_sunday() as u8
}

pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    WEEK.get(usize::from(index)).copied()
}

/// Which weekdays a recurring item applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DaySelection([bool; 7]);

impl DaySelection {
    pub const NONE: Self = Self([false; 7]);
    pub const ALL: Self = Self([true; 7]);

    pub fn from_days(days: impl IntoIterator<Item = Weekday>) -> Self {
        let mut selection = Self::NONE;
        for day in days {
            selection.set(day, true);
        }
        selection
    }

    /// Builds a selection from raw day indices as submitted by a form.
    pub fn from_indices(indices: &[u8]) -> Result<Self, ScheduleError> {
        let mut selection = Self::NONE;
        for &index in indices {
            let day = weekday_from_index(index).ok_or(ScheduleError::InvalidDay(index))?;
            selection.set(day, true);
        }
        Ok(selection)
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.0[usize::from(weekday_index(day))]
    }

    pub fn set(&mut self, day: Weekday, selected: bool) {
        self.0[usize::from(weekday_index(day))] = selected;
    }

    pub fn toggle(&mut self, day: Weekday) {
        let slot = &mut self.0[usize::from(weekday_index(day))];
        *slot = !*slot;
    }

    pub fn is_empty(&self) -> bool {
        !self.0.contains(&true)
    }

    /// Selected days in ascending order, Sunday first.
    pub fn selected(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEK.into_iter().filter(move |day| self.contains(*day))
    }

    pub fn as_array(&self) -> [bool; 7] {
        self.0
    }
}

impl From<[bool; 7]> for DaySelection {
    fn from(days: [bool; 7]) -> Self {
        Self(days)
    }
}

/// A 24-hour wall clock time, exchanged with forms as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ScheduleError> {
        if hour > 23 || minute > 59 {
            return Err(ScheduleError::InvalidTime(format!("{hour}:{minute}")));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ScheduleError::InvalidTime(value.to_string());
        let (hour, minute) = value.trim().split_once(':').ok_or_else(invalid)?;
        let hour = hour.parse::<u8>().map_err(|_| invalid())?;
        let minute = minute.parse::<u8>().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

/// Form pre-fill state recovered from a stored schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecodedSchedule {
    pub days: DaySelection,
    pub time: Option<TimeOfDay>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Any,
    At(u8),
}

impl TimeField {
    fn value_or_zero(self) -> u8 {
        match self {
            TimeField::Any => 0,
            TimeField::At(value) => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayField {
    Every,
    On(DaySelection),
}

impl DayField {
    pub fn selection(&self) -> DaySelection {
        match self {
            DayField::Every => DaySelection::ALL,
            DayField::On(days) => *days,
        }
    }
}

/// Strictly parsed view of a schedule string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedSchedule {
    pub minute: TimeField,
    pub hour: TimeField,
    pub days: DayField,
}

impl ParsedSchedule {
    pub fn applies_on(&self, day: Weekday) -> bool {
        match self.days {
            DayField::Every => true,
            DayField::On(days) => days.contains(day),
        }
    }

    /// Ordering key within a day. Wildcard fields sort as zero.
    pub fn sort_key(&self) -> (u8, u8) {
        (self.hour.value_or_zero(), self.minute.value_or_zero())
    }

    pub fn time(&self) -> Option<TimeOfDay> {
        match (self.hour, self.minute) {
            (TimeField::At(hour), TimeField::At(minute)) => TimeOfDay::new(hour, minute).ok(),
            _ => None,
        }
    }
}

/// Encodes a day selection and time into a schedule string.
///
/// Days are written in ascending order. A full week is written as the
/// explicit list `0,1,2,3,4,5,6`, never as `*`.
pub fn encode(days: &DaySelection, time: TimeOfDay) -> Result<String, ScheduleError> {
    if days.is_empty() {
        return Err(ScheduleError::NoDaysSelected);
    }

    let list = days
        .selected()
        .map(|day| weekday_index(day).to_string())
        .collect::<Vec<_>>()
        .join(",");

    Ok(format!("{} {} * * {}", time.minute, time.hour, list))
}

/// Decodes a stored schedule for form pre-fill.
///
/// Missing, empty or malformed input yields an empty selection with no time.
pub fn decode(schedule: Option<&str>) -> DecodedSchedule {
    let Some(schedule) = schedule.map(str::trim).filter(|value| !value.is_empty()) else {
        return DecodedSchedule::default();
    };

    match parse(schedule) {
        Ok(parsed) => DecodedSchedule {
            days: parsed.days.selection(),
            time: parsed.time(),
        },
        Err(_) => DecodedSchedule::default(),
    }
}

/// Parses a schedule with exactly five fields. Used for form pre-fill, where
/// anything else would not survive a re-encode.
pub fn parse(schedule: &str) -> Result<ParsedSchedule, ScheduleError> {
    let count = schedule.split_whitespace().count();
    if count != FIELD_COUNT {
        return Err(ScheduleError::Malformed(format!(
            "expected {FIELD_COUNT} fields, found {count}"
        )));
    }
    parse_lenient(schedule)
}

/// Parses a schedule with at least five fields, reading only minute, hour
/// and day of week. Trailing fields are ignored.
pub fn parse_lenient(schedule: &str) -> Result<ParsedSchedule, ScheduleError> {
    let fields: Vec<&str> = schedule.split_whitespace().collect();
    if fields.len() < FIELD_COUNT {
        return Err(ScheduleError::Malformed(format!(
            "expected at least {FIELD_COUNT} fields, found {}",
            fields.len()
        )));
    }

    Ok(ParsedSchedule {
        minute: parse_time_field(fields[0], 59)?,
        hour: parse_time_field(fields[1], 23)?,
        days: parse_day_field(fields[4])?,
    })
}

pub(crate) fn parse_time_field(token: &str, max: u8) -> Result<TimeField, ScheduleError> {
    if token == WILDCARD {
        return Ok(TimeField::Any);
    }
    match token.parse::<u8>() {
        Ok(value) if value <= max => Ok(TimeField::At(value)),
        _ => Err(ScheduleError::Malformed(format!("bad time field '{token}'"))),
    }
}

fn parse_day_field(token: &str) -> Result<DayField, ScheduleError> {
    if token == WILDCARD {
        return Ok(DayField::Every);
    }

    let mut days = DaySelection::NONE;
    for part in token.split(',') {
        let day = part
            .parse::<u8>()
            .ok()
            .and_then(weekday_from_index)
            .ok_or_else(|| ScheduleError::Malformed(format!("bad day '{part}'")))?;
        days.set(day, true);
    }
    Ok(DayField::On(days))
}
