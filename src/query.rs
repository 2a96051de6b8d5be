use crate::schedule::{parse_lenient, WEEK};
use chrono::Weekday;
use tracing::debug;

/// A record carrying an optional stored schedule string.
pub trait Scheduled {
    fn schedule(&self) -> Option<&str>;
}

/// Returns the records active on `day`, ordered by time of day.
///
/// Records without a schedule, or whose schedule does not parse, are left
/// out. Records sharing a time keep their input order.
pub fn activities_for_day<A>(activities: &[A], day: Weekday) -> Vec<A>
where
    A: Scheduled + Clone,
{
    let mut matches: Vec<((u8, u8), &A)> = activities
        .iter()
        .filter_map(|activity| {
            let schedule = activity
                .schedule()
                .map(str::trim)
                .filter(|value| !value.is_empty())?;
            match parse_lenient(schedule) {
                Ok(parsed) if parsed.applies_on(day) => Some((parsed.sort_key(), activity)),
                Ok(_) => None,
                Err(err) => {
                    debug!(%err, schedule, "skipping unparseable schedule");
                    None
                }
            }
        })
        .collect();

    matches.sort_by_key(|(key, _)| *key);
    matches.into_iter().map(|(_, activity)| activity.clone()).collect()
}

/// One ordered agenda per weekday, Sunday first.
pub fn week_agenda<A>(activities: &[A]) -> [Vec<A>; 7]
where
    A: Scheduled + Clone,
{
    WEEK.map(|day| activities_for_day(activities, day))
}
