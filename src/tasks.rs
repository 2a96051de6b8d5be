use crate::errors::ScheduleError;
use crate::models::{Activity, AppData, Task};
use crate::query::activities_for_day;
use chrono::{Datelike, Local, NaiveDate};
use std::slice;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn populate_tasks(data: &mut AppData, date: NaiveDate) -> usize {
    populate_tasks_at(today(), data, date)
}

/// Creates the tasks for `date` from the activities scheduled on its weekday.
///
/// Dates before `today` are left alone. An activity never gets a second
/// task for the same date.
pub fn populate_tasks_at(today: NaiveDate, data: &mut AppData, date: NaiveDate) -> usize {
    if date < today {
        return 0;
    }

    let mut created = 0;
    for activity in activities_for_day(&data.activities, date.weekday()) {
        if push_task(data, activity, date).is_some() {
            created += 1;
        }
    }
    created
}

pub fn populate_activity(data: &mut AppData, activity_id: u64, date: NaiveDate) -> Option<Task> {
    populate_activity_at(today(), data, activity_id, date)
}

/// Creates the task for a single activity on `date`, only when the activity
/// is scheduled on that weekday.
pub fn populate_activity_at(
    today: NaiveDate,
    data: &mut AppData,
    activity_id: u64,
    date: NaiveDate,
) -> Option<Task> {
    if date < today {
        return None;
    }

    let activity = data.activity(activity_id)?;
    let activity = activities_for_day(slice::from_ref(activity), date.weekday()).pop()?;
    push_task(data, activity, date)
}

pub fn reschedule_activity(
    data: &mut AppData,
    activity_id: u64,
    schedule: String,
) -> Option<usize> {
    reschedule_activity_at(today(), data, activity_id, schedule)
}

/// Replaces an activity's schedule and carries it onto the activity's tasks
/// due on or after `today`. Earlier tasks keep the schedule they were made
/// with. Returns how many tasks changed, or `None` for an unknown activity.
pub fn reschedule_activity_at(
    today: NaiveDate,
    data: &mut AppData,
    activity_id: u64,
    schedule: String,
) -> Option<usize> {
    data.activity_mut(activity_id)?.schedule = Some(schedule.clone());

    let mut updated = 0;
    for task in data
        .tasks
        .iter_mut()
        .filter(|task| task.activity_id == Some(activity_id) && task.due_date >= today)
    {
        task.schedule = Some(schedule.clone());
        updated += 1;
    }
    Some(updated)
}

fn push_task(data: &mut AppData, activity: Activity, date: NaiveDate) -> Option<Task> {
    let exists = data
        .tasks
        .iter()
        .any(|task| task.activity_id == Some(activity.id) && task.due_date == date);
    if exists {
        return None;
    }

    let task = Task {
        id: data.allocate_id(),
        title: activity.title,
        description: activity.description,
        due_date: date,
        activity_id: Some(activity.id),
        schedule: activity.schedule,
        is_completed: false,
    };
    data.tasks.push(task.clone());
    Some(task)
}

/// Tasks due on `date`: scheduled ones by time of day, then the rest in
/// creation order.
pub fn tasks_for_day(data: &AppData, date: NaiveDate) -> Vec<Task> {
    let due: Vec<Task> = data
        .tasks
        .iter()
        .filter(|task| task.due_date == date)
        .cloned()
        .collect();

    let mut ordered = activities_for_day(&due, date.weekday());
    let placed: Vec<u64> = ordered.iter().map(|task| task.id).collect();
    ordered.extend(due.into_iter().filter(|task| !placed.contains(&task.id)));
    ordered
}

pub fn toggle_complete(task: &mut Task) -> Result<(), ScheduleError> {
    toggle_complete_at(today(), task)
}

pub fn toggle_complete_at(today: NaiveDate, task: &mut Task) -> Result<(), ScheduleError> {
    if task.due_date > today {
        return Err(ScheduleError::FutureTask);
    }
    task.is_completed = !task.is_completed;
    Ok(())
}
