use crate::errors::{AppError, ScheduleError};
use crate::format::{day_name, format_schedule, format_time, short_day_name};
use crate::models::{
    Activity, ActivityView, AppData, CreateActivityRequest, CreateTaskRequest,
    CreateTaskResponse, PopulateRequest, PopulateResponse, ProgramQuery, ScheduleQuery, Task,
    TaskFormView, TasksQuery, UpdateActivityRequest, UpdateTaskRequest, WeekDayView,
};
use crate::query::{activities_for_day, week_agenda};
use crate::schedule::{
    decode, encode, weekday_from_index, weekday_index, DaySelection, DecodedSchedule, TimeOfDay,
    WEEK,
};
use crate::state::AppState;
use crate::tasks::{
    populate_activity, populate_tasks, reschedule_activity, tasks_for_day, toggle_complete,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Datelike, Local, Weekday};
use tracing::info;

pub async fn list_activities(
    State(state): State<AppState>,
    Query(query): Query<ProgramQuery>,
) -> Json<Vec<ActivityView>> {
    let data = state.data.lock().await;
    let views = data
        .activities
        .iter()
        .filter(|activity| in_program(activity, query.program))
        .map(activity_view)
        .collect();
    Json(views)
}

pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ActivityView>, AppError> {
    let data = state.data.lock().await;
    let activity = data.activity(id).ok_or_else(|| activity_not_found(id))?;
    Ok(Json(activity_view(activity)))
}

pub async fn activity_form(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DecodedSchedule>, AppError> {
    let data = state.data.lock().await;
    let activity = data.activity(id).ok_or_else(|| activity_not_found(id))?;
    Ok(Json(decode(activity.schedule.as_deref())))
}

pub async fn create_activity(
    State(state): State<AppState>,
    Json(payload): Json<CreateActivityRequest>,
) -> Result<(StatusCode, Json<ActivityView>), AppError> {
    let title = required_title(&payload.title)?;
    let schedule = authored_schedule(
        payload.days.as_deref(),
        payload.time.as_deref(),
        payload.schedule.as_deref(),
    )?;

    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let activity = Activity {
        id: next.allocate_id(),
        title,
        description: optional_text(payload.description),
        program_id: payload.program_id,
        schedule,
    };
    next.activities.push(activity.clone());
    state.commit(&mut data, next).await?;

    info!(id = activity.id, schedule = ?activity.schedule, "created activity");
    Ok((StatusCode::CREATED, Json(activity_view(&activity))))
}

pub async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<UpdateActivityRequest>,
) -> Result<Json<ActivityView>, AppError> {
    let title = payload.title.as_deref().map(required_title).transpose()?;
    let schedule = match (payload.days.as_deref(), payload.time.as_deref()) {
        (Some(days), Some(time)) => Some(encode_form(days, time)?),
        (None, None) => None,
        _ => return Err(AppError::bad_request("days and time must be provided together")),
    };

    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let activity = next.activity_mut(id).ok_or_else(|| activity_not_found(id))?;
    if let Some(title) = title {
        activity.title = title;
    }
    if let Some(description) = payload.description {
        activity.description = optional_text(Some(description));
    }
    if let Some(program_id) = payload.program_id {
        activity.program_id = Some(program_id);
    }
    let rescheduled = match schedule {
        Some(schedule) => reschedule_activity(&mut next, id, schedule).unwrap_or(0),
        None => 0,
    };
    let updated = next
        .activity(id)
        .cloned()
        .ok_or_else(|| activity_not_found(id))?;
    state.commit(&mut data, next).await?;

    info!(id, schedule = ?updated.schedule, rescheduled, "updated activity");
    Ok(Json(activity_view(&updated)))
}

pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let index = next
        .activities
        .iter()
        .position(|activity| activity.id == id)
        .ok_or_else(|| activity_not_found(id))?;
    next.activities.remove(index);
    state.commit(&mut data, next).await?;

    info!(id, "deleted activity");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn schedule_for_day(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Vec<ActivityView>>, AppError> {
    let index = query
        .day
        .ok_or_else(|| AppError::bad_request("day is required"))?;
    let day = weekday_from_index(index).ok_or(ScheduleError::InvalidDay(index))?;

    let data = state.data.lock().await;
    Ok(Json(day_views(&data, day, query.program)))
}

pub async fn schedule_today(
    State(state): State<AppState>,
    Query(query): Query<ProgramQuery>,
) -> Json<Vec<ActivityView>> {
    let day = Local::now().weekday();
    let data = state.data.lock().await;
    Json(day_views(&data, day, query.program))
}

pub async fn schedule_week(
    State(state): State<AppState>,
    Query(query): Query<ProgramQuery>,
) -> Json<Vec<WeekDayView>> {
    let data = state.data.lock().await;
    let scoped = program_activities(&data, query.program);
    let week = WEEK
        .into_iter()
        .zip(week_agenda(&scoped))
        .map(|(day, activities)| WeekDayView {
            day: weekday_index(day),
            name: day_name(day),
            short_name: short_day_name(day),
            activities: activities.iter().map(activity_view).collect(),
        })
        .collect();
    Json(week)
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TasksQuery>,
) -> Json<Vec<Task>> {
    let data = state.data.lock().await;
    Json(tasks_for_day(&data, query.day))
}

/// Creates a one-off task on the requested date. With a recurrence it
/// creates the backing activity instead and populates the date from it, so
/// no task appears when the date's weekday is not one of the chosen days.
pub async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<CreateTaskResponse>), AppError> {
    let title = required_title(&payload.title)?;
    let description = optional_text(payload.description);
    let schedule = payload
        .recurrence
        .as_ref()
        .map(|recurrence| encode_form(&recurrence.days, &recurrence.time))
        .transpose()?;

    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let response = match schedule {
        Some(schedule) => {
            let activity_id = next.allocate_id();
            next.activities.push(Activity {
                id: activity_id,
                title,
                description,
                program_id: None,
                schedule: Some(schedule),
            });
            let tasks = populate_activity(&mut next, activity_id, payload.due_date)
                .into_iter()
                .collect();
            CreateTaskResponse {
                activity_id: Some(activity_id),
                tasks,
            }
        }
        None => {
            let task = Task {
                id: next.allocate_id(),
                title,
                description,
                due_date: payload.due_date,
                activity_id: None,
                schedule: None,
                is_completed: false,
            };
            next.tasks.push(task.clone());
            CreateTaskResponse {
                activity_id: None,
                tasks: vec![task],
            }
        }
    };
    state.commit(&mut data, next).await?;

    info!(
        activity_id = ?response.activity_id,
        tasks = response.tasks.len(),
        due = %payload.due_date,
        "created task"
    );
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn task_form(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TaskFormView>, AppError> {
    let data = state.data.lock().await;
    let task = data.task(id).ok_or_else(|| task_not_found(id))?;
    let activity = task.activity_id.and_then(|activity_id| data.activity(activity_id));
    let schedule = activity
        .and_then(|activity| activity.schedule.as_deref())
        .or(task.schedule.as_deref());

    Ok(Json(TaskFormView {
        title: task.title.clone(),
        description: task.description.clone(),
        due_date: task.due_date,
        is_recurring: activity.is_some(),
        recurrence: decode(schedule),
    }))
}

/// Edits a task. A new recurrence is written to the linked activity and
/// carried onto its current and future tasks; a task without an activity
/// gets one.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, AppError> {
    let title = payload.title.as_deref().map(required_title).transpose()?;
    let schedule = payload
        .recurrence
        .as_ref()
        .map(|recurrence| encode_form(&recurrence.days, &recurrence.time))
        .transpose()?;

    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let task = next.task_mut(id).ok_or_else(|| task_not_found(id))?;
    if let Some(title) = title {
        task.title = title;
    }
    if let Some(description) = payload.description {
        task.description = optional_text(Some(description));
    }
    if let Some(due_date) = payload.due_date {
        task.due_date = due_date;
    }
    let linked = task.activity_id;

    if let Some(schedule) = schedule {
        let rescheduled = linked
            .and_then(|activity_id| reschedule_activity(&mut next, activity_id, schedule.clone()));
        if rescheduled.is_none() {
            let activity_id = next.allocate_id();
            let task = next.task_mut(id).ok_or_else(|| task_not_found(id))?;
            task.activity_id = Some(activity_id);
            task.schedule = Some(schedule.clone());
            let activity = Activity {
                id: activity_id,
                title: task.title.clone(),
                description: task.description.clone(),
                program_id: None,
                schedule: Some(schedule),
            };
            next.activities.push(activity);
        }
    }

    let updated = next.task(id).cloned().ok_or_else(|| task_not_found(id))?;
    state.commit(&mut data, next).await?;

    info!(id, activity_id = ?updated.activity_id, "updated task");
    Ok(Json(updated))
}

pub async fn populate(
    State(state): State<AppState>,
    Json(payload): Json<PopulateRequest>,
) -> Result<Json<PopulateResponse>, AppError> {
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let created = populate_tasks(&mut next, payload.day);
    if created > 0 {
        state.commit(&mut data, next).await?;
        info!(day = %payload.day, created, "populated tasks");
    }

    Ok(Json(PopulateResponse {
        day: payload.day,
        created,
    }))
}

pub async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Task>, AppError> {
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let task = next.task_mut(id).ok_or_else(|| task_not_found(id))?;
    toggle_complete(task)?;
    let updated = task.clone();
    state.commit(&mut data, next).await?;

    Ok(Json(updated))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let index = next
        .tasks
        .iter()
        .position(|task| task.id == id)
        .ok_or_else(|| task_not_found(id))?;
    next.tasks.remove(index);
    state.commit(&mut data, next).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn day_views(data: &AppData, day: Weekday, program: Option<u64>) -> Vec<ActivityView> {
    let scoped = program_activities(data, program);
    activities_for_day(&scoped, day)
        .iter()
        .map(activity_view)
        .collect()
}

fn program_activities(data: &AppData, program: Option<u64>) -> Vec<Activity> {
    data.activities
        .iter()
        .filter(|activity| in_program(activity, program))
        .cloned()
        .collect()
}

fn in_program(activity: &Activity, program: Option<u64>) -> bool {
    program.is_none_or(|id| activity.program_id == Some(id))
}

fn activity_view(activity: &Activity) -> ActivityView {
    let schedule = activity.schedule.as_deref();
    ActivityView {
        time_label: schedule.map(format_time),
        schedule_label: schedule.map(format_schedule),
        activity: activity.clone(),
    }
}

/// Resolves the schedule for a new activity from either the day/time form
/// fields or a hand-authored schedule string.
fn authored_schedule(
    days: Option<&[u8]>,
    time: Option<&str>,
    raw: Option<&str>,
) -> Result<Option<String>, AppError> {
    match (days, time, raw) {
        (None, None, None) => Ok(None),
        (Some(days), Some(time), None) => Ok(Some(encode_form(days, time)?)),
        (None, None, Some(raw)) => Ok(optional_text(Some(raw.to_string()))),
        (_, _, Some(_)) => Err(AppError::bad_request(
            "provide either days and time or a schedule, not both",
        )),
        _ => Err(AppError::bad_request("days and time must be provided together")),
    }
}

fn encode_form(days: &[u8], time: &str) -> Result<String, ScheduleError> {
    let selection = DaySelection::from_indices(days)?;
    if selection.is_empty() {
        return Err(ScheduleError::NoDaysSelected);
    }
    let time: TimeOfDay = time.parse()?;
    encode(&selection, time)
}

fn required_title(title: &str) -> Result<String, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::bad_request("title cannot be empty"));
    }
    Ok(title.to_string())
}

fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn activity_not_found(id: u64) -> AppError {
    AppError::not_found(format!("activity {id} not found"))
}

fn task_not_found(id: u64) -> AppError {
    AppError::not_found(format!("task {id} not found"))
}
