use crate::query::Scheduled;
use crate::schedule::DecodedSchedule;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub program_id: Option<u64>,
    #[serde(default)]
    pub schedule: Option<String>,
}

impl Scheduled for Activity {
    fn schedule(&self) -> Option<&str> {
        self.schedule.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub activity_id: Option<u64>,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

impl Scheduled for Task {
    fn schedule(&self) -> Option<&str> {
        self.schedule.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub next_id: u64,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl AppData {
    pub fn allocate_id(&mut self) -> u64 {
        self.next_id = self.next_id.saturating_add(1);
        self.next_id
    }

    pub fn activity(&self, id: u64) -> Option<&Activity> {
        self.activities.iter().find(|activity| activity.id == id)
    }

    pub fn activity_mut(&mut self, id: u64) -> Option<&mut Activity> {
        self.activities.iter_mut().find(|activity| activity.id == id)
    }

    pub fn task(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn task_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateActivityRequest {
    pub title: String,
    pub description: Option<String>,
    pub program_id: Option<u64>,
    pub days: Option<Vec<u8>>,
    pub time: Option<String>,
    /// Hand-authored schedule string, stored as given.
    pub schedule: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateActivityRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub program_id: Option<u64>,
    pub days: Option<Vec<u8>>,
    pub time: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ActivityView {
    #[serde(flatten)]
    pub activity: Activity,
    pub time_label: Option<String>,
    pub schedule_label: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WeekDayView {
    pub day: u8,
    pub name: &'static str,
    pub short_name: &'static str,
    pub activities: Vec<ActivityView>,
}

#[derive(Debug, Deserialize)]
pub struct ProgramQuery {
    pub program: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub day: Option<u8>,
    pub program: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct TasksQuery {
    pub day: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct RecurrenceRequest {
    pub days: Vec<u8>,
    pub time: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub recurrence: Option<RecurrenceRequest>,
}

#[derive(Debug, Serialize)]
pub struct CreateTaskResponse {
    pub activity_id: Option<u64>,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub recurrence: Option<RecurrenceRequest>,
}

/// Edit-form state for a task, with the recurrence decoded from the linked
/// activity.
#[derive(Debug, Serialize)]
pub struct TaskFormView {
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub is_recurring: bool,
    pub recurrence: DecodedSchedule,
}

#[derive(Debug, Deserialize)]
pub struct PopulateRequest {
    pub day: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PopulateResponse {
    pub day: NaiveDate,
    pub created: usize,
}
