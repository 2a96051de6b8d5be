pub mod app;
pub mod errors;
pub mod format;
pub mod handlers;
pub mod models;
pub mod query;
pub mod schedule;
pub mod state;
pub mod storage;
pub mod tasks;

pub use app::router;
pub use errors::{AppError, ScheduleError};
pub use format::{format_schedule, format_time};
pub use query::{activities_for_day, week_agenda, Scheduled};
pub use schedule::{decode, encode, DaySelection, DecodedSchedule, TimeOfDay};
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
