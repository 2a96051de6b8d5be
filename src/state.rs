use crate::errors::AppError;
use crate::models::AppData;
use crate::storage::persist_data;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Shared store of activities and tasks, persisted as one JSON document.
#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
        }
    }

    /// Writes `next` to disk and only then replaces `current` with it, so a
    /// failed write leaves the in-memory store untouched.
    pub async fn commit(&self, current: &mut AppData, next: AppData) -> Result<(), AppError> {
        persist_data(&self.data_path, &next).await?;
        *current = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_write_keeps_current_data() {
        let state = AppState::new(std::env::temp_dir(), AppData::default());
        let mut current = state.data.lock().await;
        let mut next = current.clone();
        next.allocate_id();

        assert!(state.commit(&mut current, next).await.is_err());
        assert_eq!(current.next_id, 0);
    }

    #[tokio::test]
    async fn successful_write_replaces_data() {
        let mut path = std::env::temp_dir();
        path.push(format!("habit_schedule_commit_{}.json", std::process::id()));
        let state = AppState::new(path.clone(), AppData::default());
        let mut current = state.data.lock().await;
        let mut next = current.clone();
        next.allocate_id();

        state.commit(&mut current, next).await.unwrap();
        assert_eq!(current.next_id, 1);
        let _ = tokio::fs::remove_file(&path).await;
    }
}
