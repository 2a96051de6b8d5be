use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, patch, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/activities",
            get(handlers::list_activities).post(handlers::create_activity),
        )
        .route(
            "/api/activities/:id",
            get(handlers::get_activity)
                .patch(handlers::update_activity)
                .delete(handlers::delete_activity),
        )
        .route("/api/activities/:id/form", get(handlers::activity_form))
        .route("/api/schedule", get(handlers::schedule_for_day))
        .route("/api/schedule/today", get(handlers::schedule_today))
        .route("/api/schedule/week", get(handlers::schedule_week))
        .route(
            "/api/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route("/api/tasks/populate", post(handlers::populate))
        .route("/api/tasks/:id/complete", patch(handlers::complete_task))
        .route(
            "/api/tasks/:id",
            patch(handlers::update_task).delete(handlers::delete_task),
        )
        .route("/api/tasks/:id/form", get(handlers::task_form))
        .with_state(state)
}
