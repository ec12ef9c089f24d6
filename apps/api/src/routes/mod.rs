pub mod admin;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::intake::AppVariant;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(handlers::handle_form))
        .route("/generate", post(handlers::handle_generate));

    // Only the intake deployment exposes its submissions.
    let router = match state.config.variant {
        AppVariant::Intake => {
            router.route("/admin/download-csv", get(admin::handle_download_csv))
        }
        AppVariant::Scholarship => router,
    };

    router.with_state(state)
}
