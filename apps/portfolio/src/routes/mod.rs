pub mod health;
pub mod page;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::contact::handlers as contact;
use crate::content::handlers as content;
use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Page
        .route("/", get(page::handle_index))
        .route("/theme/toggle", post(page::handle_toggle_theme))
        .route("/contact", post(contact::handle_contact_form))
        // JSON API
        .route("/api/v1/cv", get(content::handle_get_cv))
        .route("/api/v1/cv/skills", get(content::handle_get_skill_groups))
        .route("/api/v1/contact", post(contact::handle_contact))
        .fallback(not_found)
        .with_state(state)
}
