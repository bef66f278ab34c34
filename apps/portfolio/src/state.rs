use std::sync::Arc;

use crate::contact::registry::FormRegistry;
use crate::contact::transport::ContactTransport;
use crate::models::cv::CvData;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup and never mutated.
    pub cv: Arc<CvData>,
    /// Delivery backend for contact messages. Log or webhook, chosen from config.
    pub transport: Arc<dyn ContactTransport>,
    /// Contact forms mounted by rendered pages, keyed by `form_id`.
    pub forms: Arc<FormRegistry>,
}
