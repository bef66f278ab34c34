use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Html,
    Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::contact::form::{ContactMessage, SubmissionStatus, SubmitOutcome};
use crate::content::sections::compose_page;
use crate::errors::AppError;
use crate::render::render_page;
use crate::state::AppState;
use crate::theme::theme_from_headers;

/// Body of both contact endpoints. Missing fields are treated as empty so they
/// surface as field-level validation errors rather than extractor rejections.
///
/// `form_id` names the mounted form (rendered as a hidden input on the page).
/// Without it, or when it has expired, a new form is mounted for the request.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub form_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactRequest {
    fn into_parts(self) -> (Option<String>, ContactMessage) {
        let draft = ContactMessage {
            name: self.name,
            email: self.email,
            message: self.message,
        };
        (self.form_id, draft)
    }
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub form_id: String,
    pub status: SubmissionStatus,
}

/// POST /api/v1/contact
pub async fn handle_contact(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, AppError> {
    let (form_id, draft) = req.into_parts();
    let (form_id, form) = state.forms.resolve(form_id.as_deref()).await;

    match form.submit(&draft, state.transport.as_ref()).await {
        SubmitOutcome::Delivered => Ok(Json(ContactResponse {
            form_id,
            status: form.snapshot().await.status().clone(),
        })),
        SubmitOutcome::Invalid(errors) => Err(AppError::InvalidFields(errors)),
        SubmitOutcome::TransportFailed(reason) => Err(AppError::Transport(reason)),
        SubmitOutcome::Ignored => Err(AppError::Conflict(format!(
            "Form {form_id} already has a submission in progress"
        ))),
    }
}

/// POST /contact
///
/// Form-post fallback for the page. Re-renders the whole page with inline
/// field errors or a form-level status message.
pub async fn handle_contact_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(req): Form<ContactRequest>,
) -> (StatusCode, Html<String>) {
    let theme = theme_from_headers(&headers);
    let (form_id, draft) = req.into_parts();
    let (form_id, form) = state.forms.resolve(form_id.as_deref()).await;

    let status = match form.submit(&draft, state.transport.as_ref()).await {
        SubmitOutcome::Delivered => StatusCode::OK,
        SubmitOutcome::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitOutcome::TransportFailed(_) => StatusCode::BAD_GATEWAY,
        SubmitOutcome::Ignored => StatusCode::CONFLICT,
    };

    let snapshot = form.snapshot().await;
    let page = compose_page(&state.cv);
    (status, Html(render_page(&page, theme, &form_id, &snapshot)))
}
