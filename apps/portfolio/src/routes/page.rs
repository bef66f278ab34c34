use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use tracing::info;

use crate::content::sections::compose_page;
use crate::render::render_page;
use crate::state::AppState;
use crate::theme::{theme_cookie, theme_from_headers, ThemeController};

/// GET /
/// Renders the full page in the persisted theme and mounts a fresh contact form.
pub async fn handle_index(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let theme = theme_from_headers(&headers);
    let (form_id, form) = state.forms.mount().await;
    let page = compose_page(&state.cv);
    Html(render_page(&page, theme, &form_id, &form.snapshot().await))
}

/// POST /theme/toggle
/// Flips the persisted theme and sends the browser back to the page.
///
/// The `theme` cookie is the persisted state. The controller is seeded from it
/// for this one transition, and the cookie is written from its published value.
pub async fn handle_toggle_theme(headers: HeaderMap) -> Response {
    let mut controller = ThemeController::new(theme_from_headers(&headers));
    let signal = controller.subscribe();
    controller.toggle();
    let theme = *signal.borrow();
    info!("Theme switched to {}", theme.as_str());

    (
        StatusCode::SEE_OTHER,
        [
            (header::SET_COOKIE, theme_cookie(theme)),
            (header::LOCATION, "/".to_string()),
        ],
    )
        .into_response()
}
