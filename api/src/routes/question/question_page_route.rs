use std::sync::Arc;

use axum::{Extension, extract::State, response::Html};
use quiz_session::navigation;
use tracing::instrument;

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    middleware_layer::session_layer::SessionSlot,
};

/// `GET /`: shows the question at the session's (clamped) index.
#[instrument(name = "question_page", skip_all)]
pub async fn question_page(
    State(state): State<Arc<AppState>>,
    Extension(slot): Extension<SessionSlot>,
) -> AppResult<Html<String>> {
    let mut session = slot.lock().await;
    let question = navigation::show_current(state.questions.as_ref(), &mut session).await?;
    Ok(Html(state.views.render_index(&question)?))
}

/// Any path no route matches.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
