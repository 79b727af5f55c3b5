use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use quiz_session::navigation;
use tracing::instrument;

use super::navigation_response::NavigationResponse;
use crate::{
    core::app_state::AppState, error_handler::AppResult,
    middleware_layer::session_layer::SessionSlot,
};

#[instrument(name = "previous_question", skip_all)]
pub async fn previous_question(
    State(state): State<Arc<AppState>>,
    Extension(slot): Extension<SessionSlot>,
) -> AppResult<Json<NavigationResponse>> {
    let mut session = slot.lock().await;
    let outcome = navigation::retreat(state.questions.as_ref(), &mut session).await?;
    Ok(Json(outcome.into()))
}
