use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use quiz_session::navigation;
use tracing::instrument;

use super::navigation_response::NavigationResponse;
use crate::{
    core::app_state::AppState, error_handler::AppResult,
    middleware_layer::session_layer::SessionSlot,
};

#[instrument(name = "next_question", skip_all)]
pub async fn next_question(
    State(state): State<Arc<AppState>>,
    Extension(slot): Extension<SessionSlot>,
) -> AppResult<Json<NavigationResponse>> {
    let mut session = slot.lock().await;
    let outcome = navigation::advance(state.questions.as_ref(), &mut session).await?;
    Ok(Json(outcome.into()))
}
