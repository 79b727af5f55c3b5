use std::sync::Arc;

use ai_llm_service::{AiResponse, ModelVariant, PromptContext};
use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::PathRejection},
    http::StatusCode,
};
use quiz_session::SessionState;
use tracing::{instrument, warn};

use super::ai_reply::{AiQuery, AiReply};
use crate::{core::app_state::AppState, middleware_layer::session_layer::SessionSlot};

pub const NO_QUESTION_LOADED: &str = "No question is loaded in this session. Open the quiz first.";
pub const MISSING_ANSWER: &str = "Missing required query parameter: answer";

/// `GET /ai_response/{model}?answer=...`
///
/// Builds the prompt from the session's current question. The session lock
/// is released before the provider call.
#[instrument(name = "ai_response", skip_all)]
pub async fn ai_response(
    State(state): State<Arc<AppState>>,
    Extension(slot): Extension<SessionSlot>,
    model: Result<Path<ModelVariant>, PathRejection>,
    Query(query): Query<AiQuery>,
) -> (StatusCode, Json<AiReply>) {
    let Ok(Path(variant)) = model else {
        return bad_request("Unknown model; expected `flash` or `pro`".to_string());
    };

    let ctx = {
        let session = slot.lock().await;
        match prompt_context(&session, variant, query.answer) {
            Ok(ctx) => ctx,
            Err(message) => return bad_request(message.to_string()),
        }
    };

    match state.ai.respond(variant, &ctx).await {
        AiResponse::Text(text) => (StatusCode::OK, Json(AiReply::Response(text))),
        AiResponse::Failed(failure) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(AiReply::Error(failure.message)),
        ),
    }
}

fn bad_request(message: String) -> (StatusCode, Json<AiReply>) {
    warn!(%message, "AI request rejected");
    (StatusCode::BAD_REQUEST, Json(AiReply::Error(message)))
}

fn prompt_context(
    session: &SessionState,
    variant: ModelVariant,
    answer: Option<String>,
) -> Result<PromptContext, &'static str> {
    let (Some(question), Some(mark_scheme)) = (&session.question, &session.mark_scheme) else {
        return Err(NO_QUESTION_LOADED);
    };
    if variant == ModelVariant::Pro && answer.is_none() {
        return Err(MISSING_ANSWER);
    }

    Ok(PromptContext {
        question: question.clone(),
        mark_scheme: mark_scheme.clone(),
        insert_text: session.insert_text.clone(),
        marks: session.marks,
        answer,
    })
}
