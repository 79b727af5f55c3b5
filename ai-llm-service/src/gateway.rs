//! Prompt assembly, generation, and error mapping for AI answers.
//!
//! The gateway never retries. Provider failures become an [`AiResponse::Failed`]
//! carrying a user-facing message; the full error is logged here.

use std::{sync::Arc, time::Instant};

use async_trait::async_trait;
use tracing::{error, info, instrument};

use crate::{
    config::model_variant::ModelVariant,
    error_handler::AiLlmError,
    prompt::{PromptContext, build_prompt},
};

/// Text generation backend used by the gateway.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, variant: ModelVariant, prompt: &str) -> Result<String, AiLlmError>;
}

/// Outcome of one AI request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiResponse {
    /// Generated text with newlines turned into `<br>`.
    Text(String),
    Failed(AiFailure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiFailureKind {
    /// Quota or rate limit; retrying after a short wait may succeed.
    Busy,
    Unexpected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiFailure {
    pub kind: AiFailureKind,
    pub message: String,
}

impl AiFailure {
    pub fn from_error(err: &AiLlmError) -> Self {
        if err.is_rate_limited() {
            Self {
                kind: AiFailureKind::Busy,
                message: "ResourceExhausted: The AI service is currently busy. \
                          Please wait 30 seconds and try again."
                    .to_string(),
            }
        } else {
            Self {
                kind: AiFailureKind::Unexpected,
                message: "Unexpected error while generating the AI response. Please try again later."
                    .to_string(),
            }
        }
    }
}

/// Builds prompts and calls the injected [`TextGenerator`].
#[derive(Clone)]
pub struct AiGateway {
    generator: Arc<dyn TextGenerator>,
}

impl AiGateway {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    #[instrument(name = "ai_respond", skip(self, ctx))]
    pub async fn respond(&self, variant: ModelVariant, ctx: &PromptContext) -> AiResponse {
        let prompt = build_prompt(variant, ctx);
        let started = Instant::now();

        match self.generator.generate(variant, &prompt).await {
            Ok(text) => {
                info!(
                    latency_ms = started.elapsed().as_millis(),
                    response_len = text.len(),
                    "AI response generated"
                );
                AiResponse::Text(text.replace('\n', "<br>"))
            }
            Err(err) => {
                let failure = AiFailure::from_error(&err);
                error!(
                    error = %err,
                    error_debug = ?err,
                    kind = ?failure.kind,
                    latency_ms = started.elapsed().as_millis(),
                    "AI response error"
                );
                AiResponse::Failed(failure)
            }
        }
    }
}
