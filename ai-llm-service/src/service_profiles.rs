//! Shared Gemini service with one profile per [`ModelVariant`].
//!
//! - Construct once at startup, wrap in `Arc`, and hand it to the
//!   [`AiGateway`](crate::gateway::AiGateway) as its [`TextGenerator`].
//! - If the `flash` profile is not provided, it falls back to `pro`, which
//!   keeps both variants on the same model unless configured otherwise.

use async_trait::async_trait;
use tracing::info;

use crate::{
    config::{
        default_config::{config_gemini_flash, config_gemini_pro},
        llm_model_config::LlmModelConfig,
        model_variant::ModelVariant,
    },
    error_handler::AiLlmError,
    gateway::TextGenerator,
    services::gemini_service::GeminiService,
};

pub struct LlmServiceProfiles {
    flash: GeminiService,
    pro: GeminiService,
}

impl LlmServiceProfiles {
    /// Creates the service from explicit configs.
    ///
    /// - `pro`: required grading profile.
    /// - `flash_opt`: optional summary profile. If `None`, falls back to `pro`.
    pub fn new(pro: LlmModelConfig, flash_opt: Option<LlmModelConfig>) -> Result<Self, AiLlmError> {
        let flash = flash_opt.unwrap_or_else(|| pro.clone());

        info!(
            flash_model = %flash.model,
            pro_model = %pro.model,
            shared = flash == pro,
            "LLM profiles configured"
        );

        Ok(Self {
            flash: GeminiService::new(flash)?,
            pro: GeminiService::new(pro)?,
        })
    }

    /// Creates the service from variables resolved through `lookup`.
    pub fn from_lookup<L>(lookup: &L) -> Result<Self, AiLlmError>
    where
        L: Fn(&str) -> Option<String>,
    {
        Self::new(config_gemini_pro(lookup)?, config_gemini_flash(lookup)?)
    }

    /// Creates the service from the process environment.
    pub fn from_env() -> Result<Self, AiLlmError> {
        Self::from_lookup(&|k: &str| std::env::var(k).ok())
    }

    /// Config of the profile serving `variant`.
    pub fn profile(&self, variant: ModelVariant) -> &LlmModelConfig {
        self.service(variant).config()
    }

    fn service(&self, variant: ModelVariant) -> &GeminiService {
        match variant {
            ModelVariant::Flash => &self.flash,
            ModelVariant::Pro => &self.pro,
        }
    }
}

#[async_trait]
impl TextGenerator for LlmServiceProfiles {
    async fn generate(&self, variant: ModelVariant, prompt: &str) -> Result<String, AiLlmError> {
        self.service(variant).generate(prompt).await
    }
}
