//! Gemini model configs loaded from environment-style lookups.
//!
//! Two profiles exist, one per [`ModelVariant`](super::model_variant::ModelVariant):
//!
//! - **Pro**   → grading feedback; always configured
//! - **Flash** → summaries; only configured when `GEMINI_FLASH_MODEL` is set,
//!   otherwise the pro profile is reused
//!
//! # Environment variables
//!
//! - `GOOGLE_API_KEY`      = provider key (mandatory)
//! - `GEMINI_MODEL`        = pro model (default `gemini-1.5-pro-002`)
//! - `GEMINI_FLASH_MODEL`  = flash model (optional)
//! - `GEMINI_ENDPOINT`     = API base (default `https://generativelanguage.googleapis.com`)
//! - `GEMINI_TIMEOUT_SECS` = request timeout (default 60)
//! - `LLM_MAX_TOKENS`      = optional `maxOutputTokens`
//!
//! Every function takes a `lookup` closure so tests can supply values
//! without touching the process environment; use `|k| std::env::var(k).ok()`
//! in production.

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{
        ConfigError, Result, lookup_var, must_var, opt_u32, opt_u64, validate_http_endpoint,
    },
};

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro-002";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Constructs the **pro** profile.
///
/// # Errors
/// - [`ConfigError::MissingVar`] without `GOOGLE_API_KEY`
/// - [`ConfigError::InvalidNumber`] / [`ConfigError::InvalidFormat`] on bad values
pub fn config_gemini_pro<L>(lookup: &L) -> Result<LlmModelConfig>
where
    L: Fn(&str) -> Option<String>,
{
    let model =
        lookup_var(lookup, "GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
    gemini_profile(lookup, model)
}

/// Constructs the **flash** profile, or `None` when it should reuse pro.
pub fn config_gemini_flash<L>(lookup: &L) -> Result<Option<LlmModelConfig>>
where
    L: Fn(&str) -> Option<String>,
{
    match lookup_var(lookup, "GEMINI_FLASH_MODEL") {
        Some(model) => gemini_profile(lookup, model).map(Some),
        None => Ok(None),
    }
}

fn gemini_profile<L>(lookup: &L, model: String) -> Result<LlmModelConfig>
where
    L: Fn(&str) -> Option<String>,
{
    let model = model.trim().trim_start_matches("models/").to_string();
    if model.is_empty() {
        return Err(ConfigError::EmptyModel.into());
    }

    let api_key = must_var(lookup, "GOOGLE_API_KEY")?;

    let endpoint = lookup_var(lookup, "GEMINI_ENDPOINT")
        .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string());
    validate_http_endpoint("GEMINI_ENDPOINT", endpoint.trim())?;

    let timeout_secs = opt_u64(lookup, "GEMINI_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);
    let max_tokens = opt_u32(lookup, "LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        model,
        endpoint: endpoint.trim().to_string(),
        api_key,
        max_tokens,
        timeout_secs: Some(timeout_secs),
    })
}
