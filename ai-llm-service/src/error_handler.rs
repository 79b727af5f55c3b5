//! Unified error handling for `ai-llm-service`.
//!
//! A single top-level error type [`AiLlmError`] groups configuration errors
//! ([`ConfigError`]) and upstream failures ([`ProviderError`]). Lookup helpers
//! for configuration variables return the unified [`Result<T>`] alias.
//!
//! All messages include the suffix `[AI LLM Service]` to simplify attribution in logs.

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The provider answered, but not with usable text.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Underlying HTTP transport error, including timeouts.
    #[error("[AI LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

impl AiLlmError {
    /// Whether the provider refused the call for quota or rate reasons.
    ///
    /// This is the only transient-capacity signal; callers tell the user to
    /// wait and retry instead of reporting an unexpected failure.
    pub fn is_rate_limited(&self) -> bool {
        matches!(
            self,
            AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::RateLimited(_),
                ..
            })
        )
    }
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Errors raised while loading model configuration.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Required variable is missing or empty.
    #[error("[AI LLM Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (like timeouts or token limits).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        var: &'static str,
        reason: &'static str,
    },

    /// Model name was empty.
    #[error("[AI LLM Service] model name must not be empty")]
    EmptyModel,
}

/* ------------------------------------------------------------------------- */
/* Provider errors                                                           */
/* ------------------------------------------------------------------------- */

/// Failure reported by (or about) the Gemini API for one model.
#[derive(Debug, Error)]
#[error("[AI LLM Service] {model}: {kind}")]
pub struct ProviderError {
    pub model: String,
    pub kind: ProviderErrorKind,
}

impl ProviderError {
    pub fn new(model: impl Into<String>, kind: ProviderErrorKind) -> Self {
        Self {
            model: model.into(),
            kind,
        }
    }
}

/// HTTP-level details of an unsuccessful call. `url` never carries the key.
#[derive(Debug, Clone)]
pub struct HttpError {
    pub status: StatusCode,
    pub url: String,
    pub snippet: String,
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProviderErrorKind {
    /// HTTP 429 or a `RESOURCE_EXHAUSTED` status from the provider.
    #[error("resource exhausted (HTTP {}): {}", .0.status, .0.snippet)]
    RateLimited(HttpError),

    /// Any other non-successful HTTP status.
    #[error("HTTP {} from {}: {}", .0.status, .0.url, .0.snippet)]
    HttpStatus(HttpError),

    /// Response payload could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The response held no candidate text (blocked prompt, safety stop, ...).
    #[error("no candidate text in response (reason: {})", .0.as_deref().unwrap_or("unknown"))]
    EmptyCandidates(Option<String>),

    /// The endpoint is empty or does not start with http/https.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("missing API key")]
    MissingApiKey,
}

/// Compacts an upstream body into a short single-line snippet for errors and logs.
pub fn make_snippet(body: &str) -> String {
    const MAX_CHARS: usize = 300;

    let compact = body.split_whitespace().collect::<Vec<_>>().join(" ");
    match compact.char_indices().nth(MAX_CHARS) {
        Some((cut, _)) => format!("{}…", &compact[..cut]),
        None => compact,
    }
}

/* ------------------------------------------------------------------------- */
/* Lookup helpers (return unified `Result<T>`)                               */
/* ------------------------------------------------------------------------- */

/// Reads a variable through `lookup`, treating blank values as unset.
pub fn lookup_var<L>(lookup: &L, name: &str) -> Option<String>
where
    L: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|v| !v.trim().is_empty())
}

/// Fetches a required, non-empty variable.
///
/// # Errors
/// Returns [`ConfigError::MissingVar`] if the variable is absent or blank.
pub fn must_var<L>(lookup: &L, name: &'static str) -> Result<String>
where
    L: Fn(&str) -> Option<String>,
{
    lookup_var(lookup, name).ok_or_else(|| ConfigError::MissingVar(name).into())
}

/// Parses an optional `u32` (`Ok(None)` if unset/blank).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if set but not a valid `u32`.
pub fn opt_u32<L>(lookup: &L, name: &'static str) -> Result<Option<u32>>
where
    L: Fn(&str) -> Option<String>,
{
    match lookup_var(lookup, name) {
        Some(v) => v.trim().parse::<u32>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u32",
            })
        }),
        None => Ok(None),
    }
}

/// Parses an optional `u64` (`Ok(None)` if unset/blank).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if set but not a valid `u64`.
pub fn opt_u64<L>(lookup: &L, name: &'static str) -> Result<Option<u64>>
where
    L: Fn(&str) -> Option<String>,
{
    match lookup_var(lookup, name) {
        Some(v) => v.trim().parse::<u64>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        }),
        None => Ok(None),
    }
}

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] otherwise.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}
