/// Configuration for one Gemini model profile.
///
/// # Fields
///
/// - `model`: model identifier without the `models/` prefix (e.g. `"gemini-1.5-pro-002"`).
/// - `endpoint`: API base URL (e.g. `"https://generativelanguage.googleapis.com"`).
/// - `api_key`: key sent in the `x-goog-api-key` header.
/// - `max_tokens`: `maxOutputTokens`, if limited.
/// - `timeout_secs`: request timeout for the outbound call.
#[derive(Clone, PartialEq)]
pub struct LlmModelConfig {
    pub model: String,
    pub endpoint: String,
    pub api_key: String,
    pub max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
}

// The API key must never end up in logs.
impl std::fmt::Debug for LlmModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmModelConfig")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
