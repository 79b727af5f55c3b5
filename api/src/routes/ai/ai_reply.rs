use serde::{Deserialize, Serialize};

/// Query string of `/ai_response/{model}`.
#[derive(Debug, Default, Deserialize)]
pub struct AiQuery {
    /// Student's answer; required for `pro`.
    pub answer: Option<String>,
}

/// `{"response": ...}` on success, `{"error": ...}` otherwise.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub enum AiReply {
    #[serde(rename = "response")]
    Response(String),
    #[serde(rename = "error")]
    Error(String),
}
