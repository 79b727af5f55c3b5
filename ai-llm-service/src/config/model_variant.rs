use std::fmt;

use serde::{Deserialize, Serialize};

/// Which kind of AI answer the client asked for.
///
/// Parsed from the `/ai_response/{model}` path segment; anything other than
/// `flash` or `pro` is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelVariant {
    /// Short summary of the question and mark scheme.
    Flash,
    /// Graded feedback on the student's answer.
    Pro,
}

impl ModelVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelVariant::Flash => "flash",
            ModelVariant::Pro => "pro",
        }
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
