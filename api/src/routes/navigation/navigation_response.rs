use quiz_session::NavigationOutcome;
use serde::Serialize;

/// JSON body of `/next` and `/previous`.
#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl From<NavigationOutcome> for NavigationResponse {
    fn from(outcome: NavigationOutcome) -> Self {
        match outcome {
            NavigationOutcome::Moved {
                question,
                number,
                total,
            } => Self {
                success: true,
                question: Some(question),
                number: Some(number),
                total: Some(total),
                message: None,
            },
            NavigationOutcome::Unavailable { message } => Self {
                success: false,
                question: None,
                number: None,
                total: None,
                message: Some(message),
            },
        }
    }
}

/// JSON body of `/get_navigation_info`.
#[derive(Debug, Serialize)]
pub struct NavigationInfo {
    pub number: usize,
    pub total: usize,
}
