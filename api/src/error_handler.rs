use ai_llm_service::AiLlmError;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use question_store::StoreError;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::core::views;

/// Message of an error response, picked up by
/// [`error_page_layer`](crate::middleware_layer::error_page_layer::error_page_layer).
#[derive(Debug, Clone)]
pub struct ErrorPage(pub String);

/// Public application error type.
///
/// Request-time variants render through the shared error view; startup
/// variants only ever reach `main`.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Llm(#[from] AiLlmError),

    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("Not Found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("unable to render view: {0}")]
    View(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::NoData) => StatusCode::NOT_FOUND,

            // 5xx
            AppError::Store(_)
            | AppError::View(_)
            | AppError::Llm(_)
            | AppError::Bind(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            _ if status.is_server_error() => {
                error!(%status, error = %self, error_debug = ?self, "request failed")
            }
            AppError::NotFound => debug!(%status, "no route"),
            _ => warn!(%status, error = %self, "request rejected"),
        }

        let message = self.to_string();
        let mut response = (status, Html(views::inline_error(&message))).into_response();
        response.extensions_mut().insert(ErrorPage(message));
        response
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_http_status() {
        assert_eq!(
            AppError::from(StoreError::NoData).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(StoreError::StorageUnavailable("locked".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn response_carries_message_for_error_view() {
        let response = AppError::from(StoreError::NoData).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let page = response.extensions().get::<ErrorPage>().unwrap();
        assert_eq!(page.0, "No questions found in the database.");
    }

    #[test]
    fn storage_errors_keep_their_text() {
        let err = AppError::from(StoreError::StorageUnavailable("disk I/O error".into()));
        assert_eq!(
            err.to_string(),
            "Unable to connect to the database: disk I/O error"
        );
    }
}
