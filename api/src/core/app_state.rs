use std::{path::PathBuf, sync::Arc};

use ai_llm_service::{AiGateway, LlmServiceProfiles};
use question_store::{QuestionSource, SqliteQuestionStore};
use quiz_session::{MemorySessionStore, SessionStore};
use tower_cookies::Key;
use tracing::info;

use crate::{core::views::Views, error_handler::AppError};

pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_DB_PATH: &str = "data/spanish.db";
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";

/// Process-level settings for the HTTP surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Listener address, e.g. "127.0.0.1:5000".
    pub address: String,
    /// SQLite question dataset.
    pub db_path: PathBuf,
    /// Directory with `index.html` and `error.html`.
    pub templates_dir: PathBuf,
}

impl ApiConfig {
    /// Reads `API_ADDRESS`, `QUIZ_DB_PATH` and `TEMPLATES_DIR` through `lookup`.
    pub fn from_lookup<L>(lookup: &L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            address: var("API_ADDRESS", DEFAULT_API_ADDRESS),
            db_path: PathBuf::from(var("QUIZ_DB_PATH", DEFAULT_DB_PATH)),
            templates_dir: PathBuf::from(var("TEMPLATES_DIR", DEFAULT_TEMPLATES_DIR)),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(&|k: &str| std::env::var(k).ok())
    }
}

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Question dataset, re-read on every navigation request.
    pub questions: Arc<dyn QuestionSource>,
    /// Per-client session records keyed by the cookie token.
    pub sessions: Arc<dyn SessionStore>,
    /// AI gateway with its injected provider client.
    pub ai: AiGateway,
    /// Question and error pages.
    pub views: Arc<Views>,
    /// Signs the session cookie; generated per process start.
    pub cookie_key: Key,
}

impl AppState {
    pub fn new(
        questions: Arc<dyn QuestionSource>,
        sessions: Arc<dyn SessionStore>,
        ai: AiGateway,
        views: Views,
    ) -> Self {
        Self {
            questions,
            sessions,
            ai,
            views: Arc::new(views),
            cookie_key: Key::generate(),
        }
    }

    /// Production wiring: SQLite dataset, in-memory sessions, Gemini from env,
    /// templates from `config.templates_dir`.
    ///
    /// # Errors
    /// Returns [`AppError::Llm`] when the AI provider config is missing or invalid.
    pub fn from_config(config: &ApiConfig) -> Result<Self, AppError> {
        let profiles = LlmServiceProfiles::from_env()?;

        info!(db_path = %config.db_path.display(), "question dataset configured");

        Ok(Self::new(
            Arc::new(SqliteQuestionStore::open(&config.db_path)),
            Arc::new(MemorySessionStore::new()),
            AiGateway::new(Arc::new(profiles)),
            Views::load(&config.templates_dir),
        ))
    }
}
