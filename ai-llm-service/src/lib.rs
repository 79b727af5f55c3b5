//! AI gateway for the quiz.
//!
//! - [`config`]: model configs loaded from the environment, [`ModelVariant`]
//! - [`services::gemini_service`]: thin client for the Gemini REST API
//! - [`service_profiles`]: one client per variant behind [`TextGenerator`]
//! - [`prompt`]: the summary and grading prompt templates
//! - [`gateway`]: prompt assembly, generation, and error mapping
//! - [`telemetry`]: tracing subscriber helpers

pub mod config;
pub mod error_handler;
pub mod gateway;
pub mod prompt;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use config::model_variant::ModelVariant;
pub use error_handler::{AiLlmError, Result};
pub use gateway::{AiFailure, AiFailureKind, AiGateway, AiResponse, TextGenerator};
pub use prompt::PromptContext;
pub use service_profiles::LlmServiceProfiles;
