//! HTML views rendered with tera.
//!
//! [`Views`] is loaded once at startup from the configured directory and
//! carried in the application state. The error view falls back to an inline
//! page when `error.html` is missing or fails to render.

use std::path::Path;

use tera::{Context, Tera};
use tracing::{info, warn};

use crate::error_handler::AppError;

pub const INDEX_TEMPLATE: &str = "index.html";
pub const ERROR_TEMPLATE: &str = "error.html";

/// Loaded template set.
#[derive(Debug, Default)]
pub struct Views {
    tera: Tera,
}

impl Views {
    /// Loads every `*.html` under `dir`. A missing or unparsable directory
    /// yields an empty set: the question page then fails with
    /// [`AppError::View`] and errors use the inline page.
    pub fn load(dir: &Path) -> Self {
        let dir = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        let glob = format!("{}/**/*.html", dir.display());
        let tera = match Tera::new(&glob) {
            Ok(tera) => tera,
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "template load failed; using inline error view only");
                Tera::default()
            }
        };

        let names: Vec<&str> = tera.get_template_names().collect();
        info!(dir = %dir.display(), templates = ?names, "templates loaded");
        Self { tera }
    }

    /// Renders the question page with `question` as trusted HTML.
    pub fn render_index(&self, question: &str) -> Result<String, AppError> {
        let mut ctx = Context::new();
        ctx.insert("question", question);
        self.tera
            .render(INDEX_TEMPLATE, &ctx)
            .map_err(|e| AppError::View(format!("{INDEX_TEMPLATE}: {e}")))
    }

    /// Renders the error page for `message`.
    pub fn render_error(&self, message: &str) -> String {
        let mut ctx = Context::new();
        ctx.insert("error", message);
        match self.tera.render(ERROR_TEMPLATE, &ctx) {
            Ok(html) => html,
            Err(err) => {
                warn!(error = %err, "error view failed; using inline fallback");
                inline_error(message)
            }
        }
    }
}

/// Template-free error page.
pub fn inline_error(message: &str) -> String {
    format!(
        "<h1>Error</h1><p>{}</p><a href='/'>Return to Home</a>",
        tera::escape_html(message)
    )
}
