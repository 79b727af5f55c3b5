use std::error::Error;

use ai_llm_service::telemetry;
use tracing::Level;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file, if one exists.
    let dotenv = dotenvy::dotenv();

    telemetry::init("info", Level::DEBUG)?;

    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env"),
        Err(err) => tracing::debug!(error = %err, "no .env loaded; using process environment"),
    }

    api::start().await?;

    Ok(())
}
