//! HTTP surface of the quiz: routing, session cookies and views.

pub mod core;
pub mod error_handler;
pub mod middleware_layer;
pub mod routes;

use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use tokio::{net::TcpListener, signal};
use tower_cookies::CookieManagerLayer;
use tracing::{error, info};

use crate::{
    core::app_state::{ApiConfig, AppState},
    error_handler::AppError,
    middleware_layer::{error_page_layer::error_page_layer, session_layer::session_layer},
    routes::{
        ai::ai_response_route::ai_response,
        navigation::{
            jump_route::jump, navigation_info_route::navigation_info,
            next_question_route::next_question, number_route::number,
            previous_question_route::previous_question,
        },
        question::question_page_route::{not_found, question_page},
    },
};

/// Builds the application router over `state`.
///
/// The redirecting index jump lives under `/go/` because the literal
/// `/next` and `/previous` paths serve the JSON navigation.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(question_page))
        .route("/ai_response/{model}", get(ai_response))
        .route("/number", get(number))
        .route("/next", get(next_question))
        .route("/previous", get(previous_question))
        .route("/get_navigation_info", get(navigation_info))
        .route("/go/{direction}", get(jump))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), error_page_layer))
        .layer(middleware::from_fn_with_state(state.clone(), session_layer))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

pub async fn start() -> Result<(), AppError> {
    let config = ApiConfig::from_env();

    let state = Arc::new(AppState::from_config(&config)?);
    let app = router(state);

    // Bind to address
    let listener = TcpListener::bind(&config.address)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %config.address, "quiz server listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("quiz server stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
