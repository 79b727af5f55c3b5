//! Renders [`ErrorPage`] responses through the state's error view.
//!
//! [`AppError`](crate::error_handler::AppError) responses leave the handler
//! with the inline page as body and the message as a response extension;
//! this layer swaps the body for the templated page.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{Html, IntoResponse, Response},
};

use crate::{core::app_state::AppState, error_handler::ErrorPage};

pub async fn error_page_layer(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let mut response = next.run(req).await;

    let Some(ErrorPage(message)) = response.extensions_mut().remove::<ErrorPage>() else {
        return response;
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    (parts, Html(state.views.render_error(&message))).into_response()
}
