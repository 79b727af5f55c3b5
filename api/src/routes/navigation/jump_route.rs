use axum::{
    Extension,
    extract::{Path, rejection::PathRejection},
    response::Redirect,
};
use quiz_session::{Direction, navigation};

use crate::{error_handler::AppError, middleware_layer::session_layer::SessionSlot};

/// `GET /go/{direction}`: steps the stored index and sends the client back
/// to the question page. Anything other than `previous` or `next` is an
/// unknown path.
pub async fn jump(
    direction: Result<Path<Direction>, PathRejection>,
    Extension(slot): Extension<SessionSlot>,
) -> Result<Redirect, AppError> {
    let Path(direction) = direction.map_err(|_| AppError::NotFound)?;
    navigation::jump(&mut *slot.lock().await, direction);
    Ok(Redirect::to("/"))
}
