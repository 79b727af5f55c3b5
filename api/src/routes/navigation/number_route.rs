use axum::Extension;

use crate::middleware_layer::session_layer::SessionSlot;

/// `GET /number`: the stored index as plain text, `0` when unset.
pub async fn number(Extension(slot): Extension<SessionSlot>) -> String {
    slot.lock().await.index().to_string()
}
