use axum::{Extension, Json};

use super::navigation_response::NavigationInfo;
use crate::middleware_layer::session_layer::SessionSlot;

/// `GET /get_navigation_info`: stored index and total, `0` when unset.
pub async fn navigation_info(Extension(slot): Extension<SessionSlot>) -> Json<NavigationInfo> {
    let session = slot.lock().await;
    Json(NavigationInfo {
        number: session.index(),
        total: session.total(),
    })
}
