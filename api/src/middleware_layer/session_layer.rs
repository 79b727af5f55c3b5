//! Cookie-backed session middleware.
//!
//! Each client carries a signed `quiz_session` cookie holding an opaque
//! token; the [`SessionState`] itself lives in the [`SessionStore`]. For every
//! request the middleware loads the record, applies the idle expiry, hands
//! the record to the handler through a [`SessionSlot`] extension, then saves
//! it and refreshes the cookie.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use quiz_session::{SESSION_LIFETIME_SECS, SessionState};
use tokio::sync::{Mutex, MutexGuard};
use tower_cookies::{
    Cookie, Cookies,
    cookie::{SameSite, time::Duration},
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::app_state::AppState;

pub const SESSION_COOKIE: &str = "quiz_session";

/// The current request's session record, shared with the middleware.
#[derive(Clone, Default)]
pub struct SessionSlot(Arc<Mutex<SessionState>>);

impl SessionSlot {
    pub fn new(state: SessionState) -> Self {
        Self(Arc::new(Mutex::new(state)))
    }

    pub async fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.0.lock().await
    }
}

pub async fn session_layer(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    mut req: Request,
    next: Next,
) -> Response {
    let now = Utc::now();
    let signed = cookies.signed(&state.cookie_key);

    let presented = signed.get(SESSION_COOKIE).map(|c| c.value().to_owned());
    let (token, mut session) = match presented {
        Some(token) => {
            let session = state.sessions.load(&token).await.unwrap_or_default();
            (token, session)
        }
        None => {
            state.sessions.purge_idle(now).await;
            debug!("new session");
            (Uuid::new_v4().to_string(), SessionState::default())
        }
    };

    if session.touch(now) {
        info!("session idle for too long; state reset");
    }

    let slot = SessionSlot::new(session);
    req.extensions_mut().insert(slot.clone());

    let response = next.run(req).await;

    let session = slot.lock().await.clone();
    state.sessions.save(&token, session).await;
    signed.add(session_cookie(token));

    response
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(SESSION_LIFETIME_SECS))
        .build()
}
