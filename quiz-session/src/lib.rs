//! Session-backed question navigation.
//!
//! - [`state`]: the per-client [`SessionState`] record and its idle expiry
//! - [`store`]: the [`SessionStore`] abstraction keyed by a client token
//! - [`navigation`]: operations that move the current index and refresh the
//!   cached question fields from a [`question_store::QuestionSource`]
//! - [`display`]: formatting of question text for the browser

pub mod display;
pub mod navigation;
pub mod state;
pub mod store;

pub use navigation::{Direction, NavigationOutcome};
pub use state::{SESSION_LIFETIME_SECS, SessionState};
pub use store::{MemorySessionStore, SessionStore};
