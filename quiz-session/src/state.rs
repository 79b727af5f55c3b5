use chrono::{DateTime, TimeDelta, Utc};
use question_store::Question;

use crate::display::question_display_text;

/// Idle lifetime of a session, also used as the cookie `Max-Age`.
pub const SESSION_LIFETIME_SECS: i64 = 30 * 60;

/// Everything the quiz remembers about one client between requests.
///
/// All fields start unset. `number` is kept inside `[0, total - 1]` by the
/// navigation operations whenever `total > 0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Zero-based index of the current question.
    pub number: Option<usize>,
    /// Question count seen when the current question was loaded.
    pub total: Option<usize>,
    /// Display text of the current question (HTML line breaks, mark annotation).
    pub question: Option<String>,
    /// Mark scheme of the current question.
    pub mark_scheme: Option<String>,
    /// Passage of the current question, if it has one.
    pub insert_text: Option<String>,
    pub marks: Option<i64>,
    pub last_activity: Option<DateTime<Utc>>,
}

impl SessionState {
    /// Records activity at `now` and applies the idle expiry.
    ///
    /// Returns `true` when the session had been idle for longer than
    /// [`SESSION_LIFETIME_SECS`]; all fields are cleared in that case and the
    /// activity timestamp is left unset until the next call.
    pub fn touch(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_idle_at(now) {
            *self = Self::default();
            return true;
        }
        self.last_activity = Some(now);
        false
    }

    /// Whether the last recorded activity is older than the session lifetime.
    pub fn is_idle_at(&self, now: DateTime<Utc>) -> bool {
        self.last_activity
            .is_some_and(|last| now - last > TimeDelta::seconds(SESSION_LIFETIME_SECS))
    }

    pub fn index(&self) -> usize {
        self.number.unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total.unwrap_or(0)
    }

    /// Stores only the index; the cached question fields are left as they are.
    pub fn set_index(&mut self, index: usize) {
        self.number = Some(index);
    }

    /// Caches `question` as the current one and returns its display text.
    pub fn set_current(&mut self, question: &Question, index: usize, total: usize) -> &str {
        self.number = Some(index);
        self.total = Some(total);
        self.mark_scheme = Some(question.answer.clone());
        self.insert_text = question.insert_text.clone();
        self.marks = Some(question.marks);
        self.question
            .insert(question_display_text(question))
            .as_str()
    }
}
