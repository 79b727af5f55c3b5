//! Question navigation over the session index.
//!
//! Every operation except [`jump`] reloads the full question list from the
//! [`QuestionSource`]; nothing is cached between requests.

use question_store::{Question, QuestionSource, StoreError};
use serde::Deserialize;
use tracing::debug;

use crate::state::SessionState;

pub const NO_MORE_QUESTIONS: &str = "No more questions available";
pub const FIRST_QUESTION: &str = "This is the first question";

/// Direction of a one-step move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    Next,
}

/// Result of [`advance`] or [`retreat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The session now points at `number` and caches its question.
    Moved {
        question: String,
        number: usize,
        total: usize,
    },
    /// No question exists at the computed index; the session is unchanged.
    Unavailable { message: &'static str },
}

/// Clamps `index` into `[0, total - 1]`, or `0` when `total` is zero.
pub fn clamp_index(index: usize, total: usize) -> usize {
    index.min(total.saturating_sub(1))
}

/// Loads the question at the (clamped) stored index into the session and
/// returns its display text.
pub async fn show_current(
    source: &dyn QuestionSource,
    state: &mut SessionState,
) -> Result<String, StoreError> {
    let questions = source.list_questions().await?;
    let total = questions.len();
    let index = clamp_index(state.index(), total);

    let question = questions.get(index).ok_or(StoreError::NoData)?;
    debug!(index, total, question_id = question.id, "showing current question");
    Ok(state.set_current(question, index, total).to_owned())
}

/// Moves one question forward, staying on the last one at the end.
pub async fn advance(
    source: &dyn QuestionSource,
    state: &mut SessionState,
) -> Result<NavigationOutcome, StoreError> {
    let questions = source.list_questions().await?;
    let index = clamp_index(state.index() + 1, questions.len());
    Ok(move_to(state, &questions, index, NO_MORE_QUESTIONS))
}

/// Moves one question back, staying on the first one at the start.
///
/// The index saturates at zero, so at the first question this reports the
/// first question again rather than [`FIRST_QUESTION`]; that message is only
/// produced when the list has no question at the computed index.
pub async fn retreat(
    source: &dyn QuestionSource,
    state: &mut SessionState,
) -> Result<NavigationOutcome, StoreError> {
    let questions = source.list_questions().await?;
    let index = clamp_index(state.index(), questions.len()).saturating_sub(1);
    Ok(move_to(state, &questions, index, FIRST_QUESTION))
}

/// Steps the stored index by one against the stored total, touching nothing
/// else. The caller re-fetches the full state afterwards.
pub fn jump(state: &mut SessionState, direction: Direction) -> usize {
    let index = state.index();
    let target = match direction {
        Direction::Previous => index.saturating_sub(1),
        Direction::Next => clamp_index(index + 1, state.total()),
    };
    state.set_index(target);
    debug!(?direction, from = index, to = target, "jumped");
    target
}

fn move_to(
    state: &mut SessionState,
    questions: &[Question],
    index: usize,
    unavailable: &'static str,
) -> NavigationOutcome {
    match questions.get(index) {
        Some(question) => {
            let total = questions.len();
            let question = state.set_current(question, index, total).to_owned();
            NavigationOutcome::Moved {
                question,
                number: index,
                total,
            }
        }
        None => NavigationOutcome::Unavailable {
            message: unavailable,
        },
    }
}
