//! Display formatting. The browser renders question and AI text as HTML, so
//! newlines become `<br>`.

use question_store::Question;

pub const LINE_BREAK: &str = "<br>";

/// Replaces every literal `\n` with [`LINE_BREAK`].
pub fn to_display_breaks(text: &str) -> String {
    text.replace('\n', LINE_BREAK)
}

/// Passage (if any), a blank line, the question, then the mark annotation.
pub fn question_display_text(question: &Question) -> String {
    let body = match question.insert_text.as_deref() {
        Some(insert) if !insert.is_empty() => format!("{insert}\n\n{}", question.question),
        _ => question.question.clone(),
    };
    to_display_breaks(&format!(
        "{body}<br><strong>[{} marks]</strong>",
        question.marks
    ))
}
