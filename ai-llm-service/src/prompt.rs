//! Prompt templates, one per [`ModelVariant`].

use crate::config::model_variant::ModelVariant;

/// Session fields (plus the submitted answer) a prompt is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptContext {
    /// Question display text, as cached in the session.
    pub question: String,
    pub mark_scheme: String,
    pub insert_text: Option<String>,
    pub marks: Option<i64>,
    /// The student's answer; only the `pro` template uses it.
    pub answer: Option<String>,
}

/// Builds the prompt text for `variant`.
///
/// - `flash` asks for a short summary of the question and mark scheme.
/// - `pro` asks the model to mark the student's answer against the scheme.
pub fn build_prompt(variant: ModelVariant, ctx: &PromptContext) -> String {
    match variant {
        ModelVariant::Flash => format!(
            "Question: {question}\n\
             Mark scheme: {ms}\n\
             Write a short and concise summary (Don't narrate your response).\n",
            question = ctx.question,
            ms = ctx.mark_scheme,
        ),
        ModelVariant::Pro => format!(
            "Insert text: {insert}\n\
             Question: {question}\n\
             Marks available: {marks}\n\
             Student's answer: {answer}\n\
             Mark scheme: {ms}\n\
             I am the student now mark my answer and give clear and detailed feedback on it.\n",
            insert = ctx.insert_text.as_deref().unwrap_or_default(),
            question = ctx.question,
            marks = ctx.marks.map(|m| m.to_string()).unwrap_or_default(),
            answer = ctx.answer.as_deref().unwrap_or_default(),
            ms = ctx.mark_scheme,
        ),
    }
}
