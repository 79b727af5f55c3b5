/// One exam question joined with its optional reading passage.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Question {
    /// `QID`, unique and used as the sort key.
    pub id: i64,
    /// `IID` of the passage this question refers to, if any.
    pub insert_id: Option<i64>,
    /// Passage text; `None` when the question has no passage.
    pub insert_text: Option<String>,
    pub question: String,
    pub marks: i64,
    /// Mark scheme.
    pub answer: String,
}
