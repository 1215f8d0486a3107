/// Selects which questions a listing or page query covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionFilter {
    /// Every stored question.
    All,
    /// Questions whose `category` equals the given category id.
    Category(i32),
    /// Questions whose text contains the term, ignoring case.
    Search(String),
}

impl QuestionFilter {
    /// Returns `true` if the question satisfies this filter.
    ///
    /// In-process stores use this directly; the SQL store expresses the same
    /// predicate as a `WHERE` clause.
    pub fn matches(&self, question: &crate::Question) -> bool {
        match self {
            QuestionFilter::All => true,
            QuestionFilter::Category(category_id) => question.category == *category_id,
            QuestionFilter::Search(term) => question
                .question
                .to_lowercase()
                .contains(&term.to_lowercase()),
        }
    }
}
