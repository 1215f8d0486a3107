use core_types::{Category, Question};
use serde::Serialize;

/// `GET /categories`
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<Category>,
}

/// `GET /questions`
#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    pub success: bool,
    pub questions_num: i64,
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub categories: Vec<Category>,
    pub current_category: Option<Category>,
}

/// `POST /searchQuestions`
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub current_category: Option<Category>,
}

/// `GET /categories/:category_id/questions`
#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: i64,
    pub categories: Vec<Category>,
    pub current_category: Category,
}

/// `POST /questions`
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub created: i32,
}

/// `DELETE /questions/:question_id`
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: i32,
}

/// `POST /quizzes`; `question` is `null` once the category is exhausted.
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Option<Question>,
}
