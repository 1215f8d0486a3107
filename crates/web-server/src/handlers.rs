use crate::{
    error::ApiError,
    payloads::{
        ensure_body, parse_body, CreateQuestionRequest, PageQuery, QuizRequest, SearchRequest,
    },
    responses::{
        CategoriesResponse, CategoryQuestionsResponse, CreatedResponse, DeletedResponse,
        QuestionListResponse, QuizResponse, SearchResponse,
    },
    AppState,
};
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use core_types::{QuestionFilter, Question};
use rand::Rng;
use std::sync::Arc;

/// Resolves the `page` query parameter, treating any failure as a missing resource.
fn requested_page(
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<core_types::PageRequest, ApiError> {
    let Query(query) = query.map_err(ApiError::not_found)?;
    Ok(query.page_request()?)
}

/// Buffers the request body; an unreadable or oversized body is unprocessable.
fn request_body(body: Result<Bytes, BytesRejection>) -> Result<Bytes, ApiError> {
    body.map_err(ApiError::unprocessable)
}

/// Picks one candidate with a uniformly random index.
pub fn pick_random<T, R: Rng + ?Sized>(mut candidates: Vec<T>, rng: &mut R) -> Option<T> {
    if candidates.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..candidates.len());
    Some(candidates.swap_remove(index))
}

/// # GET /categories
pub async fn get_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state.store.all_categories().await.map_err(ApiError::not_found)?;
    if categories.is_empty() {
        return Err(ApiError::not_found("no categories exist"));
    }

    Ok(Json(CategoriesResponse {
        success: true,
        categories,
    }))
}

/// # GET /questions?page=N
/// One page of all questions in id order, plus every category.
pub async fn get_questions(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<QuestionListResponse>, ApiError> {
    let page = requested_page(query)?;

    let questions = state
        .store
        .questions_page(&QuestionFilter::All, page)
        .await
        .map_err(ApiError::not_found)?;
    if questions.is_empty() {
        return Err(ApiError::not_found(format!(
            "page {} holds no questions ({} in total)",
            page.number(),
            questions.total
        )));
    }
    let categories = state.store.all_categories().await.map_err(ApiError::not_found)?;

    Ok(Json(QuestionListResponse {
        success: true,
        questions_num: questions.total,
        questions: questions.items,
        total_questions: questions.total,
        categories,
        current_category: None,
    }))
}

/// # DELETE /questions/:question_id
pub async fn delete_question(
    State(state): State<Arc<AppState>>,
    question_id: Result<Path<i32>, PathRejection>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let Path(question_id) = question_id.map_err(ApiError::not_found)?;

    state
        .store
        .delete_question(question_id)
        .await
        .map_err(|e| ApiError::not_found(format!("delete of question {}: {}", question_id, e)))?;
    tracing::info!(question_id, "Deleted question.");

    Ok(Json(DeletedResponse {
        success: true,
        deleted: question_id,
    }))
}

/// # POST /questions
pub async fn create_question(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let body = request_body(body)?;
    let question = parse_body::<CreateQuestionRequest>(&body)?.validate()?;

    let stored = state.store.insert_question(question).await.map_err(|e| {
        tracing::error!(error = ?e, "Failed to store question.");
        ApiError::unprocessable(e)
    })?;
    tracing::info!(question_id = stored.id, category = stored.category, "Created question.");

    Ok(Json(CreatedResponse {
        success: true,
        created: stored.id,
    }))
}

/// # POST /searchQuestions?page=N
pub async fn search_questions(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageQuery>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let body = request_body(body)?;
    ensure_body(&body)?;
    let page = requested_page(query)?;
    let search_term = parse_body::<SearchRequest>(&body)?.validate()?;

    let matches = state
        .store
        .questions_page(&QuestionFilter::Search(search_term), page)
        .await
        .map_err(ApiError::not_found)?;
    if matches.is_empty() {
        return Err(ApiError::not_found(format!(
            "search page {} is empty ({} matches)",
            page.number(),
            matches.total
        )));
    }

    Ok(Json(SearchResponse {
        success: true,
        questions: matches.items,
        total_questions: matches.total,
        current_category: None,
    }))
}

/// # GET /categories/:category_id/questions?page=N
pub async fn get_questions_by_category(
    State(state): State<Arc<AppState>>,
    category_id: Result<Path<i32>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<CategoryQuestionsResponse>, ApiError> {
    let Path(category_id) = category_id.map_err(ApiError::not_found)?;
    let page = requested_page(query)?;

    let category = state
        .store
        .category_by_id(category_id)
        .await
        .map_err(ApiError::not_found)?
        .ok_or_else(|| ApiError::not_found(format!("category {} does not exist", category_id)))?;

    let questions = state
        .store
        .questions_page(&QuestionFilter::Category(category_id), page)
        .await
        .map_err(ApiError::not_found)?;
    if questions.is_empty() {
        return Err(ApiError::not_found(format!(
            "category {} has no questions on page {}",
            category_id,
            page.number()
        )));
    }
    let categories = state.store.all_categories().await.map_err(ApiError::not_found)?;

    Ok(Json(CategoryQuestionsResponse {
        success: true,
        questions: questions.items,
        total_questions: questions.total,
        categories,
        current_category: category,
    }))
}

/// # POST /quizzes
/// A random question from the category that the player has not seen yet.
pub async fn play_quiz(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<QuizResponse>, ApiError> {
    let body = request_body(body)?;
    let request = parse_body::<QuizRequest>(&body).map_err(ApiError::unprocessable)?;
    let category_id = request.quiz_category.id.0;

    let candidates: Vec<Question> = state
        .store
        .quiz_candidates(category_id, &request.previous_questions)
        .await
        .map_err(ApiError::unprocessable)?;
    tracing::debug!(
        category_id,
        category_type = request.quiz_category.kind.as_deref().unwrap_or("-"),
        seen = request.previous_questions.len(),
        remaining = candidates.len(),
        "Selecting quiz question."
    );

    let question = pick_random(candidates, &mut rand::thread_rng());
    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

/// Catch-all for unknown routes and unsupported methods, answering with the generic 404 body.
pub async fn route_not_found() -> ApiError {
    ApiError::not_found("no route matches the request")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn pick_random_of_nothing_is_none() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pick_random(Vec::<i32>::new(), &mut rng), None);
    }

    #[test]
    fn pick_random_only_returns_candidates() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let picked = pick_random(vec![3, 5, 8], &mut rng).unwrap();
            assert!([3, 5, 8].contains(&picked));
        }
    }

    #[test]
    fn pick_random_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        let trials = 30_000;
        let mut counts = [0usize; 3];
        for _ in 0..trials {
            let picked = pick_random(vec![0usize, 1, 2], &mut rng).unwrap();
            counts[picked] += 1;
        }

        let expected = trials / 3;
        for count in counts {
            let deviation = count.abs_diff(expected);
            assert!(
                deviation < expected / 10,
                "counts {:?} are not uniform enough",
                counts
            );
        }
    }
}
