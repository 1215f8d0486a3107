use crate::{connect, run_migrations, DbError, DbRepository, MemoryRepository};
use async_trait::async_trait;
use configuration::{DatabaseSettings, StoreBackend};
use core_types::{Category, NewQuestion, Page, PageRequest, Question, QuestionFilter};
use std::sync::Arc;

/// Category labels inserted by `seed_default_categories`.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

/// The data access contract used by the API layer.
///
/// Implementations must agree on ordering (ascending id everywhere), on search
/// semantics (case-insensitive literal substring of the question text), and
/// on pagination (an out-of-range page is empty, never an error).
#[async_trait]
pub trait TriviaStore: Send + Sync {
    /// All categories, ordered by id.
    async fn all_categories(&self) -> Result<Vec<Category>, DbError>;

    async fn category_by_id(&self, id: i32) -> Result<Option<Category>, DbError>;

    /// All questions, ordered by id.
    async fn all_questions(&self) -> Result<Vec<Question>, DbError>;

    async fn question_by_id(&self, id: i32) -> Result<Option<Question>, DbError>;

    /// Every question matching `filter`, ordered by id.
    async fn questions_matching(&self, filter: &QuestionFilter) -> Result<Vec<Question>, DbError>;

    /// One page of the questions matching `filter` plus the total match count.
    async fn questions_page(
        &self,
        filter: &QuestionFilter,
        page: PageRequest,
    ) -> Result<Page<Question>, DbError>;

    /// Questions in `category_id` whose id is not in `excluded_ids`.
    async fn quiz_candidates(
        &self,
        category_id: i32,
        excluded_ids: &[i32],
    ) -> Result<Vec<Question>, DbError>;

    /// Persists a question and returns it with its assigned id.
    async fn insert_question(&self, question: NewQuestion) -> Result<Question, DbError>;

    /// Removes a question. Fails with `DbError::NotFound` if no such row exists.
    async fn delete_question(&self, id: i32) -> Result<(), DbError>;

    async fn insert_category(&self, kind: &str) -> Result<Category, DbError>;
}

/// Builds the store selected by `settings.backend`.
///
/// For PostgreSQL this connects the pool and applies pending migrations.
/// The in-memory store starts with `DEFAULT_CATEGORIES` so every route is usable.
pub async fn open_store(settings: &DatabaseSettings) -> Result<Arc<dyn TriviaStore>, DbError> {
    match settings.backend {
        StoreBackend::Postgres => {
            let pool = connect(settings).await?;
            run_migrations(&pool).await?;
            tracing::info!("Using the PostgreSQL question store.");
            Ok(Arc::new(DbRepository::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory question store; data is lost on exit.");
            let store = MemoryRepository::new();
            seed_default_categories(&store).await?;
            Ok(Arc::new(store))
        }
    }
}

/// Inserts `DEFAULT_CATEGORIES` if the store has no categories yet.
///
/// Returns the number of categories inserted.
pub async fn seed_default_categories(store: &dyn TriviaStore) -> Result<usize, DbError> {
    if !store.all_categories().await?.is_empty() {
        tracing::info!("Categories already present, skipping seed.");
        return Ok(0);
    }

    for kind in DEFAULT_CATEGORIES {
        let category = store.insert_category(kind).await?;
        tracing::debug!(id = category.id, kind = %category.kind, "Seeded category.");
    }
    Ok(DEFAULT_CATEGORIES.len())
}
