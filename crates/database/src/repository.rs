use crate::store::TriviaStore;
use crate::DbError;
use async_trait::async_trait;
use core_types::{Category, NewQuestion, Page, PageRequest, Question, QuestionFilter};
use sqlx::postgres::{PgPool, Postgres};
use sqlx::QueryBuilder;

const QUESTION_COLUMNS: &str = "id, question, answer, category, difficulty";

/// The `DbRepository` is the PostgreSQL implementation of [`TriviaStore`].
/// It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escapes `LIKE` metacharacters so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Appends the `WHERE` clause for `filter` to a query over `questions`.
fn push_filter<'a>(builder: &mut QueryBuilder<'a, Postgres>, filter: &QuestionFilter) {
    match filter {
        QuestionFilter::All => {}
        QuestionFilter::Category(category_id) => {
            builder.push(" WHERE category = ").push_bind(*category_id);
        }
        QuestionFilter::Search(term) => {
            builder
                .push(" WHERE question ILIKE ")
                .push_bind(format!("%{}%", escape_like(term)));
        }
    }
}

#[async_trait]
impl TriviaStore for DbRepository {
    async fn all_categories(&self) -> Result<Vec<Category>, DbError> {
        let categories =
            sqlx::query_as::<_, Category>(r#"SELECT id, "type" FROM categories ORDER BY id"#)
                .fetch_all(&self.pool)
                .await?;
        Ok(categories)
    }

    async fn category_by_id(&self, id: i32) -> Result<Option<Category>, DbError> {
        let category =
            sqlx::query_as::<_, Category>(r#"SELECT id, "type" FROM categories WHERE id = $1"#)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(category)
    }

    async fn all_questions(&self) -> Result<Vec<Question>, DbError> {
        self.questions_matching(&QuestionFilter::All).await
    }

    async fn question_by_id(&self, id: i32) -> Result<Option<Question>, DbError> {
        let question = sqlx::query_as::<_, Question>(&format!(
            "SELECT {} FROM questions WHERE id = $1",
            QUESTION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(question)
    }

    async fn questions_matching(&self, filter: &QuestionFilter) -> Result<Vec<Question>, DbError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM questions",
            QUESTION_COLUMNS
        ));
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY id");

        let questions = builder
            .build_query_as::<Question>()
            .fetch_all(&self.pool)
            .await?;
        Ok(questions)
    }

    /// Counts the matches, then fetches the page with `LIMIT`/`OFFSET`.
    async fn questions_page(
        &self,
        filter: &QuestionFilter,
        page: PageRequest,
    ) -> Result<Page<Question>, DbError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM questions");
        push_filter(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut select = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM questions",
            QUESTION_COLUMNS
        ));
        push_filter(&mut select, filter);
        select
            .push(" ORDER BY id LIMIT ")
            .push_bind(i64::from(page.size()))
            .push(" OFFSET ")
            .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));

        let items = select
            .build_query_as::<Question>()
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(
            ?filter,
            page = page.number(),
            returned = items.len(),
            total,
            "Fetched question page."
        );
        Ok(Page { items, total })
    }

    async fn quiz_candidates(
        &self,
        category_id: i32,
        excluded_ids: &[i32],
    ) -> Result<Vec<Question>, DbError> {
        let questions = sqlx::query_as::<_, Question>(&format!(
            "SELECT {} FROM questions WHERE category = $1 AND NOT (id = ANY($2)) ORDER BY id",
            QUESTION_COLUMNS
        ))
        .bind(category_id)
        .bind(excluded_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<Question, DbError> {
        let stored = sqlx::query_as::<_, Question>(&format!(
            r#"
            INSERT INTO questions (question, answer, category, difficulty)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            QUESTION_COLUMNS
        ))
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .fetch_one(&self.pool)
        .await?;
        Ok(stored)
    }

    async fn delete_question(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }

    async fn insert_category(&self, kind: &str) -> Result<Category, DbError> {
        let category = sqlx::query_as::<_, Category>(
            r#"INSERT INTO categories ("type") VALUES ($1) RETURNING id, "type""#,
        )
        .bind(kind)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }
}
