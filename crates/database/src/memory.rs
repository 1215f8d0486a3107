use crate::store::TriviaStore;
use crate::DbError;
use async_trait::async_trait;
use core_types::{Category, NewQuestion, Page, PageRequest, Question, QuestionFilter};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// A process-local [`TriviaStore`].
///
/// Rows live in id-ordered maps, so every listing is ordered by id without an
/// extra sort. Ids are assigned from per-table counters and never reused,
/// matching `SERIAL` columns.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<i32, Category>,
    questions: BTreeMap<i32, Question>,
    last_category_id: i32,
    last_question_id: i32,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TriviaStore for MemoryRepository {
    async fn all_categories(&self) -> Result<Vec<Category>, DbError> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }

    async fn category_by_id(&self, id: i32) -> Result<Option<Category>, DbError> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn all_questions(&self) -> Result<Vec<Question>, DbError> {
        Ok(self.tables.read().await.questions.values().cloned().collect())
    }

    async fn question_by_id(&self, id: i32) -> Result<Option<Question>, DbError> {
        Ok(self.tables.read().await.questions.get(&id).cloned())
    }

    async fn questions_matching(&self, filter: &QuestionFilter) -> Result<Vec<Question>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .values()
            .filter(|q| filter.matches(q))
            .cloned()
            .collect())
    }

    async fn questions_page(
        &self,
        filter: &QuestionFilter,
        page: PageRequest,
    ) -> Result<Page<Question>, DbError> {
        let matching = self.questions_matching(filter).await?;
        Ok(page.slice(matching))
    }

    async fn quiz_candidates(
        &self,
        category_id: i32,
        excluded_ids: &[i32],
    ) -> Result<Vec<Question>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .values()
            .filter(|q| q.category == category_id && !excluded_ids.contains(&q.id))
            .cloned()
            .collect())
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<Question, DbError> {
        let mut tables = self.tables.write().await;
        tables.last_question_id += 1;
        let stored = question.with_id(tables.last_question_id);
        tables.questions.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete_question(&self, id: i32) -> Result<(), DbError> {
        self.tables
            .write()
            .await
            .questions
            .remove(&id)
            .map(|_| ())
            .ok_or(DbError::NotFound)
    }

    async fn insert_category(&self, kind: &str) -> Result<Category, DbError> {
        let mut tables = self.tables.write().await;
        tables.last_category_id += 1;
        let category = Category {
            id: tables.last_category_id,
            kind: kind.to_string(),
        };
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str, category: i32) -> NewQuestion {
        NewQuestion {
            question: text.to_string(),
            answer: "answer".to_string(),
            category,
            difficulty: 1,
        }
    }

    async fn store_with(questions: &[(&str, i32)]) -> MemoryRepository {
        let store = MemoryRepository::new();
        for (text, category) in questions {
            store.insert_question(question(text, *category)).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn ids_are_assigned_in_order_and_never_reused() {
        let store = store_with(&[("a", 1), ("b", 1)]).await;
        store.delete_question(2).await.unwrap();

        let third = store.insert_question(question("c", 1)).await.unwrap();
        assert_eq!(third.id, 3);

        let ids: Vec<_> = store.all_questions().await.unwrap().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn deleting_a_missing_question_is_not_found() {
        let store = store_with(&[("a", 1)]).await;
        assert!(matches!(store.delete_question(42).await, Err(DbError::NotFound)));

        store.delete_question(1).await.unwrap();
        assert!(matches!(store.delete_question(1).await, Err(DbError::NotFound)));
        assert!(store.question_by_id(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let store = store_with(&[
            ("What is your name", 1),
            ("Who painted it?", 2),
            ("So, WHAT now", 3),
        ])
        .await;

        let found = store
            .questions_matching(&QuestionFilter::Search("what".to_string()))
            .await
            .unwrap();
        let ids: Vec<_> = found.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn pages_are_ordered_and_report_full_total() {
        let entries: Vec<(String, i32)> = (1..=23).map(|i| (format!("q{}", i), 1)).collect();
        let store = MemoryRepository::new();
        for (text, category) in &entries {
            store.insert_question(question(text, *category)).await.unwrap();
        }

        let page = store
            .questions_page(&QuestionFilter::All, PageRequest::new(3).unwrap())
            .await
            .unwrap();
        assert_eq!(page.total, 23);
        assert_eq!(page.items.iter().map(|q| q.id).collect::<Vec<_>>(), vec![21, 22, 23]);

        let beyond = store
            .questions_page(&QuestionFilter::All, PageRequest::new(4).unwrap())
            .await
            .unwrap();
        assert!(beyond.is_empty());
        assert_eq!(beyond.total, 23);
    }

    #[tokio::test]
    async fn category_pages_only_count_that_category() {
        let store = store_with(&[("a", 1), ("b", 2), ("c", 1)]).await;
        let page = store
            .questions_page(&QuestionFilter::Category(1), PageRequest::new(1).unwrap())
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert!(page.items.iter().all(|q| q.category == 1));
    }

    #[tokio::test]
    async fn quiz_candidates_skip_excluded_ids_and_other_categories() {
        let store = store_with(&[("a", 1), ("b", 1), ("c", 2), ("d", 1)]).await;

        let candidates = store.quiz_candidates(1, &[2]).await.unwrap();
        assert_eq!(candidates.iter().map(|q| q.id).collect::<Vec<_>>(), vec![1, 4]);

        assert!(store.quiz_candidates(1, &[1, 2, 4]).await.unwrap().is_empty());
        assert_eq!(store.quiz_candidates(2, &[]).await.unwrap().len(), 1);
    }
}
