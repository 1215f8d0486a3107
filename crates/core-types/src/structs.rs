use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A trivia question as stored in the `questions` table.
///
/// The serialized form of this struct is the "formatted" representation
/// returned by the API: every column, flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub answer: String,
    /// Id of a `Category`, stored by value and not enforced as a foreign key.
    pub category: i32,
    pub difficulty: i32,
}

/// A question category as stored in the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i32,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
}

/// A question that has not been persisted yet; the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

impl NewQuestion {
    /// Attaches a store-assigned id, producing the persisted form.
    pub fn with_id(self, id: i32) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_serializes_label_as_type() {
        let category = Category { id: 1, kind: "Science".to_string() };
        assert_eq!(
            serde_json::to_value(&category).unwrap(),
            json!({ "id": 1, "type": "Science" })
        );
    }

    #[test]
    fn question_formatted_form_has_every_attribute() {
        let question = NewQuestion {
            question: "What is your name".to_string(),
            answer: "test".to_string(),
            category: 1,
            difficulty: 2,
        }
        .with_id(7);

        assert_eq!(
            serde_json::to_value(&question).unwrap(),
            json!({
                "id": 7,
                "question": "What is your name",
                "answer": "test",
                "category": 1,
                "difficulty": 2
            })
        );
    }
}
