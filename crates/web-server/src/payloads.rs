//! Typed schemas for every request body and query string the API accepts.
//!
//! Handlers parse into these structs before touching the store, so every
//! malformed request fails in one place with a [`PayloadError`].

use crate::error::ApiError;
use core_types::{NewQuestion, PageRequest};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("request body is empty")]
    EmptyBody,

    #[error("request body is not valid for this operation: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("invalid page parameter: {0}")]
    InvalidPage(String),
}

/// Absent or unreadable bodies are unprocessable; readable bodies that lack
/// required data, and bad page numbers, are reported as not found.
impl From<PayloadError> for ApiError {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::EmptyBody | PayloadError::Malformed(_) => ApiError::unprocessable(err),
            PayloadError::MissingFields(_) | PayloadError::InvalidPage(_) => {
                ApiError::not_found(err)
            }
        }
    }
}

/// Fails with `EmptyBody` if the body holds nothing but whitespace.
pub fn ensure_body(body: &[u8]) -> Result<(), PayloadError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(PayloadError::EmptyBody);
    }
    Ok(())
}

/// Decodes a JSON body into the schema `T`.
pub fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, PayloadError> {
    ensure_body(body)?;
    Ok(serde_json::from_slice(body)?)
}

/// An integer that may also arrive as a numeric string, as HTML form selects send it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LenientInt(pub i32);

impl<'de> Deserialize<'de> for LenientInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(value) => Ok(LenientInt(value)),
            Raw::Text(text) => text
                .trim()
                .parse()
                .map(LenientInt)
                .map_err(|_| de::Error::custom(format!("expected an integer, got {:?}", text))),
        }
    }
}

/// `?page=N` on the listing endpoints. Kept as text so a bad value can be
/// reported as a missing resource instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page_request(&self) -> Result<PageRequest, PayloadError> {
        let raw = self
            .page
            .as_deref()
            .ok_or_else(|| PayloadError::InvalidPage("page is required".to_string()))?;
        let number: u32 = raw
            .trim()
            .parse()
            .map_err(|_| PayloadError::InvalidPage(format!("{:?} is not a page number", raw)))?;
        PageRequest::new(number).map_err(|e| PayloadError::InvalidPage(e.to_string()))
    }
}

/// Body of `POST /questions`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateQuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<LenientInt>,
    pub difficulty: Option<LenientInt>,
}

impl CreateQuestionRequest {
    /// Checks that all four fields are present (a JSON `null` counts as absent).
    pub fn validate(self) -> Result<NewQuestion, PayloadError> {
        match self {
            CreateQuestionRequest {
                question: Some(question),
                answer: Some(answer),
                category: Some(LenientInt(category)),
                difficulty: Some(LenientInt(difficulty)),
            } => Ok(NewQuestion {
                question,
                answer,
                category,
                difficulty,
            }),
            incomplete => {
                let mut missing = Vec::new();
                if incomplete.question.is_none() {
                    missing.push("question");
                }
                if incomplete.answer.is_none() {
                    missing.push("answer");
                }
                if incomplete.category.is_none() {
                    missing.push("category");
                }
                if incomplete.difficulty.is_none() {
                    missing.push("difficulty");
                }
                Err(PayloadError::MissingFields(missing))
            }
        }
    }
}

/// Body of `POST /searchQuestions`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
}

impl SearchRequest {
    pub fn validate(self) -> Result<String, PayloadError> {
        self.search_term
            .ok_or_else(|| PayloadError::MissingFields(vec!["searchTerm"]))
    }
}

/// Body of `POST /quizzes`. Both fields are required.
#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub previous_questions: Vec<i32>,
    pub quiz_category: QuizCategory,
}

#[derive(Debug, Deserialize)]
pub struct QuizCategory {
    pub id: LenientInt,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_bodies_are_empty() {
        assert!(matches!(ensure_body(b""), Err(PayloadError::EmptyBody)));
        assert!(matches!(ensure_body(b"  \n"), Err(PayloadError::EmptyBody)));
        assert!(ensure_body(b"{}").is_ok());
    }

    #[test]
    fn missing_fields_are_listed() {
        let request: CreateQuestionRequest =
            parse_body(br#"{"question":"q","answer":"a","category":1}"#).unwrap();
        match request.validate() {
            Err(PayloadError::MissingFields(fields)) => assert_eq!(fields, vec!["difficulty"]),
            other => panic!("expected missing fields, got {:?}", other),
        }
    }

    #[test]
    fn null_counts_as_missing() {
        let request: CreateQuestionRequest = parse_body(
            br#"{"question":"q","answer":null,"category":1,"difficulty":2}"#,
        )
        .unwrap();
        assert!(matches!(
            request.validate(),
            Err(PayloadError::MissingFields(fields)) if fields == vec!["answer"]
        ));
    }

    #[test]
    fn numeric_strings_are_accepted_for_integer_fields() {
        let request: CreateQuestionRequest = parse_body(
            br#"{"question":"q","answer":"a","category":"3","difficulty":2}"#,
        )
        .unwrap();
        let question = request.validate().unwrap();
        assert_eq!(question.category, 3);
        assert_eq!(question.difficulty, 2);
    }

    #[test]
    fn ill_typed_fields_are_malformed() {
        let parsed = parse_body::<CreateQuestionRequest>(
            br#"{"question":"q","answer":"a","category":1,"difficulty":"hard"}"#,
        );
        assert!(matches!(parsed, Err(PayloadError::Malformed(_))));
    }

    #[test]
    fn page_query_requires_a_positive_integer() {
        let page = |raw: Option<&str>| PageQuery {
            page: raw.map(str::to_string),
        }
        .page_request();

        assert_eq!(page(Some("2")).unwrap().number(), 2);
        assert!(page(None).is_err());
        assert!(page(Some("abc")).is_err());
        assert!(page(Some("0")).is_err());
        assert!(page(Some("-1")).is_err());
    }

    #[test]
    fn quiz_request_needs_both_fields() {
        assert!(parse_body::<QuizRequest>(br#"{"previous_questions":[]}"#).is_err());

        let request: QuizRequest = parse_body(
            br#"{"previous_questions":[1,2],"quiz_category":{"type":"Science","id":"1"}}"#,
        )
        .unwrap();
        assert_eq!(request.quiz_category.id, LenientInt(1));
        assert_eq!(request.previous_questions, vec![1, 2]);
    }

    #[test]
    fn payload_errors_map_to_the_two_outward_errors() {
        assert!(matches!(
            ApiError::from(PayloadError::EmptyBody),
            ApiError::Unprocessable(_)
        ));
        assert!(matches!(
            ApiError::from(PayloadError::MissingFields(vec!["answer"])),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(PayloadError::InvalidPage("x".to_string())),
            ApiError::NotFound(_)
        ));
    }
}
