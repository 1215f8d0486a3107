pub mod enums;
pub mod error;
pub mod pagination;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::QuestionFilter;
pub use error::CoreError;
pub use pagination::{Page, PageRequest, QUESTIONS_PER_PAGE};
pub use structs::{Category, NewQuestion, Question};
