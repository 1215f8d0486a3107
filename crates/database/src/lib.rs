//! # Trivia Database Crate
//!
//! This crate is the data access layer for trivia questions and categories.
//!
//! ## Architectural Principles
//!
//! - **One contract, two stores:** every handler talks to a [`TriviaStore`].
//!   [`DbRepository`] implements it over PostgreSQL; [`MemoryRepository`]
//!   implements it over process-local tables for tests and demos.
//! - **Single-query operations:** each method is one statement (or a count
//!   plus a page), relying on the database for row-level consistency. There
//!   are no multi-entity transactions.
//! - **Asynchronous & Pooled:** the PostgreSQL store uses a `PgPool` shared by
//!   every request.
//!
//! ## Public API
//!
//! - `connect`: builds the PostgreSQL pool from the database settings.
//! - `run_migrations`: applies the embedded schema migrations.
//! - `open_store`: picks and constructs the configured store.
//! - `seed_default_categories`: inserts the stock category list into an empty store.
//! - `DbError`: the error type returned by every operation.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod memory;
pub mod repository;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use memory::MemoryRepository;
pub use repository::DbRepository;
pub use store::{TriviaStore, open_store, seed_default_categories, DEFAULT_CATEGORIES};
