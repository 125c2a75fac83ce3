//! trivia-core — Adaptive question sequencing, difficulty control and scoring.
//!
//! This crate defines the data model, the source/presentation traits, and the
//! quiz engine that the rest of the trivia workspace builds on.

pub mod bank;
pub mod difficulty;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod host;
pub mod ledger;
pub mod model;
pub mod traits;

pub use error::{FetchError, QuizError};
