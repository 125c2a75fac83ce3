//! trivia-source — Question sources and configuration.
//!
//! Implements the `QuestionSource` trait against Open Trivia DB, plus a mock
//! source for tests, and loads the quiz configuration.

pub mod config;
pub mod mock;
pub mod opentdb;

pub use config::{create_source, load_config, TriviaConfig};
pub use opentdb::OpenTdbSource;
pub use trivia_core::error::FetchError;
