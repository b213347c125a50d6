//! AI flows behind a portfolio site's image generator and project recommender
//!
//! Each flow validates its input, calls a hosted Gemini model, and normalizes
//! the model's output into a typed result.

pub mod ai;
pub mod app;
pub mod catalog;
pub mod error;
pub mod flows;
pub mod models;
pub mod prompts;

pub use error::{Error, Result, ValidationError};
