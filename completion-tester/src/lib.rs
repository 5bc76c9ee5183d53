//! Submit a chat completion to the OpenAI API and present the result.
//!
//! The library chooses between the standard and reasoning request dialects
//! from a fixed model catalog, performs a single call, and maps the outcome
//! onto a display model. `main.rs` is a thin command-line front end.

pub mod catalog;
pub mod config;
pub mod error;
pub mod llm;
pub mod presenter;
