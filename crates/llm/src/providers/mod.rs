//! LLM provider implementations.

pub mod gemini;

pub use gemini::{GeminiClient, DEFAULT_GEMINI_ENDPOINT};
