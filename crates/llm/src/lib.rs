//! LLM integration crate for the notice generator.
//!
//! Provides a provider-agnostic [`LlmClient`] trait and the Gemini
//! `generateContent` implementation used to render notices.
//!
//! # Example
//! ```no_run
//! use notice_llm::{LlmClient, LlmRequest, GeminiClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new("api-key");
//! let request = LlmRequest::new("SCHOOL NOTICE DETAILS: ...", "gemma-3-12b-it")
//!     .with_system("You are a professional administrative assistant for a school.");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::GeminiClient;
