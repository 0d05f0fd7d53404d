//! Gemini provider integration for Audita.
//!
//! This crate owns the request/response contract with the hosted model:
//! the [`gemini::GeminiClient`] issues a single grounded `generateContent`
//! call, [`schema`] declares the structured output shape once (consumed both
//! for request construction and response validation), and [`prompt`] holds
//! the versioned instruction template.
//!
//! # Examples
//! ```no_run
//! use audita_llm::gemini::GeminiClient;
//! use audita_llm::{prompt, schema};
//!
//! # #[tokio::main]
//! # async fn main() -> audita_common::Result<()> {
//! let client = GeminiClient::new("api-key".into(), audita_llm::DEFAULT_GEMINI_MODEL.into())?;
//! let response = client
//!     .generate_grounded(&prompt::analysis_prompt("acme"), &schema::analysis_schema())
//!     .await?;
//! assert!(!response.text.is_empty());
//! # Ok(())
//! # }
//! ```
pub mod gemini;
pub mod prompt;
pub mod schema;

/// Default model for audit generation. Needs web-search grounding support.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-pro-preview";
