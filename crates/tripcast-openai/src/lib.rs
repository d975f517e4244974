//! Chat completions client for the tripcast demo
//!
//! Covers the non-streaming subset of the OpenAI chat API the demo needs:
//! chat requests with optional function tools, typed responses, and raw
//! tool-call payloads for local execution.
//!
//! # Example
//!
//! ```rust,no_run
//! use tripcast_openai::OpenAi;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenAi::new("your-api-key");
//!
//!     let request = client
//!         .chat()
//!         .model("gpt-4o-mini")
//!         .system_message("You are a travel assistant.")
//!         .user_message("What should I pack for Tokyo in December?")
//!         .build();
//!
//!     let response = client.send(&request).await?;
//!     println!("{}", response.content().unwrap_or("No content"));
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod message;
pub mod model;
pub mod request;
pub mod response;
pub mod tool;

// Re-export main types
pub use client::OpenAi;
pub use error::OpenAiRequestError;
pub use message::{Message, Role};
pub use model::Model;
pub use request::ChatRequest;
pub use response::{ChatResponse, Choice, Usage};
pub use tool::{FunctionCall, Tool, ToolCall, ToolFunction};
