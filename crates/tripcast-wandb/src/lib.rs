//! Minimal client for a Weights & Biases style tracking backend
//!
//! Covers the run lifecycle the tripcast demo needs: run creation with a
//! config record, key/value log records, a code snapshot upload, a finish
//! marker, and one-shot trace events for recorded operation calls.
//!
//! # Example
//!
//! ```rust,no_run
//! use tripcast_wandb::{RunInit, Wandb};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Wandb::from_env()?;
//!
//!     let run = client
//!         .init_run(
//!             RunInit::builder()
//!                 .entity("acme")
//!                 .project("demo")
//!                 .job_type("smoke-test")
//!                 .config(serde_json::json!({"model": "gpt-4o-mini"}))
//!                 .build(),
//!         )
//!         .await?;
//!
//!     run.log(&serde_json::json!({"answer": "42"})).await?;
//!     run.finish().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod run;
pub mod snapshot;
pub mod trace;

// Re-export main types
pub use client::Wandb;
pub use error::WandbRequestError;
pub use run::{Run, RunInit};
pub use snapshot::{CodeSnapshot, SnapshotFile};
pub use trace::TraceEvent;
