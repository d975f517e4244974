//! Weather-aware trip planning smoke test.
//!
//! Sends a fixed trip-planning prompt to a chat-completion endpoint with
//! a local `get_weather` stub offered as a tool, resolves at most one
//! round of tool calls, and records the exchange (config, code snapshot,
//! prompts, answer, one trace event) against a tracking backend.

pub mod agent;
pub mod config;
pub mod recorder;
pub mod weather;
