//! Subsystems behind the HTTP surface.
//!
//! - **enrichment** — keyword-triggered lookups that add real-world data.
//! - **memory** — per-session conversation history.
//! - **chat** — the gateway tying enrichment, memory and the LLM together.
//! - **comms** — axum HTTP channel.

pub mod chat;
pub mod comms;
pub mod enrichment;
pub mod memory;
