//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory,
//! then applies `PORT`, `OMNIBOT_LOG_LEVEL` and `LLM_API_KEY` overrides.
//!
//! # Module layout
//!
//! - **types** — Public configuration structs (`Config`, `LlmConfig`,
//!   `ChatConfig`, `EnrichmentConfig`, …).
//! - **raw** — Raw TOML deserialization types. These mirror the file shape
//!   and carry every default; kept private.
//! - **load** — `merge_toml`, `load_raw_merged`, `load`, `load_from`.

mod load;
mod raw;
mod types;

pub use load::{defaults, load, load_from};
pub use types::*;
