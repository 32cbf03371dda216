//! In-memory conversation memory.
//!
//! - **types** — [`Role`] and [`Turn`], the unit of conversation history.
//! - **store** — [`SessionStore`], session id → ordered turns, with
//!   per-session serialization and optional least-recently-used eviction.
//!
//! Nothing here survives a restart.

pub mod store;
pub mod types;

pub use store::{window, MemoryError, SessionHandle, SessionStore};
pub use types::{Role, Turn};
