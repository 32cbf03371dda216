//! Comms subsystem — the external HTTP surface.
//!
//! [`CommsState`] is the capability boundary: the axum channel reaches the
//! chat gateway and the lookups only through its typed methods.

pub mod axum_channel;
mod state;

pub use axum_channel::{build_router, serve};
pub use state::CommsState;
