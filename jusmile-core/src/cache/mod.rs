//! Offline response cache.
//!
//! Responses are stored byte-for-byte per request identity inside a named
//! generation. Exactly one generation is active. A new generation is filled
//! while the old one keeps serving, then activated, and only after that are
//! older generations deleted.

mod client;
mod offline;

pub use client::OfflineClient;
pub use offline::{OfflineCache, DEFAULT_GENERATION};
