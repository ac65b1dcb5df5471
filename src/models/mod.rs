// src/models/mod.rs

//! Domain models for the digest service.

mod board;
mod config;
mod digest;
mod post;

// Re-export all public types
pub use board::BoardId;
pub use config::{BoardLayout, CleaningConfig, Config, DigestConfig, PortalConfig, Replacement};
pub use digest::{Digest, DigestResponse};
pub use post::Post;
