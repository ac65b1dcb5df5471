//! Pipeline entry points.
//!
//! - `DigestPipeline`: cache-backed fetch, extract and rank for one board

pub mod digest;

pub use digest::DigestPipeline;
