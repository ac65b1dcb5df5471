// src/lib.rs

//! Community Digest Library
//!
//! Scrapes the discussion board of a stock on the finance portal, ranks the
//! posts by engagement and caches the digest per stock code.

pub mod error;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
