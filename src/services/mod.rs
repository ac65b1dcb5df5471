//! Service layer for the digest pipeline.
//!
//! - Page fetching (`BoardFetcher` behind `PageSource`)
//! - Post extraction (`BoardExtractor` behind `PostExtractor`)
//! - Ranking (`Ranker`)

mod extractor;
mod fetcher;
mod ranker;

pub use extractor::{BoardExtractor, PostExtractor};
pub use fetcher::{BoardFetcher, PageSource};
pub use ranker::Ranker;
