pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod normalizer;
pub mod query;
pub mod types;
pub mod web;

pub use error::{FeedError, Result};
