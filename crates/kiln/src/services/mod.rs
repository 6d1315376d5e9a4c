// File: src/services/mod.rs
// Purpose: Framework services built from configuration

pub mod cache;

pub use cache::{CacheError, CacheManager};
