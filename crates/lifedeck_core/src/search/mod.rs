//! In-memory entry search.
//!
//! # Responsibility
//! - Filter and rank entries by query text and structured filters.
//! - Shape result previews (snippets, match highlighting).
//!
//! # Invariants
//! - Inputs are never mutated; results are owned copies.
//! - Nothing in this module can fail.

pub mod engine;
pub mod preview;
