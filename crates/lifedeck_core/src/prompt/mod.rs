//! Prompt generation entry points.
//!
//! # Responsibility
//! - Merge a subcategory template with selected entries as context.
//! - Synthesize default templates for new subcategories.
//!
//! # Invariants
//! - All functions are pure and infallible.

pub mod generator;
pub mod templates;
