//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate state transitions and persistence into use-case APIs.
//! - Keep shells decoupled from storage details.

pub mod app_service;
