//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and query-pipeline calls into caller-facing
//!   APIs (register/login, bucket edits, ask).
//! - Keep CLI callers decoupled from storage details.

pub mod account_service;
pub mod assistant_service;
pub mod bucket_service;
