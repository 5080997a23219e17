//! Prompt pipeline: intent classification, query generation and result
//! interpretation.
//!
//! # Responsibility
//! - Turn a free-text prompt into a read-only graph query.
//! - Turn the raw result set plus the original prompt into answer lines.
//!
//! # Invariants
//! - Classification is keyword membership only; no further NLU.
//! - Intent priority is fixed: shopping > travel > work.
//! - An empty result set yields a distinct no-records signal, never an
//!   empty line list.

pub mod builder;
pub mod classifier;
pub mod interpreter;

pub use builder::build_query;
pub use classifier::{classify, Intent};
pub use interpreter::{interpret, Answer, CategoryRows};
