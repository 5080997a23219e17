//! Domain model for the personal task graph.
//!
//! # Responsibility
//! - Define the entities stored in the three task buckets.
//! - Name the graph vocabulary (node labels, relationship types).
//!
//! # Invariants
//! - Every bucket entry is reachable only through its owner's single
//!   Task node of the matching category.
//! - Write paths must call `validate()` before persistence.

pub mod entities;
