//! Core domain logic for Planbook, a personal task-graph assistant.
//!
//! Three task buckets (shopping items, travel destinations, work items)
//! are stored as a property graph; free-text prompts are classified by
//! keyword rules, translated into graph queries and rendered as
//! human-readable answer lines. This crate is the single source of truth
//! for business invariants.

pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entities::{
    Category, Deadline, Item, OfficeWork, ParseError, Place, Priority, UserProfile,
    ValidationError,
};
pub use query::{build_query, classify, interpret, Answer, CategoryRows, Intent};
pub use repo::bucket_repo::{BucketRepository, GraphBucketRepository};
pub use repo::user_repo::{AuthOutcome, GraphUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use service::account_service::{AccountService, RegisterRequest};
pub use service::assistant_service::{AskError, AskResult, AssistantService};
pub use service::bucket_service::BucketService;
pub use store::{GraphStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
