//! Read-query generation for classified intents.
//!
//! # Responsibility
//! - Produce the category traversal fetching every leaf node of the
//!   intent's bucket for one user.
//!
//! # Invariants
//! - Built queries never filter beyond the category; all secondary
//!   filtering happens in the interpreter.
//! - `Unknown` yields no query.

use crate::model::entities::{labels, rels, Category};
use crate::query::classifier::Intent;
use crate::store::{NodeMatch, PathQuery};

/// Builds the read query for a classified intent, or `None` for `Unknown`.
pub fn build_query(intent: Intent, user_id: &str) -> Option<PathQuery> {
    intent
        .category()
        .map(|category| category_query(user_id, category))
}

/// Traversal `User{user_id} -HAS_TASK-> Task{type} -rel-> leaf` returning
/// every leaf node of the category.
pub fn category_query(user_id: &str, category: Category) -> PathQuery {
    PathQuery::new(NodeMatch::label(labels::USER).with_prop("user_id", user_id))
        .hop(
            rels::HAS_TASK,
            NodeMatch::label(labels::TASK).with_prop("type", category.as_db()),
        )
        .hop(category.leaf_rel(), NodeMatch::label(category.leaf_label()))
}
