//! User account repository contracts and graph-backed implementation.
//!
//! # Responsibility
//! - Create a user together with its three task buckets atomically.
//! - Authenticate user id + password into a three-way outcome.
//!
//! # Invariants
//! - The three Task buckets are created exactly once, at registration,
//!   in the same write batch as the User node.
//! - `user_id` uniqueness is enforced by the store schema; a duplicate
//!   registration is rejected, never silently doubled.

use crate::model::entities::{labels, rels, Category, UserProfile, ValidationError};
use crate::repo::{RepoError, RepoResult};
use crate::store::{GraphStore, NodeMatch, NodeRecord, NodeRef, PathQuery, PropValue, StoreError, WriteOp};

/// Result of an authentication attempt. Callers must branch on all three.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// No account exists for the user id.
    NotFound,
    /// The account exists but the password does not match.
    WrongPassword,
    /// Credentials match; carries the stored profile.
    Ok(UserProfile),
}

/// Repository interface for account operations.
pub trait UserRepository {
    /// Registers a user and its three empty task buckets.
    fn create_user(&mut self, name: &str, age: i64, user_id: &str, password: &str)
        -> RepoResult<()>;
    /// Checks credentials without treating a mismatch as an error.
    fn authenticate(&self, user_id: &str, password: &str) -> RepoResult<AuthOutcome>;
}

/// Graph-backed account repository.
pub struct GraphUserRepository<'store> {
    store: &'store mut GraphStore,
}

impl<'store> GraphUserRepository<'store> {
    pub fn new(store: &'store mut GraphStore) -> Self {
        Self { store }
    }
}

impl UserRepository for GraphUserRepository<'_> {
    fn create_user(
        &mut self,
        name: &str,
        age: i64,
        user_id: &str,
        password: &str,
    ) -> RepoResult<()> {
        if user_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("user_id").into());
        }

        let mut ops = vec![WriteOp::CreateNode {
            label: labels::USER.to_string(),
            props: [
                ("name".to_string(), PropValue::from(name)),
                ("age".to_string(), PropValue::from(age)),
                ("user_id".to_string(), PropValue::from(user_id)),
                ("password".to_string(), PropValue::from(password)),
            ]
            .into_iter()
            .collect(),
        }];
        for (slot, category) in Category::ALL.iter().enumerate() {
            ops.push(WriteOp::CreateNode {
                label: labels::TASK.to_string(),
                props: [("type".to_string(), PropValue::from(category.as_db()))]
                    .into_iter()
                    .collect(),
            });
            ops.push(WriteOp::CreateEdge {
                src: NodeRef::Created(0),
                rel: rels::HAS_TASK.to_string(),
                dst: NodeRef::Created(slot + 1),
            });
        }

        self.store.execute_write(&ops).map_err(|err| match err {
            StoreError::Constraint(_) => RepoError::DuplicateUser(user_id.to_string()),
            other => RepoError::Store(other),
        })
    }

    fn authenticate(&self, user_id: &str, password: &str) -> RepoResult<AuthOutcome> {
        let query = PathQuery::new(NodeMatch::label(labels::USER).with_prop("user_id", user_id));
        let users = self.store.execute(&query)?;
        let Some(user) = users.first() else {
            return Ok(AuthOutcome::NotFound);
        };

        if text_prop(user, "password")? != password {
            return Ok(AuthOutcome::WrongPassword);
        }

        Ok(AuthOutcome::Ok(UserProfile {
            name: text_prop(user, "name")?.to_string(),
            age: int_prop(user, "age")?,
        }))
    }
}

fn text_prop<'a>(record: &'a NodeRecord, key: &str) -> RepoResult<&'a str> {
    record
        .prop(key)
        .and_then(PropValue::as_text)
        .ok_or_else(|| {
            RepoError::InvalidData(format!(
                "node {} misses text property `{key}`",
                record.id
            ))
        })
}

fn int_prop(record: &NodeRecord, key: &str) -> RepoResult<i64> {
    record.prop(key).and_then(PropValue::as_int).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "node {} misses integer property `{key}`",
            record.id
        ))
    })
}
