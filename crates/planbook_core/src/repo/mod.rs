//! Repository layer over the graph store.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for users and buckets.
//! - Isolate graph query/write details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce entity `validate()` before persistence.
//! - Repository APIs return semantic errors (`DuplicateUser`,
//!   `UserNotFound`) in addition to store transport errors.

use crate::model::entities::ValidationError;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod bucket_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by user and bucket operations.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    Validation(ValidationError),
    /// Registration rejected: the user id already exists.
    DuplicateUser(String),
    /// The owning user (and thus its bucket) does not exist.
    UserNotFound(String),
    /// Persisted node cannot be decoded into a domain entity.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateUser(user_id) => write!(f, "user id already registered: {user_id}"),
            Self::UserNotFound(user_id) => write!(f, "user not found: {user_id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted entity: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::DuplicateUser(_) => None,
            Self::UserNotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
