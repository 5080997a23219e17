//! Account use-case service.
//!
//! # Responsibility
//! - Validate registration input at the caller boundary.
//! - Delegate account persistence to the user repository.
//!
//! # Invariants
//! - Registration never reaches the store with empty name/id/password
//!   or a non-positive age.

use crate::model::entities::ValidationError;
use crate::repo::user_repo::{AuthOutcome, UserRepository};
use crate::repo::RepoResult;
use log::info;

/// Request model for registering a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    pub name: String,
    pub age: i64,
    pub user_id: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("user_id"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::EmptyField("password"));
        }
        if self.age <= 0 {
            return Err(ValidationError::NonPositiveAge(self.age));
        }
        Ok(())
    }
}

/// Use-case service for registration and login.
pub struct AccountService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> AccountService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new user with its three empty task buckets.
    pub fn register(&mut self, request: &RegisterRequest) -> RepoResult<()> {
        request.validate()?;
        let result = self.repo.create_user(
            &request.name,
            request.age,
            &request.user_id,
            &request.password,
        );
        info!(
            "event=register module=service status={}",
            if result.is_ok() { "ok" } else { "error" }
        );
        result
    }

    /// Checks credentials; a mismatch is an outcome, not an error.
    pub fn login(&self, user_id: &str, password: &str) -> RepoResult<AuthOutcome> {
        let outcome = self.repo.authenticate(user_id, password)?;
        info!(
            "event=login module=service outcome={}",
            match &outcome {
                AuthOutcome::NotFound => "not_found",
                AuthOutcome::WrongPassword => "wrong_password",
                AuthOutcome::Ok(_) => "ok",
            }
        );
        Ok(outcome)
    }
}
