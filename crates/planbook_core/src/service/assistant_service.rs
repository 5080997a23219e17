//! Free-text ask pipeline: classify, query, interpret.
//!
//! # Responsibility
//! - Turn one prompt into a graph query, execute it, and render the
//!   filtered/aggregated answer lines.
//!
//! # Invariants
//! - One prompt is fully classified, queried and rendered before the
//!   next is accepted (synchronous request/response).
//! - Errors are surfaced, never swallowed; retry policy is the caller's
//!   concern.

use crate::model::entities::{Category, ParseError};
use crate::query::classifier::{classify, Intent};
use crate::query::interpreter::{interpret, Answer, CategoryRows};
use crate::repo::bucket_repo::{decode_item, decode_place, decode_work};
use crate::repo::RepoError;
use crate::store::{GraphStore, NodeRecord};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AskResult = Result<Answer, AskError>;

/// Error taxonomy of the ask pipeline.
#[derive(Debug)]
pub enum AskError {
    /// Intent classification found no matching category.
    NotUnderstood,
    /// The prompt carried a malformed numeric/date filter.
    Parse(ParseError),
    /// Query execution or row decoding failed.
    Repo(RepoError),
}

impl Display for AskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotUnderstood => write!(f, "prompt matched no known question category"),
            Self::Parse(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AskError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotUnderstood => None,
            Self::Parse(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ParseError> for AskError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<RepoError> for AskError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Read-only ask service over the graph store.
pub struct AssistantService<'store> {
    store: &'store GraphStore,
}

impl<'store> AssistantService<'store> {
    pub fn new(store: &'store GraphStore) -> Self {
        Self { store }
    }

    /// Answers one free-text prompt for an authenticated user.
    pub fn ask(&self, user_id: &str, prompt: &str) -> AskResult {
        let intent = classify(prompt);
        let Some(query) = crate::query::builder::build_query(intent, user_id) else {
            info!("event=ask module=service intent=unknown status=not_understood");
            return Err(AskError::NotUnderstood);
        };

        let records = self
            .store
            .execute(&query)
            .map_err(RepoError::Store)
            .map_err(AskError::Repo)?;
        let rows = decode_rows(intent, records)?;
        let answer = interpret(prompt, &rows)?;

        info!(
            "event=ask module=service intent={} status=ok lines={}",
            intent_name(intent),
            match &answer {
                Answer::Lines(lines) => lines.len(),
                Answer::NoRecords => 0,
            }
        );
        Ok(answer)
    }
}

fn decode_rows(intent: Intent, records: Vec<NodeRecord>) -> Result<CategoryRows, AskError> {
    // `ask` only calls this for classified intents.
    let category = intent.category().ok_or(AskError::NotUnderstood)?;
    let rows = match category {
        Category::Shopping => CategoryRows::Shopping(
            records
                .iter()
                .map(decode_item)
                .collect::<Result<_, _>>()
                .map_err(AskError::Repo)?,
        ),
        Category::Travel => CategoryRows::Travel(
            records
                .iter()
                .map(decode_place)
                .collect::<Result<_, _>>()
                .map_err(AskError::Repo)?,
        ),
        Category::Work => CategoryRows::Work(
            records
                .iter()
                .map(decode_work)
                .collect::<Result<_, _>>()
                .map_err(AskError::Repo)?,
        ),
    };
    Ok(rows)
}

fn intent_name(intent: Intent) -> &'static str {
    match intent {
        Intent::ShoppingQuery => "shopping",
        Intent::TravelQuery => "travel",
        Intent::WorkQuery => "work",
        Intent::Unknown => "unknown",
    }
}
