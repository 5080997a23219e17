//! Task bucket entities and the graph vocabulary they live in.
//!
//! # Responsibility
//! - Define `Item`/`Place`/`OfficeWork` records with their validation rules.
//! - Provide strict parsing for priorities and deadlines.
//!
//! # Invariants
//! - Quantities are strictly positive, costs are non-negative.
//! - Deadlines parse only from well-formed `DD-MM-YYYY` input.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Node labels used by the task graph schema.
pub mod labels {
    pub const USER: &str = "User";
    pub const TASK: &str = "Task";
    pub const ITEM: &str = "Item";
    pub const PLACE: &str = "Place";
    pub const OFFICE_WORK: &str = "Office_Work";
}

/// Relationship types used by the task graph schema.
pub mod rels {
    pub const HAS_TASK: &str = "HAS_TASK";
    pub const CONTAINS: &str = "CONTAINS";
    pub const INCLUDES: &str = "INCLUDES";
    pub const REQUIRED: &str = "REQUIRED";
}

/// The three fixed task buckets every user owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Shopping,
    Travel,
    Work,
}

impl Category {
    /// All categories, in registration order.
    pub const ALL: [Category; 3] = [Category::Shopping, Category::Travel, Category::Work];

    /// Value stored in the Task node's `type` property.
    pub fn as_db(self) -> &'static str {
        match self {
            Self::Shopping => "Shopping",
            Self::Travel => "Travel",
            Self::Work => "Work",
        }
    }

    /// Label of the leaf nodes attached to this bucket.
    pub fn leaf_label(self) -> &'static str {
        match self {
            Self::Shopping => labels::ITEM,
            Self::Travel => labels::PLACE,
            Self::Work => labels::OFFICE_WORK,
        }
    }

    /// Relationship type linking the bucket to its leaf nodes.
    pub fn leaf_rel(self) -> &'static str {
        match self {
            Self::Shopping => rels::CONTAINS,
            Self::Travel => rels::INCLUDES,
            Self::Work => rels::REQUIRED,
        }
    }

    /// Property that keys removal within this bucket.
    pub fn key_prop(self) -> &'static str {
        match self {
            Self::Shopping => "item_name",
            Self::Travel => "city",
            Self::Work => "work_title",
        }
    }
}

/// Strict parse failure for user-typed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Value is not a well-formed `DD-MM-YYYY` calendar date.
    InvalidDeadline(String),
    /// No `DD-MM-YYYY` date could be found in the prompt.
    MissingDeadline,
    /// Value is not one of HIGH/MEDIUM/LOW.
    InvalidPriority(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDeadline(value) => {
                write!(f, "invalid deadline `{value}`; expected DD-MM-YYYY")
            }
            Self::MissingDeadline => write!(f, "no DD-MM-YYYY deadline found in prompt"),
            Self::InvalidPriority(value) => {
                write!(f, "invalid priority `{value}`; expected HIGH, MEDIUM or LOW")
            }
        }
    }
}

impl Error for ParseError {}

/// Work priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Value stored in the Office_Work node's `priority` property.
    pub fn as_db(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }

    /// Lowercase word used in rendered answer lines.
    pub fn as_word(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Strict parse; accepts any letter case, rejects everything else.
    pub fn parse(value: &str) -> Result<Self, ParseError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Ok(Self::High),
            "MEDIUM" => Ok(Self::Medium),
            "LOW" => Ok(Self::Low),
            _ => Err(ParseError::InvalidPriority(value.to_string())),
        }
    }
}

/// Calendar deadline in `DD-MM-YYYY` form, ordered by date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Deadline(NaiveDate);

impl Deadline {
    /// Strict parse of `DD-MM-YYYY` (numeric month, real calendar date).
    pub fn parse(value: &str) -> Result<Self, ParseError> {
        NaiveDate::parse_from_str(value.trim(), "%d-%m-%Y")
            .map(Self)
            .map_err(|_| ParseError::InvalidDeadline(value.to_string()))
    }

    /// Underlying calendar date.
    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl Display for Deadline {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%d-%m-%Y"))
    }
}

/// Validation failure raised before any write reaches the store.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyField(&'static str),
    NonPositiveQuantity(i64),
    NegativeCost(f64),
    NonPositiveAge(i64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} must not be empty"),
            Self::NonPositiveQuantity(value) => {
                write!(f, "quantity must be positive, got {value}")
            }
            Self::NegativeCost(value) => {
                write!(f, "estimated cost must be non-negative, got {value}")
            }
            Self::NonPositiveAge(value) => write!(f, "age must be positive, got {value}"),
        }
    }
}

impl Error for ValidationError {}

/// Shopping list entry. Names are not unique; duplicates are permitted.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub item_name: String,
    pub quantity: i64,
    pub unit: String,
}

impl Item {
    pub fn new(item_name: impl Into<String>, quantity: i64, unit: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            quantity,
            unit: unit.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.item_name.trim().is_empty() {
            return Err(ValidationError::EmptyField("item_name"));
        }
        if self.quantity <= 0 {
            return Err(ValidationError::NonPositiveQuantity(self.quantity));
        }
        Ok(())
    }
}

/// Travel destination entry, keyed by city.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub city: String,
    pub country: String,
    pub estimated_cost: f64,
}

impl Place {
    pub fn new(city: impl Into<String>, country: impl Into<String>, estimated_cost: f64) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
            estimated_cost,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.city.trim().is_empty() {
            return Err(ValidationError::EmptyField("city"));
        }
        if self.estimated_cost < 0.0 {
            return Err(ValidationError::NegativeCost(self.estimated_cost));
        }
        Ok(())
    }
}

/// Work bucket entry, keyed by title.
#[derive(Debug, Clone, PartialEq)]
pub struct OfficeWork {
    pub work_title: String,
    pub priority: Priority,
    pub deadline: Deadline,
}

impl OfficeWork {
    pub fn new(work_title: impl Into<String>, priority: Priority, deadline: Deadline) -> Self {
        Self {
            work_title: work_title.into(),
            priority,
            deadline,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.work_title.trim().is_empty() {
            return Err(ValidationError::EmptyField("work_title"));
        }
        Ok(())
    }
}

/// Payload of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub age: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_parses_and_renders_dd_mm_yyyy() {
        let deadline = Deadline::parse("01-05-2025").unwrap();
        assert_eq!(deadline.to_string(), "01-05-2025");
    }

    #[test]
    fn deadline_rejects_malformed_input() {
        for value in ["2025-05-01", "32-01-2025", "01-13-2025", "soon", ""] {
            assert!(matches!(
                Deadline::parse(value),
                Err(ParseError::InvalidDeadline(_))
            ));
        }
    }

    #[test]
    fn deadlines_order_by_calendar_date() {
        let earlier = Deadline::parse("01-01-2025").unwrap();
        let later = Deadline::parse("01-05-2025").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn priority_parse_is_case_insensitive_but_strict() {
        assert_eq!(Priority::parse("high").unwrap(), Priority::High);
        assert_eq!(Priority::parse(" Medium ").unwrap(), Priority::Medium);
        assert!(matches!(
            Priority::parse("urgent"),
            Err(ParseError::InvalidPriority(_))
        ));
    }

    #[test]
    fn item_validation_rejects_non_positive_quantity() {
        let item = Item::new("milk", 0, "l");
        assert!(matches!(
            item.validate(),
            Err(ValidationError::NonPositiveQuantity(0))
        ));
        assert!(Item::new("milk", 2, "l").validate().is_ok());
    }

    #[test]
    fn place_validation_rejects_negative_cost() {
        let place = Place::new("Rome", "Italy", -1.0);
        assert!(matches!(
            place.validate(),
            Err(ValidationError::NegativeCost(_))
        ));
    }

    #[test]
    fn category_vocabulary_matches_schema() {
        assert_eq!(Category::Shopping.leaf_rel(), rels::CONTAINS);
        assert_eq!(Category::Travel.leaf_rel(), rels::INCLUDES);
        assert_eq!(Category::Work.leaf_rel(), rels::REQUIRED);
        assert_eq!(Category::Work.leaf_label(), labels::OFFICE_WORK);
        assert_eq!(Category::Travel.key_prop(), "city");
    }
}
