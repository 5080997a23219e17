//! Keyword-based intent classification.
//!
//! # Responsibility
//! - Map a lowercased free-text prompt to one query intent.
//!
//! # Invariants
//! - Rules are evaluated top-down; the first matching category wins.
//! - A prompt matching no rule classifies as `Unknown`.

use crate::model::entities::Category;

/// Classified category of a free-text prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    ShoppingQuery,
    TravelQuery,
    WorkQuery,
    Unknown,
}

impl Intent {
    /// Bucket this intent queries, when it is not `Unknown`.
    pub fn category(self) -> Option<Category> {
        match self {
            Self::ShoppingQuery => Some(Category::Shopping),
            Self::TravelQuery => Some(Category::Travel),
            Self::WorkQuery => Some(Category::Work),
            Self::Unknown => None,
        }
    }
}

const SHOPPING_KEYWORDS: &[&str] = &["item", "shop", "amount"];
const TRAVEL_KEYWORDS: &[&str] = &[
    "spot",
    "city",
    "travelling",
    "destination",
    "vacation",
    "cities",
    "place",
];
const WORK_KEYWORDS: &[&str] = &["work", "task", "office", "job"];

/// Ordered classification rules. Order encodes the disambiguation policy
/// for prompts matching several keyword sets: shopping > travel > work.
pub const INTENT_RULES: &[(&[&str], Intent)] = &[
    (SHOPPING_KEYWORDS, Intent::ShoppingQuery),
    (TRAVEL_KEYWORDS, Intent::TravelQuery),
    (WORK_KEYWORDS, Intent::WorkQuery),
];

/// Classifies a prompt by keyword membership over the lowercased text.
pub fn classify(prompt: &str) -> Intent {
    let prompt = prompt.to_lowercase();
    for (keywords, intent) in INTENT_RULES {
        if keywords.iter().any(|keyword| prompt.contains(keyword)) {
            return *intent;
        }
    }
    Intent::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shopping_keywords_classify_as_shopping() {
        for prompt in [
            "how many items do I have",
            "what did I shop for",
            "amount of milk",
        ] {
            assert_eq!(classify(prompt), Intent::ShoppingQuery, "{prompt}");
        }
    }

    #[test]
    fn travel_keywords_classify_as_travel() {
        for prompt in [
            "cheapest vacation spot",
            "which city should I visit",
            "all travelling destinations",
            "show my places",
        ] {
            assert_eq!(classify(prompt), Intent::TravelQuery, "{prompt}");
        }
    }

    #[test]
    fn work_keywords_classify_as_work() {
        for prompt in [
            "work with high priority",
            "office deadlines",
            "my job list",
            "all tasks",
        ] {
            assert_eq!(classify(prompt), Intent::WorkQuery, "{prompt}");
        }
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify("AMOUNT of Milk"), Intent::ShoppingQuery);
    }

    #[test]
    fn priority_order_resolves_multi_category_prompts() {
        // shopping beats travel and work
        assert_eq!(
            classify("items for my vacation work"),
            Intent::ShoppingQuery
        );
        // travel beats work
        assert_eq!(classify("city office"), Intent::TravelQuery);
    }

    #[test]
    fn unmatched_prompt_is_unknown() {
        assert_eq!(classify("hello there"), Intent::Unknown);
        assert_eq!(classify(""), Intent::Unknown);
    }

    #[test]
    fn rules_cover_every_non_unknown_intent_once() {
        let intents: Vec<_> = INTENT_RULES.iter().map(|(_, intent)| *intent).collect();
        assert_eq!(
            intents,
            vec![Intent::ShoppingQuery, Intent::TravelQuery, Intent::WorkQuery]
        );
    }
}
