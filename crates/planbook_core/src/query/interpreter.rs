//! Prompt-driven filtering and aggregation over category results.
//!
//! # Responsibility
//! - Apply secondary keyword filters (names, "all", extremes, priority
//!   level, deadline threshold) within the already-selected category.
//! - Render human-readable answer lines in a stable order.
//!
//! # Invariants
//! - Interpretation is state-free; the same prompt and rows always
//!   produce the same answer.
//! - An empty result set is `NoRecords`, distinct from a non-empty set
//!   whose entries were all filtered out.
//! - Extreme (cheapest/expensive) ties resolve to the first-seen entry.

use crate::model::entities::{Deadline, Item, OfficeWork, ParseError, Place, Priority};
use once_cell::sync::Lazy;
use regex::Regex;

/// Rendered outcome of one ask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Ordered answer lines; may be empty when every entry was filtered out.
    Lines(Vec<String>),
    /// The category query matched no records at all.
    NoRecords,
}

/// Typed result set of one category query.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryRows {
    Shopping(Vec<Item>),
    Travel(Vec<Place>),
    Work(Vec<OfficeWork>),
}

/// Interprets a category result set against the original prompt.
///
/// # Errors
/// - `ParseError` when a deadline query carries no well-formed
///   `DD-MM-YYYY` date.
pub fn interpret(prompt: &str, rows: &CategoryRows) -> Result<Answer, ParseError> {
    let prompt = prompt.to_lowercase();
    match rows {
        CategoryRows::Shopping(items) => Ok(interpret_shopping(&prompt, items)),
        CategoryRows::Travel(places) => Ok(interpret_travel(&prompt, places)),
        CategoryRows::Work(works) => interpret_work(&prompt, works),
    }
}

fn interpret_shopping(prompt: &str, items: &[Item]) -> Answer {
    if items.is_empty() {
        return Answer::NoRecords;
    }

    let lines = if prompt.contains("amount") {
        items
            .iter()
            .filter(|item| named_in_prompt(prompt, &item.item_name))
            .map(|item| {
                format!(
                    "Amount of {} is {}{}",
                    item.item_name, item.quantity, item.unit
                )
            })
            .collect()
    } else if prompt.contains("all") || prompt.contains("items") {
        items.iter().map(item_line).collect()
    } else {
        items
            .iter()
            .filter(|item| named_in_prompt(prompt, &item.item_name))
            .map(item_line)
            .collect()
    };
    Answer::Lines(lines)
}

fn item_line(item: &Item) -> String {
    format!("{}{} of {}", item.quantity, item.unit, item.item_name)
}

fn interpret_travel(prompt: &str, places: &[Place]) -> Answer {
    if places.is_empty() {
        return Answer::NoRecords;
    }

    let wants_cheapest = prompt.contains("cheapest");
    let wants_expensive = prompt.contains("expensive");

    let lines = if wants_cheapest || wants_expensive {
        let mut lines = Vec::new();
        if wants_cheapest {
            // Strict comparison keeps the first-seen entry on ties.
            let cheapest = places
                .iter()
                .skip(1)
                .fold(&places[0], |best, place| {
                    if place.estimated_cost < best.estimated_cost {
                        place
                    } else {
                        best
                    }
                });
            lines.push(format!(
                "City {} has minimum cost of {}",
                cheapest.city, cheapest.estimated_cost
            ));
        }
        if wants_expensive {
            let priciest = places
                .iter()
                .skip(1)
                .fold(&places[0], |best, place| {
                    if place.estimated_cost > best.estimated_cost {
                        place
                    } else {
                        best
                    }
                });
            lines.push(format!(
                "City {} has maximum cost of {}",
                priciest.city, priciest.estimated_cost
            ));
        }
        lines
    } else if ["all", "spots", "places", "cities"]
        .iter()
        .any(|keyword| prompt.contains(keyword))
    {
        places.iter().map(place_line).collect()
    } else {
        places
            .iter()
            .filter(|place| named_in_prompt(prompt, &place.city))
            .map(place_line)
            .collect()
    };
    Answer::Lines(lines)
}

fn place_line(place: &Place) -> String {
    format!(
        "City {} in {} with estimated cost of {}",
        place.city, place.country, place.estimated_cost
    )
}

fn interpret_work(prompt: &str, works: &[OfficeWork]) -> Result<Answer, ParseError> {
    if works.is_empty() {
        return Ok(Answer::NoRecords);
    }

    let lines = if prompt.contains("priority") {
        let requested = requested_levels(prompt);
        if requested.is_empty() {
            works.iter().map(work_line).collect()
        } else {
            let mut lines = Vec::new();
            for level in requested {
                lines.extend(
                    works
                        .iter()
                        .filter(|work| work.priority == level)
                        .map(|work| {
                            format!(
                                "Work {} with deadline {} has {} priority",
                                work.work_title,
                                work.deadline,
                                level.as_word()
                            )
                        }),
                );
            }
            lines
        }
    } else if prompt.contains("deadline") {
        let threshold = extract_deadline(prompt)?;
        works
            .iter()
            .filter(|work| work.deadline < threshold)
            .map(work_line)
            .collect()
    } else {
        works.iter().map(work_line).collect()
    };
    Ok(Answer::Lines(lines))
}

fn work_line(work: &OfficeWork) -> String {
    format!(
        "Work {} with deadline {} has {} priority",
        work.work_title,
        work.deadline,
        work.priority.as_db()
    )
}

/// Priority levels mentioned in the prompt, in HIGH > MEDIUM > LOW order.
/// "less" counts as LOW.
fn requested_levels(prompt: &str) -> Vec<Priority> {
    let mut levels = Vec::new();
    if prompt.contains("high") {
        levels.push(Priority::High);
    }
    if prompt.contains("medium") {
        levels.push(Priority::Medium);
    }
    if prompt.contains("low") || prompt.contains("less") {
        levels.push(Priority::Low);
    }
    levels
}

static DEADLINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2}-\d{1,2}-\d{4})\b").expect("deadline pattern is a valid regex")
});

/// Pulls the first `DD-MM-YYYY` date out of the prompt and parses it
/// strictly.
fn extract_deadline(prompt: &str) -> Result<Deadline, ParseError> {
    let captures = DEADLINE_PATTERN
        .captures(prompt)
        .ok_or(ParseError::MissingDeadline)?;
    Deadline::parse(&captures[1])
}

/// Verbatim (case-folded) name membership test against the prompt.
fn named_in_prompt(prompt: &str, name: &str) -> bool {
    prompt.contains(&name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<Item> {
        vec![Item::new("milk", 2, "l"), Item::new("bread", 1, "kg")]
    }

    fn places() -> Vec<Place> {
        vec![
            Place::new("Paris", "France", 500.0),
            Place::new("Rome", "Italy", 300.0),
        ]
    }

    fn works() -> Vec<OfficeWork> {
        vec![
            OfficeWork::new("A", Priority::High, Deadline::parse("01-05-2025").unwrap()),
            OfficeWork::new("B", Priority::Low, Deadline::parse("01-01-2025").unwrap()),
        ]
    }

    fn lines(answer: Answer) -> Vec<String> {
        match answer {
            Answer::Lines(lines) => lines,
            Answer::NoRecords => panic!("expected lines, got NoRecords"),
        }
    }

    #[test]
    fn empty_result_set_is_no_records_for_every_category() {
        assert_eq!(
            interpret("all items", &CategoryRows::Shopping(Vec::new())).unwrap(),
            Answer::NoRecords
        );
        assert_eq!(
            interpret("all places", &CategoryRows::Travel(Vec::new())).unwrap(),
            Answer::NoRecords
        );
        assert_eq!(
            interpret("all work", &CategoryRows::Work(Vec::new())).unwrap(),
            Answer::NoRecords
        );
    }

    #[test]
    fn all_filtered_out_is_empty_lines_not_no_records() {
        let answer = interpret("item called caviar", &CategoryRows::Shopping(items())).unwrap();
        assert_eq!(answer, Answer::Lines(Vec::new()));
    }

    #[test]
    fn amount_query_reports_quantity_for_named_items_only() {
        let answer =
            interpret("what amount of milk is left", &CategoryRows::Shopping(items())).unwrap();
        assert_eq!(lines(answer), vec!["Amount of milk is 2l"]);
    }

    #[test]
    fn all_items_lists_every_entry() {
        let answer = interpret("show all items", &CategoryRows::Shopping(items())).unwrap();
        assert_eq!(lines(answer), vec!["2l of milk", "1kg of bread"]);
    }

    #[test]
    fn named_item_query_lists_only_that_item() {
        let answer = interpret("do I need bread item", &CategoryRows::Shopping(items())).unwrap();
        assert_eq!(lines(answer), vec!["1kg of bread"]);
    }

    #[test]
    fn cheapest_returns_arg_min_city_and_cost() {
        let answer =
            interpret("cheapest vacation spot", &CategoryRows::Travel(places())).unwrap();
        assert_eq!(lines(answer), vec!["City Rome has minimum cost of 300"]);
    }

    #[test]
    fn expensive_returns_arg_max_city_and_cost() {
        let answer =
            interpret("most expensive destination", &CategoryRows::Travel(places())).unwrap();
        assert_eq!(lines(answer), vec!["City Paris has maximum cost of 500"]);
    }

    #[test]
    fn cost_ties_resolve_to_first_seen_place() {
        let tied = vec![
            Place::new("Lyon", "France", 300.0),
            Place::new("Rome", "Italy", 300.0),
        ];
        let answer = interpret("cheapest spot", &CategoryRows::Travel(tied)).unwrap();
        assert_eq!(lines(answer), vec!["City Lyon has minimum cost of 300"]);
    }

    #[test]
    fn all_places_lists_city_country_and_cost() {
        let answer = interpret("list all my places", &CategoryRows::Travel(places())).unwrap();
        assert_eq!(
            lines(answer),
            vec![
                "City Paris in France with estimated cost of 500",
                "City Rome in Italy with estimated cost of 300",
            ]
        );
    }

    #[test]
    fn named_city_query_lists_only_that_place() {
        let answer = interpret("what about the rome spot", &CategoryRows::Travel(places())).unwrap();
        assert_eq!(
            lines(answer),
            vec!["City Rome in Italy with estimated cost of 300"]
        );
    }

    #[test]
    fn priority_level_filter_returns_matching_works() {
        let answer =
            interpret("work with high priority", &CategoryRows::Work(works())).unwrap();
        assert_eq!(
            lines(answer),
            vec!["Work A with deadline 01-05-2025 has high priority"]
        );
    }

    #[test]
    fn less_is_an_alias_for_low_priority() {
        let answer =
            interpret("office tasks with less priority", &CategoryRows::Work(works())).unwrap();
        assert_eq!(
            lines(answer),
            vec!["Work B with deadline 01-01-2025 has low priority"]
        );
    }

    #[test]
    fn priority_without_level_lists_all_with_stored_priority() {
        let answer = interpret("work priority", &CategoryRows::Work(works())).unwrap();
        assert_eq!(
            lines(answer),
            vec![
                "Work A with deadline 01-05-2025 has HIGH priority",
                "Work B with deadline 01-01-2025 has LOW priority",
            ]
        );
    }

    #[test]
    fn deadline_filter_keeps_strictly_earlier_works() {
        let answer = interpret(
            "work with deadline before 01-03-2025",
            &CategoryRows::Work(works()),
        )
        .unwrap();
        assert_eq!(
            lines(answer),
            vec!["Work B with deadline 01-01-2025 has LOW priority"]
        );
    }

    #[test]
    fn deadline_equal_to_threshold_is_excluded() {
        let answer = interpret(
            "work with deadline 01-01-2025",
            &CategoryRows::Work(works()),
        )
        .unwrap();
        assert_eq!(lines(answer), Vec::<String>::new());
    }

    #[test]
    fn deadline_query_without_date_is_a_parse_error() {
        let err = interpret("work deadline soon", &CategoryRows::Work(works())).unwrap_err();
        assert_eq!(err, ParseError::MissingDeadline);
    }

    #[test]
    fn deadline_query_with_impossible_date_is_a_parse_error() {
        let err = interpret(
            "work deadline before 31-02-2025",
            &CategoryRows::Work(works()),
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::InvalidDeadline(_)));
    }

    #[test]
    fn default_work_query_lists_everything() {
        let answer = interpret("show my office list", &CategoryRows::Work(works())).unwrap();
        assert_eq!(lines(answer).len(), 2);
    }
}
