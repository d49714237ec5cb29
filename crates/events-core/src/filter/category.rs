//! Category labels and the category criterion.

use serde::{Deserialize, Serialize};
use strsim::levenshtein;

/// Label of the "no category restriction" choice.
pub const ALL_CATEGORIES: &str = "Todos";

/// The product's category labels, in display order.
///
/// The backend does not enforce this set; events may carry other labels.
pub const CATEGORIES: &[&str] = &[
    ALL_CATEGORIES,
    "Música",
    "Teatro",
    "Cinema",
    "Arte",
    "Dança",
    "Literatura",
    "Gastronomia",
    "Exposição",
    "Festival",
    "Workshop",
    "Esporte",
];

/// Maximum Levenshtein distance to consider a label as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Category criterion of a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    /// No restriction.
    #[default]
    All,
    /// Only events whose category equals this label exactly.
    Only(String),
}

impl CategoryFilter {
    /// Builds a criterion from a label; empty input or [`ALL_CATEGORIES`]
    /// means no restriction.
    ///
    /// The label is kept as given. Front ends trim user input before this.
    pub fn parse(label: &str) -> Self {
        if label.is_empty() || label == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(label.to_string())
        }
    }

    /// Returns the label shown for this criterion.
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(label) => label,
        }
    }

    /// Returns true if this criterion restricts anything.
    pub fn is_active(&self) -> bool {
        matches!(self, CategoryFilter::Only(_))
    }

    /// Returns true if an event with `category` passes.
    ///
    /// Comparison is exact and case-sensitive; an event without a category
    /// passes only when there is no restriction.
    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == Some(wanted.as_str()),
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(label: String) -> Self {
        CategoryFilter::parse(&label)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.label().to_string()
    }
}

/// Returns true if `label` is one of the product's known categories.
pub fn is_known_category(label: &str) -> bool {
    CATEGORIES.contains(&label)
}

/// Suggests the known category closest to `input`, if one is close enough.
///
/// A label differing only in case (or accents, within the distance
/// threshold) is suggested; an exact match yields `None`.
pub fn suggest_category(input: &str) -> Option<&'static str> {
    if is_known_category(input) {
        return None;
    }
    let input_lower = input.to_lowercase();

    if let Some(same) = CATEGORIES
        .iter()
        .find(|label| label.to_lowercase() == input_lower)
    {
        return Some(*same);
    }

    let (best, distance) = CATEGORIES
        .iter()
        .map(|label| (*label, levenshtein(&input_lower, &label.to_lowercase())))
        .min_by_key(|(_, d)| *d)?;

    (distance <= MAX_SUGGESTION_DISTANCE).then_some(best)
}
