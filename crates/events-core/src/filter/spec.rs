//! The complete set of user-selected filter criteria.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::CategoryFilter;
use super::error::{FilterError, FilterResult};
use super::price::PriceRange;

/// The user's current search intent.
///
/// Always fully populated: an unset criterion holds its neutral value (empty
/// text, [`CategoryFilter::All`], [`PriceRange::unbounded`], no date bound),
/// and the default spec lets every event through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Case-insensitive substring matched against title, description and organizer.
    #[serde(default)]
    pub search: String,

    /// Category restriction.
    #[serde(default)]
    pub category: CategoryFilter,

    /// Case-insensitive substring matched against the location.
    #[serde(default)]
    pub location: String,

    /// Accepted price interval.
    #[serde(default)]
    pub price_range: PriceRange,

    /// Inclusive lower bound on the start date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,

    /// Inclusive upper bound on the start date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
}

impl FilterSpec {
    /// Returns the neutral spec.
    pub fn cleared() -> Self {
        Self::default()
    }

    /// Sets the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Sets the category restriction.
    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Sets the location text.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the price interval.
    pub fn with_price_range(mut self, price_range: PriceRange) -> Self {
        self.price_range = price_range;
        self
    }

    /// Sets both date bounds.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvertedDateRange`] if `from` is after `to`.
    pub fn with_dates(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> FilterResult<Self> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(FilterError::InvertedDateRange {
                    from: from.to_rfc3339(),
                    to: to.to_rfc3339(),
                });
            }
        }
        self.date_from = from;
        self.date_to = to;
        Ok(self)
    }

    /// Returns true if any criterion differs from its neutral value.
    pub fn has_active_filters(&self) -> bool {
        !self.search.is_empty()
            || self.category.is_active()
            || !self.location.is_empty()
            || self.price_range.is_active()
            || self.date_from.is_some()
            || self.date_to.is_some()
    }
}
