//! Error types for building filter criteria.

use thiserror::Error;

/// A specialized Result type for filter construction.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors raised while turning user input into a [`super::FilterSpec`].
///
/// Evaluation itself never fails; every error surfaces before a spec exists.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FilterError {
    /// A price bound is negative or not a number.
    #[error("invalid price: {value} (must be a non-negative number)")]
    InvalidPrice {
        /// The rejected bound.
        value: f64,
    },

    /// The lower price bound is above the upper one.
    #[error("invalid price range: minimum {low} is greater than maximum {high}")]
    InvertedPriceRange {
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },

    /// A date bound could not be parsed.
    #[error("invalid date: '{input}' (expected YYYY-MM-DD or an RFC 3339 timestamp)")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },

    /// The start bound is after the end bound.
    #[error("invalid date range: '{from}' is after '{to}'")]
    InvertedDateRange {
        /// Start bound as given.
        from: String,
        /// End bound as given.
        to: String,
    },

    /// The time zone name is not in the IANA database.
    #[error("unknown time zone: {name}")]
    UnknownTimeZone {
        /// The rejected name.
        name: String,
    },
}

impl FilterError {
    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        FilterError::InvalidDate {
            input: input.into(),
        }
    }

    /// Creates an unknown time zone error.
    pub fn unknown_time_zone(name: impl Into<String>) -> Self {
        FilterError::UnknownTimeZone { name: name.into() }
    }
}
