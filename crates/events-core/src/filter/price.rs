//! Price criterion.

use serde::{Deserialize, Serialize};

use super::error::{FilterError, FilterResult};

/// Upper end of the price slider, in BRL.
pub const PRICE_SLIDER_MAX: f64 = 500.0;

/// A closed price interval `[low, high]`.
///
/// `high == None` means no upper bound. Invariant: `0 <= low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    low: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    high: Option<f64>,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl PriceRange {
    /// The neutral range: everything from zero up.
    pub const fn unbounded() -> Self {
        Self {
            low: 0.0,
            high: None,
        }
    }

    /// Creates a range, validating the bounds.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidPrice`] for a negative or NaN bound and
    /// [`FilterError::InvertedPriceRange`] when `low > high`.
    pub fn new(low: f64, high: Option<f64>) -> FilterResult<Self> {
        for value in std::iter::once(low).chain(high) {
            if value.is_nan() || value < 0.0 {
                return Err(FilterError::InvalidPrice { value });
            }
        }
        if let Some(high) = high {
            if low > high {
                return Err(FilterError::InvertedPriceRange { low, high });
            }
        }
        Ok(Self { low, high })
    }

    /// Lower bound.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper bound, if any.
    pub fn high(&self) -> Option<f64> {
        self.high
    }

    /// Returns true if this range excludes anything.
    pub fn is_active(&self) -> bool {
        self.low > 0.0 || self.high.is_some()
    }

    /// Returns true if an event priced `[min, max]` passes.
    ///
    /// A missing price, or a price of zero, never excludes: events without
    /// price information are shown as free.
    pub fn admits(&self, price_min: Option<f64>, price_max: Option<f64>) -> bool {
        let low_ok = match price_min {
            Some(min) if min != 0.0 => min >= self.low,
            _ => true,
        };
        let high_ok = match (price_max, self.high) {
            (Some(max), Some(high)) if max != 0.0 => max <= high,
            _ => true,
        };
        low_ok && high_ok
    }
}
